use za_client::{AdminClient, AuthProvider};

use super::friendly_error;

/// Exchange `username` for a token and persist the session.
pub async fn run(client: &AdminClient, username: &str) -> anyhow::Result<()> {
    let session = client.auth.login(username).await.map_err(|err| match err {
        za_client::ClientError::AuthenticationFailed(reason) => {
            anyhow::anyhow!("Login failed for {username:?}: {reason}")
        }
        other => friendly_error(other),
    })?;

    println!("Logged in as {username} (role: {})", session.role);
    Ok(())
}
