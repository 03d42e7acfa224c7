use za_client::{AdminClient, AuthProvider};

/// Forget the persisted session. Succeeds even when nobody is logged in.
pub async fn run(client: &AdminClient) -> anyhow::Result<()> {
    client.auth.logout().await;
    println!("Logged out.");
    Ok(())
}
