use za_client::{AdminClient, AuthProvider};

use super::friendly_error;

/// Describe the current session without contacting the backend.
pub fn describe(client: &AdminClient, role: za_core::types::Role) -> anyhow::Result<String> {
    let identity = client.auth.identity().map_err(friendly_error)?;
    Ok(match identity {
        Some(_) => format!("Logged in (role: {role})"),
        None => format!("Not logged in (permissions default to {role})"),
    })
}

pub async fn run(client: &AdminClient) -> anyhow::Result<()> {
    let role = client.auth.get_permissions().await;
    println!("{}", describe(client, role)?);
    println!("Backend: {}", client.base_url());
    Ok(())
}

#[cfg(test)]
mod tests {
    use za_core::session_store::SessionStore;
    use za_core::types::{Role, Session};

    use super::*;

    #[test]
    fn describes_missing_session() {
        let client = AdminClient::new("http://127.0.0.1:9", SessionStore::in_memory()).unwrap();
        let text = describe(&client, Role::User).unwrap();
        assert_eq!(text, "Not logged in (permissions default to user)");
    }

    #[tokio::test]
    async fn describes_held_session() {
        let store = SessionStore::in_memory();
        store.save(&Session::new("tok", Role::Finance)).unwrap();
        let client = AdminClient::new("http://127.0.0.1:9", store).unwrap();

        let role = client.auth.get_permissions().await;
        assert_eq!(describe(&client, role).unwrap(), "Logged in (role: finance)");
    }
}
