pub mod create;
pub mod list;
pub mod login;
pub mod logout;
pub mod resources;
pub mod show;
pub mod whoami;

use std::future::Future;

use serde_json::Value;
use za_client::resources::descriptor;
use za_client::{AdminClient, AuthProvider, ClientError, Record};
use za_core::types::Role;

/// Map client errors to user-friendly messages.
pub fn friendly_error(err: ClientError) -> anyhow::Error {
    match err {
        ClientError::NotAuthenticated => {
            anyhow::anyhow!("Not logged in. Run `za login <username>` first.")
        }
        ClientError::Connect(_) => anyhow::anyhow!(
            "Could not connect to the backend. Is it running?\n  \
             (hint: check --api-url or ZEAZ_API_URL)"
        ),
        ClientError::Http { status: 401, message } => anyhow::anyhow!(
            "The backend rejected the session ({message}). Run `za login <username>` again."
        ),
        ClientError::Http { status: 403, message } => {
            anyhow::anyhow!("Your role is not allowed to do that ({message}).")
        }
        other => anyhow::anyhow!(other),
    }
}

/// Run a data call behind the auth guard: refuse without a token, and let
/// the auth gate see any failure before it is reported.
pub async fn guarded<T, F>(client: &AdminClient, call: F) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, ClientError>>,
{
    client.auth.check_auth().await.map_err(friendly_error)?;
    match call.await {
        Ok(value) => Ok(value),
        Err(err) => {
            client.auth.check_error(&err).await.map_err(friendly_error)?;
            Err(friendly_error(err))
        }
    }
}

/// Warn when the held role is not one the backend accepts for `resource`.
/// The call still goes out; the backend has the final say.
pub async fn warn_if_not_permitted(client: &AdminClient, resource: &str) -> Role {
    let role = client.auth.get_permissions().await;
    if let Some(desc) = descriptor(resource) {
        if !desc.allows(role) {
            tracing::warn!(%role, resource, "role is not permitted for this resource");
        }
    }
    role
}

/// Render a JSON value as a table cell.
pub fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Render records as a fixed-width text table. With no `columns`, every key
/// of the first record is shown.
pub fn render_table(columns: &[&str], records: &[Record]) -> String {
    let owned: Vec<String>;
    let columns: Vec<&str> = if columns.is_empty() {
        owned = records
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default();
        owned.iter().map(String::as_str).collect()
    } else {
        columns.to_vec()
    };

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| columns.iter().map(|c| cell(r.get(*c))).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(columns.clone()));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn table_uses_given_columns() {
        let records = vec![
            record(json!({"id": "job_2", "type": "tiktok_video", "status": "rendering", "extra": 1})),
            record(json!({"id": "job_1", "type": "tiktok_feed_form", "status": "generated"})),
        ];
        let out = render_table(&["id", "type", "status"], &records);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], "id     type              status");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "job_2  tiktok_video      rendering");
        assert_eq!(lines[3], "job_1  tiktok_feed_form  generated");
        assert!(!out.contains("extra"));
    }

    #[test]
    fn table_falls_back_to_record_keys() {
        let records = vec![record(json!({"id": "admin", "job_count": 3}))];
        let out = render_table(&[], &records);
        assert!(out.starts_with("id"));
        assert!(out.contains("job_count"));
        assert!(out.contains('3'));
    }

    #[test]
    fn cells_render_null_as_blank() {
        assert_eq!(cell(Some(&Value::Null)), "");
        assert_eq!(cell(None), "");
        assert_eq!(cell(Some(&json!(4))), "4");
        assert_eq!(cell(Some(&json!("ok"))), "ok");
    }

    #[test]
    fn friendly_messages() {
        assert!(friendly_error(ClientError::NotAuthenticated)
            .to_string()
            .contains("za login"));
        assert!(friendly_error(ClientError::Connect("refused".into()))
            .to_string()
            .contains("Could not connect"));
        let forbidden = ClientError::Http {
            status: 403,
            message: "Forbidden".into(),
        };
        assert!(friendly_error(forbidden).to_string().contains("not allowed"));
    }
}
