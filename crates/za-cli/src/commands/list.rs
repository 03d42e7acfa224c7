use za_client::resources::descriptor;
use za_client::{AdminClient, DataProvider, ListParams, ListResult};

use super::{guarded, render_table, warn_if_not_permitted};

/// Render a listing as a table using the resource's columns.
pub fn render(resource: &str, result: &ListResult) -> String {
    if result.data.is_empty() {
        return format!("No {resource} records.\n");
    }
    let columns = descriptor(resource).map(|d| d.columns).unwrap_or(&[]);
    let mut out = render_table(columns, &result.data);
    out.push_str(&format!("{} record(s)\n", result.total));
    out
}

pub async fn run(client: &AdminClient, resource: &str, json_output: bool) -> anyhow::Result<()> {
    warn_if_not_permitted(client, resource).await;
    let result = guarded(
        client,
        client.data.get_list(resource, &ListParams::default()),
    )
    .await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render(resource, &result));
    }
    Ok(())
}
