use serde_json::Value;
use za_api_types::JobRecord;
use za_client::{AdminClient, DataProvider, Record};

use super::{cell, guarded, warn_if_not_permitted};

/// Render a job with its common fields first and the payload pretty-printed.
fn render_job(job: &JobRecord) -> String {
    let mut out = format!(
        "id:       {}\ntype:     {}\nstatus:   {}\ncreated:  {}\n",
        job.id,
        job.job_type,
        job.status,
        job.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    if let Some(payload) = job.payload() {
        let pretty = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        out.push_str("payload:\n");
        for line in pretty.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Render any record as `key: value` lines.
fn render_fields(record: &Record) -> String {
    let width = record.keys().map(String::len).max().unwrap_or(0) + 1;
    record
        .iter()
        .map(|(k, v)| format!("{:<width$} {}\n", format!("{k}:"), cell(Some(v))))
        .collect()
}

pub fn render(record: &Record) -> String {
    match serde_json::from_value::<JobRecord>(Value::Object(record.clone())) {
        Ok(job) => render_job(&job),
        Err(_) => render_fields(record),
    }
}

pub async fn run(client: &AdminClient, resource: &str, id: &str, json_output: bool) -> anyhow::Result<()> {
    warn_if_not_permitted(client, resource).await;
    let record = guarded(client, client.data.get_one(resource, id)).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", render(&record));
    }
    Ok(())
}
