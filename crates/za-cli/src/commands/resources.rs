use za_client::resources::{display_path, visible_to, ResourceDescriptor, RESOURCES};
use za_client::{AdminClient, AuthProvider};
use za_core::types::Role;

/// One line per resource: name, label, operations and the endpoints behind them.
pub fn render(resources: &[&ResourceDescriptor]) -> String {
    let name_width = resources.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for r in resources {
        let mut endpoints = Vec::new();
        if let Some(list) = r.list {
            endpoints.push(format!("GET {}", display_path(list.path)));
        }
        if let Some(get) = r.get {
            endpoints.push(format!("GET {}/{{id}}", display_path(get)));
        }
        if let Some(create) = r.create {
            endpoints.push(format!("POST {}", display_path(create)));
        }
        out.push_str(&format!(
            "{:<name_width$}  {}  [{}]\n    {}\n",
            r.name,
            r.label,
            r.operations().join(", "),
            endpoints.join(", "),
        ));
    }
    out
}

/// Resources offered to `role`, or all of them when `all` is set.
pub fn for_role(role: Role, all: bool) -> Vec<&'static ResourceDescriptor> {
    if all {
        RESOURCES.iter().collect()
    } else {
        visible_to(role).collect()
    }
}

pub async fn run(client: &AdminClient, all: bool) -> anyhow::Result<()> {
    let role = client.auth.get_permissions().await;
    let visible = for_role(role, all);
    if !all {
        println!("Resources available to role {role}:");
    }
    print!("{}", render(&visible));
    Ok(())
}
