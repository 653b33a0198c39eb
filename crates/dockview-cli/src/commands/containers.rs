//! Container commands: list, start, stop, rm

use anyhow::Result;
use dockview_engine::{filter_records, EngineClient, OperationResult};

use super::{confirm, report};
use crate::format::container_table;

/// List containers with their details, optionally narrowed by `search`.
///
/// An unreachable engine is shown as an unavailable list, not an error.
pub async fn containers(client: &EngineClient, search: Option<&str>) -> Result<()> {
    match render_containers(client, search).await {
        Ok(listing) => print!("{}", listing),
        Err(e) => {
            eprintln!("Container list unavailable: {}", e);
            eprintln!(
                "\nEngine: {} (change it with 'dockview config set --engine-url <URL>')",
                client.resolve_base_url()
            );
        }
    }
    Ok(())
}

/// Container table, or the empty-state line, for the current engine state
pub async fn render_containers(
    client: &EngineClient,
    search: Option<&str>,
) -> dockview_engine::Result<String> {
    let details = client.list_all_container_details().await?;

    let total = details.len();
    let details = filter_records(details, search);
    tracing::debug!("{} of {} containers shown", details.len(), total);

    Ok(if details.is_empty() && total == 0 {
        "No containers found.\n".to_string()
    } else if details.is_empty() {
        format!("No containers match '{}'.\n", search.unwrap_or_default().trim())
    } else {
        container_table(&details)
    })
}

/// Start a container
pub async fn start(client: &EngineClient, container: &str) -> Result<OperationResult> {
    let result = client.start_container(container).await;
    report(&result);
    Ok(result)
}

/// Stop a container
pub async fn stop(client: &EngineClient, container: &str) -> Result<OperationResult> {
    let result = client.stop_container(container).await;
    report(&result);
    Ok(result)
}

/// Remove a container after confirmation. `None` if the user declined.
pub async fn remove(
    client: &EngineClient,
    container: &str,
    force: bool,
    yes: bool,
) -> Result<Option<OperationResult>> {
    let prompt = if force {
        format!(
            "Remove container '{}'? This cannot be undone; a running container is killed first.",
            container
        )
    } else {
        format!("Remove container '{}'? This cannot be undone.", container)
    };

    if !confirm(&prompt, yes)? {
        println!("Cancelled.");
        return Ok(None);
    }

    let result = client.remove_container(container, force).await;
    report(&result);
    Ok(Some(result))
}
