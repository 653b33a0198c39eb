//! Image commands: list, rmi

use anyhow::Result;
use chrono::{DateTime, Utc};
use dockview_engine::{filter_records, EngineClient, OperationResult};

use super::{confirm, report};
use crate::format::image_table;

/// List images from the engine's disk usage report
pub async fn images(client: &EngineClient, search: Option<&str>) -> Result<()> {
    match render_images(client, search, Utc::now()).await {
        Ok(listing) => print!("{}", listing),
        Err(e) => eprintln!("Image list unavailable: {}", e),
    }
    Ok(())
}

/// Image table, or the empty-state line; ages are relative to `now`
pub async fn render_images(
    client: &EngineClient,
    search: Option<&str>,
    now: DateTime<Utc>,
) -> dockview_engine::Result<String> {
    let images = client.list_images().await?;

    let total = images.len();
    let images = filter_records(images, search);
    tracing::debug!("{} of {} images shown", images.len(), total);

    Ok(if images.is_empty() && total == 0 {
        "No images found.\n".to_string()
    } else if images.is_empty() {
        format!("No images match '{}'.\n", search.unwrap_or_default().trim())
    } else {
        image_table(&images, now)
    })
}

/// Remove an image after confirmation. `None` if the user declined.
pub async fn remove_image(
    client: &EngineClient,
    image: &str,
    yes: bool,
) -> Result<Option<OperationResult>> {
    let prompt = format!("Remove image '{}'? This cannot be undone.", image);
    if !confirm(&prompt, yes)? {
        println!("Cancelled.");
        return Ok(None);
    }

    let result = client.remove_image(image).await;
    report(&result);
    Ok(Some(result))
}
