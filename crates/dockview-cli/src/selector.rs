//! Interactive container selector for CLI commands

use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Select};
use dockview_engine::ContainerDetail;

/// Context for filtering containers in the selector
#[derive(Debug, Clone, Copy)]
pub enum SelectionContext {
    /// Only running containers (for stop)
    Running,
    /// Containers that are not running (for start)
    Stopped,
    /// All containers (for rm)
    Any,
}

impl SelectionContext {
    /// Filter containers based on selection context
    pub fn filter<'a>(&self, containers: &'a [ContainerDetail]) -> Vec<&'a ContainerDetail> {
        containers.iter().filter(|c| self.matches(c)).collect()
    }

    fn matches(&self, container: &ContainerDetail) -> bool {
        match self {
            SelectionContext::Running => container.is_running(),
            SelectionContext::Stopped => !container.is_running(),
            SelectionContext::Any => true,
        }
    }

    /// Get a description for the empty state message
    fn description(&self) -> &'static str {
        match self {
            SelectionContext::Running => "running",
            SelectionContext::Stopped => "stopped",
            SelectionContext::Any => "",
        }
    }
}

/// Prompt for one container and return its ID
pub fn select_container(
    containers: &[ContainerDetail],
    context: SelectionContext,
    prompt: &str,
) -> Result<String> {
    let candidates = context.filter(containers);

    if candidates.is_empty() {
        let description = context.description();
        if description.is_empty() {
            bail!("No containers found");
        }
        bail!("No {} containers found", description);
    }

    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        bail!("No container specified (interactive selection requires a terminal)");
    }

    let items: Vec<String> = candidates
        .iter()
        .map(|c| format!("{}  {}  [{}]", c.display_name(), c.image(), c.state.status))
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;

    match selection {
        Some(index) => Ok(candidates[index].id.to_string()),
        None => bail!("Selection cancelled"),
    }
}
