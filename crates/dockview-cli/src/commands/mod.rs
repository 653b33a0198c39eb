//! CLI command implementations

mod config;
mod containers;
mod images;

pub use config::*;
pub use containers::*;
pub use images::*;

use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use dockview_engine::OperationResult;

use crate::format::notice;

/// Print an operation outcome the way the view reports it
pub fn report(result: &OperationResult) {
    if result.is_error() {
        eprintln!("{}", notice(result));
    } else {
        println!("{}", notice(result));
    }
}

/// Ask before a destructive action unless `yes` was given
fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        bail!("Refusing to continue without confirmation (use --yes)");
    }

    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
