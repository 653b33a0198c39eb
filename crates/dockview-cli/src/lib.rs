//! dockview - Docker Engine dashboard for the terminal

pub mod commands;
pub mod format;
pub mod selector;
