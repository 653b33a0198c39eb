//! Configuration for dockview
//!
//! This crate handles the global configuration file
//! (`~/.config/dockview/config.toml`) and the Docker Engine connection
//! settings stored in it.

mod error;
mod global;

pub use error::*;
pub use global::*;
