//! Docker Engine client for dockview
//!
//! This crate talks to the Docker Engine HTTP API: it resolves the base URL
//! from the connection settings, lists and inspects containers and images,
//! starts/stops/removes them, and filters the results client-side.

mod client;
mod error;
pub mod filter;
mod operation;
mod transport;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::*;
pub use error::*;
pub use filter::{filter_records, Searchable};
pub use operation::*;
pub use transport::*;
pub use types::*;

pub use reqwest::Url;
