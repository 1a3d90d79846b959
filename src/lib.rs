//! # Dale Client
//!
//! Session and request layer for the Dale backend, a schema-driven REST API
//! serving countdown events and notes.
//!
//! ## Features
//!
//! - Base address resolution from runtime-injected inputs
//! - Bearer token lifecycle with best-effort write-through persistence
//! - A single request primitive with a fixed timeout and classified errors
//! - Sign-up, login, logout, token refresh and session restore
//! - Typed collections for notes and events
//! - Injectable diagnostics sink
//!
//! ## Quick start
//!
//! ```ignore
//! use dale_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let client = DaleClient::from_env()?;
//!     client.auth().login("me@example.com", "secret").await?;
//!     let events = client.events().list(&ListParams::new().with_order("-created")).await?;
//!     for event in events.items {
//!         info!("{}: {:?}", event.title, event.progress(Utc::now()));
//!     }
//!     Ok(())
//! }
//! ```

/// Client facade, authentication and table services
pub mod application;
/// Request layer
pub mod client;
/// Runtime configuration and base address resolution
pub mod config;
/// Fixed values shared across the crate
pub mod constants;
/// Injectable diagnostics sink
pub mod diagnostics;
/// Error types
pub mod error;
/// Wire models
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Session token state
pub mod session;
/// Key-value storage backends
pub mod storage;
/// Helpers: environment, logging, JWT decoding
pub mod utils;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
