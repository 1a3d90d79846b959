/// Module containing environment configuration helpers
pub mod config;
/// Module containing JWT payload decoding helpers
pub mod jwt;
/// Module containing logging utilities
pub mod logger;

pub use jwt::*;
pub use logger::*;
