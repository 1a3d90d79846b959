/// Module containing the session token state and its persistence
pub mod tokens;

pub use tokens::{Session, SessionState};
