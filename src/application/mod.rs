/// Authentication operations
pub mod auth;
/// Client facade bundling the session and the services
pub mod client;
/// Generic table collections
pub mod table;
