/// Users, authentication requests and responses
pub mod auth;
/// Countdown events
pub mod event;
/// List parameters, pages and URL component encoding
pub mod list;
/// Text notes
pub mod note;
