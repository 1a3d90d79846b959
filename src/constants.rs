/// Budget for a single request, from send until response headers arrive
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Backend port used by preview deployments
pub const PREVIEW_API_PORT: u16 = 8786;
/// Backend port used by every other deployment
pub const DEFAULT_API_PORT: u16 = 8787;
/// Project identifiers starting with this prefix denote a preview environment
pub const PREVIEW_PROJECT_PREFIX: &str = "__preview__";
/// Path appended to a bare host to reach the REST surface
pub const API_PATH: &str = "/api/v1";
/// Storage namespace used when no project identifier is available
pub const STORAGE_NAMESPACE: &str = "dale";
/// Key holding the access token
pub const ACCESS_TOKEN_KEY: &str = "auth_token";
/// Key holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Key holding the cached user profile
pub const USER_KEY: &str = "auth_user";
/// Unnamespaced keys written by older builds, removed on startup
pub const LEGACY_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];
/// Prefix of every diagnostics line emitted by the client
pub const LOG_PREFIX: &str = "[API]";
/// Default capacity of an in-memory diagnostics buffer
pub const DEFAULT_LOG_BUFFER_CAPACITY: usize = 500;
/// User agent string sent with every request
pub const USER_AGENT: &str = "dale-client/0.1.0";
/// Role assigned to accounts created through sign-up
pub const SIGN_UP_ROLE: &str = "guest";

/// Sign-up endpoint
pub const SIGN_UP_ENDPOINT: &str = "/table/users/auth/sign-up";
/// Password login endpoint
pub const LOGIN_ENDPOINT: &str = "/table/users/auth/login-password";
/// Logout endpoint
pub const LOGOUT_ENDPOINT: &str = "/table/users/auth/logout";
/// Token refresh endpoint
pub const REFRESH_TOKEN_ENDPOINT: &str = "/table/users/auth/refresh-token";
/// Users table, used to fetch the current profile
pub const USERS_TABLE: &str = "users";
