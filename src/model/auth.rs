/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::SIGN_UP_ROLE;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User profile as returned by the users table
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// Record id
    pub id: String,
    /// Unique handle
    #[serde(default)]
    pub username: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Avatar file reference
    #[serde(default)]
    pub avatar: Option<String>,
    /// Role, `guest` for self-registered accounts
    #[serde(default)]
    pub role: String,
    /// Creation timestamp as sent by the server
    #[serde(default)]
    pub created: String,
    /// Last update timestamp as sent by the server
    #[serde(default)]
    pub updated: String,
}

/// Response of sign-up and password login
#[derive(DebugPretty, DisplaySimple, Clone, Deserialize, Serialize)]
pub struct AuthResponse {
    /// Access token (JWT)
    pub token: String,
    /// Refresh token
    pub refresh_token: String,
    /// Whether the email address is verified
    #[serde(default)]
    pub verified: Option<bool>,
    /// Authenticated user
    pub record: User,
}

/// Response of the token refresh endpoint
#[derive(DebugPretty, DisplaySimple, Clone, Deserialize, Serialize)]
pub struct TokenRefreshResponse {
    /// New access token
    pub token: String,
    /// New refresh token
    pub refresh_token: String,
    /// User, when the server includes it
    #[serde(default)]
    pub record: Option<User>,
}

/// Fields required to create an account
#[derive(Clone, Deserialize, Serialize)]
pub struct SignUpRequest {
    /// Unique handle
    pub username: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Password repeated
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
    /// Display name
    pub name: String,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("password_confirm", &"***")
            .field("name", &self.name)
            .finish()
    }
}

/// Sign-up body, the request plus the fixed role
#[derive(Serialize)]
pub(crate) struct SignUpPayload<'a> {
    #[serde(flatten)]
    pub request: &'a SignUpRequest,
    pub role: &'static str,
}

impl<'a> From<&'a SignUpRequest> for SignUpPayload<'a> {
    fn from(request: &'a SignUpRequest) -> Self {
        Self {
            request,
            role: SIGN_UP_ROLE,
        }
    }
}

/// Password login body
#[derive(Serialize)]
pub(crate) struct LoginPayload<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

/// Token refresh body
#[derive(Serialize)]
pub(crate) struct RefreshTokenPayload<'a> {
    pub refresh_token: &'a str,
}
