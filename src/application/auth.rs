/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Authentication operations
//!
//! Every successful call feeds the returned tokens through
//! [`Session::set_tokens`](crate::session::Session::set_tokens), so the
//! in-memory and persisted session stay in step.

use crate::client::{ApiClient, RequestOptions};
use crate::constants::{
    LOGIN_ENDPOINT, LOGOUT_ENDPOINT, REFRESH_TOKEN_ENDPOINT, SIGN_UP_ENDPOINT, USERS_TABLE,
};
use crate::error::AppError;
use crate::model::auth::{
    AuthResponse, LoginPayload, RefreshTokenPayload, SignUpPayload, SignUpRequest,
    TokenRefreshResponse, User,
};
use crate::model::list::encode_component;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sign-up, login, logout and token refresh against the users table
#[derive(Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    /// Creates the service over a shared client
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Creates an account with the `guest` role and signs in
    ///
    /// # Returns
    /// * `Ok(AuthResponse)` - Tokens and the new user, already stored in the session
    /// * `Err(AppError)` - Validation failures carry per-field messages
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthResponse, AppError> {
        let result: AuthResponse = self
            .api
            .post(SIGN_UP_ENDPOINT, &SignUpPayload::from(request))
            .await?;
        self.api
            .session()
            .set_tokens(
                Some(&result.token),
                Some(&result.refresh_token),
                Some(&result.record),
            )
            .await;
        info!("Signed up as {}", result.record.username);
        Ok(result)
    }

    /// Signs in with a username or email and a password
    pub async fn login(&self, identity: &str, password: &str) -> Result<AuthResponse, AppError> {
        let result: AuthResponse = self
            .api
            .post(LOGIN_ENDPOINT, &LoginPayload { identity, password })
            .await?;
        self.api
            .session()
            .set_tokens(
                Some(&result.token),
                Some(&result.refresh_token),
                Some(&result.record),
            )
            .await;
        info!("Logged in as {}", result.record.username);
        Ok(result)
    }

    /// Revokes the session on the server and clears it locally
    ///
    /// The local session is cleared whatever the server answers; a server
    /// failure is still returned to the caller.
    pub async fn logout(&self) -> Result<(), AppError> {
        let revoked = self
            .api
            .request::<Value>(LOGOUT_ENDPOINT, RequestOptions::post())
            .await;
        self.api.session().set_tokens(None, None, None).await;
        match revoked {
            Ok(_) => {
                info!("Logged out");
                Ok(())
            }
            Err(e) => {
                warn!("Server logout failed, local session cleared anyway: {}", e);
                Err(e)
            }
        }
    }

    /// Exchanges the stored refresh token for new tokens
    ///
    /// # Returns
    /// * `Ok(TokenRefreshResponse)` - New tokens, already stored in the session
    /// * `Err(AppError::Precondition)` - No refresh token is held; nothing is sent
    pub async fn refresh_token(&self) -> Result<TokenRefreshResponse, AppError> {
        let refresh_token = self
            .api
            .session()
            .refresh_token()
            .ok_or_else(|| AppError::Precondition("No refresh token".to_string()))?;
        let result: TokenRefreshResponse = self
            .api
            .post(
                REFRESH_TOKEN_ENDPOINT,
                &RefreshTokenPayload {
                    refresh_token: &refresh_token,
                },
            )
            .await?;
        self.api
            .session()
            .set_tokens(Some(&result.token), Some(&result.refresh_token), None)
            .await;
        debug!("Access token refreshed");
        Ok(result)
    }

    /// Fetches the profile of the user the access token belongs to
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Fresh profile, also cached in storage
    /// * `Ok(None)` - No token, or no user id in it; nothing is sent
    /// * `Err(AppError)` - The fetch failed
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = self.api.session().current_user_id() else {
            return Ok(None);
        };
        let endpoint = format!(
            "/table/{}/view/{}",
            USERS_TABLE,
            encode_component(&user_id)
        );
        let user: User = self.api.get(&endpoint).await?;
        self.api.session().store_user(&user).await;
        Ok(Some(user))
    }

    /// Restores the session persisted by a previous run
    ///
    /// Loads the stored tokens and, when one exists, confirms it by fetching
    /// the profile. A server rejection clears the session; a timeout or a
    /// network failure keeps the tokens for a later attempt.
    pub async fn restore_session(&self) -> Option<User> {
        let state = self.api.session().load_tokens().await;
        if !state.is_authenticated() {
            return None;
        }
        match self.current_user().await {
            Ok(user) => user,
            Err(e @ (AppError::Api { .. } | AppError::Validation { .. })) => {
                warn!("Stored session rejected, clearing tokens: {}", e);
                self.api.session().set_tokens(None, None, None).await;
                None
            }
            Err(e) => {
                warn!("Session restore failed, keeping tokens: {}", e);
                None
            }
        }
    }
}
