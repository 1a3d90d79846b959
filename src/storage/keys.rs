use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};

/// Storage keys of one session, namespaced by project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    /// Creates keys under `prefix`, e.g. `dale` or `dale:<project>`
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Namespace shared by every key
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Namespaced form of `name`
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }

    /// Key of the access token
    #[must_use]
    pub fn access_token(&self) -> String {
        self.key(ACCESS_TOKEN_KEY)
    }

    /// Key of the refresh token
    #[must_use]
    pub fn refresh_token(&self) -> String {
        self.key(REFRESH_TOKEN_KEY)
    }

    /// Key of the cached user profile
    #[must_use]
    pub fn user(&self) -> String {
        self.key(USER_KEY)
    }
}
