/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Entry point bundling the session, the request layer and the services
//!
//! # Example
//! ```ignore
//! use dale_client::prelude::*;
//!
//! let client = DaleClient::from_env()?;
//! if client.auth().restore_session().await.is_none() {
//!     client.auth().login("me@example.com", "secret").await?;
//! }
//! let notes = client.notes().list(&ListParams::new().with_order("-created")).await?;
//! ```

use crate::application::auth::AuthService;
use crate::application::table::Table;
use crate::client::ApiClient;
use crate::config::RuntimeConfig;
use crate::diagnostics::LogSink;
use crate::error::AppError;
use crate::model::event::DaleEvent;
use crate::model::note::Note;
use crate::session::Session;
use crate::storage::{FileStore, KeyValueStore, StorageKeys};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for the Dale backend
///
/// Owns a single [`Session`], shared by reference with every service so all of
/// them see the same tokens.
#[derive(Clone)]
pub struct DaleClient {
    api: Arc<ApiClient>,
    auth: AuthService,
    notes: Table<Note>,
    events: Table<DaleEvent>,
}

impl DaleClient {
    /// Creates a client from explicit parts
    ///
    /// # Arguments
    /// * `config` - Runtime inputs (base address, project namespace)
    /// * `store` - Durable storage for the session
    /// * `sink` - Destination of the diagnostics lines
    pub fn new(
        config: &RuntimeConfig,
        store: Arc<dyn KeyValueStore>,
        sink: LogSink,
    ) -> Result<Self, AppError> {
        Self::with_timeout(config, store, sink, config.request_timeout())
    }

    /// Creates a client with a custom response timeout
    pub fn with_timeout(
        config: &RuntimeConfig,
        store: Arc<dyn KeyValueStore>,
        sink: LogSink,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let keys = StorageKeys::new(config.storage_prefix());
        let session = Arc::new(Session::new(store, keys, sink.clone()));
        let api = ApiClient::new(config, session, sink)?.with_timeout(timeout);
        Ok(Self::from_api(Arc::new(api)))
    }

    /// Creates a client from the environment, persisting to the platform data dir
    pub fn from_env() -> Result<Self, AppError> {
        let config = RuntimeConfig::from_env();
        let path = FileStore::default_location()?;
        debug!("Persisting session to {}", path.display());
        Self::new(&config, Arc::new(FileStore::new(path)), LogSink::default())
    }

    /// Wraps an existing request layer
    pub fn from_api(api: Arc<ApiClient>) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            notes: Table::new(api.clone()),
            events: Table::new(api.clone()),
            api,
        }
    }

    /// Authentication operations
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// The `notes` collection
    #[must_use]
    pub fn notes(&self) -> &Table<Note> {
        &self.notes
    }

    /// The `events` collection
    #[must_use]
    pub fn events(&self) -> &Table<DaleEvent> {
        &self.events
    }

    /// Shared session
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        self.api.session()
    }

    /// Request layer, for endpoints without a typed helper
    #[must_use]
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }
}
