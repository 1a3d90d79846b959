/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Dale Client Prelude
//!
//! Commonly used types of the crate in one import.
//!
//! ## Usage
//!
//! ```rust
//! use dale_client::prelude::*;
//!
//! let config = RuntimeConfig::new();
//! assert_eq!(config.api_base_url(), "http://localhost:8787/api/v1");
//! ```

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Runtime inputs and base address resolution
pub use crate::config::{RuntimeConfig, resolve_api_base};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Error type and server failure classification
pub use crate::error::{ApiFailure, AppError};

// ============================================================================
// SESSION, STORAGE AND DIAGNOSTICS
// ============================================================================

/// Session state
pub use crate::session::{Session, SessionState};

/// Key-value storage
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageKeys};

/// Diagnostics sink
pub use crate::diagnostics::{LogBuffer, LogLevel, LogRecord, LogSink};

// ============================================================================
// CLIENT AND SERVICES
// ============================================================================

/// Request layer
pub use crate::client::{ApiClient, RequestOptions};

/// Services and facade
pub use crate::application::auth::AuthService;
pub use crate::application::client::DaleClient;
pub use crate::application::table::{Table, TableRecord};

// ============================================================================
// MODELS
// ============================================================================

/// Authentication models
pub use crate::model::auth::{AuthResponse, SignUpRequest, TokenRefreshResponse, User};

/// Event models
pub use crate::model::event::{DaleEvent, EventProgress, EventUpdate, NewEvent};

/// List models
pub use crate::model::list::{ListParams, ListResponse};

/// Note models
pub use crate::model::note::{NewNote, Note, NoteUpdate};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};

/// Re-export chrono for date/time handling
pub use chrono::{DateTime, Utc};

/// Re-export reqwest for custom requests
pub use reqwest::Method;
