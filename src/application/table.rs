use crate::client::{ApiClient, RequestOptions};
use crate::error::AppError;
use crate::model::list::{ListParams, ListResponse, encode_component};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Record stored in a backend table
pub trait TableRecord: DeserializeOwned + Send {
    /// Table name in `/table/<name>/...`
    const TABLE: &'static str;
    /// Singular noun used in messages
    const LABEL: &'static str;
    /// Values accepted by `insert`, without the owner
    type Draft: Serialize + Sync;
    /// Values accepted by `edit`
    type Patch: Serialize + Sync;

    /// Local checks run before a draft is sent
    fn check_draft(_draft: &Self::Draft) -> Result<(), AppError> {
        Ok(())
    }

    /// Local checks run before a patch is sent
    fn check_patch(_patch: &Self::Patch) -> Result<(), AppError> {
        Ok(())
    }
}

/// CRUD operations on one table, owned by the authenticated user
pub struct Table<R> {
    api: Arc<ApiClient>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: TableRecord> Table<R> {
    /// Creates the collection over a shared client
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _record: PhantomData,
        }
    }

    fn endpoint(action: &str) -> String {
        format!("/table/{}/{}", R::TABLE, action)
    }

    /// Lists records
    ///
    /// # Arguments
    /// * `params` - Optional paging, order and filter
    pub async fn list(&self, params: &ListParams) -> Result<ListResponse<R>, AppError> {
        let query = params.to_query_string();
        let mut endpoint = Self::endpoint("list");
        if !query.is_empty() {
            endpoint.push('?');
            endpoint.push_str(&query);
        }
        self.api.get(&endpoint).await
    }

    /// Fetches one record by id
    pub async fn get(&self, id: &str) -> Result<R, AppError> {
        let endpoint = Self::endpoint(&format!("view/{}", encode_component(id)));
        self.api.get(&endpoint).await
    }

    /// Creates a record owned by the current user
    ///
    /// The owner id comes from the access token. Without one, or when the
    /// draft fails its local checks, nothing is sent.
    ///
    /// # Returns
    /// * `Ok(R)` - The created record
    /// * `Err(AppError::Precondition)` - Not authenticated, or invalid draft
    /// * `Err(AppError::Api)` - The server inserted nothing
    pub async fn create(&self, draft: &R::Draft) -> Result<R, AppError> {
        let owner_id = self
            .api
            .session()
            .current_user_id()
            .ok_or_else(|| AppError::Precondition("Not authenticated".to_string()))?;
        R::check_draft(draft)?;

        let mut values = serde_json::to_value(draft)?;
        let Value::Object(fields) = &mut values else {
            return Err(AppError::Precondition(format!(
                "{} values must be an object",
                R::LABEL
            )));
        };
        fields.insert("owner_id".to_string(), Value::String(owner_id));

        let body = json!({ "values": values, "returning": "*" });
        let created: Vec<R> = self.api.post(&Self::endpoint("insert"), &body).await?;
        debug!("Inserted {} {} record(s)", created.len(), R::TABLE);
        created.into_iter().next().ok_or_else(|| AppError::Api {
            status: StatusCode::OK,
            message: format!(
                "Failed to create {} - access denied or validation failed",
                R::LABEL
            ),
        })
    }

    /// Applies a partial update, returning the server's raw answer
    pub async fn update(&self, id: &str, patch: &R::Patch) -> Result<Value, AppError> {
        R::check_patch(patch)?;
        let endpoint = Self::endpoint(&format!("edit/{}?returning=id", encode_component(id)));
        self.api.post(&endpoint, patch).await
    }

    /// Deletes a record by id
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let body = json!({ "where": format!("id = '{}'", id.replace('\'', "''")) });
        let _: Value = self.api.post(&Self::endpoint("delete"), &body).await?;
        Ok(())
    }
}
