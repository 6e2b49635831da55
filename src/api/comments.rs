//! Comment endpoints.

use serde_json::Value;

use super::Transport;
use crate::error::UseresponseError;
use crate::models::CommentQuery;

/// Comment-related API calls.
#[derive(Clone)]
pub struct CommentService {
    transport: Transport,
}

impl CommentService {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Searches the comments of `query.object_id`.
    pub async fn search(&self, query: &CommentQuery) -> Result<Value, UseresponseError> {
        let params = query.to_params()?;
        let path = format!("/objects/{}/comments.json", query.object_id);
        self.transport.get(&path, &params).await
    }
}
