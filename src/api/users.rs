//! User endpoints.

use serde_json::Value;

use super::Transport;
use crate::error::UseresponseError;

/// User-related API calls.
#[derive(Clone)]
pub struct UserService {
    transport: Transport,
}

impl UserService {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns `UseresponseError::NotFound` if the user doesn't exist.
    pub async fn get(&self, id: u64) -> Result<Value, UseresponseError> {
        self.transport.get(&format!("/users/{}.json", id), &[]).await
    }
}
