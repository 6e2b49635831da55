//! Object endpoints.

use serde_json::Value;

use super::Transport;
use crate::error::UseresponseError;
use crate::models::NewObject;

/// Object-related API calls.
#[derive(Clone)]
pub struct ObjectService {
    transport: Transport,
}

impl ObjectService {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Retrieves an object by id.
    pub async fn get(&self, id: u64) -> Result<Value, UseresponseError> {
        self.transport.get(&format!("/objects/{}.json", id), &[]).await
    }

    /// Creates an object.
    ///
    /// Returns the `success` member of the response, or `None` when the API
    /// did not report success.
    pub async fn create(&self, object: &NewObject) -> Result<Option<Value>, UseresponseError> {
        let body = object.to_params()?;
        let response = self.transport.post("/objects.json", &body).await?;

        Ok(response
            .get("success")
            .filter(|success| is_truthy(success))
            .cloned())
    }
}

/// Mirrors the API's loose notion of success: null, false, 0, "" and empty
/// containers all mean "not created".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
