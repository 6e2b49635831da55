//! Ticket endpoints.

use serde_json::Value;

use super::Transport;
use crate::error::UseresponseError;
use crate::models::TicketQuery;

/// Ticket-related API calls.
#[derive(Clone)]
pub struct TicketService {
    transport: Transport,
}

impl TicketService {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Lists tickets matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `UseresponseError::Validation` without making a request when
    /// the query's pagination is out of range.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let query = TicketQuery::new()
    ///     .with_status(TicketStatus::Opened)
    ///     .with_sort(TicketSort::Updated);
    /// let tickets = api.tickets().get(&query).await?;
    /// ```
    pub async fn get(&self, query: &TicketQuery) -> Result<Value, UseresponseError> {
        let params = query.to_params()?;
        self.transport.get("/tickets.json", &params).await
    }
}
