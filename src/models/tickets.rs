//! Ticket filter parameters for the UseResponse API.

use super::QueryParams;
use crate::error::UseresponseError;

/// Largest page size the tickets endpoint accepts.
pub const MAX_TICKET_COUNT: u32 = 50;

/// Ticket status filter. Sent as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// Any status.
    All,
    /// Newly opened.
    Opened,
    /// On hold.
    OnHold,
    /// Being worked on.
    InProgress,
    /// Waiting for the requester.
    AwaitingReply,
    /// Resolved.
    Completed,
}

impl TicketStatus {
    /// Numeric code used by the API.
    pub fn code(self) -> u8 {
        match self {
            TicketStatus::All => 0,
            TicketStatus::Opened => 1,
            TicketStatus::OnHold => 2,
            TicketStatus::InProgress => 3,
            TicketStatus::AwaitingReply => 4,
            TicketStatus::Completed => 5,
        }
    }
}

/// Ticket creation date filter. Sent as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketDate {
    /// Created today.
    Today,
    /// Created yesterday.
    Yesterday,
    /// Created this week.
    ThisWeek,
    /// Created last week.
    LastWeek,
    /// Created this month.
    ThisMonth,
    /// Created last month.
    LastMonth,
}

impl TicketDate {
    /// Numeric code used by the API.
    pub fn code(self) -> u8 {
        match self {
            TicketDate::Today => 0,
            TicketDate::Yesterday => 1,
            TicketDate::ThisWeek => 2,
            TicketDate::LastWeek => 3,
            TicketDate::ThisMonth => 4,
            TicketDate::LastMonth => 5,
        }
    }
}

/// Ticket ordering. Sent as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSort {
    /// Newest first.
    New,
    /// Most recently updated first.
    Updated,
    /// Newest or most recently updated first.
    NewUpdated,
}

impl TicketSort {
    /// Numeric code used by the API.
    pub fn code(self) -> u8 {
        match self {
            TicketSort::New => 0,
            TicketSort::Updated => 1,
            TicketSort::NewUpdated => 2,
        }
    }
}

/// Filters for listing tickets.
///
/// Use the builder methods to construct filter criteria. Pagination defaults
/// to page 1 with 20 tickets per page.
///
/// # Example
///
/// ```
/// use useresponse::models::{TicketQuery, TicketStatus};
///
/// let query = TicketQuery::new()
///     .with_status(TicketStatus::Opened)
///     .with_custom_field("department", "billing")
///     .with_count(50);
/// assert!(query.to_params().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TicketQuery {
    text: Option<String>,
    status: Option<TicketStatus>,
    date: Option<TicketDate>,
    author_id: Option<u64>,
    custom_fields: Vec<(String, String)>,
    sort: Option<TicketSort>,
    page: u32,
    count: u32,
}

impl Default for TicketQuery {
    fn default() -> Self {
        Self {
            text: None,
            status: None,
            date: None,
            author_id: None,
            custom_fields: Vec::new(),
            sort: None,
            page: 1,
            count: 20,
        }
    }
}

impl TicketQuery {
    /// Creates a query with default pagination and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by ticket text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Filters by status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filters by creation date range.
    pub fn with_date(mut self, date: TicketDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Filters by ticket author.
    pub fn with_author_id(mut self, author_id: u64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Filters by a custom field value, sent as `custom_fields[<name>]`.
    pub fn with_custom_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_fields.push((name.into(), value.into()));
        self
    }

    /// Sets the ordering.
    pub fn with_sort(mut self, sort: TicketSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the 1-based page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size (1 to 50).
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Validates pagination and converts the query to request parameters.
    ///
    /// # Errors
    ///
    /// Returns `UseresponseError::Validation` when `page` is 0 or `count` is
    /// outside `1..=50`.
    pub fn to_params(&self) -> Result<QueryParams, UseresponseError> {
        if self.page < 1 {
            return Err(UseresponseError::validation(format!(
                "page number must be a positive integer, got {}",
                self.page
            )));
        }
        if !(1..=MAX_TICKET_COUNT).contains(&self.count) {
            return Err(UseresponseError::validation(format!(
                "count must be between 1 and {}, got {}",
                MAX_TICKET_COUNT, self.count
            )));
        }

        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("count".to_string(), self.count.to_string()),
        ];

        if let Some(ref text) = self.text {
            params.push(("text".to_string(), text.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.code().to_string()));
        }
        if let Some(date) = self.date {
            params.push(("date".to_string(), date.code().to_string()));
        }
        if let Some(author_id) = self.author_id {
            params.push(("author_id".to_string(), author_id.to_string()));
        }
        for (name, value) in &self.custom_fields {
            params.push((format!("custom_fields[{}]", name), value.clone()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort".to_string(), sort.code().to_string()));
        }

        Ok(params)
    }
}
