//! Comment search parameters for the UseResponse API.

use super::QueryParams;
use crate::error::UseresponseError;

/// Comment ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSort {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

impl CommentSort {
    /// Value sent to the API.
    pub fn as_param(self) -> &'static str {
        match self {
            CommentSort::Asc => "asc",
            CommentSort::Desc => "desc",
        }
    }
}

/// Filters for searching the comments of one object.
#[derive(Debug, Clone)]
pub struct CommentQuery {
    /// Object whose comments are searched.
    pub object_id: u64,
    is_private: Option<u8>,
    sort: Option<CommentSort>,
    page: Option<u32>,
}

impl CommentQuery {
    /// Searches public comments (`is_private=0`) of `object_id`.
    pub fn new(object_id: u64) -> Self {
        Self {
            object_id,
            is_private: Some(0),
            sort: None,
            page: None,
        }
    }

    /// Filters on the private flag; `None` drops the filter.
    pub fn with_private(mut self, is_private: Option<bool>) -> Self {
        self.is_private = is_private.map(u8::from);
        self
    }

    /// Sets the ordering.
    pub fn with_sort(mut self, sort: CommentSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Requests a specific 1-based page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Validates the query and converts it to request parameters.
    pub fn to_params(&self) -> Result<QueryParams, UseresponseError> {
        let mut params = QueryParams::new();

        if let Some(page) = self.page {
            if page < 1 {
                return Err(UseresponseError::validation(format!(
                    "page number must be a positive integer, got {}",
                    page
                )));
            }
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(is_private) = self.is_private {
            params.push(("is_private".to_string(), is_private.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort".to_string(), sort.as_param().to_string()));
        }

        Ok(params)
    }
}
