//! Object models for the UseResponse API.
//!
//! An "object" is any top-level UseResponse entry: feedback, helpdesk
//! tickets, announcements, and knowledge-base articles.

use super::QueryParams;
use crate::error::UseresponseError;

/// Maximum title length accepted by the API, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum content length accepted by the API, in characters.
pub const MAX_CONTENT_LEN: usize = 12_000;

/// Logical group an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectOwnership {
    /// Problems, thanks, questions and ideas.
    Feedback,
    /// Support tickets.
    Helpdesk,
    /// Announcements.
    Announcements,
    /// Articles and FAQ entries.
    KnowledgeBase,
}

impl ObjectOwnership {
    /// Value sent to the API.
    pub fn as_param(self) -> &'static str {
        match self {
            ObjectOwnership::Feedback => "feedback",
            ObjectOwnership::Helpdesk => "helpdesk",
            ObjectOwnership::Announcements => "announcements",
            ObjectOwnership::KnowledgeBase => "knowledge-base",
        }
    }
}

/// Type of an object. Each type belongs to one [`ObjectOwnership`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// Feedback.
    Problem,
    /// Feedback.
    Thanks,
    /// Feedback.
    Question,
    /// Feedback.
    Idea,
    /// Helpdesk.
    Ticket,
    /// Announcements.
    Announcement,
    /// Knowledge base.
    Article,
    /// Knowledge base.
    Faq,
}

impl ObjectType {
    /// Value sent to the API.
    pub fn as_param(self) -> &'static str {
        match self {
            ObjectType::Problem => "problem",
            ObjectType::Thanks => "thanks",
            ObjectType::Question => "question",
            ObjectType::Idea => "idea",
            ObjectType::Ticket => "ticket",
            ObjectType::Announcement => "announcement",
            ObjectType::Article => "article",
            ObjectType::Faq => "faq",
        }
    }

    /// The ownership group this type belongs to.
    pub fn ownership(self) -> ObjectOwnership {
        match self {
            ObjectType::Problem | ObjectType::Thanks | ObjectType::Question | ObjectType::Idea => {
                ObjectOwnership::Feedback
            }
            ObjectType::Ticket => ObjectOwnership::Helpdesk,
            ObjectType::Announcement => ObjectOwnership::Announcements,
            ObjectType::Article | ObjectType::Faq => ObjectOwnership::KnowledgeBase,
        }
    }
}

/// Body of a create-object call.
///
/// Extended parameters are forwarded verbatim; the four fixed fields win
/// over extended parameters with the same name.
#[derive(Debug, Clone)]
pub struct NewObject {
    /// Logical group.
    pub ownership: ObjectOwnership,
    /// Object type.
    pub object_type: ObjectType,
    /// Title, at most 100 characters.
    pub title: String,
    /// Content, BBCode allowed, HTML not. At most 12000 characters.
    pub content: String,
    extended: Vec<(String, String)>,
}

impl NewObject {
    /// Creates an object body.
    pub fn new(
        ownership: ObjectOwnership,
        object_type: ObjectType,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            ownership,
            object_type,
            title: title.into(),
            content: content.into(),
            extended: Vec::new(),
        }
    }

    /// Adds an extended API parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extended.push((name.into(), value.into()));
        self
    }

    /// Validates the body and converts it to form parameters.
    ///
    /// # Errors
    ///
    /// Returns `UseresponseError::Validation` when the object type does not
    /// belong to the ownership group, or when the title or content is longer
    /// than the API allows.
    pub fn to_params(&self) -> Result<QueryParams, UseresponseError> {
        if self.object_type.ownership() != self.ownership {
            return Err(UseresponseError::validation(format!(
                "object type '{}' does not belong to '{}'",
                self.object_type.as_param(),
                self.ownership.as_param()
            )));
        }
        let title_len = self.title.chars().count();
        if title_len > MAX_TITLE_LEN {
            return Err(UseresponseError::validation(format!(
                "title must be at most {} characters, got {}",
                MAX_TITLE_LEN, title_len
            )));
        }
        let content_len = self.content.chars().count();
        if content_len > MAX_CONTENT_LEN {
            return Err(UseresponseError::validation(format!(
                "content must be at most {} characters, got {}",
                MAX_CONTENT_LEN, content_len
            )));
        }

        const FIXED: [&str; 4] = ["ownership", "object_type", "title", "content"];
        let mut params: QueryParams = self
            .extended
            .iter()
            .filter(|(name, _)| !FIXED.contains(&name.as_str()))
            .cloned()
            .collect();
        params.extend([
            ("ownership".to_string(), self.ownership.as_param().to_string()),
            ("object_type".to_string(), self.object_type.as_param().to_string()),
            ("title".to_string(), self.title.clone()),
            ("content".to_string(), self.content.clone()),
        ]);

        Ok(params)
    }
}
