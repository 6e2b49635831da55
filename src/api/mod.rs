//! Async client for the UseResponse REST API (version 4.0).
//!
//! [`Api`] groups one service per resource. The services are fixed at
//! construction and only reachable through read-only accessors.
//!
//! # Example
//!
//! ```ignore
//! use useresponse::api::Api;
//! use useresponse::config::Config;
//! use useresponse::models::{TicketQuery, TicketStatus};
//!
//! async fn example() -> Result<(), useresponse::error::UseresponseError> {
//!     let api = Api::new(&Config::from_env()?)?;
//!
//!     let user = api.users().get(42).await?;
//!     let open = api
//!         .tickets()
//!         .get(&TicketQuery::new().with_status(TicketStatus::Opened))
//!         .await?;
//!     println!("{user}\n{open}");
//!     Ok(())
//! }
//! ```

mod comments;
mod objects;
mod tickets;
mod transport;
mod users;

pub use comments::CommentService;
pub use objects::ObjectService;
pub use tickets::TicketService;
pub use transport::Transport;
pub use users::UserService;

use crate::config::Config;
use crate::error::UseresponseError;

/// Entry point to the UseResponse API.
#[derive(Clone)]
pub struct Api {
    users: UserService,
    tickets: TicketService,
    objects: ObjectService,
    comments: CommentService,
}

impl Api {
    /// Creates the API client and its services.
    ///
    /// # Errors
    ///
    /// Returns `UseresponseError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, UseresponseError> {
        let transport = Transport::new(config)?;
        tracing::debug!(domain = %config.domain, "UseResponse API client initialized");

        Ok(Self {
            users: UserService::new(transport.clone()),
            tickets: TicketService::new(transport.clone()),
            objects: ObjectService::new(transport.clone()),
            comments: CommentService::new(transport),
        })
    }

    /// User endpoints.
    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// Ticket endpoints.
    pub fn tickets(&self) -> &TicketService {
        &self.tickets
    }

    /// Object endpoints.
    pub fn objects(&self) -> &ObjectService {
        &self.objects
    }

    /// Comment endpoints.
    pub fn comments(&self) -> &CommentService {
        &self.comments
    }
}
