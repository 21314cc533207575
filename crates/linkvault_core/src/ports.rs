//! crates/linkvault_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Bookmark, NewBookmark, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Upstream fetch failed: {0}")]
    Upstream(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    // --- Bookmark Management ---

    /// Inserts one bookmark row; the store assigns `id` and `created_at`.
    async fn insert(&self, bookmark: NewBookmark) -> PortResult<Bookmark>;

    /// Returns every bookmark owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> PortResult<Vec<Bookmark>>;

    /// Deletes the bookmark with `id` if and only if `user_id` owns it.
    /// Fails with `NotFound` when no owned row matches.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> PortResult<()>;

    // --- Auth Methods ---

    async fn create_user_with_email(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    /// Exchanges an opaque session credential for the owning user id.
    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;
}

#[async_trait]
pub trait SummaryService: Send + Sync {
    /// Produces a text/markdown summary for an absolute URL.
    async fn summarize(&self, url: &str) -> PortResult<String>;
}

#[async_trait]
pub trait PageMetadataService: Send + Sync {
    /// Fetches the page at `url` and extracts its `<title>`, if any.
    async fn fetch_title(&self, url: &str) -> PortResult<Option<String>>;
}
