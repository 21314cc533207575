//! crates/linkvault_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted bookmark: one user-saved URL plus derived metadata.
///
/// Bookmarks are immutable after creation; the only post-creation
/// operation is whole-record deletion.
#[derive(Debug, Clone)]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Canonical absolute URL, always scheme-prefixed before storage.
    pub url: String,
    /// Extracted page title, falling back to the URL itself.
    pub title: String,
    /// `https://<host>/favicon.ico`, derived, never verified to exist.
    pub favicon: String,
    /// Markdown summary from the summarization endpoint; empty when the
    /// endpoint was unreachable or returned a non-success status.
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a bookmark. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub user_id: Uuid,
    pub url: String,
    pub title: String,
    pub favicon: String,
    pub summary: String,
}

// Represents a user - used throughout the app
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub email: Option<String>,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub email: String,
    pub hashed_password: String,
}

// Represents a browser login session (auth cookie or bearer token)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
