pub mod auth;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export the handlers the binary wires into the router.
pub use middleware::require_auth;
pub use rest::{create_bookmark_handler, delete_bookmark_handler, list_bookmarks_handler};
