//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use linkvault_core::ingest::IngestService;
use linkvault_core::ports::BookmarkStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// The store and the ingestion service are the only long-lived handles; every
/// request works with its own scoped data on top of these.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookmarkStore>,
    pub ingest: Arc<IngestService>,
    pub config: Arc<Config>,
}
