pub mod domain;
pub mod ingest;
pub mod ports;

pub use domain::{AuthSession, Bookmark, NewBookmark, User, UserCredentials};
pub use ingest::{normalize_url, IngestService};
pub use ports::{BookmarkStore, PageMetadataService, PortError, PortResult, SummaryService};
