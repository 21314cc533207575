pub mod db;
pub mod metadata;
pub mod summarizer;

pub use db::DbAdapter;
pub use metadata::HttpPageMetadata;
pub use summarizer::HttpSummarizer;
