//! crates/linkvault_core/src/ingest.rs
//!
//! The bookmark ingestion pipeline: URL normalization, summary fetch,
//! title extraction and persistence. Orchestrates the service ports; the
//! concrete HTTP and database sides live in the api service's adapters.

use std::sync::Arc;

use url::Url;
use uuid::Uuid;

use crate::domain::{Bookmark, NewBookmark};
use crate::ports::{BookmarkStore, PageMetadataService, PortError, PortResult, SummaryService};

/// Trims a raw user-supplied URL and prepends `https://` when it lacks a
/// scheme prefix (case-insensitive). Already-schemed input is unchanged.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Derives `https://<host>/favicon.ico` from a parsed URL. The favicon is
/// never verified to exist.
pub fn favicon_for(url: &Url) -> PortResult<String> {
    let host = url
        .host_str()
        .ok_or_else(|| PortError::InvalidUrl(format!("no host in '{url}'")))?;
    Ok(format!("https://{host}/favicon.ico"))
}

/// Turns a raw URL into a persisted bookmark.
///
/// One canonical URL form is used everywhere: the normalized URL feeds the
/// summary fetch, the metadata fetch, host extraction and persistence.
pub struct IngestService {
    store: Arc<dyn BookmarkStore>,
    summarizer: Arc<dyn SummaryService>,
    metadata: Arc<dyn PageMetadataService>,
}

impl IngestService {
    pub fn new(
        store: Arc<dyn BookmarkStore>,
        summarizer: Arc<dyn SummaryService>,
        metadata: Arc<dyn PageMetadataService>,
    ) -> Self {
        Self {
            store,
            summarizer,
            metadata,
        }
    }

    /// Runs the full pipeline for an already-authenticated user.
    ///
    /// Steps run strictly sequentially and fail fast, with two deliberate
    /// exceptions: a failed summary fetch stores an empty summary instead of
    /// aborting (and never stores an upstream error body), and a failed
    /// metadata fetch falls back to the URL as the title. Nothing is
    /// persisted unless the final insert succeeds; there is no dedup, so the
    /// same URL submitted twice yields two rows.
    pub async fn ingest(&self, user_id: Uuid, raw_url: &str) -> PortResult<Bookmark> {
        let url = normalize_url(raw_url);

        // Host extraction gates the pipeline: an unparseable URL must fail
        // before any outbound fetch happens.
        let parsed =
            Url::parse(&url).map_err(|e| PortError::InvalidUrl(format!("'{url}': {e}")))?;
        let favicon = favicon_for(&parsed)?;

        let summary = self.summarizer.summarize(&url).await.unwrap_or_default();

        let title = match self.metadata.fetch_title(&url).await {
            Ok(Some(title)) => title,
            Ok(None) | Err(_) => url.clone(),
        };

        self.store
            .insert(NewBookmark {
                user_id,
                url,
                title,
                favicon,
                summary,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::domain::{User, UserCredentials};
    use crate::ports::PortResult;

    /// In-memory store that records inserts and counts calls.
    #[derive(Default)]
    struct MemStore {
        rows: Mutex<Vec<Bookmark>>,
        insert_calls: AtomicUsize,
    }

    #[async_trait]
    impl BookmarkStore for MemStore {
        async fn insert(&self, new: NewBookmark) -> PortResult<Bookmark> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            let row = Bookmark {
                id: Uuid::new_v4(),
                user_id: new.user_id,
                url: new.url,
                title: new.title,
                favicon: new.favicon,
                summary: new.summary,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn list_for_user(&self, user_id: Uuid) -> PortResult<Vec<Bookmark>> {
            let mut rows: Vec<Bookmark> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn delete(&self, id: Uuid, user_id: Uuid) -> PortResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|b| !(b.id == id && b.user_id == user_id));
            if rows.len() == before {
                return Err(PortError::NotFound(format!("bookmark {id}")));
            }
            Ok(())
        }

        async fn create_user_with_email(&self, _: &str, _: &str) -> PortResult<User> {
            unimplemented!()
        }
        async fn get_user_by_email(&self, _: &str) -> PortResult<UserCredentials> {
            unimplemented!()
        }
        async fn create_auth_session(
            &self,
            _: &str,
            _: Uuid,
            _: chrono::DateTime<Utc>,
        ) -> PortResult<()> {
            unimplemented!()
        }
        async fn validate_auth_session(&self, _: &str) -> PortResult<Uuid> {
            unimplemented!()
        }
        async fn delete_auth_session(&self, _: &str) -> PortResult<()> {
            unimplemented!()
        }
    }

    /// Scripted summarizer that counts outbound calls.
    struct FakeSummarizer {
        response: PortResult<String>,
        calls: AtomicUsize,
    }

    impl FakeSummarizer {
        fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
        fn failing() -> Self {
            Self {
                response: Err(PortError::Upstream("summarizer returned 502".into())),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SummaryService for FakeSummarizer {
        async fn summarize(&self, _url: &str) -> PortResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(s) => Ok(s.clone()),
                Err(PortError::Upstream(msg)) => Err(PortError::Upstream(msg.clone())),
                Err(_) => Err(PortError::Unexpected("unreachable".into())),
            }
        }
    }

    struct FakeMetadata {
        title: Option<String>,
        calls: AtomicUsize,
    }

    impl FakeMetadata {
        fn with_title(title: &str) -> Self {
            Self {
                title: Some(title.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
        fn untitled() -> Self {
            Self {
                title: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PageMetadataService for FakeMetadata {
        async fn fetch_title(&self, _url: &str) -> PortResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.title.clone())
        }
    }

    fn service(
        store: Arc<MemStore>,
        summarizer: Arc<FakeSummarizer>,
        metadata: Arc<FakeMetadata>,
    ) -> IngestService {
        IngestService::new(store, summarizer, metadata)
    }

    #[test]
    fn normalize_prepends_https_when_scheme_is_missing() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com/page "), "https://example.com/page");
    }

    #[test]
    fn normalize_keeps_existing_schemes_unchanged() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    #[test]
    fn favicon_comes_from_the_host() {
        let url = Url::parse("https://blog.example.com/posts/1?x=y").unwrap();
        assert_eq!(
            favicon_for(&url).unwrap(),
            "https://blog.example.com/favicon.ico"
        );
    }

    #[tokio::test]
    async fn scheme_less_input_is_persisted_normalized() {
        let store = Arc::new(MemStore::default());
        let svc = service(
            store.clone(),
            Arc::new(FakeSummarizer::ok("a summary")),
            Arc::new(FakeMetadata::with_title("Example Domain")),
        );

        let bookmark = svc.ingest(Uuid::new_v4(), "example.com").await.unwrap();

        assert_eq!(bookmark.url, "https://example.com");
        assert_eq!(bookmark.title, "Example Domain");
        assert_eq!(bookmark.favicon, "https://example.com/favicon.ico");
        assert_eq!(bookmark.summary, "a summary");
    }

    #[tokio::test]
    async fn unparseable_url_fails_before_any_outbound_fetch() {
        let store = Arc::new(MemStore::default());
        let summarizer = Arc::new(FakeSummarizer::ok("unused"));
        let metadata = Arc::new(FakeMetadata::untitled());
        let svc = service(store.clone(), summarizer.clone(), metadata.clone());

        let err = svc.ingest(Uuid::new_v4(), "http://").await.unwrap_err();

        assert!(matches!(err, PortError::InvalidUrl(_)));
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(metadata.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn summarizer_failure_stores_an_empty_summary() {
        let store = Arc::new(MemStore::default());
        let svc = service(
            store.clone(),
            Arc::new(FakeSummarizer::failing()),
            Arc::new(FakeMetadata::with_title("Still Works")),
        );

        let bookmark = svc.ingest(Uuid::new_v4(), "https://example.com").await.unwrap();

        assert_eq!(bookmark.summary, "");
        assert_eq!(bookmark.title, "Still Works");
    }

    #[tokio::test]
    async fn missing_title_falls_back_to_the_url() {
        let store = Arc::new(MemStore::default());
        let svc = service(
            store.clone(),
            Arc::new(FakeSummarizer::ok("")),
            Arc::new(FakeMetadata::untitled()),
        );

        let bookmark = svc.ingest(Uuid::new_v4(), "example.com").await.unwrap();

        assert_eq!(bookmark.title, "https://example.com");
    }

    #[tokio::test]
    async fn duplicate_urls_produce_distinct_rows() {
        let store = Arc::new(MemStore::default());
        let user_id = Uuid::new_v4();
        let svc = service(
            store.clone(),
            Arc::new(FakeSummarizer::ok("s")),
            Arc::new(FakeMetadata::with_title("T")),
        );

        let first = svc.ingest(user_id, "https://example.com").await.unwrap();
        let second = svc.ingest(user_id, "https://example.com").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.list_for_user(user_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_owner() {
        let store = Arc::new(MemStore::default());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let svc = service(
            store.clone(),
            Arc::new(FakeSummarizer::ok("s")),
            Arc::new(FakeMetadata::with_title("T")),
        );

        svc.ingest(alice, "https://a.example.com").await.unwrap();
        svc.ingest(bob, "https://b.example.com").await.unwrap();

        let rows = store.list_for_user(alice).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "https://a.example.com");
    }

    #[tokio::test]
    async fn deleting_an_unknown_id_leaves_other_rows_alone() {
        let store = Arc::new(MemStore::default());
        let user_id = Uuid::new_v4();
        let svc = service(
            store.clone(),
            Arc::new(FakeSummarizer::ok("s")),
            Arc::new(FakeMetadata::with_title("T")),
        );
        svc.ingest(user_id, "https://example.com").await.unwrap();

        let err = store.delete(Uuid::new_v4(), user_id).await.unwrap_err();

        assert!(matches!(err, PortError::NotFound(_)));
        assert_eq!(store.list_for_user(user_id).await.unwrap().len(), 1);
    }
}
