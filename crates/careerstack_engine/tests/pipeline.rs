use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use careerstack_engine::{
    CacheStore, CompanyDirectory, FailureKind, FetchError, FetchOrchestrator, FetchedPage,
    OrchestratorSettings, PageFetcher, PipelineCoordinator, PipelineError, PipelineSettings,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Counts fetches and fails URLs containing "down"; everything else gets
/// a page with a single job link.
#[derive(Default)]
struct CountingFetcher {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl PageFetcher for CountingFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        if url.contains("down") {
            return Err(FetchError::new(FailureKind::Timeout, "stubbed timeout"));
        }
        Ok(FetchedPage {
            final_url: url.to_string(),
            html: r#"<a href="/jobs/1">Apply now</a>"#.to_string(),
        })
    }
}

struct Harness {
    _dir: TempDir,
    fetcher: Arc<CountingFetcher>,
    coordinator: PipelineCoordinator,
}

async fn harness(csv: Option<&str>, settings: PipelineSettings) -> Harness {
    let dir = TempDir::new().expect("tempdir");
    let csv_path = dir.path().join("companies.csv");
    if let Some(contents) = csv {
        std::fs::write(&csv_path, contents).expect("write csv");
    }

    let directory = Arc::new(CompanyDirectory::new(csv_path));
    let cache = CacheStore::open(&dir.path().join("jobs_cache.db"))
        .await
        .expect("open cache");
    let fetcher = Arc::new(CountingFetcher::default());
    let orchestrator = FetchOrchestrator::new(
        fetcher.clone(),
        OrchestratorSettings {
            max_in_flight: 10,
            courtesy_delay: Duration::ZERO,
        },
    );
    let coordinator = PipelineCoordinator::new(directory, orchestrator, cache, settings);

    Harness {
        _dir: dir,
        fetcher,
        coordinator,
    }
}

const THREE_COMPANIES: &str = "Company Name,Career Page URL\n\
    A,https://a.example/careers\n\
    B,https://b.example/careers\n\
    C,https://c.example/careers\n";

#[tokio::test]
async fn fresh_cache_is_served_without_any_fetching() {
    let h = harness(Some(THREE_COMPANIES), PipelineSettings::default()).await;

    let first = h.coordinator.refresh_or_serve(false).await.expect("first");
    assert!(!first.served_from_cache);
    assert_eq!(first.count, 3);
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 3);

    let second = h.coordinator.refresh_or_serve(false).await.expect("second");
    assert!(second.served_from_cache);
    assert_eq!(second.count, 3);
    assert_eq!(second.refreshed_at, first.refreshed_at);
    assert_eq!(second.postings, first.postings);
    // No network activity for the cached serve.
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn force_refresh_repopulates_even_when_fresh() {
    let h = harness(Some(THREE_COMPANIES), PipelineSettings::default()).await;

    let first = h.coordinator.refresh_or_serve(false).await.expect("first");
    let forced = h.coordinator.refresh_or_serve(true).await.expect("forced");

    assert!(!forced.served_from_cache);
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 6);
    assert!(forced.refreshed_at >= first.refreshed_at);
}

#[tokio::test]
async fn stale_cache_triggers_a_refresh() {
    let settings = PipelineSettings {
        cache_ttl: Duration::ZERO,
        ..PipelineSettings::default()
    };
    let h = harness(Some(THREE_COMPANIES), settings).await;

    h.coordinator.refresh_or_serve(false).await.expect("first");
    let second = h.coordinator.refresh_or_serve(false).await.expect("second");

    assert!(!second.served_from_cache);
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn missing_directory_is_a_configuration_error() {
    let h = harness(None, PipelineSettings::default()).await;

    let err = h.coordinator.refresh_or_serve(false).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoCompanies));
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn partial_failures_still_produce_a_successful_refresh() {
    let csv = "Company Name,Career Page URL\n\
        A,https://a.example/careers\n\
        B,https://b.example/down\n\
        C,https://c.example/careers\n\
        D,https://d.example/down\n\
        E,https://e.example/careers\n";
    let h = harness(Some(csv), PipelineSettings::default()).await;

    let report = h.coordinator.refresh_or_serve(false).await.expect("refresh");
    assert!(!report.served_from_cache);
    // Two companies timed out; the other three each contributed a posting.
    assert_eq!(report.count, 3);
    assert_eq!(report.postings.len(), 3);
}

#[tokio::test]
async fn concurrent_callers_share_a_single_refresh() {
    let h = harness(Some(THREE_COMPANIES), PipelineSettings::default()).await;

    let (a, b) = tokio::join!(
        h.coordinator.refresh_or_serve(false),
        h.coordinator.refresh_or_serve(false),
    );
    let a = a.expect("a");
    let b = b.expect("b");

    // Exactly one caller did the work; the other served its snapshot.
    assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        [a.served_from_cache, b.served_from_cache]
            .iter()
            .filter(|&&cached| cached)
            .count(),
        1
    );
}

#[tokio::test]
async fn recent_limit_truncates_the_served_snapshot() {
    let settings = PipelineSettings {
        recent_limit: 2,
        ..PipelineSettings::default()
    };
    let h = harness(Some(THREE_COMPANIES), settings).await;

    let report = h.coordinator.refresh_or_serve(false).await.expect("refresh");
    // Count reflects everything stored; the served list is truncated.
    assert_eq!(report.count, 3);
    assert_eq!(report.postings.len(), 2);
}
