use std::sync::Arc;
use std::time::Duration;

use careerstack_core::JobPosting;
use chrono::{DateTime, Utc};
use stack_logging::stack_info;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::cache::{CacheError, CacheStore, DEFAULT_RECENT_LIMIT};
use crate::directory::{CompanyDirectory, DirectoryError};
use crate::orchestrate::FetchOrchestrator;

/// Default maximum age of the cached snapshot: 60 minutes.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub cache_ttl: Duration,
    pub recent_limit: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no company directory found on server")]
    NoCompanies,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// What a refresh-or-serve call produced: either the cached snapshot or
/// a freshly scraped one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub served_from_cache: bool,
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Total postings stored by the refresh (or currently cached).
    pub count: usize,
    pub postings: Vec<JobPosting>,
}

/// Ties directory, orchestrator and cache together behind the freshness
/// gate. Refreshes are serialized; clear+repopulate cycles from two
/// callers can never interleave.
pub struct PipelineCoordinator {
    directory: Arc<CompanyDirectory>,
    orchestrator: FetchOrchestrator,
    cache: CacheStore,
    settings: PipelineSettings,
    refresh_gate: Mutex<()>,
}

impl PipelineCoordinator {
    pub fn new(
        directory: Arc<CompanyDirectory>,
        orchestrator: FetchOrchestrator,
        cache: CacheStore,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            directory,
            orchestrator,
            cache,
            settings,
            refresh_gate: Mutex::new(()),
        }
    }

    /// Serves the cached snapshot when it is fresh enough, otherwise runs
    /// a full refresh: load directory, fetch all, replace the cache.
    pub async fn refresh_or_serve(&self, force: bool) -> Result<RefreshReport, PipelineError> {
        if !force {
            if let Some(report) = self.serve_if_fresh().await? {
                return Ok(report);
            }
        }

        let _guard = self.refresh_gate.lock().await;

        // A caller queued behind a refresh serves the snapshot that
        // refresh just wrote instead of fetching everything again.
        if !force {
            if let Some(report) = self.serve_if_fresh().await? {
                return Ok(report);
            }
        }

        let companies = self.directory.load()?;
        if companies.is_empty() {
            return Err(PipelineError::NoCompanies);
        }

        stack_info!("refreshing postings for {} companies", companies.len());
        let outcomes = self.orchestrator.fetch_all(&companies).await;
        let postings: Vec<JobPosting> = outcomes
            .into_iter()
            .flat_map(|outcome| outcome.outcome.into_postings())
            .collect();

        let count = postings.len();
        let refreshed_at = self.cache.replace_all(&postings).await?;
        stack_info!("refresh complete: {count} postings stored");

        let recent = self.cache.recent(self.settings.recent_limit).await?;
        Ok(RefreshReport {
            served_from_cache: false,
            refreshed_at: Some(refreshed_at),
            count,
            postings: recent,
        })
    }

    async fn serve_if_fresh(&self) -> Result<Option<RefreshReport>, PipelineError> {
        if !self.cache.is_fresh(self.settings.cache_ttl).await? {
            return Ok(None);
        }
        let postings = self.cache.recent(self.settings.recent_limit).await?;
        let refreshed_at = self.cache.last_refreshed_at().await?;
        Ok(Some(RefreshReport {
            served_from_cache: true,
            refreshed_at,
            count: postings.len(),
            postings,
        }))
    }
}
