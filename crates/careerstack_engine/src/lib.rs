//! CareerStack engine: the fetch-extract-cache pipeline.
mod cache;
mod directory;
mod fetch;
mod orchestrate;
mod pipeline;
mod types;

pub use cache::{CacheError, CacheStore, DEFAULT_RECENT_LIMIT};
pub use directory::{CompanyDirectory, DirectoryError};
pub use fetch::{FetchSettings, PageFetcher, ReqwestPageFetcher};
pub use orchestrate::{FetchOrchestrator, OrchestratorSettings};
pub use pipeline::{
    PipelineCoordinator, PipelineError, PipelineSettings, RefreshReport, DEFAULT_CACHE_TTL,
};
pub use types::{CompanyOutcome, FailureKind, FetchError, FetchedPage, PageOutcome};
