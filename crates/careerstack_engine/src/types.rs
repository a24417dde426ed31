use std::fmt;

use careerstack_core::JobPosting;

/// A successfully retrieved career page: the post-redirect URL the
/// extractor resolves relative hrefs against, plus the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub final_url: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Per-company result of one refresh pass. Failures are recorded, not
/// propagated; the batch always yields one outcome per company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyOutcome {
    pub company: String,
    pub outcome: PageOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Postings(Vec<JobPosting>),
    SkippedNoUrl,
    Failed(FetchError),
}

impl PageOutcome {
    /// Postings for successful fetches; skipped and failed companies
    /// contribute nothing.
    pub fn into_postings(self) -> Vec<JobPosting> {
        match self {
            PageOutcome::Postings(postings) => postings,
            PageOutcome::SkippedNoUrl | PageOutcome::Failed(_) => Vec::new(),
        }
    }
}
