use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the company directory, re-read on every refresh.
///
/// A record without a career page URL contributes nothing to a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
    pub career_page_url: Option<String>,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>, career_page_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            career_page_url,
        }
    }
}

/// One discovered job opening. Identity is the absolute `url`; two
/// postings with the same URL are the same posting regardless of title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub company: String,
    pub title: String,
    pub url: String,
    /// Never derived by the extraction heuristic; always empty for now.
    pub location: String,
    /// Persisted and serialized under the `scraped_at` name.
    #[serde(rename = "scraped_at")]
    pub discovered_at: DateTime<Utc>,
}
