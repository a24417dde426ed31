use std::sync::Arc;
use std::time::Duration;

use careerstack_core::{CompanyRecord, HeuristicExtractor, PostingExtractor};
use chrono::Utc;
use futures_util::{stream, StreamExt};
use stack_logging::{stack_debug, stack_warn};

use crate::fetch::PageFetcher;
use crate::types::{CompanyOutcome, PageOutcome};

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Ceiling on simultaneous in-flight page fetches.
    pub max_in_flight: usize,
    /// Short pause before each fetch starts, spreading out connection
    /// bursts against hosts that rate-limit by request timing.
    pub courtesy_delay: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            max_in_flight: 10,
            courtesy_delay: Duration::from_millis(50),
        }
    }
}

/// Visits every company's career page concurrently under the ceiling and
/// runs the extractor over each successful response. One company's
/// failure never aborts the batch.
pub struct FetchOrchestrator {
    fetcher: Arc<dyn PageFetcher>,
    extractor: HeuristicExtractor,
    settings: OrchestratorSettings,
}

impl FetchOrchestrator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, settings: OrchestratorSettings) -> Self {
        Self {
            fetcher,
            extractor: HeuristicExtractor,
            settings,
        }
    }

    /// One outcome per company, in no particular order.
    pub async fn fetch_all(&self, companies: &[CompanyRecord]) -> Vec<CompanyOutcome> {
        stream::iter(companies.iter().cloned())
            .map(|company| self.visit(company))
            .buffer_unordered(self.settings.max_in_flight.max(1))
            .collect()
            .await
    }

    async fn visit(&self, company: CompanyRecord) -> CompanyOutcome {
        let url = match company
            .career_page_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        {
            Some(url) => url.to_string(),
            None => {
                stack_debug!("skipping {}: no career page url", company.name);
                return CompanyOutcome {
                    company: company.name,
                    outcome: PageOutcome::SkippedNoUrl,
                };
            }
        };

        tokio::time::sleep(self.settings.courtesy_delay).await;

        match self.fetcher.fetch_page(&url).await {
            Ok(page) => {
                let postings =
                    self.extractor
                        .extract(&company.name, &page.final_url, &page.html, Utc::now());
                stack_debug!("{}: {} candidate postings", company.name, postings.len());
                CompanyOutcome {
                    company: company.name,
                    outcome: PageOutcome::Postings(postings),
                }
            }
            Err(err) => {
                stack_warn!("fetch failed for {} ({url}): {err}", company.name);
                CompanyOutcome {
                    company: company.name,
                    outcome: PageOutcome::Failed(err),
                }
            }
        }
    }
}
