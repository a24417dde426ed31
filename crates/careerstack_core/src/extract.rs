use std::collections::HashSet;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::heuristics::{
    contains_link_keyword, contains_role_keyword, CONTAINER_SELECTORS, CONTAINER_TITLE_MAX_CHARS,
    MIN_CONTAINER_TEXT_CHARS,
};
use crate::types::JobPosting;

/// Heuristic, layout-agnostic extraction of job postings from one page.
///
/// Implementations must be pure: no I/O, deterministic for identical
/// inputs, and best-effort on malformed markup (never an error).
pub trait PostingExtractor: Send + Sync {
    fn extract(
        &self,
        company: &str,
        base_url: &str,
        html: &str,
        discovered_at: DateTime<Utc>,
    ) -> Vec<JobPosting>;
}

/// Two-pass keyword/selector extractor:
/// - anchor pass: job-related hyperlinks by keyword match
/// - container pass: listing-shaped elements mentioning a role word
///
/// Results are unioned in discovery order (anchors first) and
/// deduplicated by absolute URL, first occurrence winning.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicExtractor;

impl PostingExtractor for HeuristicExtractor {
    fn extract(
        &self,
        company: &str,
        base_url: &str,
        html: &str,
        discovered_at: DateTime<Utc>,
    ) -> Vec<JobPosting> {
        let doc = Html::parse_document(html);
        let base = Url::parse(base_url).ok();

        let mut sink = PostingSink::new(company, discovered_at);
        anchor_pass(&doc, base.as_ref(), &mut sink);
        container_pass(&doc, base.as_ref(), &mut sink);
        sink.into_postings()
    }
}

fn anchor_pass(doc: &Html, base: Option<&Url>, sink: &mut PostingSink) {
    let anchor_sel = match Selector::parse("a[href]").ok() {
        Some(sel) => sel,
        None => return,
    };

    for anchor in doc.select(&anchor_sel) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        let text = anchor_text(&anchor);

        let combined = format!("{href} {text}");
        let accepted = (!text.is_empty() && contains_link_keyword(&combined))
            || contains_link_keyword(&text);
        if !accepted {
            continue;
        }

        if let Some(url) = resolve_href(href, base) {
            let title = if text.is_empty() {
                href.to_string()
            } else {
                text
            };
            sink.push(title, url);
        }
    }
}

fn container_pass(doc: &Html, base: Option<&Url>, sink: &mut PostingSink) {
    let anchor_sel = match Selector::parse("a[href]").ok() {
        Some(sel) => sel,
        None => return,
    };

    for raw in CONTAINER_SELECTORS {
        let container_sel = match Selector::parse(raw).ok() {
            Some(sel) => sel,
            None => continue,
        };

        for container in doc.select(&container_sel) {
            let text = flattened_text(&container);
            if text.chars().count() < MIN_CONTAINER_TEXT_CHARS {
                continue;
            }
            if !contains_role_keyword(&text) {
                continue;
            }

            // No descendant link means no URL to identify the posting by.
            let link = match container.select(&anchor_sel).next() {
                Some(link) => link,
                None => continue,
            };
            let href = match link.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            if let Some(url) = resolve_href(href, base) {
                let link_text = link.text().collect::<String>().trim().to_string();
                let title = if link_text.is_empty() {
                    text.chars().take(CONTAINER_TITLE_MAX_CHARS).collect()
                } else {
                    link_text
                };
                sink.push(title, url);
            }
        }
    }
}

/// Visible anchor text, falling back to the accessibility label.
fn anchor_text(anchor: &ElementRef) -> String {
    let text = anchor.text().collect::<String>().trim().to_string();
    if !text.is_empty() {
        return text;
    }
    anchor
        .value()
        .attr("aria-label")
        .map(|label| label.trim().to_string())
        .unwrap_or_default()
}

/// Element text with each segment trimmed and joined by single spaces.
fn flattened_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// An href that already carries a scheme is kept as-is; anything else is
/// resolved against the page's final URL. Unresolvable hrefs are dropped.
fn resolve_href(href: &str, base: Option<&Url>) -> Option<String> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(String::from(url));
    }
    base.and_then(|base| base.join(trimmed).ok())
        .map(String::from)
}

/// Accumulates postings in discovery order, first URL wins.
struct PostingSink {
    company: String,
    discovered_at: DateTime<Utc>,
    seen: HashSet<String>,
    postings: Vec<JobPosting>,
}

impl PostingSink {
    fn new(company: &str, discovered_at: DateTime<Utc>) -> Self {
        Self {
            company: company.to_string(),
            discovered_at,
            seen: HashSet::new(),
            postings: Vec::new(),
        }
    }

    fn push(&mut self, title: String, url: String) {
        if !self.seen.insert(url.clone()) {
            return;
        }
        self.postings.push(JobPosting {
            company: self.company.clone(),
            title,
            url,
            location: String::new(),
            discovered_at: self.discovered_at,
        });
    }

    fn into_postings(self) -> Vec<JobPosting> {
        self.postings
    }
}
