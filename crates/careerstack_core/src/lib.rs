//! CareerStack core: domain types and pure posting extraction.
mod extract;
mod heuristics;
mod types;

pub use extract::{HeuristicExtractor, PostingExtractor};
pub use heuristics::{
    contains_link_keyword, contains_role_keyword, CONTAINER_SELECTORS, CONTAINER_TITLE_MAX_CHARS,
    LINK_KEYWORDS, MIN_CONTAINER_TEXT_CHARS, ROLE_KEYWORDS,
};
pub use types::{CompanyRecord, JobPosting};
