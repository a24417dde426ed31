use careerstack_core::{
    contains_link_keyword, contains_role_keyword, CONTAINER_SELECTORS, LINK_KEYWORDS,
    ROLE_KEYWORDS,
};
use pretty_assertions::assert_eq;
use scraper::Selector;

#[test]
fn link_keywords_match_case_insensitively() {
    assert!(contains_link_keyword("JOIN OUR CAREERS PAGE"));
    assert!(contains_link_keyword("/Jobs/backend"));
    assert!(contains_link_keyword("Apply today"));
    assert!(!contains_link_keyword("press releases"));
    assert!(!contains_link_keyword(""));
}

#[test]
fn role_keywords_match_case_insensitively() {
    assert!(contains_role_keyword("Senior Software ENGINEER"));
    assert!(contains_role_keyword("cybersecurity analyst"));
    assert!(!contains_role_keyword("office dog"));
}

#[test]
fn keyword_lists_cover_the_documented_vocabulary() {
    assert_eq!(
        LINK_KEYWORDS.to_vec(),
        vec!["job", "careers", "openings", "positions", "apply"]
    );
    assert_eq!(ROLE_KEYWORDS.len(), 7);
}

#[test]
fn every_container_selector_parses() {
    for raw in CONTAINER_SELECTORS {
        assert!(Selector::parse(raw).is_ok(), "selector failed: {raw}");
    }
}
