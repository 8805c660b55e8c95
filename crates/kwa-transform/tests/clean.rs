//! Property tests for keyword and URL cleaning.

use kwa_transform::{clean_keyword, clean_url, extract_domain};
use proptest::prelude::*;

fn url_parts() -> impl Strategy<Value = (String, String, String, bool)> {
    (
        prop_oneof![
            Just(String::new()),
            Just("http://".to_string()),
            Just("https://".to_string()),
            Just("HTTPS://".to_string()),
        ],
        "(www\\.)?[a-zA-Z0-9]{1,10}\\.(com|fr|io)",
        "(/[a-zA-Z0-9_-]{1,8}){0,3}",
        any::<bool>(),
    )
}

proptest! {
    #[test]
    fn clean_keyword_is_idempotent(raw in "[a-zA-Z0-9éèàÉÀç '_!?.,&/\\t-]{0,40}") {
        let once = clean_keyword(&raw);
        prop_assert_eq!(clean_keyword(&once), once.clone());
    }

    #[test]
    fn clean_keyword_has_no_outer_or_double_spaces(raw in "[a-zA-Z0-9 &!\\t]{0,40}") {
        let cleaned = clean_keyword(&raw);
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        prop_assert!(!cleaned.contains("  "));
    }

    #[test]
    fn clean_url_strips_one_scheme_and_one_slash((scheme, host, path, slash) in url_parts()) {
        let raw = format!("{scheme}{host}{path}{}", if slash { "/" } else { "" });
        let expected = format!("{host}{path}").to_lowercase();
        let cleaned = clean_url(&raw);
        prop_assert_eq!(&cleaned, &expected);
        prop_assert_eq!(clean_url(&cleaned), cleaned);
    }

    #[test]
    fn domain_never_contains_path_or_www((scheme, host, path, slash) in url_parts()) {
        let raw = format!("{scheme}{host}{path}{}", if slash { "/" } else { "" });
        let domain = extract_domain(&raw);
        prop_assert!(!domain.contains('/'));
        prop_assert!(!domain.starts_with("www."));
    }
}

#[test]
fn extract_domain_matches_reference_example() {
    assert_eq!(extract_domain("https://www.Example.com/a/b"), "example.com");
}
