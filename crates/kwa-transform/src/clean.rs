//! Keyword and URL cleaning.

/// Characters kept in a keyword: word characters, whitespace, apostrophes
/// and hyphens.
fn is_keyword_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch.is_whitespace() || ch == '\'' || ch == '-'
}

/// Normalizes a keyword: lowercase, strip punctuation, trim, and collapse
/// whitespace runs to a single space.
///
/// Stripping happens before collapsing so `"a & b"` becomes `"a b"` and the
/// function is idempotent.
pub fn clean_keyword(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let kept: String = lowered.chars().filter(|ch| is_keyword_char(*ch)).collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Normalizes a URL: lowercase, drop one `http(s)://` prefix and one
/// trailing slash.
pub fn clean_url(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let without_scheme = strip_scheme(&lowered);
    without_scheme
        .strip_suffix('/')
        .unwrap_or(without_scheme)
        .to_string()
}

/// Host part of an already cleaned URL, without a leading `www.`.
pub fn domain_of_clean_url(url: &str) -> String {
    let host = url.split('/').next().unwrap_or("");
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// Extracts the domain of a raw URL.
pub fn extract_domain(raw: &str) -> String {
    domain_of_clean_url(&clean_url(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_is_lowercased_and_collapsed() {
        assert_eq!(clean_keyword("  Running   SHOES "), "running shoes");
        assert_eq!(clean_keyword("Chaussures\tÉté"), "chaussures été");
    }

    #[test]
    fn keyword_keeps_apostrophes_and_hyphens() {
        assert_eq!(clean_keyword("L'Oréal t-shirt!"), "l'oréal t-shirt");
        assert_eq!(clean_keyword("snake_case"), "snake_case");
    }

    #[test]
    fn keyword_punctuation_does_not_leave_double_spaces() {
        assert_eq!(clean_keyword("shoes & boots"), "shoes boots");
        assert_eq!(clean_keyword("shoes ?"), "shoes");
        assert_eq!(clean_keyword("?!"), "");
    }

    #[test]
    fn url_loses_scheme_and_trailing_slash() {
        assert_eq!(clean_url("https://Example.com/Shoes/"), "example.com/shoes");
        assert_eq!(clean_url("http://example.com"), "example.com");
        assert_eq!(clean_url("HTTPS://example.com/"), "example.com");
        assert_eq!(clean_url("example.com/a//"), "example.com/a/");
        assert_eq!(clean_url(""), "");
    }

    #[test]
    fn domain_drops_www_and_path() {
        assert_eq!(extract_domain("https://www.Example.com/a/b"), "example.com");
        assert_eq!(extract_domain("shop.example.com/"), "shop.example.com");
        assert_eq!(extract_domain("/relative/path"), "");
    }
}
