//! Numeric normalization utilities.
//!
//! Export tools format numbers for humans: `1,200` (SEMrush), `1 200`
//! (French locales, often with a no-break space), `4,5` (decimal comma).
//! Anything that still does not parse is treated as missing.

const SPACE_SEPARATORS: [char; 3] = [' ', '\u{a0}', '\u{202f}'];

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses `value` when its integer part uses `group` as thousands separator,
/// with an optional fractional part after `decimal`.
fn parse_grouped(value: &str, group: char, decimal: char) -> Option<f64> {
    let (int_part, frac_part) = match value.split_once(decimal) {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (value, None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let groups: Vec<&str> = digits.split(group).collect();
    if groups.len() < 2 {
        return None;
    }
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|ch| ch.is_ascii_digit());
    let first_ok = all_digits(groups[0]) && groups[0].len() <= 3;
    let rest_ok = groups[1..].iter().all(|g| g.len() == 3 && all_digits(g));
    if !first_ok || !rest_ok {
        return None;
    }
    let mut normalized = format!("{sign}{}", groups.concat());
    if let Some(frac) = frac_part {
        if !all_digits(frac) {
            return None;
        }
        normalized.push('.');
        normalized.push_str(frac);
    }
    parse_finite(&normalized)
}

/// Parses a human-formatted number, returning None for blank, invalid or
/// non-finite values.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(parsed) = parse_finite(trimmed) {
        return Some(parsed);
    }
    let compact: String = trimmed
        .chars()
        .filter(|ch| !SPACE_SEPARATORS.contains(ch))
        .collect();
    if let Some(parsed) = parse_finite(&compact) {
        return Some(parsed);
    }
    if let Some(parsed) = parse_grouped(&compact, ',', '.') {
        return Some(parsed);
    }
    if let Some(parsed) = parse_grouped(&compact, '.', ',') {
        return Some(parsed);
    }
    if compact.matches(',').count() == 1 && !compact.contains('.') {
        return parse_finite(&compact.replace(',', "."));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(parse_number("3"), Some(3.0));
        assert_eq!(parse_number(" 4.5 "), Some(4.5));
        assert_eq!(parse_number("-2"), Some(-2.0));
    }

    #[test]
    fn blank_and_garbage_are_missing() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("> 100"), None);
    }

    #[test]
    fn non_finite_values_are_missing() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-infinity"), None);
    }

    #[test]
    fn thousands_separators_are_accepted() {
        assert_eq!(parse_number("1,200"), Some(1200.0));
        assert_eq!(parse_number("12,345,678"), Some(12_345_678.0));
        assert_eq!(parse_number("1 200"), Some(1200.0));
        assert_eq!(parse_number("1\u{a0}200"), Some(1200.0));
        assert_eq!(parse_number("1,234.5"), Some(1234.5));
        assert_eq!(parse_number("1.234,5"), Some(1234.5));
    }

    #[test]
    fn decimal_comma_is_accepted() {
        assert_eq!(parse_number("4,5"), Some(4.5));
        assert_eq!(parse_number("1 234,75"), Some(1234.75));
    }

    #[test]
    fn malformed_groups_are_rejected() {
        assert_eq!(parse_number("1,2,3"), None);
        assert_eq!(parse_number("12,34,567"), None);
    }
}
