use lazy_static::lazy_static;
use regex::Regex;
use time::{format_description::FormatItem, macros::format_description, Date};

pub const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
pub const MDY_DATE: &[FormatItem<'static>] = format_description!("[month]/[day]/[year]");

lazy_static! {
    // MM/DD/YYYY with leading zeros allowed.
    static ref DATE_MDY_RE: Regex =
        Regex::new(r"^(0[1-9]|1[0-2])/([0-2][0-9]|3[01])/(\d{4})$").unwrap();
    static ref CONTROL_RE: Regex = Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Trim, strip control characters and markup, and enforce a length bound.
/// Returns `None` when the cleaned string is empty or too long.
pub fn sanitize_string(value: &str, max_length: usize) -> Option<String> {
    let clean = value.trim();
    let clean = CONTROL_RE.replace_all(clean, "");
    let clean = TAG_RE.replace_all(&clean, "").to_string();
    // Length bound is in characters, not bytes.
    if !clean.is_empty() && clean.chars().count() <= max_length {
        Some(clean)
    } else {
        None
    }
}

/// Strict MM/DD/YYYY check: shape via regex, then a real calendar parse.
pub fn validate_mdy_date(value: &str) -> bool {
    DATE_MDY_RE.is_match(value) && Date::parse(value, MDY_DATE).is_ok()
}

/// Parse a bank-statement date (MM/DD/YYYY) into a stored `Date`.
pub fn parse_mdy_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), MDY_DATE).ok()
}

/// Parse a stored `YYYY-MM-DD` date, rejecting anything malformed.
pub fn parse_iso_date(value: &str) -> Option<Date> {
    Date::parse(value.get(..10)?, ISO_DATE).ok()
}

/// Year-month bucket ("YYYY-MM") of a stored date, or `None` when invalid.
pub fn year_month(date: &str) -> Option<String> {
    let d = parse_iso_date(date)?;
    Some(format!("{:04}-{:02}", d.year(), u8::from(d.month())))
}

pub fn validate_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_markup_and_bounds_length() {
        assert_eq!(
            sanitize_string("  <b>Groceries</b>  ", 255),
            Some("Groceries".to_string())
        );
        assert_eq!(sanitize_string("   ", 255), None);
        assert_eq!(sanitize_string("abcdef", 3), None);
    }

    #[test]
    fn length_bound_counts_characters_not_bytes() {
        let name = "é".repeat(200);
        assert_eq!(sanitize_string(&name, 255), Some(name.clone()));
        assert_eq!(sanitize_string(&name, 199), None);
    }

    #[test]
    fn mdy_dates() {
        assert!(validate_mdy_date("01/31/2024"));
        assert!(!validate_mdy_date("13/01/2024"));
        assert!(!validate_mdy_date("02/30/2024"));
        assert!(!validate_mdy_date("2024-01-31"));
    }

    #[test]
    fn year_month_buckets() {
        assert_eq!(year_month("2024-01-05"), Some("2024-01".to_string()));
        assert_eq!(year_month("not-a-date"), None);
        assert_eq!(year_month("2024-13-05"), None);
    }
}
