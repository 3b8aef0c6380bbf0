//! Gmail search-query construction from a label and date-range selection

use serde::{Deserialize, Serialize};

/// System labels that Gmail addresses with an `in:` predicate
pub const SYSTEM_LABELS: &[&str] = &["INBOX", "SENT", "DRAFT", "SPAM", "TRASH"];

/// A label selection, resolved to the query predicate Gmail expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSelector {
    /// One of the fixed system labels; carries the lowercased name
    System(String),
    /// A user-defined label identifier, kept verbatim
    User(String),
}

impl LabelSelector {
    /// Classify a raw label identifier
    ///
    /// System labels are matched case-insensitively; everything else is
    /// treated as a user label and passed through untouched.
    pub fn parse(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        if SYSTEM_LABELS.contains(&upper.as_str()) {
            LabelSelector::System(upper.to_lowercase())
        } else {
            LabelSelector::User(raw.to_string())
        }
    }

    fn predicate(&self) -> String {
        match self {
            LabelSelector::System(name) => format!("in:{}", name),
            LabelSelector::User(id) => format!("label:{}", id),
        }
    }
}

/// Optional inclusive-style date bounds
///
/// Dates are opaque strings here; malformed values are forwarded to the
/// provider, which rejects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }
}

/// Build a Gmail search query from the given criteria
///
/// Emits tokens in the order label, `after:`, `before:`, joined by single
/// spaces. No criteria yields the empty query, which matches everything.
pub fn build_query(label: Option<&str>, range: &DateRange) -> String {
    let mut parts = Vec::new();

    if let Some(label) = label {
        parts.push(LabelSelector::parse(label).predicate());
    }

    if let Some(start) = range.start.as_deref() {
        parts.push(format!("after:{}", start));
    }

    if let Some(end) = range.end.as_deref() {
        parts.push(format!("before:{}", end));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria_yields_empty_query() {
        assert_eq!(build_query(None, &DateRange::default()), "");
    }

    #[test]
    fn test_system_label_is_case_folded() {
        assert_eq!(build_query(Some("INBOX"), &DateRange::default()), "in:inbox");
        assert_eq!(build_query(Some("inbox"), &DateRange::default()), "in:inbox");
        assert_eq!(build_query(Some("Spam"), &DateRange::default()), "in:spam");
    }

    #[test]
    fn test_all_system_labels_map_to_in_predicates() {
        for label in SYSTEM_LABELS {
            let query = build_query(Some(label), &DateRange::default());
            assert_eq!(query, format!("in:{}", label.to_lowercase()));
        }
    }

    #[test]
    fn test_user_label_is_kept_verbatim() {
        assert_eq!(
            build_query(Some("Newsletters"), &DateRange::default()),
            "label:Newsletters"
        );
    }

    #[test]
    fn test_full_criteria_ordering() {
        let range = DateRange::new(
            Some("2023-01-01".to_string()),
            Some("2024-01-01".to_string()),
        );
        assert_eq!(
            build_query(Some("Newsletters"), &range),
            "label:Newsletters after:2023-01-01 before:2024-01-01"
        );
    }

    #[test]
    fn test_date_only_queries() {
        let start_only = DateRange::new(Some("2023-06-15".to_string()), None);
        assert_eq!(build_query(None, &start_only), "after:2023-06-15");

        let end_only = DateRange::new(None, Some("2023-06-15".to_string()));
        assert_eq!(build_query(None, &end_only), "before:2023-06-15");
    }

    #[test]
    fn test_malformed_dates_pass_through() {
        let range = DateRange::new(Some("not-a-date".to_string()), None);
        assert_eq!(
            build_query(Some("TRASH"), &range),
            "in:trash after:not-a-date"
        );
    }

    #[test]
    fn test_label_selector_parse() {
        assert_eq!(
            LabelSelector::parse("SENT"),
            LabelSelector::System("sent".to_string())
        );
        assert_eq!(
            LabelSelector::parse("Label_42"),
            LabelSelector::User("Label_42".to_string())
        );
    }
}
