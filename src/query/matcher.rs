//! Substring matching over values

/// How terms are compared against values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-sensitive substring match
    Exact,

    /// Case-insensitive substring match
    Fuzzy,
}

/// Check whether `value` contains every term under `mode`
///
/// An empty term list matches every value.
pub fn matches_all<S: AsRef<str>>(value: &str, terms: &[S], mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => terms.iter().all(|term| value.contains(term.as_ref())),
        MatchMode::Fuzzy => {
            let value = value.to_lowercase();
            terms
                .iter()
                .all(|term| value.contains(&term.as_ref().to_lowercase()))
        }
    }
}

/// Format a search hit as `"<key>: <value>"`
pub fn format_hit(key: &str, value: &str) -> String {
    format!("{}: {}", key, value)
}
