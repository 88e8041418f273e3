//! Detail-page identifiers derived from company display names.

/// Derives the detail-page slug for a company: lower-cased, spaces replaced
/// with hyphens.
///
/// No other normalization happens. Punctuation and non-ASCII letters pass
/// through unchanged, and two companies whose names differ only in case map
/// to the same slug. The URL builder percent-encodes whatever is left.
pub fn company_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
