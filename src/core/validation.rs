//! Identifier normalization for table labels and column names
//!
//! Every identifier typed by a user is lowercased and each character outside
//! `[a-z0-9]` is replaced by an underscore. Replacement is per character, so
//! `"a--b"` becomes `"a__b"`; runs are not merged.

/// Normalize a user-supplied identifier.
pub fn normalize_identifier(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Check whether an identifier is already in normalized form
pub fn is_normalized(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
