//! Linux-safe file name sanitization for catalog titles.

use crate::transfer::{STAGING_PREFIX, STAGING_SUFFIX};

/// Longest name we emit, leaving room for the staging prefix and suffix
/// within Linux NAME_MAX (255 bytes).
const MAX_NAME_BYTES: usize = 255 - STAGING_PREFIX.len() - STAGING_SUFFIX.len();

/// Turns a catalog title into a single path component.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Trims surrounding whitespace and leading dots (no hidden files, which
///   would clash with staging names and the ledger dotfile)
/// - Trims trailing dots
/// - Truncates on a char boundary to fit the staging name in NAME_MAX
pub fn sanitize_file_name(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced
        .trim()
        .trim_start_matches('.')
        .trim_end_matches('.')
        .trim();

    let mut take = trimmed.len().min(MAX_NAME_BYTES);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_title_untouched() {
        assert_eq!(sanitize_file_name("IMG_0001.JPG"), "IMG_0001.JPG");
        assert_eq!(sanitize_file_name("Holiday clip 1.MP4"), "Holiday clip 1.MP4");
    }

    #[test]
    fn separators_and_controls_replaced() {
        assert_eq!(sanitize_file_name("a/b\\c\u{0}d\ne.jpg"), "a_b_c_d_e.jpg");
    }

    #[test]
    fn no_hidden_or_traversal_names() {
        assert_eq!(sanitize_file_name(".state.db"), "state.db");
        assert_eq!(sanitize_file_name(".."), "");
        assert_eq!(sanitize_file_name("  ..photo.jpg.. "), "photo.jpg");
    }

    #[test]
    fn truncates_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_file_name(&long);
        assert!(out.len() <= MAX_NAME_BYTES);
        assert!(out.chars().all(|c| c == 'é'));
        let staged = format!("{STAGING_PREFIX}{out}{STAGING_SUFFIX}");
        assert!(staged.len() <= 255);
    }
}
