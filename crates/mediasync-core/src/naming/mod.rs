//! Destination file names for mirrored items.
//!
//! Catalog titles are chosen by the device and may contain anything; the
//! name written to disk must be a single safe path component that still
//! fits once wrapped in the staging prefix and suffix.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_file_name;

/// Picks the on-disk name for an item: the sanitized title, else the last URL
/// path segment, else the item id.
pub fn destination_name(title: &str, url: &str, item_id: &str) -> String {
    let from_title = sanitize_file_name(title);
    if !from_title.is_empty() {
        return from_title;
    }
    if let Some(segment) = filename_from_url_path(url) {
        let from_url = sanitize_file_name(&segment);
        if !from_url.is_empty() {
            return from_url;
        }
    }
    let from_id = sanitize_file_name(item_id);
    if from_id.is_empty() {
        "item".to_string()
    } else {
        from_id
    }
}
