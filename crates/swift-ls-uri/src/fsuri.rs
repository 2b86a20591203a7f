//! `file://` URI ⇄ filesystem path conversion and normalization.
//!
//! Adapted from the URI-handling conventions used elsewhere in this
//! codebase family: percent-encoding is delegated to the `url` crate, and
//! lookups are normalized so that platform case-folding of drive letters
//! does not split one document into two cache entries.

use url::Url;

/// Convert a `file://` URI to a filesystem path.
///
/// Returns `None` if the URI is not a valid `file://` URI.
pub fn uri_to_fs_path(uri: &str) -> Option<std::path::PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Convert a filesystem path to a `file://` URI.
///
/// # Errors
///
/// Returns an error if the path cannot be made absolute or converted to a
/// URI.
pub fn fs_path_to_uri<P: AsRef<std::path::Path>>(path: P) -> Result<String, String> {
    let path = path.as_ref();
    let abs_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| format!("failed to get current directory: {e}"))?
            .join(path)
    };
    Url::from_file_path(&abs_path)
        .map(|url| url.to_string())
        .map_err(|_| format!("failed to convert path to uri: {}", abs_path.display()))
}
