//! Utility functions shared across the application.
//!
//! This module contains small helpers used by more than one service so they
//! are not duplicated between the resolver, the speech engine and the
//! recognizer.

use std::env;
use std::path::{Path, PathBuf};

/// Placeholder token carried by every greeting template.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Substitutes the name placeholder in a template.
///
/// Only the first occurrence is replaced and `name` is inserted verbatim:
/// no trimming and no escaping.
///
/// # Arguments
///
/// * `template` - A template containing [`NAME_PLACEHOLDER`]
/// * `name` - The text to insert
#[must_use]
pub fn substitute_name(template: &str, name: &str) -> String {
    template.replacen(NAME_PLACEHOLDER, name, 1)
}

/// Appends a single query parameter to a URL.
///
/// Uses `&` when the URL already carries a query string, `?` otherwise.
/// The value is percent-encoded.
#[must_use]
pub fn append_query_param(url: &str, key: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{key}={}", urlencoding::encode(value))
}

/// Looks up an executable on `PATH`.
///
/// Programs given as a path (containing a separator) are checked directly.
///
/// # Returns
///
/// The resolved path of the first match, or `None` if the program is not installed.
#[must_use]
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
