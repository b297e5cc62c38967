//! Site-root discovery.

use pwapack_core::ENTRY_FILE_NAME;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Depth-first search for the entry `index.html` under `root`.
///
/// The first match in directory-listing traversal order wins, even when a
/// shallower one exists later in the walk; the name match is exact and
/// case-sensitive. Unreadable entries are skipped rather than failing the
/// search.
pub fn find_entry_html(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == ENTRY_FILE_NAME)
        .map(|entry| entry.into_path())
}
