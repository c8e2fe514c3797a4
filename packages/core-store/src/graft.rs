//! Mapping keys onto filesystem paths beneath a store root.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::Key;

/// Produce the absolute filesystem path a key refers to under `root`.
///
/// Keys are always relative to the root; a leading `/` in the raw key never
/// reaches this point. Since [`Key`] rejects `.`/`..` components and
/// separators, the result always stays inside `root`.
pub fn graft(root: &Path, key: &Key) -> PathBuf {
    root.components()
        .chain(
            key.components()
                .iter()
                .map(|c| Component::Normal(OsStr::new(c))),
        )
        .collect()
}
