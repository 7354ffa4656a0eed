//! The loosely-typed config document and path-addressed reads into it.
//!
//! The document is a `serde_json::Value` tree owned by the gateway's config
//! store; this crate only reads snapshots of it and proposes patches. Reads
//! are total: any mismatch between a path and the document shape yields
//! absence (`None`), never an error, so partially edited or malformed
//! documents degrade to "not configured" instead of failing.

pub mod patch;
pub mod path;

use serde_json::Value;

use crate::document::path::{ConfigPath, PathSegment};

/// Walk `path` down from the document root and return the node it addresses.
///
/// An index segment requires a sequence, a key segment requires a mapping
/// (not a sequence, not a scalar, not null); anything else, a missing member,
/// or an out-of-range index is absence, and absence propagates through the
/// remaining segments. The empty path returns the root unchanged.
pub fn value_at_path<'a>(document: &'a Value, path: &ConfigPath) -> Option<&'a Value> {
    let mut cursor = document;
    for segment in path.segments() {
        cursor = match segment {
            PathSegment::Index(index) => cursor.as_array()?.get(*index)?,
            PathSegment::Key(key) => cursor.as_object()?.get(key)?,
        };
    }
    Some(cursor)
}

/// Like [`value_at_path`], but only for string leaves.
pub fn string_at_path<'a>(document: &'a Value, path: &ConfigPath) -> Option<&'a str> {
    value_at_path(document, path)?.as_str()
}
