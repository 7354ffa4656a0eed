//! Path-addressed edits to an in-memory document.
//!
//! A patch is a `(path, value | delete)` intent, the same contract the
//! dashboard uses against the gateway's config form. Patches are applied to a
//! caller-owned snapshot between resolution calls; nothing here performs I/O.

use serde_json::{Map, Value};

use crate::document::path::{ConfigPath, PathSegment};
use crate::errors::PatchError;

/// A single edit intent: set `path` to `value`, or delete the node at `path`
/// when `value` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigPatch {
    pub path: ConfigPath,
    pub value: Option<Value>,
}

impl ConfigPatch {
    pub fn set(path: ConfigPath, value: Value) -> Self {
        Self {
            path,
            value: Some(value),
        }
    }

    pub fn delete(path: ConfigPath) -> Self {
        Self { path, value: None }
    }
}

/// Apply one patch to a document.
///
/// Sets create missing (or explicit-null) intermediate mappings, but refuse
/// to overwrite an existing scalar or sequence that blocks a key segment and
/// refuse index segments that don't land inside an existing sequence.
/// Deletes never create anything and are idempotent: an absent path is Ok.
pub fn apply_patch(document: &mut Value, patch: &ConfigPatch) -> Result<(), PatchError> {
    match &patch.value {
        Some(value) => set_at_path(document, &patch.path, value.clone()),
        None => {
            delete_at_path(document, &patch.path);
            Ok(())
        }
    }
}

fn set_at_path(document: &mut Value, path: &ConfigPath, value: Value) -> Result<(), PatchError> {
    let Some((last, parents)) = path.segments().split_last() else {
        // Empty path addresses the root: replace the whole document.
        *document = value;
        return Ok(());
    };

    let mut cursor = document;
    for (depth, segment) in parents.iter().enumerate() {
        cursor = match segment {
            PathSegment::Key(key) => mapping_mut(cursor, path, depth)?
                .entry(key.clone())
                .or_insert(Value::Null),
            PathSegment::Index(index) => sequence_slot(cursor, path, depth, *index)?,
        };
    }

    match last {
        PathSegment::Key(key) => {
            mapping_mut(cursor, path, parents.len())?.insert(key.clone(), value);
        }
        PathSegment::Index(index) => {
            *sequence_slot(cursor, path, parents.len(), *index)? = value;
        }
    }
    Ok(())
}

fn delete_at_path(document: &mut Value, path: &ConfigPath) {
    let Some((last, parents)) = path.segments().split_last() else {
        // Deleting the root clears the document.
        *document = Value::Object(Map::new());
        return;
    };

    let mut cursor = document;
    for segment in parents {
        let child = match segment {
            PathSegment::Key(key) => cursor.as_object_mut().and_then(|map| map.get_mut(key)),
            PathSegment::Index(index) => cursor.as_array_mut().and_then(|seq| seq.get_mut(*index)),
        };
        match child {
            Some(next) => cursor = next,
            None => return,
        }
    }

    match last {
        PathSegment::Key(key) => {
            if let Some(map) = cursor.as_object_mut() {
                map.remove(key);
            }
        }
        PathSegment::Index(index) => {
            if let Some(seq) = cursor.as_array_mut() {
                if *index < seq.len() {
                    seq.remove(*index);
                }
            }
        }
    }
}

/// View the cursor as a mutable mapping, promoting an explicit null so
/// missing intermediate tables can be created on write.
fn mapping_mut<'a>(
    cursor: &'a mut Value,
    path: &ConfigPath,
    depth: usize,
) -> Result<&'a mut Map<String, Value>, PatchError> {
    if cursor.is_null() {
        *cursor = Value::Object(Map::new());
    }
    match cursor.as_object_mut() {
        Some(map) => Ok(map),
        None => Err(PatchError::NotAMapping {
            at: prefix_text(path, depth),
        }),
    }
}

/// Mutable access to an existing sequence element. Writes never grow a
/// sequence or conjure one up.
fn sequence_slot<'a>(
    cursor: &'a mut Value,
    path: &ConfigPath,
    depth: usize,
    index: usize,
) -> Result<&'a mut Value, PatchError> {
    let seq = cursor.as_array_mut().ok_or_else(|| PatchError::NotASequence {
        at: prefix_text(path, depth),
    })?;
    let len = seq.len();
    seq.get_mut(index).ok_or_else(|| PatchError::IndexOutOfRange {
        at: prefix_text(path, depth),
        index,
        len,
    })
}

/// Dotted text of the first `depth` segments, for error messages.
fn prefix_text(path: &ConfigPath, depth: usize) -> String {
    if depth == 0 {
        return "(root)".to_string();
    }
    ConfigPath::from(path.segments()[..depth].to_vec()).to_string()
}
