//! Symbolic paths into the config document.
//!
//! A path is an ordered sequence of segments, each a mapping key or a
//! sequence index. On the wire (and in the dashboard) a path is a JSON array
//! mixing strings and numbers, e.g. `["agents", "defaults", "model"]`; on the
//! CLI it is dotted text where an all-digit segment is an index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PathParseError;

/// One step into the document: a mapping key or a sequence index.
///
/// `untagged` keeps the wire shape as a bare string or number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// An ordered, immutable sequence of segments addressing one node in the
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigPath(Vec<PathSegment>);

impl ConfigPath {
    /// The root path (no segments). Addresses the document itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from mapping keys only.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(|k| PathSegment::Key(k.into())).collect())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new path with one more segment appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl From<Vec<PathSegment>> for ConfigPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Key(key) => f.write_str(key)?,
                PathSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigPath {
    type Err = PathParseError;

    /// Parse dotted text. A segment that parses as `usize` becomes an index,
    /// so all-digit mapping keys cannot be addressed from the dotted form.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(PathParseError::Empty);
        }
        let mut segments = Vec::new();
        for (position, part) in text.split('.').enumerate() {
            if part.is_empty() {
                return Err(PathParseError::EmptySegment { position });
            }
            match part.parse::<usize>() {
                Ok(index) => segments.push(PathSegment::Index(index)),
                Err(_) => segments.push(PathSegment::Key(part.to_string())),
            }
        }
        Ok(Self(segments))
    }
}
