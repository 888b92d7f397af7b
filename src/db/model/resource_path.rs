use std::fmt::{Display, Formatter};

use crate::db::error::{usage_error, EcomResult};

/// Slash-separated location of a collection or document, e.g.
/// `products/7e2c/images`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(segments.into_iter().map(Into::into).collect())
    }

    pub fn from_string(path: &str) -> EcomResult<Self> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        if trimmed.contains("//") {
            return Err(usage_error("Found empty segment in resource path"));
        }
        Ok(Self::from_segments(trimmed.split('/')))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(|s| s.as_str())
    }

    pub fn child<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut new_segments = self.segments.clone();
        new_segments.extend(segments.into_iter().map(Into::into));
        Self::new(new_segments)
    }

    pub fn pop_last(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self::new(segments))
    }

    pub fn without_last(&self) -> Self {
        self.pop_last().unwrap_or_else(Self::root)
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn canonical_string(&self) -> String {
        self.segments.join("/")
    }

    /// Returns `true` when the path names a collection (odd segment count).
    pub fn is_collection(&self) -> bool {
        self.segments.len() % 2 == 1
    }

    /// Returns `true` when the path names a document (even, non-zero count).
    pub fn is_document(&self) -> bool {
        !self.segments.is_empty() && self.segments.len() % 2 == 0
    }
}

impl Display for ResourcePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}
