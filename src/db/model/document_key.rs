use crate::db::error::{usage_error, EcomResult};
use crate::db::model::ResourcePath;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    path: ResourcePath,
}

impl DocumentKey {
    pub fn from_path(path: ResourcePath) -> EcomResult<Self> {
        if !path.is_document() {
            return Err(usage_error(
                "Document keys must point to a document (even number of segments)",
            ));
        }
        Ok(Self { path })
    }

    /// Callers guarantee `path` has an even, non-zero number of segments.
    pub(crate) fn from_path_unchecked(path: ResourcePath) -> Self {
        debug_assert!(path.is_document());
        Self { path }
    }

    pub fn from_string(path: &str) -> EcomResult<Self> {
        let resource = ResourcePath::from_string(path)?;
        Self::from_path(resource)
    }

    pub fn collection_path(&self) -> ResourcePath {
        self.path.without_last()
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    pub fn id(&self) -> &str {
        self.path.last_segment().unwrap_or_default()
    }
}

/// Validates a caller-supplied document identifier.
pub fn validate_document_id(id: &str) -> EcomResult<()> {
    if id.trim().is_empty() {
        return Err(usage_error("Document ID must be a non-empty string"));
    }
    if id.contains('/') {
        return Err(usage_error("Document ID cannot contain '/'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_even_segments() {
        let err = DocumentKey::from_string("products").unwrap_err();
        assert_eq!(err.code_str(), "ecom/usage");
    }

    #[test]
    fn parses_valid_path() {
        let key = DocumentKey::from_string("products/p1").unwrap();
        assert_eq!(key.id(), "p1");
        assert_eq!(key.collection_path().canonical_string(), "products");
    }

    #[test]
    fn rejects_bad_ids() {
        assert!(validate_document_id("").is_err());
        assert!(validate_document_id("a/b").is_err());
        assert!(validate_document_id("7e2c2747").is_ok());
    }
}
