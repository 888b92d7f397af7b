use std::fmt::{Debug, Display, Formatter};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::error::{usage_error, EcomError, EcomResult};
use crate::db::model::ResourcePath;

/// The operations a reference can route to the REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// List a collection (or run a query over it).
    List,
    /// Create a document with a server-assigned id.
    Add,
    /// Fetch a single document.
    Get,
    /// Replace a single document.
    Set,
    /// Delete a single document.
    Delete,
    /// Replace the whole collection in one request.
    SetAll,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::List => "get",
            Operation::Add => "add",
            Operation::Get => "get",
            Operation::Set => "set",
            Operation::Delete => "delete",
            Operation::SetAll => "set",
        };
        f.write_str(name)
    }
}

/// HTTP method and request path resolved for one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// Describes one REST resource: its collection id, wire types and routing.
///
/// References are generic over a `Resource`, so adding a new endpoint family
/// means writing a descriptor rather than new reference types.
pub trait Resource: Send + Sync + 'static {
    /// Document payload decoded from the API.
    type Data: DeserializeOwned + Clone + Debug + Send + Sync;
    /// Request body accepted by `add` and `set`.
    type Input: Serialize + Send + Sync;
    /// Memoized sub-collection handles owned by each document reference.
    type Subcollections: Default + Send + Sync;

    /// Last segment of the collection path (e.g. `products`).
    const COLLECTION_ID: &'static str;

    /// Resolves the endpoint for `operation` on `collection`, optionally
    /// targeting the document `id`.
    ///
    /// The default routes root collections RESTfully and rejects every
    /// operation on sub-collection paths.
    fn endpoint(
        operation: Operation,
        collection: &ResourcePath,
        id: Option<&str>,
    ) -> EcomResult<Endpoint> {
        if collection.len() != 1 {
            return Err(unsupported(operation, collection));
        }
        root_endpoint(operation, collection, id)
    }
}

/// RESTful routing shared by most root collections.
pub fn root_endpoint(
    operation: Operation,
    collection: &ResourcePath,
    id: Option<&str>,
) -> EcomResult<Endpoint> {
    let base = format!("/{}", collection.canonical_string());
    match (operation, id) {
        (Operation::List, _) => Ok(Endpoint::new(Method::GET, base)),
        (Operation::Add, _) => Ok(Endpoint::new(Method::POST, base)),
        (Operation::Get, Some(id)) => Ok(Endpoint::new(Method::GET, format!("{base}/{id}"))),
        (Operation::Set, Some(id)) => Ok(Endpoint::new(Method::PUT, format!("{base}/{id}"))),
        (Operation::Delete, Some(id)) => {
            Ok(Endpoint::new(Method::DELETE, format!("{base}/{id}")))
        }
        (Operation::Get | Operation::Set | Operation::Delete, None) => Err(usage_error(format!(
            ".{operation}() on {collection} requires a document id"
        ))),
        (Operation::SetAll, _) => Err(unsupported(operation, collection)),
    }
}

/// Usage error for an operation the resource does not offer at `collection`.
pub fn unsupported(operation: Operation, collection: &ResourcePath) -> EcomError {
    usage_error(format!(".{operation}() is not supported on {collection}"))
}

/// Fails unless `collection` is a sub-collection (has a parent document).
pub fn require_parent(operation: Operation, collection: &ResourcePath, hint: &str) -> EcomResult<()> {
    if collection.len() < 3 {
        return Err(usage_error(format!(
            ".{operation}() cannot be called on the root {collection} collection. {hint}"
        )));
    }
    Ok(())
}

/// Fails unless `collection` is a root collection.
pub fn require_root(operation: Operation, collection: &ResourcePath, hint: &str) -> EcomResult<()> {
    if collection.len() != 1 {
        return Err(usage_error(format!(
            ".{operation}() cannot be called through the sub-collection {collection}. {hint}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(value: &str) -> ResourcePath {
        ResourcePath::from_string(value).unwrap()
    }

    #[test]
    fn root_routing() {
        let products = path("products");
        assert_eq!(
            root_endpoint(Operation::List, &products, None).unwrap(),
            Endpoint::new(Method::GET, "/products")
        );
        assert_eq!(
            root_endpoint(Operation::Set, &products, Some("p1")).unwrap(),
            Endpoint::new(Method::PUT, "/products/p1")
        );
        assert_eq!(
            root_endpoint(Operation::Delete, &products, Some("p1")).unwrap(),
            Endpoint::new(Method::DELETE, "/products/p1")
        );
    }

    #[test]
    fn document_operations_need_an_id() {
        let err = root_endpoint(Operation::Get, &path("products"), None).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn parent_and_root_guards() {
        let root = path("images");
        let sub = path("products/p1/images");
        assert!(require_parent(Operation::Add, &root, "").is_err());
        assert!(require_parent(Operation::Add, &sub, "").is_ok());
        assert!(require_root(Operation::Get, &sub, "").is_err());
        assert!(require_root(Operation::Get, &root, "").is_ok());
    }
}
