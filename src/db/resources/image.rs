use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::db::api::resource::{require_parent, require_root, root_endpoint, unsupported};
use crate::db::api::{Endpoint, Operation, Resource};
use crate::db::error::EcomResult;
use crate::db::model::ResourcePath;

/// Product images. Uploads and listings go through `products/{id}/images`;
/// individual images are read and deleted through the root `images`
/// collection.
///
/// The reference returned by `product.images().add()` lives under the
/// product, so `get()` and `delete()` on it are usage errors. Re-open it as
/// `db.images.doc(image.id())` to read or delete the image.
#[derive(Clone, Copy, Debug)]
pub struct Images;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub path: String,
    #[serde(default)]
    pub gsurl: Option<String>,
    #[serde(default, alias = "w")]
    pub width: u32,
    #[serde(default, alias = "h")]
    pub height: u32,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageInput {
    pub path: String,
}

const SUBCOLLECTION_HINT: &str = "Use products.doc(\"<id>\").images() instead.";
const ROOT_HINT: &str = "Use the root images collection instead.";

impl Resource for Images {
    type Data = ImageData;
    type Input = ImageInput;
    type Subcollections = ();

    const COLLECTION_ID: &'static str = "images";

    fn endpoint(
        operation: Operation,
        collection: &ResourcePath,
        id: Option<&str>,
    ) -> EcomResult<Endpoint> {
        match operation {
            Operation::Add | Operation::List => {
                require_parent(operation, collection, SUBCOLLECTION_HINT)?;
                if collection.len() != 3 || collection.segment(0) != Some("products") {
                    return Err(unsupported(operation, collection));
                }
                let method = if operation == Operation::Add {
                    Method::POST
                } else {
                    Method::GET
                };
                Ok(Endpoint::new(method, format!("/{collection}")))
            }
            Operation::Get | Operation::Delete => {
                require_root(operation, collection, ROOT_HINT)?;
                root_endpoint(operation, collection, id)
            }
            Operation::Set | Operation::SetAll => Err(unsupported(operation, collection)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(value: &str) -> ResourcePath {
        ResourcePath::from_string(value).unwrap()
    }

    #[test]
    fn add_requires_a_parent_product() {
        let err = Images::endpoint(Operation::Add, &path("images"), None).unwrap_err();
        assert!(err.is_usage());
        assert!(err.message().contains("products.doc"));

        let endpoint = Images::endpoint(Operation::Add, &path("products/p1/images"), None).unwrap();
        assert_eq!(endpoint, Endpoint::new(Method::POST, "/products/p1/images"));
    }

    #[test]
    fn reads_require_the_root_collection() {
        let err = Images::endpoint(Operation::Get, &path("products/p1/images"), Some("i1"))
            .unwrap_err();
        assert!(err.is_usage());

        let endpoint = Images::endpoint(Operation::Delete, &path("images"), Some("i1")).unwrap();
        assert_eq!(endpoint, Endpoint::new(Method::DELETE, "/images/i1"));
    }

    #[test]
    fn set_is_not_offered() {
        assert!(Images::endpoint(Operation::Set, &path("images"), Some("i1"))
            .unwrap_err()
            .is_usage());
    }

    #[test]
    fn short_size_aliases_decode() {
        let data: ImageData =
            serde_json::from_value(serde_json::json!({ "path": "a.jpg", "w": 640, "h": 480 }))
                .unwrap();
        assert_eq!((data.width, data.height), (640, 480));
    }
}
