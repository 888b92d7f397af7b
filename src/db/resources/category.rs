use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::db::api::operations::encode_input;
use crate::db::api::resource::{root_endpoint, unsupported};
use crate::db::api::{CollectionReference, Endpoint, Operation, Resource};
use crate::db::error::EcomResult;
use crate::db::model::ResourcePath;

/// The `categories` root collection.
///
/// Categories are never created one at a time: the whole hierarchy is
/// replaced with `categories.set(root)`.
#[derive(Clone, Copy, Debug)]
pub struct Categories;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub segment: Option<String>,
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// One node of a category hierarchy written by `categories.set()` and
/// `categories-tree.set()`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryNodeInput {
    pub segment: String,
    pub name: String,
    pub categories: Vec<CategoryNodeInput>,
}

impl CategoryNodeInput {
    pub fn new(segment: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            name: name.into(),
            categories: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: CategoryNodeInput) -> Self {
        self.categories.push(child);
        self
    }
}

impl Resource for Categories {
    type Data = CategoryData;
    type Input = CategoryNodeInput;
    type Subcollections = ();

    const COLLECTION_ID: &'static str = "categories";

    fn endpoint(
        operation: Operation,
        collection: &ResourcePath,
        id: Option<&str>,
    ) -> EcomResult<Endpoint> {
        if collection.len() != 1 {
            return Err(unsupported(operation, collection));
        }
        match operation {
            Operation::Add | Operation::Set => Err(unsupported(operation, collection)),
            Operation::SetAll => Ok(Endpoint::new(Method::PUT, format!("/{collection}"))),
            _ => root_endpoint(operation, collection, id),
        }
    }
}

impl CollectionReference<Categories> {
    /// Replaces the entire category hierarchy with `root`.
    pub async fn set(&self, root: &CategoryNodeInput) -> EcomResult<()> {
        let body = encode_input(root)?;
        self.set_all(body).await
    }
}
