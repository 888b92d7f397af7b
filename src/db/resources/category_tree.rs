use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;

use crate::db::api::resource::unsupported;
use crate::db::api::{Endpoint, Operation, Resource};
use crate::db::error::EcomResult;
use crate::db::model::ResourcePath;

use super::category::CategoryNodeInput;
use super::list_or_envelope;

/// The nested category hierarchy served by `/categories-tree`.
///
/// The API exposes it as a single document, so the only reference is
/// `categories-tree/{CATEGORY_TREE_DOCUMENT_ID}`.
#[derive(Clone, Copy, Debug)]
pub struct CategoriesTree;

pub const CATEGORY_TREE_DOCUMENT_ID: &str = "root";

/// One category of the tree payload, with its products and child
/// categories.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryTreeNode {
    #[serde(default)]
    pub id: Option<String>,
    pub segment: String,
    pub name: String,
    #[serde(default, deserialize_with = "list_or_envelope")]
    pub categories: Vec<CategoryTreeNode>,
    #[serde(default, deserialize_with = "list_or_envelope")]
    pub products: Vec<TreeProduct>,
}

/// Product summary embedded in a leaf of the tree payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TreeProduct {
    pub id: String,
    pub path: String,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

impl Resource for CategoriesTree {
    type Data = CategoryTreeNode;
    type Input = CategoryNodeInput;
    type Subcollections = ();

    const COLLECTION_ID: &'static str = "categories-tree";

    fn endpoint(
        operation: Operation,
        collection: &ResourcePath,
        _id: Option<&str>,
    ) -> EcomResult<Endpoint> {
        if collection.len() != 1 {
            return Err(unsupported(operation, collection));
        }
        match operation {
            Operation::Get => Ok(Endpoint::new(Method::GET, "/categories-tree")),
            Operation::Set => Ok(Endpoint::new(Method::POST, "/categories-tree")),
            _ => Err(unsupported(operation, collection)),
        }
    }
}
