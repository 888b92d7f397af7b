use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::api::resource::{root_endpoint, unsupported};
use crate::db::api::{DocumentReference, Endpoint, Operation, Resource};
use crate::db::error::EcomResult;
use crate::db::model::ResourcePath;

use super::category::Categories;
use super::product::Products;

/// Associations between products and the categories listing them.
#[derive(Clone, Copy, Debug)]
pub struct ProductCategories;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductCategoryData {
    pub product_id: String,
    pub category_id: String,
    #[serde(default)]
    pub pri: Option<i64>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductCategoryInput {
    pub product_id: String,
    pub category_id: String,
}

impl ProductCategoryInput {
    pub fn new(
        product: &DocumentReference<Products>,
        category: &DocumentReference<Categories>,
    ) -> Self {
        Self {
            product_id: product.id().to_string(),
            category_id: category.id().to_string(),
        }
    }
}

impl Resource for ProductCategories {
    type Data = ProductCategoryData;
    type Input = ProductCategoryInput;
    type Subcollections = ();

    const COLLECTION_ID: &'static str = "products-categories";

    fn endpoint(
        operation: Operation,
        collection: &ResourcePath,
        id: Option<&str>,
    ) -> EcomResult<Endpoint> {
        if collection.len() != 1 || matches!(operation, Operation::Set | Operation::SetAll) {
            return Err(unsupported(operation, collection));
        }
        root_endpoint(operation, collection, id)
    }
}
