//! Descriptors for each REST resource exposed by the e-commerce API.

mod category;
mod category_tree;
mod developer_key;
mod image;
mod price;
mod price_list;
mod product;
mod product_category;
mod user;

pub use category::{Categories, CategoryData, CategoryNodeInput};
pub use category_tree::{CategoriesTree, CategoryTreeNode, TreeProduct, CATEGORY_TREE_DOCUMENT_ID};
pub use developer_key::{DeveloperKeyData, DeveloperKeys, NewDeveloperKey};
pub use image::{ImageData, ImageInput, Images};
pub use price::{PriceData, PriceInput, Prices};
pub use price_list::{PriceListData, PriceListInput, PriceLists};
pub use product::{ProductData, ProductInput, ProductSubcollections, Products};
pub use product_category::{ProductCategories, ProductCategoryData, ProductCategoryInput};
pub use user::{Role, UserData, UserInput, Users};

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrEnvelope<T> {
    Envelope { data: Vec<T> },
    Bare(Vec<T>),
}

/// Accepts `{ "object": "list", "data": [...] }`, a bare array, or `null`.
pub(crate) fn list_or_envelope<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<ListOrEnvelope<T>>::deserialize(deserializer)? {
        Some(ListOrEnvelope::Envelope { data }) => data,
        Some(ListOrEnvelope::Bare(items)) => items,
        None => Vec::new(),
    })
}
