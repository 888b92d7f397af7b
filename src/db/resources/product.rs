use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::api::{CollectionReference, DocumentReference, Resource};

use super::image::Images;
use super::price::Prices;

/// The `products` root collection.
#[derive(Clone, Copy, Debug)]
pub struct Products;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub path: String,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// Body of `products.add()` and `product.set()`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductInput {
    pub path: String,
    pub sku: String,
    pub name: String,
}

/// Sub-collections created on first access and kept for the lifetime of a
/// product reference.
#[derive(Default)]
pub struct ProductSubcollections {
    images: OnceLock<CollectionReference<Images>>,
    prices: OnceLock<CollectionReference<Prices>>,
}

impl Resource for Products {
    type Data = ProductData;
    type Input = ProductInput;
    type Subcollections = ProductSubcollections;

    const COLLECTION_ID: &'static str = "products";
}

impl DocumentReference<Products> {
    /// `products/{id}/images`.
    pub fn images(&self) -> &CollectionReference<Images> {
        self.subcollections()
            .images
            .get_or_init(|| self.subcollection::<Images>())
    }

    /// `products/{id}/prices`.
    pub fn prices(&self) -> &CollectionReference<Prices> {
        self.subcollections()
            .prices
            .get_or_init(|| self.subcollection::<Prices>())
    }
}
