use chrono::{DateTime, Utc};

use crate::db::resources::TreeProduct;

/// Index of a [`Product`] inside the [`CategoryTree`](super::CategoryTree)
/// that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub(crate) usize);

/// A product listed under a leaf category.
///
/// The same product path may be listed by several leaves; each listing is its
/// own node and the tree's path index points at the first one seen.
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    id: String,
    sku: String,
    path: String,
    name: String,
    created: Option<DateTime<Utc>>,
    modified: Option<DateTime<Utc>>,
}

impl Product {
    pub(crate) fn from_listing(listing: &TreeProduct) -> Self {
        Self {
            id: listing.id.clone(),
            sku: listing.sku.clone(),
            path: listing.path.clone(),
            name: listing.name.clone(),
            created: listing.created,
            modified: listing.modified,
        }
    }

    /// Server id, usable with `db.products.doc(id)`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }
}
