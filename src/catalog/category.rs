use serde::Serialize;

use super::product::ProductId;
use super::tree::CategoryTree;

/// Index of a [`Category`] inside the [`CategoryTree`] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub(crate) usize);

/// A node of the category tree.
///
/// `path` is the parent's path joined with `segment`; the root's path is its
/// own segment. Parent and children are arena indices into the owning tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub(crate) id: CategoryId,
    pub(crate) segment: String,
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) depth: usize,
    pub(crate) parent: Option<CategoryId>,
    pub(crate) categories: Vec<CategoryId>,
    pub(crate) products: Vec<ProductId>,
}

impl Category {
    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of edges between this category and the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    pub fn products(&self) -> &[ProductId] {
        &self.products
    }

    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Only leaf categories hold products.
    pub fn is_leaf(&self) -> bool {
        self.categories.is_empty()
    }

    /// Linear scan of the direct children for `segment`.
    pub fn find<'t>(&self, tree: &'t CategoryTree, segment: &str) -> Option<&'t Category> {
        self.categories
            .iter()
            .filter_map(|id| tree.category(*id))
            .find(|child| child.segment == segment)
    }

    pub fn has_product_with_path(&self, tree: &CategoryTree, path: &str) -> bool {
        self.products
            .iter()
            .filter_map(|id| tree.product(*id))
            .any(|product| product.path() == path)
    }

    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            segment: self.segment.clone(),
            path: self.path.clone(),
            name: self.name.clone(),
        }
    }
}

/// Lightweight projection used for routing tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub segment: String,
    pub path: String,
    pub name: String,
}

/// One step of the root-to-category navigation trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadCrumb {
    pub segment: String,
    pub path: String,
    pub name: String,
    pub disabled: bool,
}
