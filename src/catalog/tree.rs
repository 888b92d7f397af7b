use std::collections::HashMap;
use std::fmt::Write as _;

use crate::db::error::{internal_error, EcomResult};
use crate::db::resources::CategoryTreeNode;

use super::category::{BreadCrumb, Category, CategoryId, CategorySummary};
use super::product::{Product, ProductId};

/// An immutable, fully indexed category hierarchy.
///
/// All categories and product listings live in two arenas; every
/// [`CategoryId`] and [`ProductId`] handed out by a tree is only meaningful
/// for that tree.
#[derive(Clone, Debug)]
pub struct CategoryTree {
    categories: Vec<Category>,
    products: Vec<Product>,
    root: CategoryId,
    leaf_categories: Vec<CategoryId>,
    non_leaf_categories: Vec<CategoryId>,
    all_products: Vec<ProductId>,
    product_by_path: HashMap<String, ProductId>,
    product_path_categories: HashMap<String, Vec<CategoryId>>,
}

impl CategoryTree {
    /// Builds the tree from a server payload.
    ///
    /// The first depth-first pass creates categories and product listings,
    /// the second classifies leaves and fills the product indexes.
    pub fn from_payload(payload: &CategoryTreeNode) -> EcomResult<Self> {
        let mut tree = Self {
            categories: Vec::new(),
            products: Vec::new(),
            root: CategoryId(0),
            leaf_categories: Vec::new(),
            non_leaf_categories: Vec::new(),
            all_products: Vec::new(),
            product_by_path: HashMap::new(),
            product_path_categories: HashMap::new(),
        };
        tree.root = tree.walk(payload, None)?;
        tree.index();
        Ok(tree)
    }

    fn walk(&mut self, node: &CategoryTreeNode, parent: Option<CategoryId>) -> EcomResult<CategoryId> {
        if node.segment.is_empty() || node.segment.contains('/') {
            return Err(internal_error(format!(
                "Malformed category tree: invalid segment '{}'",
                node.segment
            )));
        }

        let (path, depth) = match parent {
            Some(parent) => {
                let parent = &self.categories[parent.0];
                (format!("{}/{}", parent.path, node.segment), parent.depth + 1)
            }
            None => (node.segment.clone(), 0),
        };

        let id = CategoryId(self.categories.len());
        // Only leaves hold products.
        let mut products = Vec::new();
        if node.categories.is_empty() {
            products.reserve(node.products.len());
            for listing in &node.products {
                products.push(ProductId(self.products.len()));
                self.products.push(Product::from_listing(listing));
            }
        } else if !node.products.is_empty() {
            log::debug!(
                "Ignoring {} products listed on non-leaf category '{path}'",
                node.products.len()
            );
        }
        self.categories.push(Category {
            id,
            segment: node.segment.clone(),
            path,
            name: node.name.clone(),
            depth,
            parent,
            categories: Vec::new(),
            products,
        });
        if let Some(parent) = parent {
            self.categories[parent.0].categories.push(id);
        }

        for child in &node.categories {
            self.walk(child, Some(id))?;
        }
        Ok(id)
    }

    fn index(&mut self) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let category = &self.categories[id.0];
            if category.is_leaf() {
                self.leaf_categories.push(id);
                for product_id in &category.products {
                    let path = self.products[product_id.0].path();
                    if !self.product_by_path.contains_key(path) {
                        self.product_by_path.insert(path.to_string(), *product_id);
                        self.all_products.push(*product_id);
                    }
                    let holders = self
                        .product_path_categories
                        .entry(path.to_string())
                        .or_default();
                    if !holders.contains(&id) {
                        holders.push(id);
                    }
                }
            } else {
                self.non_leaf_categories.push(id);
            }
            stack.extend(category.categories.iter().rev().copied());
        }
    }

    pub fn root(&self) -> &Category {
        &self.categories[self.root.0]
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.0)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(id.0)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Resolves a `/`-separated path such as `a/c/f/j/n`.
    ///
    /// The first segment must be the root's; each further segment is matched
    /// against the children of the previous level.
    pub fn find_category_by_path(&self, path: &str) -> Option<&Category> {
        let mut segments = path.trim_matches('/').split('/');
        let mut current = self.root();
        if segments.next() != Some(current.segment()) {
            return None;
        }
        for segment in segments {
            current = current.find(self, segment)?;
        }
        Some(current)
    }

    pub fn find_product_by_path(&self, path: &str) -> Option<&Product> {
        self.product_by_path
            .get(path)
            .and_then(|id| self.product(*id))
    }

    /// Leaf categories in depth-first order.
    pub fn leaf_categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.leaf_categories.iter().filter_map(|id| self.category(*id))
    }

    pub fn non_leaf_categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.non_leaf_categories
            .iter()
            .filter_map(|id| self.category(*id))
    }

    /// Non-leaf categories that are neither the root nor its direct children.
    pub fn mid_range_categories(&self) -> Vec<CategorySummary> {
        self.non_leaf_categories()
            .filter(|category| category.depth() >= 2)
            .map(Category::summary)
            .collect()
    }

    pub fn bottom_level_categories(&self) -> Vec<CategorySummary> {
        self.leaf_categories().map(Category::summary).collect()
    }

    /// Every distinct product path, in first-seen order.
    pub fn all_products(&self) -> Vec<&Product> {
        self.all_products
            .iter()
            .filter_map(|id| self.product(*id))
            .collect()
    }

    /// Leaf categories listing the product at `path`.
    pub fn categories_for_product(&self, path: &str) -> Vec<&Category> {
        self.product_path_categories
            .get(path)
            .map(|ids| ids.iter().filter_map(|id| self.category(*id)).collect())
            .unwrap_or_default()
    }

    pub fn products_in(&self, category: &Category) -> Vec<&Product> {
        category
            .products()
            .iter()
            .filter_map(|id| self.product(*id))
            .collect()
    }

    /// Trail from the root down to `category`. The root entry is disabled.
    pub fn breadcrumbs(&self, category: &Category) -> Vec<BreadCrumb> {
        let mut crumbs = Vec::with_capacity(category.depth() + 1);
        let mut current = Some(category);
        while let Some(node) = current {
            crumbs.push(BreadCrumb {
                segment: node.segment.clone(),
                path: node.path.clone(),
                name: node.name.clone(),
                disabled: node.is_root(),
            });
            current = node.parent().and_then(|parent| self.category(parent));
        }
        crumbs.reverse();
        crumbs
    }

    /// Indented listing of the whole tree, one category per line.
    pub fn dump(&self) -> String {
        let mut output = String::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(category) = self.category(id) else {
                continue;
            };
            let _ = writeln!(
                output,
                "{:indent$}segment: {}\tpath: {}\tname: {}",
                "",
                category.segment,
                category.path,
                category.name,
                indent = category.depth * 2
            );
            stack.extend(category.categories.iter().rev().copied());
        }
        output
    }
}
