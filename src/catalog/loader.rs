use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use futures::future::try_join_all;

use crate::db::api::{CollectionReference, Db, DocumentReference};
use crate::db::error::{not_found, usage_error, EcomError, EcomResult};
use crate::db::resources::{CategoriesTree, ProductData, Products};

use super::category::Category;
use super::tree::CategoryTree;

/// The in-memory catalog: the current [`CategoryTree`] plus cached product
/// details keyed by product path.
///
/// A load publishes a new tree with a single swap after it has been fully
/// built, so readers see either the previous tree or the new one. No lock is
/// held across a request.
pub struct Catalog {
    tree_ref: DocumentReference<CategoriesTree>,
    products: CollectionReference<Products>,
    tree: RwLock<Option<Arc<CategoryTree>>>,
    details: RwLock<HashMap<String, ProductData>>,
}

impl Catalog {
    pub fn new(db: &Db) -> Self {
        Self {
            tree_ref: db.category_tree.clone(),
            products: db.products.clone(),
            tree: RwLock::new(None),
            details: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.tree().is_some()
    }

    /// Returns the current tree, if one has been loaded.
    pub fn tree(&self) -> Option<Arc<CategoryTree>> {
        self.tree
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    /// Fetches and builds the category tree.
    ///
    /// When a tree is already loaded and `force_load` is false, the current
    /// tree is returned without a request. A failed fetch or build leaves the
    /// previous tree in place. A forced reload also drops cached product
    /// details.
    pub async fn load(&self, force_load: bool) -> EcomResult<Arc<CategoryTree>> {
        if !force_load {
            if let Some(tree) = self.tree() {
                return Ok(tree);
            }
        }

        let tree = match self.fetch_tree().await {
            Ok(tree) => Arc::new(tree),
            Err(err) => {
                log::warn!("Catalog load failed: {err}");
                return Err(err);
            }
        };

        *self.tree.write().unwrap_or_else(|poison| poison.into_inner()) = Some(Arc::clone(&tree));
        if force_load {
            self.details
                .write()
                .unwrap_or_else(|poison| poison.into_inner())
                .clear();
        }
        log::debug!(
            "Catalog loaded: {} categories, {} products",
            tree.category_count(),
            tree.all_products().len()
        );
        Ok(tree)
    }

    async fn fetch_tree(&self) -> EcomResult<CategoryTree> {
        let snapshot = self.tree_ref.get().await?;
        let Some(payload) = snapshot.into_data() else {
            return Err(not_found("The category tree does not exist"));
        };
        CategoryTree::from_payload(&payload)
    }

    /// Discards the tree, its indexes and every cached product detail.
    pub fn unload(&self) {
        *self.tree.write().unwrap_or_else(|poison| poison.into_inner()) = None;
        self.details
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
            .clear();
        log::debug!("Catalog unloaded");
    }

    /// Fetches full details for every product of the leaf category at
    /// `category_path`, concurrently.
    ///
    /// Products already cached are skipped unless `force_load` is set.
    /// Returns the cached details of the category's products in listing
    /// order. If the catalog is unloaded or reloaded while the requests are
    /// in flight, the fetched details are returned but not cached.
    pub async fn load_products(
        &self,
        category_path: &str,
        force_load: bool,
    ) -> EcomResult<Vec<ProductData>> {
        let tree = self.require_tree()?;
        let category = leaf_category(&tree, category_path, "load")?;

        let pending: Vec<(String, String)> = {
            let details = self.details.read().unwrap_or_else(|poison| poison.into_inner());
            tree.products_in(category)
                .into_iter()
                .filter(|product| force_load || !details.contains_key(product.path()))
                .map(|product| (product.path().to_string(), product.id().to_string()))
                .collect()
        };

        let fetches = pending.into_iter().map(|(path, id)| {
            let products = &self.products;
            async move {
                let snapshot = products.doc(&id)?.get().await?;
                Ok::<_, EcomError>((path, snapshot.into_data()))
            }
        });
        let fetched = try_join_all(fetches).await?;

        // `unload` and `load` swap the tree before clearing details, so the
        // check must happen under the details lock.
        let mut details = self.details.write().unwrap_or_else(|poison| poison.into_inner());
        let current = self.tree();
        if !current.is_some_and(|current| Arc::ptr_eq(&current, &tree)) {
            log::debug!("Catalog changed while loading products of '{category_path}'; not caching");
            return Ok(fetched.into_iter().filter_map(|(_, data)| data).collect());
        }
        for (path, data) in fetched {
            match data {
                Some(data) => {
                    details.insert(path, data);
                }
                None => log::debug!("Product {path} no longer exists"),
            }
        }
        Ok(tree
            .products_in(category)
            .into_iter()
            .filter_map(|product| details.get(product.path()).cloned())
            .collect())
    }

    /// Drops cached details for the products of the leaf at `category_path`.
    pub fn unload_products(&self, category_path: &str) -> EcomResult<()> {
        let tree = self.require_tree()?;
        let category = leaf_category(&tree, category_path, "unload")?;
        let mut details = self.details.write().unwrap_or_else(|poison| poison.into_inner());
        for product in tree.products_in(category) {
            details.remove(product.path());
        }
        Ok(())
    }

    /// Cached details for the product at `path`.
    pub fn product_details(&self, path: &str) -> Option<ProductData> {
        self.details
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .get(path)
            .cloned()
    }

    fn require_tree(&self) -> EcomResult<Arc<CategoryTree>> {
        self.tree()
            .ok_or_else(|| usage_error("The catalog has not been loaded; call load() first"))
    }
}

fn leaf_category<'t>(tree: &'t CategoryTree, path: &str, action: &str) -> EcomResult<&'t Category> {
    let category = tree
        .find_category_by_path(path)
        .ok_or_else(|| not_found(format!("No category at path '{path}'")))?;
    if !category.is_leaf() {
        return Err(usage_error(format!(
            "Cannot {action} products on non-leaf category '{path}'"
        )));
    }
    Ok(category)
}
