//! In-memory category tree built from the `/categories-tree` payload.
//!
//! ```no_run
//! # use ecom_rs_sdk::catalog::Catalog;
//! # use ecom_rs_sdk::db::{Db, EcomResult};
//! # use ecom_rs_sdk::db::remote::ClientOptions;
//! # async fn run() -> EcomResult<()> {
//! let db = Db::with_http(ClientOptions::from_env()?, None)?;
//! let catalog = Catalog::new(&db);
//! let tree = catalog.load(false).await?;
//! for category in tree.bottom_level_categories() {
//!     println!("{} -> {}", category.path, category.name);
//! }
//! # Ok(())
//! # }
//! ```

mod category;
mod loader;
mod product;
mod tree;

pub use category::{BreadCrumb, Category, CategoryId, CategorySummary};
pub use loader::Catalog;
pub use product::{Product, ProductId};
pub use tree::CategoryTree;
