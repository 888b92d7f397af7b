//! Client SDK for the e-commerce REST API.
//!
//! [`db`] exposes the API as typed collections and documents: references
//! point at a location, `get()` returns immutable snapshots, and queries
//! narrow list requests with filters, ordering and limits. [`catalog`] turns
//! the server's category tree into an indexed, in-memory hierarchy of
//! categories and products.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ecom_rs_sdk::db::remote::ClientOptions;
//! use ecom_rs_sdk::db::{Db, EcomResult};
//! use ecom_rs_sdk::platform::token::{StaticTokenProvider, TokenProviderArc};
//!
//! # async fn run() -> EcomResult<()> {
//! let token: TokenProviderArc = Arc::new(StaticTokenProvider::new(Some("jwt".into())));
//! let db = Db::with_http(ClientOptions::from_env()?, Some(token))?;
//!
//! let product = db.products.doc("7e2c")?;
//! let snapshot = product.get().await?;
//! if let Some(data) = snapshot.data() {
//!     println!("{} ({})", data.name, data.sku);
//! }
//! let images = product.images().get().await?;
//! println!("{} images", images.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod db;
pub mod platform;

#[cfg(test)]
pub mod test_support;
