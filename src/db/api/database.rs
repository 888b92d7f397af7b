use std::sync::Arc;

use crate::db::error::EcomResult;
use crate::db::remote::{ClientOptions, HttpTransport, TransportArc};
use crate::db::resources::{
    Categories, CategoriesTree, DeveloperKeys, Images, PriceLists, ProductCategories, Products,
    Users, CATEGORY_TREE_DOCUMENT_ID,
};
use crate::platform::token::TokenProviderArc;

use super::reference::{CollectionReference, DocumentReference};

/// Entry point to the REST resources. Every root collection is a plain
/// field; sub-collections hang off document references.
#[derive(Clone, Debug)]
pub struct Db {
    pub products: CollectionReference<Products>,
    pub images: CollectionReference<Images>,
    pub categories: CollectionReference<Categories>,
    pub category_tree: DocumentReference<CategoriesTree>,
    pub product_categories: CollectionReference<ProductCategories>,
    pub price_lists: CollectionReference<PriceLists>,
    pub users: CollectionReference<Users>,
    pub developer_keys: CollectionReference<DeveloperKeys>,
}

impl Db {
    pub fn new(transport: TransportArc) -> Self {
        Self {
            products: CollectionReference::root(Arc::clone(&transport)),
            images: CollectionReference::root(Arc::clone(&transport)),
            categories: CollectionReference::root(Arc::clone(&transport)),
            category_tree: CollectionReference::root(Arc::clone(&transport))
                .singleton(CATEGORY_TREE_DOCUMENT_ID),
            product_categories: CollectionReference::root(Arc::clone(&transport)),
            price_lists: CollectionReference::root(Arc::clone(&transport)),
            users: CollectionReference::root(Arc::clone(&transport)),
            developer_keys: CollectionReference::root(transport),
        }
    }

    /// Builds a `Db` over a reqwest [`HttpTransport`].
    pub fn with_http(
        options: ClientOptions,
        token_provider: Option<TokenProviderArc>,
    ) -> EcomResult<Self> {
        let mut builder = HttpTransport::builder(options);
        if let Some(provider) = token_provider {
            builder = builder.with_token_provider(provider);
        }
        let transport: TransportArc = Arc::new(builder.build()?);
        Ok(Self::new(transport))
    }
}
