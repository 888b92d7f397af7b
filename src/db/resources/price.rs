use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::db::api::operations::encode_input;
use crate::db::api::resource::{require_parent, unsupported};
use crate::db::api::{CollectionReference, Endpoint, Operation, Resource};
use crate::db::error::EcomResult;
use crate::db::model::ResourcePath;

/// Price breaks of a product, scoped to `products/{id}/prices`.
#[derive(Clone, Copy, Debug)]
pub struct Prices;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub price_list_id: String,
    #[serde(rename = "break")]
    pub break_quantity: u32,
    pub unit_price: f64,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceInput {
    pub price_list_id: String,
    #[serde(rename = "break")]
    pub break_quantity: u32,
    pub unit_price: f64,
}

const HINT: &str = "Use products.doc(\"<id>\").prices() instead.";

impl Resource for Prices {
    type Data = PriceData;
    type Input = PriceInput;
    type Subcollections = ();

    const COLLECTION_ID: &'static str = "prices";

    fn endpoint(
        operation: Operation,
        collection: &ResourcePath,
        _id: Option<&str>,
    ) -> EcomResult<Endpoint> {
        require_parent(operation, collection, HINT)?;
        match operation {
            Operation::List => Ok(Endpoint::new(Method::GET, format!("/{collection}"))),
            Operation::SetAll => Ok(Endpoint::new(Method::PUT, format!("/{collection}"))),
            _ => Err(unsupported(operation, collection)),
        }
    }
}

impl CollectionReference<Prices> {
    /// Replaces every price break of the owning product.
    pub async fn set(&self, prices: &[PriceInput]) -> EcomResult<()> {
        let body = encode_input(prices)?;
        self.set_all(body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::api::FilterOperator;
    use crate::db::resources::Products;
    use crate::test_support::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn set_replaces_product_prices() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(crate::db::remote::TransportResponse::empty(200));

        let product = CollectionReference::<Products>::root(transport.clone())
            .doc("p1")
            .unwrap();
        let prices = vec![PriceInput {
            price_list_id: "pl1".into(),
            break_quantity: 1,
            unit_price: 9.5,
        }];
        product.prices().set(&prices).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/products/p1/prices");
        assert_eq!(
            requests[0].body,
            Some(json!([{ "price_list_id": "pl1", "break": 1, "unit_price": 9.5 }]))
        );
    }

    #[tokio::test]
    async fn where_price_list_filters_the_listing() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            200,
            json!({ "data": [{ "id": "pr1", "price_list_id": "pl1", "break": 1, "unit_price": 3.0 }] }),
        );

        let product = CollectionReference::<Products>::root(transport.clone())
            .doc("p1")
            .unwrap();
        let snapshot = product
            .prices()
            .where_field("price_list_id", FilterOperator::Equal, "pl1")
            .unwrap()
            .get()
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.docs()[0].data().unit_price, 3.0);
        assert_eq!(
            transport.requests()[0].path,
            "/products/p1/prices?price_list_id=pl1"
        );
    }

    #[test]
    fn root_prices_are_rejected() {
        let path = ResourcePath::from_string("prices").unwrap();
        assert!(Prices::endpoint(Operation::List, &path, None).unwrap_err().is_usage());
    }
}
