use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::api::Resource;

#[derive(Clone, Copy, Debug)]
pub struct PriceLists;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceListData {
    pub price_list_code: String,
    pub currency_code: String,
    pub strategy: String,
    pub inc_tax: bool,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceListInput {
    pub price_list_code: String,
    pub currency_code: String,
    pub strategy: String,
    pub inc_tax: bool,
    pub name: String,
    pub description: String,
}

impl Resource for PriceLists {
    type Data = PriceListData;
    type Input = PriceListInput;
    type Subcollections = ();

    const COLLECTION_ID: &'static str = "price-lists";
}
