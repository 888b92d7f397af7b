use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::api::resource::{root_endpoint, unsupported};
use crate::db::api::{Endpoint, Operation, Resource};
use crate::db::error::EcomResult;
use crate::db::model::ResourcePath;

/// API keys issued to the signed-in user.
#[derive(Clone, Copy, Debug)]
pub struct DeveloperKeys;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeveloperKeyData {
    pub user_id: String,
    pub key: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// Keys are generated server-side; the request body is always `{}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewDeveloperKey {}

impl Resource for DeveloperKeys {
    type Data = DeveloperKeyData;
    type Input = NewDeveloperKey;
    type Subcollections = ();

    const COLLECTION_ID: &'static str = "developer-keys";

    fn endpoint(
        operation: Operation,
        collection: &ResourcePath,
        id: Option<&str>,
    ) -> EcomResult<Endpoint> {
        match operation {
            Operation::List | Operation::Add | Operation::Delete if collection.len() == 1 => {
                root_endpoint(operation, collection, id)
            }
            _ => Err(unsupported(operation, collection)),
        }
    }
}
