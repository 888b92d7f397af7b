use std::fmt::{Debug, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::api::resource::{root_endpoint, unsupported};
use crate::db::api::{Endpoint, Operation, Resource};
use crate::db::error::EcomResult;
use crate::db::model::ResourcePath;

#[derive(Clone, Copy, Debug)]
pub struct Users;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "anon")]
    Shopper,
    #[serde(rename = "customer")]
    Customer,
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "root")]
    SuperUser,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub uid: String,
    #[serde(default)]
    pub price_list_id: Option<String>,
    pub role: Role,
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// Sign-up request for `users.add()`.
#[derive(Clone, PartialEq, Serialize)]
pub struct UserInput {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

impl Debug for UserInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .finish()
    }
}

impl Resource for Users {
    type Data = UserData;
    type Input = UserInput;
    type Subcollections = ();

    const COLLECTION_ID: &'static str = "users";

    fn endpoint(
        operation: Operation,
        collection: &ResourcePath,
        id: Option<&str>,
    ) -> EcomResult<Endpoint> {
        if collection.len() != 1 || matches!(operation, Operation::Set | Operation::SetAll) {
            return Err(unsupported(operation, collection));
        }
        root_endpoint(operation, collection, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roles_use_wire_names() {
        let user: UserData = serde_json::from_value(json!({
            "uid": "u1",
            "role": "root",
            "email": "admin@example.com"
        }))
        .unwrap();
        assert_eq!(user.role, Role::SuperUser);
        assert_eq!(serde_json::to_value(Role::Shopper).unwrap(), json!("anon"));
    }

    #[test]
    fn debug_hides_password() {
        let input = UserInput {
            email: "a@example.com".into(),
            password: "hunter2".into(),
            firstname: "A".into(),
            lastname: "B".into(),
        };
        assert!(!format!("{input:?}").contains("hunter2"));
    }
}
