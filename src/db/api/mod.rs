mod database;
pub(crate) mod operations;
mod query;
mod reference;
pub mod resource;
mod snapshot;

pub use database::Db;
pub use query::{FieldFilter, FilterOperator, OrderBy, OrderDirection, Query};
pub use reference::{CollectionReference, DocumentReference};
pub use resource::{Endpoint, Operation, Resource};
pub use snapshot::{DocumentSnapshot, QueryDocumentSnapshot, QuerySnapshot};
