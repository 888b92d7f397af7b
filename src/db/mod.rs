pub mod api;
pub mod error;
pub mod model;
pub mod remote;
pub mod resources;

pub use api::{
    CollectionReference, Db, DocumentReference, DocumentSnapshot, Query, QueryDocumentSnapshot,
    QuerySnapshot, Resource,
};
pub use error::{EcomError, EcomErrorCode, EcomResult};
