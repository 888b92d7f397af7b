pub mod document_key;
pub mod resource_path;

pub use document_key::{validate_document_id, DocumentKey};
pub use resource_path::ResourcePath;
