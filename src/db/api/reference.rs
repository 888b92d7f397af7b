use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::db::error::{usage_error, EcomResult};
use crate::db::model::{validate_document_id, DocumentKey, ResourcePath};
use crate::db::remote::{Transport, TransportArc};

use super::operations::{decode_data, encode_input, expect_success, record_id, send};
use super::query::{FilterOperator, OrderDirection, Query};
use super::resource::{Operation, Resource};
use super::snapshot::{DocumentSnapshot, QuerySnapshot};

/// A collection of `R` documents, either at the API root (`products`) or
/// scoped to a parent document (`products/{id}/images`).
pub struct CollectionReference<R: Resource> {
    transport: TransportArc,
    path: ResourcePath,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> CollectionReference<R> {
    /// Builds a reference to the collection at `path`.
    ///
    /// The path must have an odd number of segments and end with
    /// `R::COLLECTION_ID`.
    pub fn new(transport: TransportArc, path: ResourcePath) -> EcomResult<Self> {
        if !path.is_collection() {
            return Err(usage_error(format!(
                "Collection references must point to a collection (odd number of segments), got '{path}'"
            )));
        }
        if path.last_segment() != Some(R::COLLECTION_ID) {
            return Err(usage_error(format!(
                "'{path}' is not a {} collection",
                R::COLLECTION_ID
            )));
        }
        Ok(Self {
            transport,
            path,
            _resource: PhantomData,
        })
    }

    /// The root collection for `R`.
    pub fn root(transport: TransportArc) -> Self {
        Self {
            transport,
            path: ResourcePath::from_segments([R::COLLECTION_ID]),
            _resource: PhantomData,
        }
    }

    pub fn id(&self) -> &str {
        R::COLLECTION_ID
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// Key of the owning document, or `None` for a root collection.
    ///
    /// For a typed reference to the owner, open it from its root collection,
    /// e.g. `db.products.doc(key.id())` for a product's `images()`.
    pub fn parent(&self) -> Option<DocumentKey> {
        if self.path.len() < 3 {
            return None;
        }
        DocumentKey::from_path(self.path.without_last()).ok()
    }

    pub fn is_root(&self) -> bool {
        self.path.len() == 1
    }

    /// Returns a reference to the document `id`. No request is made.
    pub fn doc(&self, id: &str) -> EcomResult<DocumentReference<R>> {
        validate_document_id(id)?;
        let key = DocumentKey::from_path(self.path.child([id]))?;
        Ok(DocumentReference::new(self.clone(), key))
    }

    /// Reference to a fixed, known-valid document id.
    pub(crate) fn singleton(&self, id: &'static str) -> DocumentReference<R> {
        let key = DocumentKey::from_path_unchecked(self.path.child([id]));
        DocumentReference::new(self.clone(), key)
    }

    /// Creates a document and returns a reference bound to the server id.
    pub async fn add(&self, input: &R::Input) -> EcomResult<DocumentReference<R>> {
        let endpoint = R::endpoint(Operation::Add, &self.path, None)?;
        let body = encode_input(input)?;
        let context = format!("{}.add()", self.path);
        let response = send(self.transport(), endpoint, Some(body)).await?;
        expect_success(&response, &context)?;

        let record = response.json()?.unwrap_or(JsonValue::Null);
        let id = record_id(&record)?;
        log::debug!("{context} created {id}");
        self.doc(&id)
    }

    /// Lists every document of the collection.
    pub async fn get(&self) -> EcomResult<QuerySnapshot<R>> {
        self.query().get().await
    }

    /// Starts a query over this collection.
    pub fn query(&self) -> Query<R> {
        Query::new(self.clone())
    }

    pub fn where_field(
        &self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<JsonValue>,
    ) -> EcomResult<Query<R>> {
        self.query().where_field(field, operator, value)
    }

    pub fn order_by(
        &self,
        field: impl Into<String>,
        direction: OrderDirection,
    ) -> EcomResult<Query<R>> {
        self.query().order_by(field, direction)
    }

    pub fn limit(&self, limit: u32) -> EcomResult<Query<R>> {
        self.query().limit(limit)
    }

    /// Replaces the whole collection in one request.
    pub(crate) async fn set_all(&self, body: JsonValue) -> EcomResult<()> {
        let endpoint = R::endpoint(Operation::SetAll, &self.path, None)?;
        let context = format!("{}.set()", self.path);
        let response = send(self.transport(), endpoint, Some(body)).await?;
        expect_success(&response, &context)
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub(crate) fn transport_arc(&self) -> &TransportArc {
        &self.transport
    }
}

impl<R: Resource> Clone for CollectionReference<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            path: self.path.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Debug for CollectionReference<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionReference")
            .field("path", &self.path.canonical_string())
            .finish()
    }
}

impl<R: Resource> Display for CollectionReference<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "CollectionReference({})", self.path)
    }
}

/// A single `R` document. Holding a reference never implies the document
/// exists; use [`DocumentReference::get`] to find out.
pub struct DocumentReference<R: Resource> {
    parent: CollectionReference<R>,
    key: DocumentKey,
    subcollections: Arc<R::Subcollections>,
}

impl<R: Resource> DocumentReference<R> {
    pub(crate) fn new(parent: CollectionReference<R>, key: DocumentKey) -> Self {
        Self {
            parent,
            key,
            subcollections: Arc::new(R::Subcollections::default()),
        }
    }

    pub fn id(&self) -> &str {
        self.key.id()
    }

    pub fn path(&self) -> &ResourcePath {
        self.key.path()
    }

    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    pub fn parent(&self) -> &CollectionReference<R> {
        &self.parent
    }

    /// Reads the document. A 404 yields a snapshot whose `exists()` is false.
    pub async fn get(&self) -> EcomResult<DocumentSnapshot<R>> {
        let endpoint = R::endpoint(Operation::Get, self.parent.path(), Some(self.id()))?;
        let context = format!("{}.get()", self.path());
        let response = send(self.parent.transport(), endpoint, None).await?;
        if response.status() == 404 {
            log::debug!("{context}: document does not exist");
            return Ok(DocumentSnapshot::new(self.clone(), None));
        }
        expect_success(&response, &context)?;

        let data = match response.json()? {
            None | Some(JsonValue::Null) => None,
            Some(record) => Some(decode_data::<R>(record)?),
        };
        Ok(DocumentSnapshot::new(self.clone(), data))
    }

    /// Replaces the document with `input`.
    pub async fn set(&self, input: &R::Input) -> EcomResult<()> {
        let endpoint = R::endpoint(Operation::Set, self.parent.path(), Some(self.id()))?;
        let body = encode_input(input)?;
        let context = format!("{}.set()", self.path());
        let response = send(self.parent.transport(), endpoint, Some(body)).await?;
        expect_success(&response, &context)
    }

    pub async fn delete(&self) -> EcomResult<()> {
        let endpoint = R::endpoint(Operation::Delete, self.parent.path(), Some(self.id()))?;
        let context = format!("{}.delete()", self.path());
        let response = send(self.parent.transport(), endpoint, None).await?;
        expect_success(&response, &context)
    }

    /// Memoized sub-collection handles, shared by clones of this reference.
    pub(crate) fn subcollections(&self) -> &R::Subcollections {
        &self.subcollections
    }

    /// Builds the `S` collection nested under this document.
    pub(crate) fn subcollection<S: Resource>(&self) -> CollectionReference<S> {
        CollectionReference {
            transport: Arc::clone(self.parent.transport_arc()),
            path: self.key.path().child([S::COLLECTION_ID]),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Clone for DocumentReference<R> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            key: self.key.clone(),
            subcollections: Arc::clone(&self.subcollections),
        }
    }
}

impl<R: Resource> Debug for DocumentReference<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentReference")
            .field("path", &self.key.path().canonical_string())
            .finish()
    }
}

impl<R: Resource> Display for DocumentReference<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocumentReference({})", self.key.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::resources::{Images, ProductInput, Products};
    use crate::test_support::ScriptedTransport;
    use reqwest::Method;
    use serde_json::json;

    fn products(transport: &Arc<ScriptedTransport>) -> CollectionReference<Products> {
        CollectionReference::root(transport.clone())
    }

    fn product_input() -> ProductInput {
        ProductInput {
            path: "shoes/running/pegasus".into(),
            sku: "PEG-01".into(),
            name: "Pegasus".into(),
        }
    }

    #[test]
    fn doc_ids_are_validated() {
        let transport = Arc::new(ScriptedTransport::new());
        let products = products(&transport);
        assert!(products.doc("").unwrap_err().is_usage());
        assert!(products.doc("a/b").unwrap_err().is_usage());

        let doc = products.doc("p1").unwrap();
        assert_eq!(doc.path().canonical_string(), "products/p1");
        assert_eq!(doc.parent().path().canonical_string(), "products");
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn collection_paths_are_checked() {
        let transport: TransportArc = Arc::new(ScriptedTransport::new());
        let path = ResourcePath::from_string("products/p1").unwrap();
        assert!(CollectionReference::<Products>::new(transport.clone(), path).is_err());
        let path = ResourcePath::from_string("users").unwrap();
        assert!(CollectionReference::<Products>::new(transport.clone(), path).is_err());

        let path = ResourcePath::from_string("products/p1/images").unwrap();
        let images = CollectionReference::<Images>::new(transport, path).unwrap();
        assert_eq!(images.parent().unwrap().id(), "p1");
        assert!(!images.is_root());
    }

    #[tokio::test]
    async fn add_returns_reference_to_server_id() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(201, json!({ "id": "p9", "sku": "PEG-01" }));

        let doc = products(&transport).add(&product_input()).await.unwrap();
        assert_eq!(doc.id(), "p9");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/products");
        assert_eq!(requests[0].body.as_ref().unwrap()["sku"], "PEG-01");
    }

    #[tokio::test]
    async fn add_surfaces_api_errors_verbatim() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            400,
            json!({ "status": 400, "code": "bad-input", "message": "sku already taken" }),
        );

        let err = products(&transport).add(&product_input()).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.api_code(), Some("bad-input"));
        assert_eq!(err.message(), "sku already taken");
    }

    #[tokio::test]
    async fn add_without_id_is_internal_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(201, json!({ "sku": "PEG-01" }));
        let err = products(&transport).add(&product_input()).await.unwrap_err();
        assert_eq!(err.code_str(), "ecom/internal");
    }

    #[tokio::test]
    async fn missing_document_does_not_exist() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            404,
            json!({ "status": 404, "code": "product/not-found", "message": "nope" }),
        );

        let snapshot = products(&transport)
            .doc("missing-id")
            .unwrap()
            .get()
            .await
            .unwrap();
        assert!(!snapshot.exists());
        assert!(snapshot.data().is_none());
        assert_eq!(snapshot.id(), "missing-id");
    }

    #[tokio::test]
    async fn get_decodes_existing_document() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            200,
            json!({
                "id": "p1",
                "path": "shoes/running/pegasus",
                "sku": "PEG-01",
                "name": "Pegasus",
                "created": "2024-03-01T10:00:00Z",
                "modified": "2024-03-02T10:00:00Z"
            }),
        );

        let snapshot = products(&transport).doc("p1").unwrap().get().await.unwrap();
        assert!(snapshot.exists());
        assert_eq!(snapshot.data().unwrap().sku, "PEG-01");
        assert_eq!(transport.requests()[0].path, "/products/p1");
    }

    #[tokio::test]
    async fn server_errors_on_get_propagate() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(500, json!({ "status": 500, "code": "internal", "message": "boom" }));
        let err = products(&transport).doc("p1").unwrap().get().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn set_and_delete_use_document_endpoints() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(crate::db::remote::TransportResponse::empty(200));
        transport.respond(crate::db::remote::TransportResponse::empty(204));

        let doc = products(&transport).doc("p1").unwrap();
        doc.set(&product_input()).await.unwrap();
        doc.delete().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/products/p1");
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].path, "/products/p1");
    }

    #[tokio::test]
    async fn set_and_delete_surface_api_errors() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            409,
            json!({ "status": 409, "code": "conflict", "message": "sku already taken" }),
        );
        transport.respond_json(
            500,
            json!({ "status": 500, "code": "internal", "message": "delete failed" }),
        );

        let doc = products(&transport).doc("p1").unwrap();
        let err = doc.set(&product_input()).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.api_code(), Some("conflict"));
        assert_eq!(err.message(), "sku already taken");

        let err = doc.delete().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.api_code(), Some("internal"));
        assert_eq!(err.message(), "delete failed");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[1].method, Method::DELETE);
    }

    #[tokio::test]
    async fn list_preserves_server_order() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            200,
            json!({
                "object": "list",
                "data": [
                    { "id": "p2", "path": "b", "sku": "B", "name": "Bee" },
                    { "id": "p1", "path": "a", "sku": "A", "name": "Ay" }
                ]
            }),
        );

        let snapshot = products(&transport).get().await.unwrap();
        let ids: Vec<&str> = snapshot.iter().map(|doc| doc.id()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert_eq!(snapshot.doc(1).unwrap().data().name, "Ay");
        assert_eq!(snapshot.len(), 2);
    }
}
