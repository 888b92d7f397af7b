use std::fmt::{Debug, Formatter};

use super::query::Query;
use super::reference::DocumentReference;
use super::resource::Resource;

/// Immutable result of reading a document reference.
pub struct DocumentSnapshot<R: Resource> {
    reference: DocumentReference<R>,
    data: Option<R::Data>,
}

impl<R: Resource> DocumentSnapshot<R> {
    pub(crate) fn new(reference: DocumentReference<R>, data: Option<R::Data>) -> Self {
        Self { reference, data }
    }

    /// Returns whether the document exists on the backend.
    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    /// Returns the decoded document, or `None` when it does not exist.
    pub fn data(&self) -> Option<&R::Data> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<R::Data> {
        self.data
    }

    pub fn id(&self) -> &str {
        self.reference.id()
    }

    pub fn reference(&self) -> &DocumentReference<R> {
        &self.reference
    }
}

impl<R: Resource> Clone for DocumentSnapshot<R> {
    fn clone(&self) -> Self {
        Self {
            reference: self.reference.clone(),
            data: self.data.clone(),
        }
    }
}

impl<R: Resource> Debug for DocumentSnapshot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSnapshot")
            .field("path", &self.reference.path().canonical_string())
            .field("data", &self.data)
            .finish()
    }
}

/// A document read as part of a query result; it always exists.
pub struct QueryDocumentSnapshot<R: Resource> {
    reference: DocumentReference<R>,
    data: R::Data,
}

impl<R: Resource> QueryDocumentSnapshot<R> {
    pub(crate) fn new(reference: DocumentReference<R>, data: R::Data) -> Self {
        Self { reference, data }
    }

    pub fn exists(&self) -> bool {
        true
    }

    pub fn data(&self) -> &R::Data {
        &self.data
    }

    pub fn into_data(self) -> R::Data {
        self.data
    }

    pub fn id(&self) -> &str {
        self.reference.id()
    }

    pub fn reference(&self) -> &DocumentReference<R> {
        &self.reference
    }
}

impl<R: Resource> From<QueryDocumentSnapshot<R>> for DocumentSnapshot<R> {
    fn from(snapshot: QueryDocumentSnapshot<R>) -> Self {
        DocumentSnapshot::new(snapshot.reference, Some(snapshot.data))
    }
}

impl<R: Resource> Clone for QueryDocumentSnapshot<R> {
    fn clone(&self) -> Self {
        Self {
            reference: self.reference.clone(),
            data: self.data.clone(),
        }
    }
}

impl<R: Resource> Debug for QueryDocumentSnapshot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryDocumentSnapshot")
            .field("path", &self.reference.path().canonical_string())
            .field("data", &self.data)
            .finish()
    }
}

/// The documents returned by a query, in server order.
pub struct QuerySnapshot<R: Resource> {
    query: Query<R>,
    docs: Vec<QueryDocumentSnapshot<R>>,
}

impl<R: Resource> QuerySnapshot<R> {
    pub(crate) fn new(query: Query<R>, docs: Vec<QueryDocumentSnapshot<R>>) -> Self {
        Self { query, docs }
    }

    /// Returns the query used to obtain this snapshot.
    pub fn query(&self) -> &Query<R> {
        &self.query
    }

    pub fn docs(&self) -> &[QueryDocumentSnapshot<R>] {
        &self.docs
    }

    pub fn doc(&self, index: usize) -> Option<&QueryDocumentSnapshot<R>> {
        self.docs.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryDocumentSnapshot<R>> {
        self.docs.iter()
    }

    pub fn into_docs(self) -> Vec<QueryDocumentSnapshot<R>> {
        self.docs
    }
}

impl<R: Resource> IntoIterator for QuerySnapshot<R> {
    type Item = QueryDocumentSnapshot<R>;
    type IntoIter = std::vec::IntoIter<QueryDocumentSnapshot<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.into_iter()
    }
}

impl<'a, R: Resource> IntoIterator for &'a QuerySnapshot<R> {
    type Item = &'a QueryDocumentSnapshot<R>;
    type IntoIter = std::slice::Iter<'a, QueryDocumentSnapshot<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

impl<R: Resource> Debug for QuerySnapshot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySnapshot")
            .field("query", &self.query)
            .field("docs", &self.docs)
            .finish()
    }
}
