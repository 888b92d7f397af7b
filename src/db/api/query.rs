use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use serde_json::Value as JsonValue;

use crate::db::error::{usage_error, EcomError, EcomResult};

use super::operations::{decode_data, decode_list, expect_success, record_id, send};
use super::reference::CollectionReference;
use super::resource::{Operation, Resource};
use super::snapshot::{QueryDocumentSnapshot, QuerySnapshot};

/// Comparison applied by a field filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl FilterOperator {
    /// Bracketed suffix used on the wire; equality has none.
    fn wire_suffix(&self) -> Option<&'static str> {
        match self {
            FilterOperator::Equal => None,
            FilterOperator::NotEqual => Some("ne"),
            FilterOperator::LessThan => Some("lt"),
            FilterOperator::LessThanOrEqual => Some("lte"),
            FilterOperator::GreaterThan => Some("gt"),
            FilterOperator::GreaterThanOrEqual => Some("gte"),
        }
    }

    pub fn as_symbol(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "==",
            FilterOperator::NotEqual => "!=",
            FilterOperator::LessThan => "<",
            FilterOperator::LessThanOrEqual => "<=",
            FilterOperator::GreaterThan => ">",
            FilterOperator::GreaterThanOrEqual => ">=",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = EcomError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "==" => Ok(FilterOperator::Equal),
            "!=" => Ok(FilterOperator::NotEqual),
            "<" => Ok(FilterOperator::LessThan),
            "<=" => Ok(FilterOperator::LessThanOrEqual),
            ">" => Ok(FilterOperator::GreaterThan),
            ">=" => Ok(FilterOperator::GreaterThanOrEqual),
            other => Err(usage_error(format!("Unsupported filter operator '{other}'"))),
        }
    }
}

impl Display for FilterOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Ascending => "asc",
            OrderDirection::Descending => "desc",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldFilter {
    field: String,
    operator: FilterOperator,
    value: String,
}

impl FieldFilter {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<JsonValue>,
    ) -> EcomResult<Self> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(usage_error("Filter field must be a non-empty string"));
        }
        let value = match value.into() {
            JsonValue::String(value) => value,
            JsonValue::Number(value) => value.to_string(),
            JsonValue::Bool(value) => value.to_string(),
            other => {
                return Err(usage_error(format!(
                    "Filter on '{field}' only accepts strings, numbers and booleans (got {other})"
                )))
            }
        };
        Ok(Self {
            field,
            operator,
            value,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn wire_key(&self) -> String {
        match self.operator.wire_suffix() {
            Some(suffix) => format!("{}[{suffix}]", self.field),
            None => self.field.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    field: String,
    direction: OrderDirection,
}

impl OrderBy {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> OrderDirection {
        self.direction
    }
}

/// A list request narrowed by filters, ordering and a limit.
///
/// Builders never mutate the receiver: each returns a new query carrying the
/// accumulated predicates. Nothing is sent until [`Query::get`].
pub struct Query<R: Resource> {
    collection: CollectionReference<R>,
    filters: Vec<FieldFilter>,
    order_by: Vec<OrderBy>,
    limit: Option<u32>,
}

impl<R: Resource> Query<R> {
    pub(crate) fn new(collection: CollectionReference<R>) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Returns the collection this query runs against.
    pub fn collection(&self) -> &CollectionReference<R> {
        &self.collection
    }

    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    pub fn order_by_clauses(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    pub fn where_field(
        &self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<JsonValue>,
    ) -> EcomResult<Self> {
        let filter = FieldFilter::new(field, operator, value)?;
        let mut next = self.clone();
        next.filters.push(filter);
        Ok(next)
    }

    pub fn order_by(
        &self,
        field: impl Into<String>,
        direction: OrderDirection,
    ) -> EcomResult<Self> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(usage_error("order_by field must be a non-empty string"));
        }
        let mut next = self.clone();
        next.order_by.push(OrderBy { field, direction });
        Ok(next)
    }

    pub fn limit(&self, limit: u32) -> EcomResult<Self> {
        if limit == 0 {
            return Err(usage_error("Query limit must be greater than zero"));
        }
        let mut next = self.clone();
        next.limit = Some(limit);
        Ok(next)
    }

    /// Encodes the predicates as a URL query string (without the `?`).
    pub fn query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for filter in &self.filters {
            serializer.append_pair(&filter.wire_key(), &filter.value);
        }
        for order in &self.order_by {
            serializer.append_pair("order_by", &order.field);
            serializer.append_pair("order_direction", order.direction.as_str());
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        serializer.finish()
    }

    /// Executes the query, returning the matching documents in server order.
    pub async fn get(&self) -> EcomResult<QuerySnapshot<R>> {
        let mut endpoint = R::endpoint(Operation::List, self.collection.path(), None)?;
        let query = self.query_string();
        if !query.is_empty() {
            endpoint.path = format!("{}?{query}", endpoint.path);
        }

        let context = format!("{}.get()", self.collection.path());
        let response = send(self.collection.transport(), endpoint, None).await?;
        expect_success(&response, &context)?;

        let records = decode_list(response.json()?)?;
        let mut docs = Vec::with_capacity(records.len());
        for record in records {
            let id = record_id(&record)?;
            let reference = self.collection.doc(&id)?;
            let data = decode_data::<R>(record)?;
            docs.push(QueryDocumentSnapshot::new(reference, data));
        }
        Ok(QuerySnapshot::new(self.clone(), docs))
    }
}

impl<R: Resource> Clone for Query<R> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            filters: self.filters.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit,
        }
    }
}

impl<R: Resource> Debug for Query<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("collection", &self.collection.path().canonical_string())
            .field("filters", &self.filters)
            .field("order_by", &self.order_by)
            .field("limit", &self.limit)
            .finish()
    }
}
