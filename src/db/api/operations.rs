use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::db::error::{internal_error, map_api_error, EcomError, EcomResult};
use crate::db::remote::{Transport, TransportResponse};

use super::resource::{Endpoint, Resource};

/// Issues one request for a resolved endpoint.
pub(crate) async fn send(
    transport: &dyn Transport,
    endpoint: Endpoint,
    body: Option<JsonValue>,
) -> EcomResult<TransportResponse> {
    log::debug!("{} {}", endpoint.method, endpoint.path);
    transport
        .request(endpoint.method, &endpoint.path, body)
        .await
}

/// Converts a 4xx/5xx response into the structured API error.
pub(crate) fn api_error(response: &TransportResponse, context: &str) -> EcomError {
    let body = response.json().ok().flatten();
    let err = map_api_error(response.status(), body.as_ref());
    log::warn!("{context} failed: {err}");
    err
}

/// Ensures `response` is 2xx, mapping error statuses to an API error and
/// anything else to an internal error.
pub(crate) fn expect_success(response: &TransportResponse, context: &str) -> EcomResult<()> {
    if response.is_error() {
        return Err(api_error(response, context));
    }
    if !response.is_success() {
        return Err(internal_error(format!(
            "{context} returned unexpected status {}",
            response.status()
        )));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Wrapped { data: Vec<JsonValue> },
    Bare(Vec<JsonValue>),
}

/// Extracts the records of a `{ data: [...] }` list response; bare arrays
/// and empty bodies are accepted too.
pub(crate) fn decode_list(body: Option<JsonValue>) -> EcomResult<Vec<JsonValue>> {
    let Some(body) = body else {
        return Ok(Vec::new());
    };
    match serde_json::from_value::<ListEnvelope>(body) {
        Ok(ListEnvelope::Wrapped { data }) => Ok(data),
        Ok(ListEnvelope::Bare(records)) => Ok(records),
        Err(err) => Err(internal_error(format!("List response has no data array: {err}"))),
    }
}

/// Reads the server-assigned `id` of a record.
pub(crate) fn record_id(record: &JsonValue) -> EcomResult<String> {
    match record.get("id") {
        Some(JsonValue::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(JsonValue::Number(id)) => Ok(id.to_string()),
        _ => Err(internal_error("Response record is missing an `id` field")),
    }
}

pub(crate) fn decode_data<R: Resource>(record: JsonValue) -> EcomResult<R::Data> {
    serde_json::from_value(record).map_err(|err| {
        internal_error(format!(
            "Failed to decode {} record: {err}",
            R::COLLECTION_ID
        ))
    })
}

pub(crate) fn encode_input<T: serde::Serialize + ?Sized>(input: &T) -> EcomResult<JsonValue> {
    serde_json::to_value(input).map_err(|err| internal_error(format!("Failed to encode request body: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_envelopes() {
        let wrapped = json!({ "object": "list", "data": [{ "id": "a" }, { "id": "b" }] });
        assert_eq!(decode_list(Some(wrapped)).unwrap().len(), 2);
        assert_eq!(decode_list(Some(json!([{ "id": "a" }]))).unwrap().len(), 1);
        assert!(decode_list(None).unwrap().is_empty());
        assert!(decode_list(Some(json!({ "items": [] }))).is_err());
    }

    #[test]
    fn record_ids() {
        assert_eq!(record_id(&json!({ "id": "p1" })).unwrap(), "p1");
        assert_eq!(record_id(&json!({ "id": 42 })).unwrap(), "42");
        assert!(record_id(&json!({ "sku": "x" })).is_err());
    }

    #[test]
    fn success_classification() {
        let created = TransportResponse::empty(201);
        assert!(expect_success(&created, "add").is_ok());

        let redirect = TransportResponse::empty(302);
        assert_eq!(
            expect_success(&redirect, "add").unwrap_err().code_str(),
            "ecom/internal"
        );

        let bad = TransportResponse::json_body(
            400,
            &json!({ "status": 400, "code": "bad-input", "message": "bad" }),
        );
        let err = expect_success(&bad, "add").unwrap_err();
        assert_eq!(err.api_code(), Some("bad-input"));
    }
}
