//! Response envelope helpers.
//!
//! The API wraps every resource in a JSON:API `data` object. These
//! helpers pull the fields the client needs out of a parsed body and
//! turn missing or mistyped keys into `MalformedResponse`.

use serde_json::Value;

use crate::error::ClientError;

/// Extract `data.id` from a response body. Ids arrive as JSON strings,
/// but a numeric token is accepted and rendered, since model and record
/// identifiers are opaque.
pub fn data_id(body: &Value) -> Result<String, ClientError> {
    match body.pointer("/data/id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(ClientError::MalformedResponse(
            "response is missing data.id".to_string(),
        )),
    }
}

/// Extract the presigned URL (`data.attributes.url`) from an
/// upload-request response body.
pub fn upload_url(body: &Value) -> Result<String, ClientError> {
    body.pointer("/data/attributes/url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ClientError::MalformedResponse(
                "upload-request response is missing data.attributes.url".to_string(),
            )
        })
}
