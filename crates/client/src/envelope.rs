//! Paging-envelope normalization.
//!
//! Collection endpoints answer in one of three shapes:
//! `{status, message, data: {content: [...]}}`, `{content: [...]}`, or a
//! bare array. Individual records may carry their moderation status at the
//! top level or nested under `statusInfo.status`. Everything is normalized
//! here before records reach the catalog or dashboard layers.

use serde_json::Value;

use cinegate_catalog::Movie;

use crate::error::ApiError;

/// Unwrap any supported collection envelope into its raw records.
pub fn unwrap_collection(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                return match data {
                    Value::Array(items) => items,
                    Value::Object(mut inner) => match inner.remove("content") {
                        Some(Value::Array(items)) => items,
                        _ => Vec::new(),
                    },
                    _ => Vec::new(),
                };
            }
            match map.remove("content") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// Decode one movie record, lifting `statusInfo.status` over a top-level
/// `status` when present.
pub fn decode_movie(mut record: Value) -> Result<Movie, ApiError> {
    let nested_status = record
        .get("statusInfo")
        .and_then(|info| info.get("status"))
        .cloned();
    if let (Some(status), Some(fields)) = (nested_status, record.as_object_mut()) {
        fields.insert("status".to_string(), status);
    }

    serde_json::from_value(record).map_err(|err| ApiError::Malformed(err.to_string()))
}

/// Unwrap a collection response and decode every record.
pub fn decode_movies(body: Value) -> Result<Vec<Movie>, ApiError> {
    unwrap_collection(body).into_iter().map(decode_movie).collect()
}

/// Unwrap a collection response and decode records of any shape (reviews,
/// users). Movies go through [`decode_movies`] for the status lifting.
pub fn decode_records<T: serde::de::DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    unwrap_collection(body)
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|err| ApiError::Malformed(err.to_string()))
        })
        .collect()
}
