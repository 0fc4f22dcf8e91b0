// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Collection normalization
//!
//! List endpoints answer either with a bare array or with a paginated
//! envelope `{"count": .., "next": .., "results": [..]}`, and which one a
//! deployment picks is not uniform across resource kinds. Every list
//! consumer goes through [`normalize_collection`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Envelope field holding one page of records
pub const RESULTS_FIELD: &str = "results";

/// Extract the ordered record sequence from a list response
///
/// Shape checks, in order: an object whose `results` is an array yields that
/// array; a bare array yields itself; anything else yields nothing.
pub fn normalize_collection(payload: Value) -> Vec<Value> {
    match payload {
        Value::Object(mut map) => match map.remove(RESULTS_FIELD) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// Decode normalized items into typed records, skipping malformed ones
pub fn decode_records<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(
            "Decoded {} of {} records from list response",
            records.len(),
            total
        );
    }
    records
}

/// Normalize then decode
pub fn collect_records<T: DeserializeOwned>(payload: Value) -> Vec<T> {
    decode_records(normalize_collection(payload))
}

/// Decode keeping one entry per response position
///
/// Items that fail to decode become `T::default()` so that positional
/// meaning (leaderboard rank) survives a malformed item.
pub fn collect_positional<T: DeserializeOwned + Default>(payload: Value) -> Vec<T> {
    normalize_collection(payload)
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                warn!(index, error = %e, "Keeping malformed entry as an empty row");
                T::default()
            })
        })
        .collect()
}
