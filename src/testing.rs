// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory resource backend for unit tests

use async_trait::async_trait;
use serde_json::{json, Value};
use std::marker::PhantomData;
use std::sync::Mutex;

use crate::api::{decode_records, ApiError, ApiResult, ResourceApi, ResourceKind};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    List,
    Get(String),
    Create(Value),
    Update(String, Value),
    Delete(String),
}

struct State {
    records: Vec<Value>,
    next_id: u32,
    calls: Vec<Call>,
    fail_next: Option<(u16, Option<Value>)>,
}

/// Stores records as JSON and assigns identifiers the way the server does
pub(crate) struct InMemoryApi<K> {
    state: Mutex<State>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> InMemoryApi<K> {
    pub(crate) fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub(crate) fn with_records(records: Vec<Value>) -> Self {
        Self {
            state: Mutex::new(State {
                next_id: records.len() as u32 + 1,
                records,
                calls: Vec::new(),
                fail_next: None,
            }),
            _kind: PhantomData,
        }
    }

    /// The next call of any kind fails with this status and body
    pub(crate) fn fail_next(&self, status: u16, body: Option<Value>) {
        self.state.lock().unwrap().fail_next = Some((status, body));
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn stored(&self) -> Vec<Value> {
        self.state.lock().unwrap().records.clone()
    }

    fn record(&self, call: Call) -> ApiResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.fail_next.take() {
            Some((status, body)) => Err(ApiError::Status { status, body }),
            None => Ok(state),
        }
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        body: Some(json!({"detail": "Not found."})),
    }
}

fn id_of(record: &Value) -> Option<&str> {
    record
        .get("id")
        .or_else(|| record.get("_id"))
        .and_then(Value::as_str)
}

#[async_trait]
impl<K: ResourceKind> ResourceApi<K> for InMemoryApi<K> {
    async fn list(&self) -> ApiResult<Vec<K::Record>> {
        let state = self.record(Call::List)?;
        Ok(decode_records(state.records.clone()))
    }

    async fn get(&self, id: &str) -> ApiResult<K::Record> {
        let state = self.record(Call::Get(id.to_string()))?;
        let found = state
            .records
            .iter()
            .find(|r| id_of(r) == Some(id))
            .cloned()
            .ok_or_else(not_found)?;
        Ok(serde_json::from_value(found)?)
    }

    async fn create(&self, payload: &K::Payload) -> ApiResult<Value> {
        let body = serde_json::to_value(payload)?;
        let mut state = self.record(Call::Create(body.clone()))?;

        let mut stored = body;
        let id = format!("{}-{}", K::SINGULAR, state.next_id);
        state.next_id += 1;
        if let Value::Object(map) = &mut stored {
            map.remove("password");
            map.insert("id".to_string(), Value::String(id));
            map.insert("created_at".to_string(), json!("2026-01-01T00:00:00Z"));
        }
        state.records.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, payload: &K::Payload) -> ApiResult<Value> {
        let body = serde_json::to_value(payload)?;
        let mut state = self.record(Call::Update(id.to_string(), body.clone()))?;

        let existing = state
            .records
            .iter_mut()
            .find(|r| id_of(r) == Some(id))
            .ok_or_else(not_found)?;
        if let (Value::Object(target), Value::Object(changes)) = (existing, body) {
            for (key, value) in changes {
                if key != "password" {
                    target.insert(key, value);
                }
            }
        }
        let updated = state
            .records
            .iter()
            .find(|r| id_of(r) == Some(id))
            .cloned()
            .unwrap_or(Value::Null);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let mut state = self.record(Call::Delete(id.to_string()))?;
        let before = state.records.len();
        state.records.retain(|r| id_of(r) != Some(id));
        if state.records.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
