// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use serde_json::Value;

use crate::constants::limits::MAX_SERVER_MESSAGE_LEN;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures of a REST round trip
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was obtained
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server rejected request with status {status}")]
    Status { status: u16, body: Option<Value> },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Human-readable message supplied by the server, if the body carries one
    pub fn server_message(&self) -> Option<String> {
        self.body()
            .and_then(message_from_body)
            .filter(|m| !m.is_empty() && m.len() <= MAX_SERVER_MESSAGE_LEN)
    }
}

fn message_from_body(body: &Value) -> Option<String> {
    match body {
        // HTML error pages are not messages
        Value::String(s) if s.trim_start().starts_with('<') => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Array(items) => join_messages(items),
        Value::Object(map) => {
            for key in ["error", "detail", "message"] {
                if let Some(Value::String(s)) = map.get(key) {
                    return Some(s.trim().to_string());
                }
            }
            if let Some(Value::Array(items)) = map.get("non_field_errors") {
                return join_messages(items);
            }

            let field_messages: Vec<String> = map
                .iter()
                .filter_map(|(field, value)| {
                    let text = match value {
                        Value::String(s) => Some(s.clone()),
                        Value::Array(items) => join_messages(items),
                        _ => None,
                    }?;
                    Some(format!("{}: {}", field, text))
                })
                .collect();

            if field_messages.is_empty() {
                None
            } else {
                Some(field_messages.join("; "))
            }
        }
        _ => None,
    }
}

fn join_messages(items: &[Value]) -> Option<String> {
    let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
