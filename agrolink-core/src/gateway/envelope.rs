//! Response envelope and failure classification
//!
//! The backend wraps results as `{ data, message }`. Most operations hand
//! back `data`; a few hand back the whole envelope. Which one is fixed
//! per operation by [`Unwrap`] and must not be normalized.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{status_message, ClientError, Result};

/// How much of the envelope an operation returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unwrap {
    /// Inner `data` field
    Data,
    /// The whole `{ data, message }` object
    Envelope,
}

/// Backend response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl<T> Envelope<T> {
    /// The payload, or a serialization error naming what was missing
    pub fn into_data(self) -> Result<T> {
        self.data
            .ok_or_else(|| ClientError::Serialization("response envelope has no `data`".into()))
    }
}

/// Turn a raw response into the decoded body or a classified failure
pub fn classify(status: StatusCode, body: &[u8]) -> Result<Value> {
    let parsed: Option<Value> = if body.iter().all(u8::is_ascii_whitespace) {
        Some(Value::Null)
    } else {
        serde_json::from_slice(body).ok()
    };

    if !status.is_success() {
        let message = parsed
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| status_message(status.as_u16()));
        return Err(ClientError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let json = parsed.ok_or_else(|| {
        ClientError::Serialization(format!("HTTP {} body is not JSON", status.as_u16()))
    })?;

    if is_application_error(&json) {
        return Err(ClientError::Application {
            status: status.as_u16(),
            message: extract_message(&json).unwrap_or_else(|| "Request failed".to_string()),
        });
    }

    Ok(json)
}

/// Apply an operation's unwrap level to a successful body
pub fn unwrap(body: Value, level: Unwrap) -> Value {
    match level {
        Unwrap::Envelope => body,
        Unwrap::Data => match body {
            Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
            _ => Value::Null,
        },
    }
}

/// `success: false`, or an `error` field that is set
fn is_application_error(body: &Value) -> bool {
    let Some(obj) = body.as_object() else {
        return false;
    };
    if obj.get("success") == Some(&Value::Bool(false)) {
        return true;
    }
    match obj.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn extract_message(body: &Value) -> Option<String> {
    let non_empty = |v: &Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    body.get("message")
        .and_then(non_empty)
        .or_else(|| body.get("error").and_then(non_empty))
        .or_else(|| body.get("error").and_then(|e| e.get("message")).and_then(non_empty))
        .or_else(|| body.get("msg").and_then(non_empty))
}
