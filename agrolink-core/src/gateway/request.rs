//! Request envelope — method, path, headers, body, timeout
//!
//! Headers are finalized by [`RequestEnvelope::prepare`] against the token
//! read at dispatch time:
//! - `Authorization: Bearer <token>` iff a non-blank token is present
//! - `Content-Type: application/json` unless the payload is multipart

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

use super::payload::Payload;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub payload: Payload,
    pub timeout: Option<Duration>,
}

impl RequestEnvelope {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            payload: Payload::Empty,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fill in auth, content negotiation and the deadline
    pub fn prepare(mut self, token: Option<&str>, config: &ClientConfig) -> Result<Self> {
        self.headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        self.headers.remove(AUTHORIZATION);
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ClientError::InvalidState("stored access token is not a valid header value".into())
            })?;
            value.set_sensitive(true);
            self.headers.insert(AUTHORIZATION, value);
        }

        if self.payload.is_binary() {
            self.headers.remove(CONTENT_TYPE);
        } else {
            self.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        if self.timeout.is_none() {
            self.timeout = Some(if self.payload.is_binary() {
                config.upload_timeout
            } else {
                config.request_timeout
            });
        }

        Ok(self)
    }

    pub fn is_authorized(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }
}
