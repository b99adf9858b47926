//! HttpGateway — the single outbound client
//!
//! Every call reads the token from the credential store (not from session
//! state, which may still be `loading`), prepares the envelope, sends it,
//! and classifies the result. No retries, no cache, no token refresh.

use std::sync::Arc;
use std::time::Instant;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::error::{ClientError, Result};

use super::envelope::{self, Envelope, Unwrap};
use super::payload::{MultipartPayload, Payload};
use super::request::RequestEnvelope;

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpGateway {
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Config(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            config,
            store,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and return the full classified body
    pub async fn execute(&self, request: RequestEnvelope) -> Result<Value> {
        let record = self.store.load().await?;
        let request = request.prepare(record.token(), &self.config)?;
        let url = self.config.endpoint(&request.path)?;

        let RequestEnvelope {
            method,
            path,
            headers,
            payload,
            timeout,
        } = request;
        let authorized = headers.contains_key(reqwest::header::AUTHORIZATION);

        let mut builder = self.client.request(method.clone(), url).headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = match payload {
            Payload::Empty => builder,
            Payload::Json(value) => builder.body(serde_json::to_vec(&value)?),
            Payload::Multipart(multipart) => builder.multipart(build_form(multipart)?),
        };

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            let err = ClientError::from(e);
            warn!(%method, %path, error = %err, "Request failed before a response");
            err
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::from)?;
        debug!(
            %method,
            %path,
            status = status.as_u16(),
            authorized,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request finished"
        );

        envelope::classify(status, &body)
    }

    /// Send and decode at the given unwrap level
    pub async fn call<T: DeserializeOwned>(&self, request: RequestEnvelope, level: Unwrap) -> Result<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_value(envelope::unwrap(body, level))?)
    }

    /// Operations that return the inner `data` payload
    pub async fn call_data<T: DeserializeOwned>(&self, request: RequestEnvelope) -> Result<T> {
        self.call(request, Unwrap::Data).await
    }

    /// Operations that return the whole envelope
    pub async fn call_envelope<T: DeserializeOwned>(&self, request: RequestEnvelope) -> Result<Envelope<T>> {
        self.call(request, Unwrap::Envelope).await
    }
}

fn build_form(payload: MultipartPayload) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in payload.fields {
        form = form.text(name, value);
    }
    for attachment in payload.attachments {
        let part = Part::bytes(attachment.bytes)
            .file_name(attachment.file_name)
            .mime_str(&attachment.mime_type)
            .map_err(|_| {
                ClientError::validation(
                    attachment.field.clone(),
                    format!("invalid MIME type `{}`", attachment.mime_type),
                )
            })?;
        form = form.part(attachment.field, part);
    }
    Ok(form)
}
