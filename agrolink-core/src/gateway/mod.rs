//! HTTP gateway — auth headers, payload encoding, failure classification
//!
//! Operations against specific backend paths live in [`crate::api`].

pub mod client;
pub mod envelope;
pub mod payload;
pub mod request;

pub use client::HttpGateway;
pub use envelope::{Envelope, Unwrap};
pub use payload::{Attachment, MultipartPayload, Payload};
pub use request::RequestEnvelope;
