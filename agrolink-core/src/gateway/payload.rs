//! Request payloads — structured JSON or multipart with attachments

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A file to upload (profile photo, listing images, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// Multipart field name the backend expects, e.g. `profileImage`
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// JPEG image, the format the device camera produces
    pub fn jpeg(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(field, file_name, "image/jpeg", bytes)
    }
}

/// Text fields plus attachments, sent as `multipart/form-data`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    pub fields: Vec<(String, String)>,
    pub attachments: Vec<Attachment>,
}

impl MultipartPayload {
    /// Flatten a serializable struct into text fields.
    ///
    /// Nulls are skipped, strings are sent raw, everything else as JSON text.
    pub fn from_fields<T: Serialize>(value: &T) -> Result<Self> {
        let mut fields = Vec::new();
        if let Value::Object(map) = serde_json::to_value(value)? {
            for (key, value) in map {
                match value {
                    Value::Null => {}
                    Value::String(s) => fields.push((key, s)),
                    other => fields.push((key, other.to_string())),
                }
            }
        }
        Ok(Self {
            fields,
            attachments: Vec::new(),
        })
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Body of an outbound request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartPayload),
}

impl Payload {
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Multipart when attachments are present, JSON otherwise
    pub fn with_attachments<T: Serialize>(value: &T, attachments: Vec<Attachment>) -> Result<Self> {
        if attachments.is_empty() {
            return Self::json(value);
        }
        let mut multipart = MultipartPayload::from_fields(value)?;
        multipart.attachments = attachments;
        Ok(Self::Multipart(multipart))
    }

    /// Binary payloads let the transport pick the content type and boundary
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}
