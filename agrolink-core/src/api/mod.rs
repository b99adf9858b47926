//! Backend operations — one `HttpGateway` method per capability
//!
//! Each method fixes its path, payload encoding and unwrap level.
//! Request types are validated locally before anything is sent.

pub mod cart;
pub mod farms;
pub mod listings;
pub mod orders;
pub mod products;
pub mod purchases;
pub mod types;
pub mod user;

pub use types::*;

use crate::error::{ClientError, Result};

/// `{prefix}/{id}` with the id percent-encoded.
///
/// Empty, `.` and `..` ids are rejected: URL joining would resolve them
/// as path segments and hit a different endpoint.
pub(crate) fn item_path(prefix: &str, id: &str) -> Result<String> {
    match id.trim() {
        "" => Err(ClientError::validation("id", "id is required")),
        "." | ".." => Err(ClientError::validation("id", format!("`{id}` is not a valid id"))),
        _ => Ok(format!("{prefix}/{}", urlencoding::encode(id))),
    }
}
