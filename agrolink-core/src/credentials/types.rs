//! Credential domain types — UserProfile, CredentialRecord

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User record as returned by `/api/user/getUserDetails`
///
/// `role` is free-form backend text; see [`crate::router::Role::parse`]
/// for how it becomes a shell. Fields the client does not model are kept
/// in `extra` so a persisted profile survives a round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Full display name
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.phone.clone()
        } else {
            full.to_string()
        }
    }
}

/// What survives a process restart: the access token and the last-known user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl CredentialRecord {
    /// The "never written" / "cleared" marker
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(access_token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            access_token: Some(access_token.into()),
            user: Some(user),
            saved_at: Some(Utc::now()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.user.is_none()
    }

    /// Token, if present and non-blank
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Enough to restore an authenticated session: a user and a usable token
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token().is_some()
    }
}
