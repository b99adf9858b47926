//! Session domain types — SessionStatus, SessionState

use crate::credentials::{CredentialRecord, UserProfile};
use crate::router::{self, Shell};

/// Authentication status as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Rehydration or splash delay pending; nothing protected may mount
    Loading,
    Anonymous,
    Authenticated,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Anonymous => "anonymous",
            Self::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-derived view over the credential record.
///
/// `Authenticated` always carries a user.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub user: Option<UserProfile>,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            status: SessionStatus::Loading,
            user: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            status: SessionStatus::Anonymous,
            user: None,
        }
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            user: Some(user),
        }
    }

    /// Fail-closed derivation from a rehydrated record
    pub fn from_record(record: &CredentialRecord) -> Self {
        match (&record.user, record.is_authenticated()) {
            (Some(user), true) => Self::authenticated(user.clone()),
            _ => Self::anonymous(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// Shell to mount; `None` unless authenticated
    pub fn shell(&self) -> Option<Shell> {
        if !self.is_authenticated() {
            return None;
        }
        Some(router::route(
            self.user.as_ref().and_then(|u| u.role.as_deref()),
        ))
    }
}
