//! Role router — normalized role → application shell
//!
//! Pure and total: every role string maps to exactly one [`Shell`].
//! Unknown, empty or missing roles land on the procurement-staff shell.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::session::{SessionState, SessionStatus};

/// Lower-case and trim a backend role string
pub fn normalize_role(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Closed set of roles the client distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Fpo,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Fpo => "fpo",
            Self::Staff => "staff",
        }
    }

    /// Parse after normalization; anything unrecognized is `Staff`
    pub fn parse(raw: &str) -> Self {
        match normalize_role(raw).as_str() {
            "farmer" => Self::Farmer,
            "fpo" => Self::Fpo,
            _ => Self::Staff,
        }
    }

    pub fn shell(&self) -> Shell {
        match self {
            Self::Farmer => Shell::Farmer,
            Self::Fpo => Shell::Fpo,
            Self::Staff => Shell::ProcurementStaff,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level tab-navigation surface for an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
    Farmer,
    ProcurementStaff,
    Fpo,
}

impl Shell {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::ProcurementStaff => "procurement-staff",
            Self::Fpo => "fpo",
        }
    }
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route a possibly-absent role string to its shell
pub fn route(role: Option<&str>) -> Shell {
    role.map(Role::parse).unwrap_or(Role::Staff).shell()
}

/// What the UI mounts for a given session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Rehydration or splash delay still pending
    Splash,
    /// No session; sign-in / registration screens
    SignIn,
    App(Shell),
}

impl Surface {
    pub fn for_state(state: &SessionState) -> Self {
        match state.status {
            SessionStatus::Loading => Self::Splash,
            SessionStatus::Anonymous => Self::SignIn,
            SessionStatus::Authenticated => {
                Self::App(route(state.user.as_ref().and_then(|u| u.role.as_deref())))
            }
        }
    }
}

/// Yields a new [`Surface`] only when the mounted surface would change.
///
/// Profile refreshes that keep the same role do not re-route.
pub struct SurfaceWatcher {
    rx: watch::Receiver<SessionState>,
    current: Surface,
}

impl SurfaceWatcher {
    pub fn new(mut rx: watch::Receiver<SessionState>) -> Self {
        let current = Surface::for_state(&rx.borrow_and_update());
        Self { rx, current }
    }

    pub fn current(&self) -> Surface {
        self.current
    }

    /// Wait for the next surface change; `None` once the session is gone
    pub async fn next(&mut self) -> Option<Surface> {
        loop {
            self.rx.changed().await.ok()?;
            let surface = Surface::for_state(&self.rx.borrow_and_update());
            if surface != self.current {
                self.current = surface;
                return Some(surface);
            }
        }
    }
}
