//! SessionActor — Tokio actor owning the session state machine
//!
//! All transitions are processed sequentially via an mpsc channel, so a
//! credential write and the state change it implies are never interleaved
//! with another transition. The current state is published on a
//! `watch` channel that UI surfaces subscribe to.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agrolink_core::credentials::{CredentialStore, MemoryCredentialStore};
//! use agrolink_core::session::SessionActor;
//!
//! #[tokio::main]
//! async fn main() -> agrolink_core::Result<()> {
//!     let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
//!     let session = SessionActor::spawn(store.clone());
//!
//!     // Bootstrap resolves the initial state exactly once
//!     let state = session.resolve(store.load().await).await?;
//!     assert!(!state.is_loading());
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::credentials::{CredentialRecord, CredentialStore, UserProfile};
use crate::error::{ClientError, Result};

use super::state::{SessionState, SessionStatus};

// ─── Actor Messages ───

enum SessionMsg {
    Resolve {
        rehydrated: Result<CredentialRecord>,
        reply: oneshot::Sender<SessionState>,
    },
    SignIn {
        token: String,
        user: UserProfile,
        reply: oneshot::Sender<Result<SessionState>>,
    },
    SignOut {
        reply: oneshot::Sender<Result<SessionState>>,
    },
    UpdateUser {
        user: UserProfile,
        reply: oneshot::Sender<Result<SessionState>>,
    },
}

// ─── Actor ───

/// The only writer of session state
pub struct SessionActor {
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
    rx: mpsc::Receiver<SessionMsg>,
}

impl SessionActor {
    /// Spawn the actor in `loading` and return a handle.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(store: Arc<dyn CredentialStore>) -> SessionHandle {
        let (tx, rx) = mpsc::channel(64);
        let (state_tx, state_rx) = watch::channel(SessionState::loading());
        let actor = Self {
            store,
            state: state_tx,
            rx,
        };

        tokio::spawn(actor.run());
        info!("SessionActor spawned");
        SessionHandle { tx, state: state_rx }
    }

    /// Main event loop
    async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                SessionMsg::Resolve { rehydrated, reply } => {
                    let _ = reply.send(self.handle_resolve(rehydrated));
                }
                SessionMsg::SignIn { token, user, reply } => {
                    let _ = reply.send(self.handle_sign_in(token, user).await);
                }
                SessionMsg::SignOut { reply } => {
                    let _ = reply.send(self.handle_sign_out().await);
                }
                SessionMsg::UpdateUser { user, reply } => {
                    let _ = reply.send(self.handle_update_user(user).await);
                }
            }
        }
        info!("SessionActor stopped");
    }

    fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn publish(&self, next: SessionState) -> SessionState {
        debug!(status = %next.status, "Session state published");
        self.state.send_replace(next.clone());
        next
    }

    // ─── Handler Implementations ───

    fn handle_resolve(&self, rehydrated: Result<CredentialRecord>) -> SessionState {
        let current = self.current();
        if !current.is_loading() {
            debug!(status = %current.status, "Session already resolved, ignoring");
            return current;
        }

        let next = match rehydrated {
            Ok(record) => SessionState::from_record(&record),
            Err(e) => {
                warn!(error = %e, "Rehydration failed, starting anonymous");
                SessionState::anonymous()
            }
        };
        info!(status = %next.status, "Session resolved");
        self.publish(next)
    }

    async fn handle_sign_in(&self, token: String, user: UserProfile) -> Result<SessionState> {
        if self.current().is_loading() {
            return Err(ClientError::InvalidState(
                "cannot sign in before the session is resolved".into(),
            ));
        }

        let record = CredentialRecord::new(token, user.clone());
        if record.token().is_none() {
            return Err(ClientError::InvalidState(
                "backend returned an empty access token".into(),
            ));
        }

        self.store.save(&record).await?;
        info!(user_id = %user.id, "Signed in");
        Ok(self.publish(SessionState::authenticated(user)))
    }

    async fn handle_sign_out(&self) -> Result<SessionState> {
        if self.current().status != SessionStatus::Authenticated {
            // Nothing to transition, but drop any stray record.
            self.store.clear().await?;
            return Ok(self.current());
        }

        let cleared = self.store.clear().await;
        let state = self.publish(SessionState::anonymous());
        match cleared {
            Ok(()) => {
                info!("Signed out");
                Ok(state)
            }
            Err(e) => {
                warn!(error = %e, "Signed out in memory but credentials could not be cleared");
                Err(e)
            }
        }
    }

    async fn handle_update_user(&self, user: UserProfile) -> Result<SessionState> {
        if !self.current().is_authenticated() {
            return Err(ClientError::InvalidState(
                "profile update without an authenticated session".into(),
            ));
        }

        let mut record = self.store.load().await?;
        if record.token().is_none() {
            return Err(ClientError::InvalidState(
                "persisted token disappeared during profile update".into(),
            ));
        }
        record.user = Some(user.clone());
        self.store.save(&record).await?;
        debug!(user_id = %user.id, "Profile replaced");
        Ok(self.publish(SessionState::authenticated(user)))
    }
}

// ─── Handle (client-facing API) ───

/// Cloneable handle to the SessionActor
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionMsg>,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Current state without waiting
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published transition
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Leave `loading` using the rehydrated record; a no-op once resolved
    pub async fn resolve(&self, rehydrated: Result<CredentialRecord>) -> Result<SessionState> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionMsg::Resolve { rehydrated, reply })
            .await
            .map_err(|_| ClientError::SessionUnavailable("SessionActor".into()))?;
        rx.await
            .map_err(|_| ClientError::SessionUnavailable("SessionActor dropped".into()))
    }

    /// Persist `token` + `user` and become authenticated
    pub async fn sign_in(&self, token: String, user: UserProfile) -> Result<SessionState> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionMsg::SignIn { token, user, reply })
            .await
            .map_err(|_| ClientError::SessionUnavailable("SessionActor".into()))?;
        rx.await
            .map_err(|_| ClientError::SessionUnavailable("SessionActor dropped".into()))?
    }

    /// Clear persisted credentials and become anonymous
    pub async fn sign_out(&self) -> Result<SessionState> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionMsg::SignOut { reply })
            .await
            .map_err(|_| ClientError::SessionUnavailable("SessionActor".into()))?;
        rx.await
            .map_err(|_| ClientError::SessionUnavailable("SessionActor dropped".into()))?
    }

    /// Replace the user after a successful profile fetch or update
    pub async fn update_user(&self, user: UserProfile) -> Result<SessionState> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionMsg::UpdateUser { user, reply })
            .await
            .map_err(|_| ClientError::SessionUnavailable("SessionActor".into()))?;
        rx.await
            .map_err(|_| ClientError::SessionUnavailable("SessionActor dropped".into()))?
    }
}
