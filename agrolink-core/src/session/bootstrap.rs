//! Bootstrap sequencer — rehydration gate, splash delay, then resolution
//!
//! ```text
//!   process start
//!        │
//!        ├── store.load() ─────────┐
//!        │                         ├── join ──► session.resolve(record)
//!        └── sleep(splash_delay) ──┘
//! ```
//!
//! The session stays `loading` until both branches finish, whichever
//! finishes first. Dropping the [`BootstrapTask`] aborts both branches
//! and the session is never resolved by it.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::credentials::CredentialStore;
use crate::error::{ClientError, Result};

use super::actor::SessionHandle;
use super::state::SessionState;

/// Orchestrates the startup join
pub struct BootstrapSequencer {
    store: Arc<dyn CredentialStore>,
    session: SessionHandle,
    splash_delay: Duration,
}

impl BootstrapSequencer {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        session: SessionHandle,
        splash_delay: Duration,
    ) -> Self {
        Self {
            store,
            session,
            splash_delay,
        }
    }

    /// Run to completion on the current task
    pub async fn run(self) -> Result<SessionState> {
        let started = tokio::time::Instant::now();

        let rehydrate = async {
            let record = self.store.load().await;
            debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                ok = record.is_ok(),
                "Rehydration finished"
            );
            record
        };
        let splash = async {
            tokio::time::sleep(self.splash_delay).await;
            debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Splash delay elapsed");
        };

        let (record, ()) = tokio::join!(rehydrate, splash);
        let state = self.session.resolve(record).await?;
        info!(
            status = %state.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Bootstrap complete"
        );
        Ok(state)
    }

    /// Run on a spawned task owned by the returned guard
    pub fn spawn(self) -> BootstrapTask {
        BootstrapTask {
            handle: Some(tokio::spawn(self.run())),
        }
    }
}

/// Owns a running bootstrap; aborts it when dropped.
///
/// Tie its lifetime to the surface that shows the splash screen.
pub struct BootstrapTask {
    handle: Option<JoinHandle<Result<SessionState>>>,
}

impl BootstrapTask {
    /// Wait for the join and the resolution that follows it
    pub async fn wait(mut self) -> Result<SessionState> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| ClientError::InvalidState("bootstrap already consumed".into()))?;
        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ClientError::InvalidState(
                "bootstrap was cancelled".into(),
            )),
            Err(e) => Err(ClientError::InvalidState(format!("bootstrap task failed: {e}"))),
        }
    }

    /// Abort the splash timer and rehydration wait
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            warn!("Bootstrap cancelled before completion");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for BootstrapTask {
    fn drop(&mut self) {
        if self.handle.as_ref().is_some_and(|h| !h.is_finished()) {
            self.cancel();
        }
    }
}
