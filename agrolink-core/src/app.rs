//! AppContext — the one owned object screens talk to
//!
//! Lifecycle: built once at process start by [`AppContext::start`], which
//! also kicks off the bootstrap; dropped at process exit. Screens read the
//! session only through [`AppContext::session`] and call the backend only
//! through [`AppContext::gateway`].
//!
//! ```rust,no_run
//! use agrolink_core::{AppContext, ClientConfig};
//! use agrolink_core::router::Surface;
//!
//! #[tokio::main]
//! async fn main() -> agrolink_core::Result<()> {
//!     let (app, bootstrap) = AppContext::start(ClientConfig::from_env()?)?;
//!     bootstrap.wait().await?;
//!
//!     match app.surface() {
//!         Surface::App(shell) => println!("mount {shell}"),
//!         Surface::SignIn => println!("mount sign-in"),
//!         Surface::Splash => unreachable!("bootstrap finished"),
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::types::{AuthPayload, LoginRequest, ProfileUpdate, RegistrationRequest};
use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, FileCredentialStore, UserProfile};
use crate::error::{ClientError, Result};
use crate::gateway::{Attachment, Envelope, HttpGateway};
use crate::router::{Surface, SurfaceWatcher};
use crate::session::{BootstrapSequencer, BootstrapTask, SessionActor, SessionHandle, SessionState};

#[derive(Clone)]
pub struct AppContext {
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
    gateway: HttpGateway,
    session: SessionHandle,
}

impl AppContext {
    /// Start with credentials persisted under `config.credentials_dir`
    pub fn start(config: ClientConfig) -> Result<(Self, BootstrapTask)> {
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(&config.credentials_dir));
        Self::start_with_store(config, store)
    }

    /// Start with an explicit store; spawns the session actor and bootstrap
    pub fn start_with_store(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<(Self, BootstrapTask)> {
        let gateway = HttpGateway::new(config.clone(), store.clone())?;
        let session = SessionActor::spawn(store.clone());
        let bootstrap =
            BootstrapSequencer::new(store.clone(), session.clone(), config.splash_delay).spawn();

        info!(base_url = %config.base_url, "AppContext started");
        Ok((
            Self {
                config,
                store,
                gateway,
                session,
            },
            bootstrap,
        ))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn gateway(&self) -> &HttpGateway {
        &self.gateway
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn surface(&self) -> Surface {
        Surface::for_state(&self.session.snapshot())
    }

    pub fn watch_surface(&self) -> SurfaceWatcher {
        SurfaceWatcher::new(self.session.subscribe())
    }

    // ─── Flows ───

    pub async fn login(&self, request: &LoginRequest) -> Result<SessionState> {
        let envelope = self.gateway.login(request).await?;
        let payload = envelope.into_data()?;
        let token = payload.access_token().map(str::to_string).ok_or_else(|| {
            ClientError::InvalidState("login succeeded without an access token".into())
        })?;
        self.session.sign_in(token, payload.user).await
    }

    /// Register; signs in when the backend returns a token with the account
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Envelope<AuthPayload>> {
        let envelope = self.gateway.register(request).await?;
        let issued = envelope
            .data
            .as_ref()
            .and_then(|p| p.access_token().map(|t| (t.to_string(), p.user.clone())));
        match issued {
            Some((token, user)) => {
                self.session.sign_in(token, user).await?;
            }
            None => {
                info!(role = %request.role, "Registered without a session; sign-in required");
            }
        }
        Ok(envelope)
    }

    pub async fn logout(&self) -> Result<SessionState> {
        self.session.sign_out().await
    }

    /// Fetch the profile and replace the session user
    pub async fn refresh_profile(&self) -> Result<UserProfile> {
        let user = self.gateway.get_user_details().await?;
        self.session.update_user(user.clone()).await?;
        Ok(user)
    }

    /// Push profile edits; the session user follows the server's copy
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        image: Option<Attachment>,
    ) -> Result<Envelope<UserProfile>> {
        let envelope = self.gateway.update_profile(update, image).await?;
        match &envelope.data {
            Some(user) => {
                self.session.update_user(user.clone()).await?;
            }
            None => {
                warn!("Profile update returned no user; refetching");
                self.refresh_profile().await?;
            }
        }
        Ok(envelope)
    }

    // ─── Preferences ───

    pub async fn language(&self) -> Result<Option<String>> {
        self.store.load_language().await
    }

    pub async fn set_language(&self, language: &str) -> Result<()> {
        if language.trim().is_empty() {
            return Err(ClientError::validation("language", "language is required"));
        }
        self.store.save_language(language).await
    }
}
