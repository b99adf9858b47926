//! # AgroLink Core
//!
//! Session bootstrap, role routing, and the REST gateway behind the AgroLink
//! marketplace client for farmers, procurement staff, and farmer producer
//! organisations (FPOs).
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                  AppContext                    │
//! │   (login, register, logout, profile flows)    │
//! ├──────────────┬─────────────────┬──────────────┤
//! │ SessionActor │ BootstrapTask   │ RoleRouter   │
//! │ (loading →   │ (rehydrate ⨝    │ (role →      │
//! │  anon/auth)  │  splash delay)  │  shell)      │
//! ├──────────────┴─────────────────┴──────────────┤
//! │      HttpGateway  (bearer, encoding, errors)   │
//! ├───────────────────────────────────────────────┤
//! │      CredentialStore  (token + last user)      │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agrolink_core::{AppContext, ClientConfig};
//! use agrolink_core::api::LoginRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://api.agrolink.in");
//!     let (app, bootstrap) = AppContext::start(config)?;
//!
//!     // Nothing protected mounts before this resolves
//!     let state = bootstrap.wait().await?;
//!
//!     if !state.is_authenticated() {
//!         app.login(&LoginRequest {
//!             phone: "9876543210".into(),
//!             password: "secret1".into(),
//!         })
//!         .await?;
//!     }
//!
//!     let listings = app.gateway().my_listings().await?;
//!     println!("{} listings, shell = {:?}", listings.len(), app.surface());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Fail-closed rehydration**: missing or malformed credentials start anonymous
//! - **Join-gated bootstrap**: splash delay and rehydration both finish before routing
//! - **Closed role set**: `farmer`, `fpo`, everything else routes to procurement staff
//! - **Classified failures**: transport vs. HTTP status vs. application error
//! - **Railway Programming**: All operations return `Result<T, ClientError>`

pub mod api;
pub mod app;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod router;
pub mod session;
pub mod validation;

// Re-exports for convenience
pub use app::AppContext;
pub use config::ClientConfig;
pub use credentials::{CredentialRecord, CredentialStore, FileCredentialStore, MemoryCredentialStore, UserProfile};
pub use error::{ClientError, Result, TransportKind};
pub use gateway::{Attachment, Envelope, HttpGateway, Payload, RequestEnvelope, Unwrap};
pub use router::{Role, Shell, Surface, SurfaceWatcher};
pub use session::{BootstrapSequencer, BootstrapTask, SessionActor, SessionHandle, SessionState, SessionStatus};
pub use validation::Validate;
