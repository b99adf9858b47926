//! Credential module — the persisted token and last-known user
//!
//! The only shared mutable resource in the core. Read at the start of
//! every outbound request, written by login, registration, profile
//! updates and logout.

pub mod store;
pub mod types;

pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use types::{CredentialRecord, UserProfile};
