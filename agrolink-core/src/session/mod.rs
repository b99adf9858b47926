//! Session module — state machine, actor, and startup sequencing
//!
//! `loading → {anonymous, authenticated}` once per process; afterwards only
//! explicit sign-in / sign-out move between the two resolved states.

pub mod actor;
pub mod bootstrap;
pub mod state;

pub use actor::{SessionActor, SessionHandle};
pub use bootstrap::{BootstrapSequencer, BootstrapTask};
pub use state::{SessionState, SessionStatus};
