//! SessionActor integration tests — resolve, sign-in, sign-out, profile updates

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use agrolink_core::credentials::{
    CredentialRecord, CredentialStore, FileCredentialStore, MemoryCredentialStore, UserProfile,
};
use agrolink_core::router::{Shell, Surface, SurfaceWatcher};
use agrolink_core::session::{SessionActor, SessionStatus};
use agrolink_core::{ClientError, Result};

/// Memory store whose `clear` always fails
struct ReadOnlyStore {
    inner: MemoryCredentialStore,
}

#[async_trait]
impl CredentialStore for ReadOnlyStore {
    async fn load(&self) -> Result<CredentialRecord> {
        self.inner.load().await
    }

    async fn save(&self, record: &CredentialRecord) -> Result<()> {
        self.inner.save(record).await
    }

    async fn clear(&self) -> Result<()> {
        Err(ClientError::Storage("credentials directory is read-only".into()))
    }

    async fn load_language(&self) -> Result<Option<String>> {
        self.inner.load_language().await
    }

    async fn save_language(&self, language: &str) -> Result<()> {
        self.inner.save_language(language).await
    }
}

fn user(role: Option<&str>) -> UserProfile {
    UserProfile {
        id: "u-1".into(),
        role: role.map(str::to_string),
        first_name: "Meera".into(),
        last_name: "Jadhav".into(),
        phone: "9123456780".into(),
        ..Default::default()
    }
}

fn memory_store(record: CredentialRecord) -> Arc<dyn CredentialStore> {
    Arc::new(MemoryCredentialStore::with_record(record))
}

#[tokio::test]
async fn test_starts_loading() {
    let session = SessionActor::spawn(memory_store(CredentialRecord::empty()));
    assert_eq!(session.snapshot().status, SessionStatus::Loading);
}

#[tokio::test]
async fn test_resolve_with_persisted_farmer() {
    let store = memory_store(CredentialRecord::new("abc", user(Some("Farmer"))));
    let session = SessionActor::spawn(store.clone());

    let state = session.resolve(store.load().await).await.unwrap();
    assert_eq!(state.status, SessionStatus::Authenticated);
    assert_eq!(state.shell(), Some(Shell::Farmer));
    assert_eq!(session.snapshot(), state);
}

#[tokio::test]
async fn test_resolve_missing_role_defaults_to_staff() {
    let store = memory_store(CredentialRecord::new("abc", user(None)));
    let session = SessionActor::spawn(store.clone());

    let state = session.resolve(store.load().await).await.unwrap();
    assert_eq!(state.shell(), Some(Shell::ProcurementStaff));
}

#[tokio::test]
async fn test_resolve_fails_closed() {
    // Storage error
    let session = SessionActor::spawn(memory_store(CredentialRecord::empty()));
    let state = session
        .resolve(Err(ClientError::Storage("disk on fire".into())))
        .await
        .unwrap();
    assert_eq!(state.status, SessionStatus::Anonymous);

    // User without token
    let session = SessionActor::spawn(memory_store(CredentialRecord::empty()));
    let record = CredentialRecord {
        access_token: None,
        user: Some(user(Some("farmer"))),
        saved_at: None,
    };
    let state = session.resolve(Ok(record)).await.unwrap();
    assert_eq!(state.status, SessionStatus::Anonymous);
    assert!(state.user.is_none());
}

#[tokio::test]
async fn test_malformed_file_resolves_anonymous() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileCredentialStore::new(dir.path()));
    tokio::fs::write(store.credentials_path(), b"[1, 2, 3]").await.unwrap();

    let session = SessionActor::spawn(store.clone());
    let state = session.resolve(store.load().await).await.unwrap();
    assert_eq!(state.status, SessionStatus::Anonymous);
}

#[tokio::test]
async fn test_resolve_happens_once() {
    let session = SessionActor::spawn(memory_store(CredentialRecord::empty()));

    let first = session.resolve(Ok(CredentialRecord::empty())).await.unwrap();
    assert_eq!(first.status, SessionStatus::Anonymous);

    // A late second resolution must not flip anonymous → authenticated
    let second = session
        .resolve(Ok(CredentialRecord::new("abc", user(Some("farmer")))))
        .await
        .unwrap();
    assert_eq!(second.status, SessionStatus::Anonymous);
}

#[tokio::test]
async fn test_sign_in_requires_resolved_session() {
    let session = SessionActor::spawn(memory_store(CredentialRecord::empty()));
    let err = session
        .sign_in("abc".into(), user(Some("farmer")))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidState(_)));
    assert_eq!(session.snapshot().status, SessionStatus::Loading);
}

#[tokio::test]
async fn test_sign_in_persists_and_sign_out_clears() {
    let store = memory_store(CredentialRecord::empty());
    let session = SessionActor::spawn(store.clone());
    session.resolve(store.load().await).await.unwrap();

    let state = session
        .sign_in("tok-1".into(), user(Some("FPO")))
        .await
        .unwrap();
    assert_eq!(state.shell(), Some(Shell::Fpo));

    let persisted = store.load().await.unwrap();
    assert_eq!(persisted.token(), Some("tok-1"));
    assert_eq!(persisted.user.unwrap().role.as_deref(), Some("FPO"));

    let state = session.sign_out().await.unwrap();
    assert_eq!(state.status, SessionStatus::Anonymous);
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sign_out_with_failing_clear_still_goes_anonymous() {
    let store: Arc<dyn CredentialStore> = Arc::new(ReadOnlyStore {
        inner: MemoryCredentialStore::with_record(CredentialRecord::new("abc", user(Some("farmer")))),
    });
    let session = SessionActor::spawn(store.clone());
    session.resolve(store.load().await).await.unwrap();
    assert_eq!(session.snapshot().status, SessionStatus::Authenticated);

    let err = session.sign_out().await.unwrap_err();
    assert!(matches!(err, ClientError::Storage(_)));
    assert_eq!(session.snapshot().status, SessionStatus::Anonymous);
    assert!(session.snapshot().user.is_none());

    // The record could not be removed
    assert_eq!(store.load().await.unwrap().token(), Some("abc"));
}

#[tokio::test]
async fn test_sign_in_rejects_blank_token() {
    let store = memory_store(CredentialRecord::empty());
    let session = SessionActor::spawn(store.clone());
    session.resolve(store.load().await).await.unwrap();

    let err = session.sign_in("".into(), user(None)).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidState(_)));
    assert_eq!(session.snapshot().status, SessionStatus::Anonymous);
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_user_keeps_token() {
    let store = memory_store(CredentialRecord::new("abc", user(Some("staff"))));
    let session = SessionActor::spawn(store.clone());
    session.resolve(store.load().await).await.unwrap();

    let mut updated = user(Some("staff"));
    updated.first_name = "Meenakshi".into();
    let state = session.update_user(updated.clone()).await.unwrap();
    assert_eq!(state.user.as_ref(), Some(&updated));

    let persisted = store.load().await.unwrap();
    assert_eq!(persisted.token(), Some("abc"));
    assert_eq!(persisted.user, Some(updated));
}

#[tokio::test]
async fn test_update_user_rejected_when_anonymous() {
    let store = memory_store(CredentialRecord::empty());
    let session = SessionActor::spawn(store.clone());
    session.resolve(store.load().await).await.unwrap();

    let err = session.update_user(user(None)).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidState(_)));
}

#[tokio::test]
async fn test_surface_watcher_sees_each_transition_once() {
    let store = memory_store(CredentialRecord::empty());
    let session = SessionActor::spawn(store.clone());
    let mut watcher = SurfaceWatcher::new(session.subscribe());
    assert_eq!(watcher.current(), Surface::Splash);

    session.resolve(store.load().await).await.unwrap();
    assert_eq!(watcher.next().await, Some(Surface::SignIn));

    session.sign_in("abc".into(), user(Some("farmer"))).await.unwrap();
    assert_eq!(watcher.next().await, Some(Surface::App(Shell::Farmer)));

    // Same role after a profile refresh: no re-route
    let mut renamed = user(Some("Farmer"));
    renamed.last_name = "Shinde".into();
    session.update_user(renamed).await.unwrap();
    session.sign_out().await.unwrap();
    assert_eq!(watcher.next().await, Some(Surface::SignIn));
}
