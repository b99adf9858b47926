//! CredentialStore — durable key/value persistence for the session
//!
//! Two implementations:
//! - [`FileCredentialStore`]: JSON files under a directory, replaced
//!   atomically via write-to-temp + rename.
//! - [`MemoryCredentialStore`]: process-local, for tests and ephemeral runs.
//!
//! Concurrent `save` calls are last-write-wins in completion order.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ClientError, Result};

use super::types::CredentialRecord;

const CREDENTIALS_FILE: &str = "credentials.json";
const LANGUAGE_FILE: &str = "language";

/// Persistence seam for the access token and last-known user
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Return the last saved record, or [`CredentialRecord::empty`] if
    /// nothing was ever written. Malformed data is an error.
    async fn load(&self) -> Result<CredentialRecord>;

    /// Persist token and user together; readers never see half an update
    async fn save(&self, record: &CredentialRecord) -> Result<()>;

    /// Remove token and user
    async fn clear(&self) -> Result<()>;

    /// Persisted UI language tag, kept apart from credentials
    async fn load_language(&self) -> Result<Option<String>>;

    async fn save_language(&self, language: &str) -> Result<()>;
}

// ─── File-backed ───

/// Credentials persisted as JSON under a directory
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE)
    }

    fn language_path(&self) -> PathBuf {
        self.dir.join(LANGUAGE_FILE)
    }

    /// Write `bytes` to `target` through a uniquely named temp file
    async fn replace_file(&self, target: &Path, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let tmp = self.dir.join(format!(".{}.tmp", Uuid::new_v4()));
        if let Err(e) = tokio::fs::write(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(ClientError::Storage(format!(
                "Cannot replace {}: {e}",
                target.display()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<CredentialRecord> {
        let path = self.credentials_path();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No persisted credentials");
                return Ok(CredentialRecord::empty());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Persisted credentials are malformed");
            ClientError::Storage(format!("Malformed credentials file: {e}"))
        })
    }

    async fn save(&self, record: &CredentialRecord) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(record)?;
        self.replace_file(&self.credentials_path(), &bytes).await?;
        debug!(has_token = record.token().is_some(), "Credentials saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(self.credentials_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_language(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.language_path()).await {
            Ok(raw) => {
                let tag = raw.trim();
                Ok((!tag.is_empty()).then(|| tag.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save_language(&self, language: &str) -> Result<()> {
        self.replace_file(&self.language_path(), language.trim().as_bytes())
            .await
    }
}

// ─── In-memory ───

/// Process-local store; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: RwLock<CredentialRecord>,
    language: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, as if a previous process had saved `record`
    pub fn with_record(record: CredentialRecord) -> Self {
        Self {
            record: RwLock::new(record),
            language: RwLock::new(None),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<CredentialRecord> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &CredentialRecord) -> Result<()> {
        *self.record.write().await = record.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.record.write().await = CredentialRecord::empty();
        Ok(())
    }

    async fn load_language(&self) -> Result<Option<String>> {
        Ok(self.language.read().await.clone())
    }

    async fn save_language(&self, language: &str) -> Result<()> {
        *self.language.write().await = Some(language.trim().to_string());
        Ok(())
    }
}
