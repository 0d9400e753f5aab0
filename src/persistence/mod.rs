//! Collaborators the editor commits to: the key/value settings store and the
//! image upload service.

pub mod memory;
pub mod rest;

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{info, warn};

use crate::config::BackendConfig;
use crate::error::{GatewayError, UploadError};
use crate::visual_editor::pending::{commit_batch, CommitBatch, CommitReport, CommitTarget};

pub use memory::{MemoryGateway, MemoryUploader};
pub use rest::{RestSettingsGateway, StorageUploader};

/// One key/value write. Writes are upserts on `(setting_key, page_scope)`, so
/// repeating one is a no-op for the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingWrite {
    pub setting_key: String,
    pub setting_value: String,
    pub category: String,
    pub page_scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredSetting {
    pub setting_key: String,
    pub setting_value: String,
    pub category: String,
}

#[allow(async_fn_in_trait)]
pub trait PersistenceGateway {
    async fn save_setting(&self, write: &SettingWrite) -> Result<(), GatewayError>;

    async fn load_settings(&self, page_scope: &str, category: &str) -> Result<Vec<StoredSetting>, GatewayError>;
}

#[allow(async_fn_in_trait)]
pub trait ImageUploader {
    /// Returns the public URL of the stored file.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, folder: &str) -> Result<String, UploadError>;
}

/// The collaborators the running app talks to. Without a configured API the
/// editor keeps everything in memory for the session.
#[derive(Clone)]
pub enum Backend {
    Memory {
        gateway: Rc<MemoryGateway>,
        uploader: Rc<MemoryUploader>,
    },
    Rest {
        gateway: RestSettingsGateway,
        uploader: StorageUploader,
    },
}

impl Backend {
    pub fn from_build_env() -> Self {
        match BackendConfig::from_build_env() {
            Some(config) => {
                info!("Persisting edits to {}", config.base_url);
                Backend::Rest {
                    gateway: RestSettingsGateway::new(config.clone()),
                    uploader: StorageUploader::new(config),
                }
            }
            None => {
                warn!("No settings API configured, edits last for this session only");
                Backend::Memory {
                    gateway: Rc::new(MemoryGateway::new()),
                    uploader: Rc::new(MemoryUploader::new()),
                }
            }
        }
    }

    pub async fn commit(&self, target: &CommitTarget, batch: CommitBatch) -> CommitReport {
        match self {
            Backend::Memory { gateway, .. } => commit_batch(gateway.as_ref(), target, batch).await,
            Backend::Rest { gateway, .. } => commit_batch(gateway, target, batch).await,
        }
    }

    /// Saved settings for a page; an unreachable store reads as empty.
    pub async fn load(&self, page_scope: &str, category: &str) -> Vec<StoredSetting> {
        let loaded = match self {
            Backend::Memory { gateway, .. } => gateway.load_settings(page_scope, category).await,
            Backend::Rest { gateway, .. } => gateway.load_settings(page_scope, category).await,
        };
        loaded.unwrap_or_else(|err| {
            warn!("Could not load settings for {}: {}", page_scope, err);
            Vec::new()
        })
    }

    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>, folder: &str) -> Result<String, UploadError> {
        match self {
            Backend::Memory { uploader, .. } => uploader.upload(file_name, bytes, folder).await,
            Backend::Rest { uploader, .. } => uploader.upload(file_name, bytes, folder).await,
        }
    }
}
