//! In-process gateway and uploader. The demo shell falls back to these when no
//! backend is configured; tests use them to script failures.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};

use super::{ImageUploader, PersistenceGateway, SettingWrite, StoredSetting};
use crate::error::{GatewayError, UploadError};

#[derive(Debug, Default)]
pub struct MemoryGateway {
    settings: RefCell<BTreeMap<(String, String), StoredSetting>>,
    failing: RefCell<HashSet<String>>,
    calls: RefCell<Vec<SettingWrite>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every later write of `setting_key` is rejected.
    pub fn fail_on(&self, setting_key: &str) {
        self.failing.borrow_mut().insert(setting_key.to_string());
    }

    pub fn recover(&self, setting_key: &str) {
        self.failing.borrow_mut().remove(setting_key);
    }

    /// Every write attempted so far, failed ones included.
    pub fn calls(&self) -> Vec<SettingWrite> {
        self.calls.borrow().clone()
    }

    pub fn value(&self, page_scope: &str, setting_key: &str) -> Option<String> {
        self.settings
            .borrow()
            .get(&(page_scope.to_string(), setting_key.to_string()))
            .map(|s| s.setting_value.clone())
    }

    pub fn len(&self) -> usize {
        self.settings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.borrow().is_empty()
    }
}

impl PersistenceGateway for MemoryGateway {
    async fn save_setting(&self, write: &SettingWrite) -> Result<(), GatewayError> {
        self.calls.borrow_mut().push(write.clone());
        if self.failing.borrow().contains(&write.setting_key) {
            return Err(GatewayError::Rejected { key: write.setting_key.clone(), status: 500 });
        }
        self.settings.borrow_mut().insert(
            (write.page_scope.clone(), write.setting_key.clone()),
            StoredSetting {
                setting_key: write.setting_key.clone(),
                setting_value: write.setting_value.clone(),
                category: write.category.clone(),
            },
        );
        Ok(())
    }

    async fn load_settings(&self, page_scope: &str, category: &str) -> Result<Vec<StoredSetting>, GatewayError> {
        Ok(self
            .settings
            .borrow()
            .iter()
            .filter(|((scope, _), setting)| scope == page_scope && setting.category == category)
            .map(|(_, setting)| setting.clone())
            .collect())
    }
}

/// Hands out `/memory/<folder>/<n>-<file>` URLs.
#[derive(Debug, Default)]
pub struct MemoryUploader {
    uploads: Cell<usize>,
    fail: Cell<bool>,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: Cell::new(true), ..Self::default() }
    }

    pub fn uploads(&self) -> usize {
        self.uploads.get()
    }
}

impl ImageUploader for MemoryUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, folder: &str) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::EmptyFile);
        }
        if self.fail.get() {
            return Err(UploadError::Rejected(503));
        }
        let n = self.uploads.get() + 1;
        self.uploads.set(n);
        Ok(format!("/memory/{}/{}-{}", folder, n, file_name))
    }
}
