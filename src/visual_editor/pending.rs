//! Edits applied to the live page but not yet persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::element::EditProperty;
use crate::error::GatewayError;
use crate::persistence::{PersistenceGateway, SettingWrite};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChangeKey {
    pub element_id: String,
    pub property: EditProperty,
}

impl ChangeKey {
    pub fn new(element_id: &str, property: EditProperty) -> Self {
        Self { element_id: element_id.to_string(), property }
    }

    /// `<elementId>_<property>`, the key the settings store sees.
    pub fn setting_key(&self) -> String {
        format!("{}_{}", self.element_id, self.property.key_name())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingChange {
    pub value: String,
    /// Live value before the first edit of this key.
    pub original_value: String,
}

/// Where a commit goes: page scope, settings category and author.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitTarget {
    pub page_scope: String,
    pub category: String,
    pub created_by: Option<String>,
}

/// The values a commit is about to write, taken before any request goes out.
pub type CommitBatch = Vec<(ChangeKey, String)>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommitReport {
    pub succeeded: Vec<(ChangeKey, String)>,
    pub failed: Vec<(ChangeKey, GatewayError)>,
}

impl CommitReport {
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct PendingChanges {
    entries: BTreeMap<ChangeKey, PendingChange>,
    last_saved: Option<DateTime<Utc>>,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `key`. `original` is only consulted for a new
    /// key, so repeated edits keep the value from before the first one.
    pub fn record(&mut self, key: ChangeKey, value: String, original: impl FnOnce() -> String) {
        match self.entries.get_mut(&key) {
            Some(change) => change.value = value,
            None => {
                let original_value = original();
                self.entries.insert(key, PendingChange { value, original_value });
            }
        }
    }

    pub fn get(&self, key: &ChangeKey) -> Option<&PendingChange> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChangeKey, &PendingChange)> {
        self.entries.iter()
    }

    pub fn for_element<'a>(&'a self, element_id: &'a str) -> impl Iterator<Item = (&'a ChangeKey, &'a PendingChange)> {
        self.entries.iter().filter(move |(key, _)| key.element_id == element_id)
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub fn snapshot(&self) -> CommitBatch {
        self.entries
            .iter()
            .map(|(key, change)| (key.clone(), change.value.clone()))
            .collect()
    }

    /// Drops succeeded entries whose value is unchanged since the snapshot.
    /// An entry edited again while its write was in flight stays pending.
    pub fn apply_report(&mut self, report: &CommitReport) {
        for (key, committed) in &report.succeeded {
            if self.entries.get(key).is_some_and(|change| change.value == *committed) {
                self.entries.remove(key);
            }
        }
        if report.is_success() && !report.is_empty() {
            self.last_saved = Some(Utc::now());
        }
    }

    /// Empties the store, handing back what was pending.
    pub fn drain(&mut self) -> Vec<(ChangeKey, PendingChange)> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }
}

/// Writes every entry of `batch`, one gateway call each, in key order. No
/// retries; failures are reported per key.
pub async fn commit_batch<G: PersistenceGateway>(gateway: &G, target: &CommitTarget, batch: CommitBatch) -> CommitReport {
    let mut report = CommitReport::default();
    for (key, value) in batch {
        let write = SettingWrite {
            setting_key: key.setting_key(),
            setting_value: value.clone(),
            category: target.category.clone(),
            page_scope: target.page_scope.clone(),
            created_by: target.created_by.clone(),
        };
        match gateway.save_setting(&write).await {
            Ok(()) => report.succeeded.push((key, value)),
            Err(err) => {
                warn!("Commit of {} failed: {}", write.setting_key, err);
                report.failed.push((key, err));
            }
        }
    }
    if !report.is_empty() {
        info!(
            "Committed {} change(s), {} failed",
            report.succeeded.len(),
            report.failed.len()
        );
    }
    report
}
