use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use super::{ImageUploader, PersistenceGateway, SettingWrite, StoredSetting};
use crate::config::BackendConfig;
use crate::error::{GatewayError, UploadError};

fn auth_headers(config: &BackendConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(key) = HeaderValue::from_str(&config.api_key) {
        headers.insert("apikey", key);
    }
    if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", config.api_key)) {
        headers.insert(AUTHORIZATION, bearer);
    }
    headers
}

/// Settings table behind a PostgREST-style endpoint.
#[derive(Clone, Debug)]
pub struct RestSettingsGateway {
    client: reqwest::Client,
    config: BackendConfig,
}

impl RestSettingsGateway {
    pub fn new(config: BackendConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, self.config.settings_table)
    }
}

impl PersistenceGateway for RestSettingsGateway {
    async fn save_setting(&self, write: &SettingWrite) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.table_url())
            .query(&[("on_conflict", "setting_key,page_scope")])
            .headers(auth_headers(&self.config))
            .header("Prefer", "resolution=merge-duplicates")
            .json(write)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Saving {} failed with {}", write.setting_key, status);
            return Err(GatewayError::Rejected { key: write.setting_key.clone(), status: status.as_u16() });
        }
        debug!("Saved {}", write.setting_key);
        Ok(())
    }

    async fn load_settings(&self, page_scope: &str, category: &str) -> Result<Vec<StoredSetting>, GatewayError> {
        let scope_filter = format!("eq.{}", page_scope);
        let category_filter = format!("eq.{}", category);
        let response = self
            .client
            .get(self.table_url())
            .query(&[
                ("select", "setting_key,setting_value,category"),
                ("page_scope", scope_filter.as_str()),
                ("category", category_filter.as_str()),
            ])
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Rejected { key: format!("{}/*", page_scope), status: status.as_u16() });
        }
        Ok(response.json::<Vec<StoredSetting>>().await?)
    }
}

/// Object-storage bucket with public read access.
#[derive(Clone, Debug)]
pub struct StorageUploader {
    client: reqwest::Client,
    config: BackendConfig,
}

impl StorageUploader {
    pub fn new(config: BackendConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, self.config.storage_bucket, path
        )
    }
}

pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '-' })
        .collect();
    if cleaned.trim_matches(['-', '.']).is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn content_type(file_name: &str) -> &'static str {
    let extension = file_name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

impl ImageUploader for StorageUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, folder: &str) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::EmptyFile);
        }
        let name = sanitize_file_name(file_name);
        let path = format!("{}/{}-{}", folder, Utc::now().timestamp_millis(), name);
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, self.config.storage_bucket, path
        );

        let response = self
            .client
            .post(url)
            .headers(auth_headers(&self.config))
            .header(CONTENT_TYPE, content_type(&name))
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upload of {} rejected with {}", name, status);
            return Err(UploadError::Rejected(status.as_u16()));
        }
        Ok(self.public_url(&path))
    }
}
