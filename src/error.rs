use thiserror::Error;

use crate::visual_editor::element::{SemanticType, Tool};

/// Errors reported back to the person editing the page. None of them are
/// fatal: the editor keeps running and nothing is mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Nothing is selected")]
    NothingSelected,

    #[error("Tool {tool} not allowed for this element ({semantic_type})")]
    ToolNotAllowed { tool: Tool, semantic_type: SemanticType },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}

impl EditError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EditError::InvalidValue { field, reason: reason.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Backend rejected {key}: status {status}")]
    Rejected { key: String, status: u16 },

    #[error("Unreadable response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("Empty file")]
    EmptyFile,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Storage rejected upload: status {0}")]
    Rejected(u16),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid editor config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown page scope: {0}")]
    UnknownScope(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("No window/document available")]
    NoDocument,

    #[error("Style of <{tag}> unreadable")]
    StyleUnavailable { tag: String },
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Request(err.to_string())
        }
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::Request(err.to_string())
    }
}
