//! Uniform response envelope returned by remote APIs.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE};

/// Outcome of an operation, with an optional JSON payload.
///
/// Serialized with camelCase names; PascalCase names are accepted when
/// reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseMsg {
    #[serde(alias = "StatusCode")]
    pub status_code: i32,

    #[serde(alias = "Success")]
    pub success: bool,

    #[serde(alias = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(alias = "JsonData", skip_serializing_if = "Option::is_none")]
    pub json_data: Option<String>,

    #[serde(alias = "RecordCount")]
    pub record_count: i32,
}

impl ResponseMsg {
    /// A success with a message (`"Operation succeeded"` when `None`).
    pub fn succeeded(message: Option<&str>) -> Self {
        Self {
            success: true,
            message: Some(message.unwrap_or(DEFAULT_SUCCESS_MESSAGE).to_string()),
            ..Self::default()
        }
    }

    /// A success carrying a JSON payload and its record count.
    pub fn succeeded_with_data(record_count: i32, json_data: impl Into<String>) -> Self {
        Self {
            success: true,
            record_count,
            json_data: Some(json_data.into()),
            ..Self::default()
        }
    }

    /// A failure with a message (`"Operation failed"` when `None`).
    pub fn failed(message: Option<&str>) -> Self {
        Self {
            success: false,
            message: Some(message.unwrap_or(DEFAULT_FAILURE_MESSAGE).to_string()),
            ..Self::default()
        }
    }

    pub fn failed_with_status(status_code: i32, message: Option<&str>) -> Self {
        Self {
            status_code,
            ..Self::failed(message)
        }
    }
}
