use serde::Serialize;

use super::encoding::encode_body;
use crate::error::{ProvisionError, ProvisionResult};

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// Only used if the failure body itself cannot be encoded.
const FALLBACK_FAILURE_BODY: &str =
    r#"{"message": "Internal Server Error", "error": "failed to encode response body"}"#;

/// key: api-key-record
/// Identifier and secret returned by the control plane when a key is created.
/// Read once and handed back to the caller, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKeyRecord {
    pub id: String,
    pub value: String,
}

/// Key type sent with the usage-plan link call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsagePlanKeyType {
    ApiKey,
}

impl UsagePlanKeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsagePlanKeyType::ApiKey => "API_KEY",
        }
    }
}

/// key: provisioned-key
/// Success body handed to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedKey {
    pub api_key_id: String,
    pub api_key: String,
}

impl From<ApiKeyRecord> for ProvisionedKey {
    fn from(record: ApiKeyRecord) -> Self {
        Self {
            api_key_id: record.id,
            api_key: record.value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailureBody {
    pub message: String,
    pub error: String,
}

impl FailureBody {
    pub fn from_error(err: &ProvisionError) -> Self {
        Self {
            message: INTERNAL_SERVER_ERROR.to_string(),
            error: err.to_string(),
        }
    }
}

/// key: response-envelope
/// Proxy-integration response: a status code plus a JSON-encoded body string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub body: String,
}

impl Envelope {
    pub fn ok(key: &ProvisionedKey) -> ProvisionResult<Self> {
        let body = encode_body(key).map_err(|err| ProvisionError::EncodeBody(err.to_string()))?;
        Ok(Self {
            status_code: 200,
            body,
        })
    }

    pub fn internal_error(failure: &FailureBody) -> Self {
        let body = encode_body(failure).unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to encode failure body");
            FALLBACK_FAILURE_BODY.to_string()
        });
        Self {
            status_code: 500,
            body,
        }
    }
}
