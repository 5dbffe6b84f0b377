use thiserror::Error;

use crate::provisioner::models::{Envelope, FailureBody};

/// Any failure while provisioning a key. Every variant collapses into the same
/// 500 envelope; the variants only exist so logs say which step broke.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    #[error("{0}")]
    CreateApiKey(String),
    #[error("{0}")]
    CreateUsagePlanKey(String),
    #[error("missing field `{field}` in {operation} response")]
    MissingField {
        field: &'static str,
        operation: &'static str,
    },
    #[error("failed to encode response body: {0}")]
    EncodeBody(String),
}

impl ProvisionError {
    pub fn operation(&self) -> &'static str {
        match self {
            ProvisionError::CreateApiKey(_) => "CreateApiKey",
            ProvisionError::CreateUsagePlanKey(_) => "CreateUsagePlanKey",
            ProvisionError::MissingField { operation, .. } => *operation,
            ProvisionError::EncodeBody(_) => "EncodeBody",
        }
    }
}

impl From<ProvisionError> for Envelope {
    fn from(err: ProvisionError) -> Self {
        tracing::error!(operation = err.operation(), "Error: {err}");
        Envelope::internal_error(&FailureBody::from_error(&err))
    }
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;
