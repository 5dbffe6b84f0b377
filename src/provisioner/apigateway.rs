use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_apigateway::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    Client,
};

use super::control_plane::ControlPlane;
use super::models::{ApiKeyRecord, UsagePlanKeyType};
use crate::error::{ProvisionError, ProvisionResult};

const CREATE_API_KEY: &str = "CreateApiKey";
const CREATE_USAGE_PLAN_KEY: &str = "CreateUsagePlanKey";

/// key: apigateway-control-plane
/// `ControlPlane` backed by the API Gateway management API.
#[derive(Clone, Debug)]
pub struct ApiGatewayControlPlane {
    client: Client,
}

impl ApiGatewayControlPlane {
    /// Builds a client from the ambient AWS environment (execution role
    /// credentials and `AWS_REGION` inside Lambda).
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::from_client(Client::new(&sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ControlPlane for ApiGatewayControlPlane {
    async fn create_api_key(&self, name: &str, enabled: bool) -> ProvisionResult<ApiKeyRecord> {
        let output = self
            .client
            .create_api_key()
            .name(name)
            .enabled(enabled)
            .send()
            .await
            .map_err(|err| {
                ProvisionError::CreateApiKey(describe_sdk_error(CREATE_API_KEY, &err))
            })?;

        let id = output.id().ok_or(ProvisionError::MissingField {
            field: "id",
            operation: CREATE_API_KEY,
        })?;
        let value = output.value().ok_or(ProvisionError::MissingField {
            field: "value",
            operation: CREATE_API_KEY,
        })?;

        tracing::debug!(api_key_id = id, "created api key");
        Ok(ApiKeyRecord {
            id: id.to_string(),
            value: value.to_string(),
        })
    }

    async fn create_usage_plan_key(
        &self,
        usage_plan_id: &str,
        key_id: &str,
        key_type: UsagePlanKeyType,
    ) -> ProvisionResult<()> {
        self.client
            .create_usage_plan_key()
            .usage_plan_id(usage_plan_id)
            .key_id(key_id)
            .key_type(key_type.as_str())
            .send()
            .await
            .map_err(|err| {
                ProvisionError::CreateUsagePlanKey(describe_sdk_error(CREATE_USAGE_PLAN_KEY, &err))
            })?;

        tracing::debug!(usage_plan_id, api_key_id = key_id, "linked api key to usage plan");
        Ok(())
    }
}

fn describe_sdk_error<E, R>(operation: &str, err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service) => service_failure_message(operation, service.code(), service.message()),
        None => DisplayErrorContext(err).to_string(),
    }
}

/// Renders a service-reported failure the way AWS tooling prints it, e.g.
/// `An error occurred (TooManyRequestsException) when calling the CreateApiKey operation: Too Many Requests`.
fn service_failure_message(operation: &str, code: Option<&str>, message: Option<&str>) -> String {
    let code = code.unwrap_or("Unknown");
    match message {
        Some(message) if !message.is_empty() => format!(
            "An error occurred ({code}) when calling the {operation} operation: {message}"
        ),
        _ => format!("An error occurred ({code}) when calling the {operation} operation"),
    }
}
