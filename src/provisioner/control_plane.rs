use async_trait::async_trait;

use super::models::{ApiKeyRecord, UsagePlanKeyType};
use crate::error::ProvisionResult;

/// key: control-plane
/// The two API Gateway management calls the provisioner depends on.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn create_api_key(&self, name: &str, enabled: bool) -> ProvisionResult<ApiKeyRecord>;

    async fn create_usage_plan_key(
        &self,
        usage_plan_id: &str,
        key_id: &str,
        key_type: UsagePlanKeyType,
    ) -> ProvisionResult<()>;
}

#[async_trait]
impl<T> ControlPlane for &T
where
    T: ControlPlane + ?Sized,
{
    async fn create_api_key(&self, name: &str, enabled: bool) -> ProvisionResult<ApiKeyRecord> {
        (**self).create_api_key(name, enabled).await
    }

    async fn create_usage_plan_key(
        &self,
        usage_plan_id: &str,
        key_id: &str,
        key_type: UsagePlanKeyType,
    ) -> ProvisionResult<()> {
        (**self)
            .create_usage_plan_key(usage_plan_id, key_id, key_type)
            .await
    }
}
