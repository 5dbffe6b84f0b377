use super::control_plane::ControlPlane;
use super::models::{Envelope, ProvisionedKey, UsagePlanKeyType};
use crate::config;
use crate::error::ProvisionResult;

/// Deploy-time inputs to the provisioner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvisionerSettings {
    pub usage_plan_id: String,
    pub key_name: String,
}

impl ProvisionerSettings {
    /// The build-time constants every invocation uses.
    pub fn fixed() -> Self {
        Self {
            usage_plan_id: config::USAGE_PLAN_ID.to_string(),
            key_name: config::API_KEY_NAME.to_string(),
        }
    }
}

impl Default for ProvisionerSettings {
    fn default() -> Self {
        Self::fixed()
    }
}

/// key: key-provisioner
/// Creates an enabled API key and links it to the configured usage plan.
///
/// The two calls run in order with no retry and no compensation: if the link
/// fails the freshly created key is left behind, enabled and unattached.
pub struct KeyProvisioner<C> {
    control_plane: C,
    settings: ProvisionerSettings,
}

impl<C: ControlPlane> KeyProvisioner<C> {
    pub fn new(control_plane: C, settings: ProvisionerSettings) -> Self {
        Self {
            control_plane,
            settings,
        }
    }

    pub async fn provision(&self) -> ProvisionResult<ProvisionedKey> {
        let record = self
            .control_plane
            .create_api_key(&self.settings.key_name, true)
            .await?;

        self.control_plane
            .create_usage_plan_key(
                &self.settings.usage_plan_id,
                &record.id,
                UsagePlanKeyType::ApiKey,
            )
            .await?;

        tracing::info!(
            api_key_id = %record.id,
            usage_plan_id = %self.settings.usage_plan_id,
            "provisioned api key"
        );
        Ok(ProvisionedKey::from(record))
    }

    /// Runs [`provision`](Self::provision) and folds the outcome into a
    /// response envelope. Never fails.
    pub async fn handle(&self) -> Envelope {
        match self.provision().await.and_then(|key| Envelope::ok(&key)) {
            Ok(envelope) => envelope,
            Err(err) => err.into(),
        }
    }
}
