/// Usage plan every provisioned key is linked to. Fixed at build time; neither
/// the environment nor the invocation event can change it.
pub const USAGE_PLAN_ID: &str = "ksbuqx";

/// Display name given to every key created by the provisioner.
pub const API_KEY_NAME: &str = "ApiKeyForUsagePlan";
