//! API key provisioning against the API Gateway control plane.

pub mod apigateway;
pub mod control_plane;
pub mod encoding;
pub mod models;
pub mod service;

pub use apigateway::ApiGatewayControlPlane;
pub use control_plane::ControlPlane;
pub use models::{ApiKeyRecord, Envelope, FailureBody, ProvisionedKey, UsagePlanKeyType};
pub use service::{KeyProvisioner, ProvisionerSettings};
