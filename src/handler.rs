use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::Instrument;

use crate::provisioner::{
    ApiGatewayControlPlane, ControlPlane, Envelope, KeyProvisioner, ProvisionerSettings,
};

/// Lambda entry point. A fresh control-plane client is built for every
/// invocation; provisioning failures come back in-band as a 500 envelope.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Envelope, Error> {
    let control_plane = ApiGatewayControlPlane::from_env().await;
    Ok(respond(control_plane, event).await)
}

/// Provisions one key against the fixed usage plan. The event payload is ignored.
pub async fn respond<C: ControlPlane>(control_plane: C, event: LambdaEvent<Value>) -> Envelope {
    let span = tracing::info_span!("provision", request_id = %event.context.request_id);
    KeyProvisioner::new(control_plane, ProvisionerSettings::fixed())
        .handle()
        .instrument(span)
        .await
}
