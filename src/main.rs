use lambda_runtime::{run, service_fn, Error};
use usage_plan_keys::{config, function_handler, telemetry};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    tracing::info!(
        usage_plan_id = config::USAGE_PLAN_ID,
        key_name = config::API_KEY_NAME,
        "starting api key provisioner"
    );
    run(service_fn(function_handler)).await
}
