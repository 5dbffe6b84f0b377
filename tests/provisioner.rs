use std::sync::Mutex;

use async_trait::async_trait;
use lambda_runtime::{Context, LambdaEvent};
use serde_json::{json, Value};
use usage_plan_keys::provisioner::{
    ApiKeyRecord, ControlPlane, KeyProvisioner, ProvisionerSettings, UsagePlanKeyType,
};
use usage_plan_keys::{respond, ProvisionError, ProvisionResult};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    CreateApiKey {
        name: String,
        enabled: bool,
    },
    CreateUsagePlanKey {
        usage_plan_id: String,
        key_id: String,
        key_type: UsagePlanKeyType,
    },
}

/// Records every call and answers with canned results.
struct RecordingControlPlane {
    create_result: ProvisionResult<ApiKeyRecord>,
    link_result: ProvisionResult<()>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingControlPlane {
    fn succeeding(id: &str, value: &str) -> Self {
        Self {
            create_result: Ok(ApiKeyRecord {
                id: id.to_string(),
                value: value.to_string(),
            }),
            link_result: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_create(message: &str) -> Self {
        Self {
            create_result: Err(ProvisionError::CreateApiKey(message.to_string())),
            ..Self::succeeding("unused", "unused")
        }
    }

    fn failing_link(id: &str, value: &str, message: &str) -> Self {
        Self {
            link_result: Err(ProvisionError::CreateUsagePlanKey(message.to_string())),
            ..Self::succeeding(id, value)
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ControlPlane for RecordingControlPlane {
    async fn create_api_key(&self, name: &str, enabled: bool) -> ProvisionResult<ApiKeyRecord> {
        self.calls.lock().unwrap().push(Call::CreateApiKey {
            name: name.to_string(),
            enabled,
        });
        self.create_result.clone()
    }

    async fn create_usage_plan_key(
        &self,
        usage_plan_id: &str,
        key_id: &str,
        key_type: UsagePlanKeyType,
    ) -> ProvisionResult<()> {
        self.calls.lock().unwrap().push(Call::CreateUsagePlanKey {
            usage_plan_id: usage_plan_id.to_string(),
            key_id: key_id.to_string(),
            key_type,
        });
        self.link_result.clone()
    }
}

fn event(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent::new(payload, Context::default())
}

fn body(raw: &str) -> Value {
    serde_json::from_str(raw).expect("body is not JSON")
}

#[tokio::test]
async fn successful_provisioning_returns_key_id_and_secret() -> anyhow::Result<()> {
    let control_plane = RecordingControlPlane::succeeding("abc123", "secretXYZ");

    let envelope = respond(&control_plane, event(json!({}))).await;

    assert_eq!(envelope.status_code, 200);
    assert_eq!(
        envelope.body,
        r#"{"apiKeyId": "abc123", "apiKey": "secretXYZ"}"#
    );
    assert_eq!(
        control_plane.calls(),
        vec![
            Call::CreateApiKey {
                name: "ApiKeyForUsagePlan".to_string(),
                enabled: true,
            },
            Call::CreateUsagePlanKey {
                usage_plan_id: "ksbuqx".to_string(),
                key_id: "abc123".to_string(),
                key_type: UsagePlanKeyType::ApiKey,
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn creation_failure_returns_internal_error_and_skips_link() {
    let control_plane = RecordingControlPlane::failing_create("throttled");

    let envelope = respond(&control_plane, event(json!({}))).await;

    assert_eq!(envelope.status_code, 500);
    assert_eq!(
        envelope.body,
        r#"{"message": "Internal Server Error", "error": "throttled"}"#
    );
    assert_eq!(control_plane.calls().len(), 1);
}

#[tokio::test]
async fn link_failure_leaves_created_key_in_place() {
    let control_plane =
        RecordingControlPlane::failing_link("orphan1", "secret", "Invalid Usage Plan ID specified");

    let envelope = respond(&control_plane, event(json!({}))).await;

    assert_eq!(envelope.status_code, 500);
    assert_eq!(
        body(&envelope.body),
        json!({
            "message": "Internal Server Error",
            "error": "Invalid Usage Plan ID specified",
        })
    );

    // Exactly create + link; nothing tries to delete the orphaned key.
    let calls = control_plane.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], Call::CreateApiKey { .. }));
    assert!(matches!(
        &calls[1],
        Call::CreateUsagePlanKey { key_id, .. } if key_id == "orphan1"
    ));
}

#[tokio::test]
async fn event_content_never_changes_the_usage_plan() {
    let control_plane = RecordingControlPlane::succeeding("k1", "v1");
    let payload = json!({
        "usagePlanId": "attacker-plan",
        "body": "{\"usagePlanId\":\"attacker-plan\"}",
        "queryStringParameters": { "usagePlanId": "attacker-plan" },
    });

    let envelope = respond(&control_plane, event(payload)).await;

    assert_eq!(envelope.status_code, 200);
    assert!(control_plane.calls().iter().any(|call| matches!(
        call,
        Call::CreateUsagePlanKey { usage_plan_id, .. } if usage_plan_id == "ksbuqx"
    )));
}

#[test]
fn fixed_settings_are_the_build_time_literals() {
    assert_eq!(
        ProvisionerSettings::fixed(),
        ProvisionerSettings {
            usage_plan_id: "ksbuqx".to_string(),
            key_name: "ApiKeyForUsagePlan".to_string(),
        }
    );
}

#[tokio::test]
async fn explicit_settings_flow_into_both_calls() {
    let control_plane = RecordingControlPlane::succeeding("k2", "v2");
    let settings = ProvisionerSettings {
        usage_plan_id: "plan-42".to_string(),
        key_name: "PartnerKey".to_string(),
    };
    let provisioner = KeyProvisioner::new(&control_plane, settings);

    let key = provisioner.provision().await.unwrap();

    assert_eq!(key.api_key_id, "k2");
    assert_eq!(key.api_key, "v2");
    assert_eq!(
        control_plane.calls(),
        vec![
            Call::CreateApiKey {
                name: "PartnerKey".to_string(),
                enabled: true,
            },
            Call::CreateUsagePlanKey {
                usage_plan_id: "plan-42".to_string(),
                key_id: "k2".to_string(),
                key_type: UsagePlanKeyType::ApiKey,
            },
        ]
    );
}

#[tokio::test]
async fn missing_secret_is_reported_like_any_other_failure() {
    let control_plane = RecordingControlPlane {
        create_result: Err(ProvisionError::MissingField {
            field: "value",
            operation: "CreateApiKey",
        }),
        ..RecordingControlPlane::succeeding("unused", "unused")
    };

    let envelope = KeyProvisioner::new(&control_plane, ProvisionerSettings::default())
        .handle()
        .await;

    assert_eq!(envelope.status_code, 500);
    assert_eq!(
        body(&envelope.body)["error"],
        "missing field `value` in CreateApiKey response"
    );
}

#[tokio::test]
async fn every_invocation_creates_a_new_key() {
    let control_plane = RecordingControlPlane::succeeding("same", "same");
    let provisioner = KeyProvisioner::new(&control_plane, ProvisionerSettings::default());

    provisioner.handle().await;
    provisioner.handle().await;

    let creations = control_plane
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::CreateApiKey { .. }))
        .count();
    assert_eq!(creations, 2);
}
