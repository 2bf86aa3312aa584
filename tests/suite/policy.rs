//! Config-driven policies applied through `defer_if`

use std::io::Write;

use deferif_config::PolicyConfig;
use deferif_core::{DeferOptions, DeferredParts, ResponseInit, defer_if};

use crate::common::{Value, foo_baz, text};

const CONFIG: &str = r#"
[loaders.dashboard]
defer = false
never_await = ["foo"]
status = 200

[loaders.inbox]
defer = true
always_await = ["foo"]
"#;

fn load() -> PolicyConfig {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    PolicyConfig::load_from(file.path()).unwrap()
}

#[tokio::test]
async fn dashboard_policy_streams_foo() {
    let config = load();
    let policy = config.policy("dashboard").unwrap();

    let deferred = defer_if(
        foo_baz(),
        policy.directive(),
        DeferOptions::from_policy(policy),
        &DeferredParts,
    )
    .await
    .unwrap();

    assert_eq!(deferred.pending_keys().collect::<Vec<_>>(), ["foo"]);
    assert_eq!(deferred.data()["baz"].ready_value(), Some(&text("bam")));
    assert_eq!(deferred.init(), Some(&ResponseInit::status(200)));
}

#[tokio::test]
async fn inbox_policy_awaits_foo() {
    let config = load();
    let policy = config.policy("inbox").unwrap();

    let deferred = defer_if(
        foo_baz(),
        policy.directive(),
        DeferOptions::from_policy(policy),
        &DeferredParts,
    )
    .await
    .unwrap();

    assert_eq!(deferred.pending_keys().count(), 0);
    assert_eq!(deferred.data()["foo"].ready_value(), Some(&Value::Bool(true)));
    assert!(deferred.init().is_none());
}

#[tokio::test]
async fn unconfigured_loader_defers_everything() {
    let policy = load().policy_or_default("settings");

    let deferred = defer_if(
        foo_baz(),
        policy.directive(),
        DeferOptions::from_policy(&policy),
        &DeferredParts,
    )
    .await
    .unwrap();

    assert_eq!(deferred.pending_keys().collect::<Vec<_>>(), ["foo"]);
}
