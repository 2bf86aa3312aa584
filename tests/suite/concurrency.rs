//! Timing and failure propagation across entries

use std::collections::BTreeMap;
use std::time::Duration;

use deferif_core::{DeferOptions, DeferredParts, defer_if, resolve_conditionally};
use tokio::time::Instant;

use crate::common::{LoadError, Value, delayed, failing, text};

#[tokio::test(start_paused = true)]
async fn awaited_entries_resolve_concurrently() {
    let mut data = BTreeMap::new();
    data.insert("a".to_string(), delayed(30, Value::Number(1)));
    data.insert("b".to_string(), delayed(20, Value::Number(2)));
    data.insert("c".to_string(), delayed(10, Value::Number(3)));

    let start = Instant::now();
    let deferred = defer_if(data, false, DeferOptions::new(), &DeferredParts)
        .await
        .unwrap();

    // Bounded by the slowest entry, not the sum.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(30), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(60), "{elapsed:?}");
    assert_eq!(deferred.pending_keys().count(), 0);
    assert_eq!(deferred.data()["c"].ready_value(), Some(&Value::Number(3)));
}

#[tokio::test(start_paused = true)]
async fn deferred_entries_do_not_hold_up_the_response() {
    let mut data = BTreeMap::new();
    data.insert("slow".to_string(), delayed(500, text("late")));
    data.insert("fast".to_string(), delayed(5, text("early")));

    let start = Instant::now();
    let deferred = defer_if(
        data,
        true,
        DeferOptions::new().always_await(["fast"]),
        &DeferredParts,
    )
    .await
    .unwrap();
    assert!(start.elapsed() < Duration::from_millis(500));
    assert_eq!(deferred.pending_keys().collect::<Vec<_>>(), ["slow"]);

    let (mut data, _) = deferred.into_parts();
    let slow = data.remove("slow").unwrap();
    assert_eq!(slow.settle().await, Ok(text("late")));
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn first_awaited_failure_aborts_without_waiting_for_the_rest() {
    let mut data = BTreeMap::new();
    data.insert("broken".to_string(), failing::<Value>(10, "db down"));
    data.insert("slow".to_string(), delayed(1_000, Value::Number(1)));

    let start = Instant::now();
    let err = defer_if(data, false, DeferOptions::new(), &DeferredParts)
        .await
        .unwrap_err();

    assert!(start.elapsed() < Duration::from_millis(1_000));
    assert!(!err.is_overlap());
    assert_eq!(err.key(), Some("broken"));
    assert_eq!(err.to_string(), "awaiting `broken` failed");
    assert_eq!(err.into_upstream(), Some(LoadError("db down".to_string())));
}

#[tokio::test(start_paused = true)]
async fn deferred_failure_only_surfaces_when_settled() {
    let mut data = BTreeMap::new();
    data.insert("broken".to_string(), failing::<Value>(10, "db down"));
    data.insert("fine".to_string(), delayed(10, Value::Bool(true)));

    let deferred = defer_if(
        data,
        false,
        DeferOptions::new().never_await(["broken"]),
        &DeferredParts,
    )
    .await
    .unwrap();
    assert_eq!(deferred.data()["fine"].ready_value(), Some(&Value::Bool(true)));

    let (mut data, _) = deferred.into_parts();
    let broken = data.remove("broken").unwrap();
    assert_eq!(
        broken.settle().await,
        Err(LoadError("db down".to_string()))
    );
}

#[tokio::test(start_paused = true)]
async fn single_value_await_blocks_and_defer_does_not() {
    let start = Instant::now();
    let deferred = resolve_conditionally(delayed(10, 1_u8), true).await.unwrap();
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(deferred.is_pending());

    let awaited = resolve_conditionally(delayed(10, 2_u8), false)
        .await
        .unwrap();
    assert!(start.elapsed() >= Duration::from_millis(10));
    assert_eq!(awaited.into_ready(), Some(2));
}
