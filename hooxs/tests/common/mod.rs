#![allow(dead_code)]

use hooxs::{SharedHandler, testing::CallLog};
use std::time::Duration;

// ============================================================================
// Test Hooks
// ============================================================================

hooxs::define_hooks! {
    pub BuildBefore = "build:before" => ();
    pub BuildAfter = "build:after" => Vec<String>;
    pub ConfigLoad = "config:load" => Config;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub name: String,
    pub retries: u32,
}

// ============================================================================
// Test Handlers
// ============================================================================

/// An async handler recording `label:start`, sleeping, then `label:end`.
pub fn delayed(log: &CallLog, label: &'static str, delay_ms: u64) -> SharedHandler<()> {
    let log = log.clone();
    SharedHandler::new(move |_: &()| {
        let log = log.clone();
        async move {
            log.record(format!("{label}:start"));
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            log.record(format!("{label}:end"));
        }
    })
}

/// An async handler that sleeps and then fails with `message`.
pub fn delayed_failure(log: &CallLog, label: &'static str, message: &'static str) -> SharedHandler<()> {
    let log = log.clone();
    SharedHandler::new(move |_: &()| {
        let log = log.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            log.record(label);
            Err::<(), _>(message)
        }
    })
}
