//! Circuit breaker guarding the credit path.
//!
//! The state machine is shared across all in-flight requests: a burst of
//! failing probes opens the circuit for everyone until the reset timeout
//! elapses and a trial call closes it again.

use failsafe::{Config, StateMachine, backoff, failure_policy};
use std::time::Duration;

pub type CreditBreaker =
    StateMachine<failure_policy::ConsecutiveFailures<backoff::EqualJittered>, ()>;

pub fn default_breaker() -> CreditBreaker {
    with_settings(3, 60)
}

/// Build a breaker that opens after `failure_threshold` consecutive failures
/// and allows a trial call once `reset_timeout_secs` has elapsed.
pub fn with_settings(failure_threshold: u32, reset_timeout_secs: u64) -> CreditBreaker {
    let backoff = backoff::equal_jittered(
        Duration::from_secs(reset_timeout_secs),
        Duration::from_secs(reset_timeout_secs * 2),
    );
    let policy = failure_policy::consecutive_failures(failure_threshold, backoff);
    Config::new().failure_policy(policy).build()
}
