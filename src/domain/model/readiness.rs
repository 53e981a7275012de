use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::deserialize::{deserialize_duration, serialize_duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Probe repeatedly until the cluster answers or the timeout elapses.
    Poll,
    /// Sleep `fixed_wait`, then probe exactly once.
    Fixed,
}

/// How long, and how, to wait for Elasticsearch after it has been
/// (re)started.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReadinessPolicy {
    pub strategy: Strategy,
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub initial_delay: Duration,
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub interval: Duration,
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub timeout: Duration,
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub fixed_wait: Duration,
}

impl ReadinessPolicy {
    pub fn fixed(wait: Duration) -> Self {
        ReadinessPolicy {
            strategy: Strategy::Fixed,
            initial_delay: Duration::ZERO,
            interval: Duration::ZERO,
            timeout: wait,
            fixed_wait: wait,
        }
    }

    pub fn poll(initial_delay: Duration, interval: Duration, timeout: Duration) -> Self {
        ReadinessPolicy {
            strategy: Strategy::Poll,
            initial_delay,
            interval,
            timeout,
            fixed_wait: Duration::ZERO,
        }
    }
}
