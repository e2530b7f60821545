// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simulated carrier for development and testing.
//!
//! Used whenever no real carrier is configured. Each destination draws an
//! independent success outcome (90% by default) and pays a small artificial
//! delay to model network latency. The RNG is injectable: entropy-seeded by
//! default, pinned via [`MockCarrier::with_seed`] for deterministic tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use textburst_core::{CarrierAdapter, CarrierKind, HealthStatus, SendOutcome, TextburstError};
use tracing::debug;

/// Probability that a simulated delivery succeeds.
const SUCCESS_RATE: f64 = 0.9;

/// Artificial per-destination latency.
const PER_DESTINATION_DELAY: Duration = Duration::from_millis(20);

/// Diagnostic attached to every simulated failure.
const FAILURE_DIAGNOSTIC: &str = "simulated delivery failure";

/// Simulated carrier drawing per-destination outcomes from a seeded RNG.
pub struct MockCarrier {
    rng: Mutex<StdRng>,
    delay: Duration,
}

impl MockCarrier {
    /// Entropy-seeded carrier with the default artificial delay.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            delay: PER_DESTINATION_DELAY,
        }
    }

    /// Deterministic carrier for tests that pin exact outcomes.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay: PER_DESTINATION_DELAY,
        }
    }

    /// Overrides the artificial delay (tests set this to zero).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn draw_success(&self) -> bool {
        // Lock scope kept away from the await in `send`.
        let mut rng = self.rng.lock().expect("mock rng lock poisoned");
        rng.gen_bool(SUCCESS_RATE)
    }
}

impl Default for MockCarrier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarrierAdapter for MockCarrier {
    fn name(&self) -> &str {
        "mock"
    }

    fn kind(&self) -> CarrierKind {
        CarrierKind::Mock
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn send(&self, destinations: &[String], body: &str) -> Vec<SendOutcome> {
        debug!(
            destinations = destinations.len(),
            body_len = body.len(),
            "simulated send"
        );
        let mut outcomes = Vec::with_capacity(destinations.len());
        for destination in destinations {
            tokio::time::sleep(self.delay).await;
            if self.draw_success() {
                let id = format!("mock-{}", uuid::Uuid::new_v4());
                outcomes.push(SendOutcome::sent(destination, id, self.name(), None));
            } else {
                outcomes.push(SendOutcome::failed(
                    destination,
                    FAILURE_DIAGNOSTIC,
                    self.name(),
                ));
            }
        }
        outcomes
    }

    async fn health_check(&self) -> Result<HealthStatus, TextburstError> {
        Ok(HealthStatus::Healthy)
    }
}
