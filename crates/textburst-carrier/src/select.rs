// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup transport selection and fallback policy.
//!
//! Configuration names the transport, but a real carrier is only usable when
//! its credentials are actually present: absent, empty, or placeholder
//! values silently downgrade to the simulated carrier so development and
//! staging run without real credentials. Initialization never fails for
//! missing credentials.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use textburst_config::TextburstConfig;
use textburst_core::{CarrierAdapter, CarrierKind, TextburstError};
use tracing::{info, warn};

use crate::{InfobipCarrier, MockCarrier, TwilioCarrier};

/// Substrings that mark a credential as a template left unfilled.
const PLACEHOLDER_MARKERS: &[&str] = &["your_", "your-", "changeme", "placeholder", "xxxx"];

/// True when a credential is absent, empty, or a literal placeholder.
pub fn is_placeholder(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return true;
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    PLACEHOLDER_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Resolve which transport will actually be used.
///
/// Pure decision function, unit-testable without network or database: takes
/// the configured provider name and credential presence into account and
/// returns the effective [`CarrierKind`].
pub fn select_carrier(config: &TextburstConfig) -> CarrierKind {
    let requested = match CarrierKind::from_str(config.carrier.provider.trim()) {
        Ok(kind) => kind,
        Err(_) => {
            // Config validation rejects unknown providers before this runs.
            warn!(provider = %config.carrier.provider, "unrecognized provider, using mock");
            return CarrierKind::Mock;
        }
    };

    match requested {
        CarrierKind::Infobip => {
            if is_placeholder(config.infobip.api_key.as_deref()) {
                warn!("infobip selected but credentials are absent or placeholders, using mock");
                CarrierKind::Mock
            } else {
                CarrierKind::Infobip
            }
        }
        CarrierKind::Twilio => {
            let missing = is_placeholder(config.twilio.account_sid.as_deref())
                || is_placeholder(config.twilio.auth_token.as_deref())
                || is_placeholder(config.twilio.from_number.as_deref());
            if missing {
                warn!("twilio selected but credentials are absent or placeholders, using mock");
                CarrierKind::Mock
            } else {
                CarrierKind::Twilio
            }
        }
        CarrierKind::Mock => CarrierKind::Mock,
    }
}

/// Construct the process-wide carrier adapter from configuration.
///
/// Called once at startup; the dispatch coordinator receives the result and
/// never revisits selection. Construction failures of a real adapter also
/// downgrade to the mock rather than aborting startup.
pub fn build_carrier(config: &TextburstConfig) -> Arc<dyn CarrierAdapter> {
    let timeout = Duration::from_secs(config.carrier.timeout_secs);
    let selected = select_carrier(config);
    match try_build(config, selected, timeout) {
        Ok(carrier) => {
            info!(provider = %selected, "carrier initialized");
            carrier
        }
        Err(e) => {
            warn!(provider = %selected, error = %e, "carrier construction failed, using mock");
            Arc::new(MockCarrier::new())
        }
    }
}

fn try_build(
    config: &TextburstConfig,
    kind: CarrierKind,
    timeout: Duration,
) -> Result<Arc<dyn CarrierAdapter>, TextburstError> {
    Ok(match kind {
        CarrierKind::Infobip => Arc::new(InfobipCarrier::new(&config.infobip, timeout)?),
        CarrierKind::Twilio => Arc::new(TwilioCarrier::new(&config.twilio, timeout)?),
        CarrierKind::Mock => Arc::new(MockCarrier::new()),
    })
}
