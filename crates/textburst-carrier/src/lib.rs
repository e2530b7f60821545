// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carrier adapters for the Textburst dispatch service.
//!
//! Implements [`CarrierAdapter`](textburst_core::CarrierAdapter) for three
//! transports: Infobip (one bulk HTTP call per dispatch), Twilio (one HTTP
//! call per destination), and a simulated mock used whenever no real carrier
//! is usable. Transport selection happens once at startup via
//! [`build_carrier`]; missing or placeholder credentials downgrade to the
//! mock instead of failing.

pub mod infobip;
pub mod mock;
pub mod select;
pub mod twilio;

pub use infobip::InfobipCarrier;
pub use mock::MockCarrier;
pub use select::{build_carrier, select_carrier};
pub use twilio::TwilioCarrier;
