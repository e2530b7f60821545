// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch coordination for the Textburst bulk SMS service.
//!
//! [`Dispatcher`] owns the lifecycle of one send operation: create the
//! parent message, invoke the configured carrier, persist per-recipient
//! outcomes, settle aggregate counters, and return a normalized summary.
//! Resending re-enters the same path scoped to a message's previously-failed
//! destinations.

pub mod dispatcher;

pub use dispatcher::Dispatcher;
