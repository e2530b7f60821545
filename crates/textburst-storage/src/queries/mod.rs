// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query functions over [`crate::Database`].

pub mod messages;
pub mod recipients;
