// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting player activity reports.
//!
//! Components log through a cloneable [`DiagnosticsHandle`]; the host owns the
//! [`DiagnosticsCollector`], drains it on each tick and can export a JSON
//! report of recent activity.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped player, stream, warning or error event
//! - [`BufferCapacity`]: Newtype for validated buffer capacity bounds

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, PlayerAction, StreamEvent};
