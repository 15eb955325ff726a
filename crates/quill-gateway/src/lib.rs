// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway for the Quill suggestion relay.
//!
//! Serves the suggestion WebSocket, the usage API, and the health and
//! metrics endpoints.

pub mod handlers;
pub mod server;
pub mod ws;

pub use server::{GatewayState, HealthState, router, start_server};
