// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Quill integration tests.
//!
//! Provides a mock completion provider for fast, deterministic,
//! CI-runnable tests without external services.

pub mod mock_provider;

pub use mock_provider::{MockProvider, MockReply};
