// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Modcfg Integration Tests
//!
//! Integration tests for the Modbus configuration editor core,
//! exercising the model, validation rules and JSON document codec
//! together through their public APIs.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Pre-built models and documents
//!   - `builders`: Builder patterns for constructing test objects
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p modcfg-tests
//!
//! # Run specific test suite
//! cargo test -p modcfg-tests --test integration_model
//! cargo test -p modcfg-tests --test integration_json
//! ```

#![warn(missing_docs)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::builders::*;
    pub use crate::common::fixtures::*;
}
