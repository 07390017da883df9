// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # modcfg-json
//!
//! JSON document codec for Modbus data-collection configurations.
//!
//! The document layout is fixed by the downstream collection service:
//! global settings at the top level, devices keyed by UUID under
//! `settings`, sensors and register maps nested per device. See
//! [`document`] for the encode/decode entry points.
//!
//! ## Example
//!
//! ```
//! use modcfg_json::document;
//! use modcfg_model::ConfigModel;
//!
//! let model = ConfigModel::new();
//! let text = document::to_string_pretty(&model)?;
//! let decoded = document::from_str(&text)?;
//! assert_eq!(decoded, model);
//! # Ok::<(), modcfg_json::DocumentError>(())
//! ```

#![warn(missing_docs)]

pub mod document;
pub mod error;

pub use document::{deserialize, from_str, serialize, to_string_pretty};
pub use error::{DocumentError, DocumentResult};

/// Library version, from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
