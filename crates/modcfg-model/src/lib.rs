// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # modcfg-model
//!
//! The mutable configuration store for Modbus data-collection setups.
//!
//! [`ConfigModel`] holds the global settings and the device tree, and
//! enforces the invariants that keep a configuration coherent: unique
//! ids, resolvable map references, offsets within map bounds, and
//! write-capable modes only on writable register types. Mutators
//! validate before touching state, so a rejected call never leaves a
//! half-applied change behind.
//!
//! ## Example
//!
//! ```
//! use modcfg_core::ConnectionParams;
//! use modcfg_model::ConfigModel;
//! use uuid::Uuid;
//!
//! let mut model = ConfigModel::new();
//! let device_id = Uuid::new_v4();
//! let params = ConnectionParams::parse("tcp:192.168.0.10:502", "boiler")?;
//! model.upsert_device(device_id, None, params, "boiler room PLC")?;
//! assert_eq!(model.device_count(), 1);
//! # Ok::<(), modcfg_model::ModelError>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod model;

pub use error::{ModelError, ModelResult};
pub use model::{check_sensor, ConfigModel};

/// Library version, from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
