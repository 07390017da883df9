// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # modcfg-core
//!
//! Domain types and codecs for the Modbus configuration editor core.
//!
//! This crate provides the value types shared by the configuration model
//! and the JSON serializer:
//!
//! - **Types**: register/value/mode enumerations with their wire tokens
//! - **Address**: [`RegisterAddress`] with range and byte-order validation
//! - **Connection**: [`ConnectionParams`] and the connection-string codec
//! - **Entities**: [`GlobalSettings`], [`Device`], [`Sensor`], [`SensorsMap`]
//! - **Error**: [`CoreError`] for every range/format failure
//!
//! ## Example
//!
//! ```
//! use modcfg_core::{ConnectionParams, RegisterAddress, RegisterType, ValueType};
//!
//! let params = ConnectionParams::parse("tcp:10.0.0.5:502", "plc-01").unwrap();
//! assert!(params.is_tcp());
//!
//! let address = RegisterAddress::new(
//!     1,
//!     40001,
//!     ValueType::UInt16,
//!     RegisterType::AnalogOutputHoldingRegisters,
//! );
//! assert!(address.validate().is_ok());
//! ```

#![warn(missing_docs)]

pub mod address;
pub mod connection;
pub mod entities;
pub mod error;
pub mod types;

pub use address::{check_byte_order, check_register, check_slave_address, RegisterAddress};
pub use connection::{ConnectionParams, MAX_BAUD_RATE, MAX_DATA_BITS, MIN_DATA_BITS};
pub use entities::{
    Device, GlobalSettings, MapId, Sensor, SensorBinding, SensorsMap, DEFAULT_PASSWORD,
    DEFAULT_SERVER_URL, DEFAULT_USERNAME, DEFAULT_WRITE_REQUEST_TTL,
};
pub use error::{CoreError, CoreResult};
pub use types::{FlowControl, Parity, RegisterType, SensorMode, StopBits, ValueType};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
