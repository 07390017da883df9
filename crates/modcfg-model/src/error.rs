// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity, reference and cross-field errors raised by the model.
//!
//! Range/format failures bubble up from `modcfg-core` through the
//! [`ModelError::Core`] variant, so every model mutator reports a single
//! error type.

use modcfg_core::{CoreError, MapId};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by [`crate::ConfigModel`] mutators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Device id is the nil UUID.
    #[error("Device identifier must be a valid non-nil UUID")]
    NilDeviceId,

    /// A device with this id already exists.
    #[error("Device with identifier {device_id} already exists")]
    DuplicateDevice {
        /// The duplicated device id.
        device_id: Uuid,
    },

    /// No device with this id.
    #[error("Device with identifier {device_id} not found")]
    DeviceNotFound {
        /// The missing device id.
        device_id: Uuid,
    },

    /// Sensor id is the nil UUID.
    #[error("Sensor identifier must be a valid non-nil UUID")]
    NilSensorId,

    /// A sensor with this id already exists somewhere in the configuration.
    #[error("Sensor with identifier {sensor_id} already exists")]
    DuplicateSensor {
        /// The duplicated sensor id.
        sensor_id: Uuid,
    },

    /// No sensor with this id on the device.
    #[error("Sensor with identifier {sensor_id} not found")]
    SensorNotFound {
        /// The missing sensor id.
        sensor_id: Uuid,
    },

    /// Map id is the empty string.
    #[error("Register map identifier cannot be empty")]
    EmptyMapId,

    /// A register map with this id already exists on the device.
    #[error("Register map with identifier '{map_id}' already exists")]
    DuplicateMap {
        /// The duplicated map id.
        map_id: MapId,
    },

    /// No register map with this id on the device.
    #[error("Register map with identifier '{map_id}' not found")]
    MapNotFound {
        /// The missing map id.
        map_id: MapId,
    },

    /// A sensor references a map that does not exist on its device.
    #[error("Register map with identifier '{map_id}' is absent on the device")]
    DanglingMapReference {
        /// The referenced map id.
        map_id: MapId,
    },

    /// The map cannot be deleted while a sensor still references it.
    #[error("Register map is still bound to sensor '{sensor}'")]
    MapInUse {
        /// Description of a referencing sensor.
        sensor: String,
    },

    /// A register map must hold at least one value.
    #[error("Register map '{map_id}' must have a positive value count")]
    ZeroValueCount {
        /// The offending map id.
        map_id: MapId,
    },

    /// Map offset of a sensor is not below the map's value count.
    #[error("Map offset must be less than the value count ({value_count})")]
    OffsetOutOfRange {
        /// The offending offset.
        offset: u32,
        /// The map's value count.
        value_count: u32,
    },

    /// Updating a map would strand the offset of a bound sensor.
    #[error(
        "Cannot update the register map: its value count is not above \
         the offset used by bound sensor '{sensor}'"
    )]
    MapShrinkBelowOffset {
        /// Description of the stranded sensor.
        sensor: String,
    },

    /// Sensor mode is not allowed for the register type.
    #[error("Sensor mode {mode} is not allowed for register type {register_type}")]
    ModeIncompatible {
        /// Human-readable register type name.
        register_type: String,
        /// Human-readable mode name.
        mode: String,
    },

    /// Range/format failure from the domain layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ModelError {
    /// Returns the error type as a string for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ModelError::NilDeviceId => "nil_device_id",
            ModelError::DuplicateDevice { .. } => "duplicate_device",
            ModelError::DeviceNotFound { .. } => "device_not_found",
            ModelError::NilSensorId => "nil_sensor_id",
            ModelError::DuplicateSensor { .. } => "duplicate_sensor",
            ModelError::SensorNotFound { .. } => "sensor_not_found",
            ModelError::EmptyMapId => "empty_map_id",
            ModelError::DuplicateMap { .. } => "duplicate_map",
            ModelError::MapNotFound { .. } => "map_not_found",
            ModelError::DanglingMapReference { .. } => "dangling_map_reference",
            ModelError::MapInUse { .. } => "map_in_use",
            ModelError::ZeroValueCount { .. } => "zero_value_count",
            ModelError::OffsetOutOfRange { .. } => "offset_out_of_range",
            ModelError::MapShrinkBelowOffset { .. } => "map_shrink_below_offset",
            ModelError::ModeIncompatible { .. } => "mode_incompatible",
            ModelError::Core(e) => e.error_type(),
        }
    }
}

/// A Result type with [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;
