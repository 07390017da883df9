// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builder patterns for constructing test objects with sensible defaults.
//!
//! ## Design Principles
//!
//! - Sensible defaults for common test scenarios
//! - Chainable methods for fluent API
//! - Clear separation between required and optional fields

use modcfg_core::{
    MapId, RegisterAddress, RegisterType, Sensor, SensorBinding, SensorMode, SensorsMap, ValueType,
};
use uuid::Uuid;

// =============================================================================
// Sensor Builder
// =============================================================================

/// Builder for constructing [`Sensor`] instances with sensible defaults.
///
/// Defaults to a read-mode stand-alone sensor on holding register 40001.
#[derive(Debug, Clone)]
pub struct SensorBuilder {
    id: Uuid,
    description: String,
    mode: SensorMode,
    update_threshold: f64,
    min_value: Option<f64>,
    max_value: Option<f64>,
    correction: String,
    binding: SensorBinding,
}

impl Default for SensorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorBuilder {
    /// Create a new builder with defaults and a fresh random id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: String::new(),
            mode: SensorMode::Read,
            update_threshold: 0.0,
            min_value: None,
            max_value: None,
            correction: String::new(),
            binding: SensorBinding::Separate(RegisterAddress::new(
                1,
                40001,
                ValueType::UInt16,
                RegisterType::AnalogOutputHoldingRegisters,
            )),
        }
    }

    /// Set the sensor id.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the access mode.
    pub fn mode(mut self, mode: SensorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the update threshold.
    pub fn update_threshold(mut self, threshold: f64) -> Self {
        self.update_threshold = threshold;
        self
    }

    /// Set the min/max value bounds.
    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    /// Set the correction expression.
    pub fn correction(mut self, correction: impl Into<String>) -> Self {
        self.correction = correction.into();
        self
    }

    /// Bind the sensor to its own register address.
    pub fn separate(mut self, address: RegisterAddress) -> Self {
        self.binding = SensorBinding::Separate(address);
        self
    }

    /// Bind the sensor to a register map slot.
    pub fn mapped(mut self, map_id: impl Into<MapId>, offset: u32) -> Self {
        self.binding = SensorBinding::Map {
            map_id: map_id.into(),
            offset,
        };
        self
    }

    /// Build the sensor.
    pub fn build(self) -> Sensor {
        let mut sensor = Sensor::new(self.id, self.binding);
        sensor.description = self.description;
        sensor.mode = self.mode;
        sensor.update_threshold = self.update_threshold;
        sensor.min_value = self.min_value;
        sensor.max_value = self.max_value;
        sensor.correction = self.correction;
        sensor
    }
}

// =============================================================================
// SensorsMap Builder
// =============================================================================

/// Builder for constructing [`SensorsMap`] instances with sensible defaults.
///
/// Defaults to an 8-slot uint16 block at holding register 40001.
#[derive(Debug, Clone)]
pub struct SensorsMapBuilder {
    id: MapId,
    address: RegisterAddress,
    value_count: u32,
    default_value: Option<f64>,
}

impl Default for SensorsMapBuilder {
    fn default() -> Self {
        Self::new("map1")
    }
}

impl SensorsMapBuilder {
    /// Create a new builder with the given map id.
    pub fn new(id: impl Into<MapId>) -> Self {
        Self {
            id: id.into(),
            address: RegisterAddress::new(
                1,
                40001,
                ValueType::UInt16,
                RegisterType::AnalogOutputHoldingRegisters,
            ),
            value_count: 8,
            default_value: None,
        }
    }

    /// Set the base register address.
    pub fn address(mut self, address: RegisterAddress) -> Self {
        self.address = address;
        self
    }

    /// Set the number of values in the block.
    pub fn value_count(mut self, count: u32) -> Self {
        self.value_count = count;
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Build the map.
    pub fn build(self) -> SensorsMap {
        let mut map = SensorsMap::new(self.id, self.address, self.value_count);
        map.default_value = self.default_value;
        map
    }
}
