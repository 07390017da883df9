// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration entities: global settings, devices, register maps, sensors.
//!
//! These are plain value types; all cross-entity invariants (unique ids,
//! resolvable map references, live-reference delete protection) are
//! enforced by the model in `modcfg-model`.

use crate::address::RegisterAddress;
use crate::connection::ConnectionParams;
use crate::types::SensorMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Global Settings
// =============================================================================

/// Default collection server URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8888";

/// Default collection server username.
pub const DEFAULT_USERNAME: &str = "default username";

/// Default collection server password.
pub const DEFAULT_PASSWORD: &str = "default password";

/// Default write-request TTL in seconds.
pub const DEFAULT_WRITE_REQUEST_TTL: u32 = 180;

/// Global settings of a configuration: where collected data is shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Collection server URL.
    pub server_url: String,

    /// Collection server username.
    pub username: String,

    /// Collection server password.
    pub password: String,

    /// Write-request TTL in seconds; 0 means unset.
    pub write_request_ttl: u32,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            write_request_ttl: DEFAULT_WRITE_REQUEST_TTL,
        }
    }
}

// =============================================================================
// Map Identifier
// =============================================================================

/// Identifier of a register map, unique within its device.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(String);

impl MapId {
    /// Creates a new map id.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty (never valid in a model).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MapId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MapId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for MapId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Sensors Map
// =============================================================================

/// A contiguous block of registers of one value type, offering
/// offset-indexed sub-values to multiple sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorsMap {
    /// Map identifier, unique within the device.
    pub id: MapId,

    /// Base register address of the block.
    pub address: RegisterAddress,

    /// Number of values in the block; must be positive.
    pub value_count: u32,

    /// Default value for unpopulated entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
}

impl SensorsMap {
    /// Creates a map with no default value.
    pub fn new(id: impl Into<MapId>, address: RegisterAddress, value_count: u32) -> Self {
        Self {
            id: id.into(),
            address,
            value_count,
            default_value: None,
        }
    }

    /// Sets the default value.
    pub fn with_default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }
}

// =============================================================================
// Sensor
// =============================================================================

/// How a sensor obtains its register address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorBinding {
    /// The sensor owns its register address directly.
    Separate(RegisterAddress),

    /// The sensor is an indexed view into a register map on its device.
    Map {
        /// Referenced map id.
        map_id: MapId,
        /// Index into the map, `0 <= offset < value_count`.
        offset: u32,
    },
}

impl SensorBinding {
    /// Returns `true` for the map-backed variant.
    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, SensorBinding::Map { .. })
    }

    /// Returns the referenced map id, if map-backed.
    pub fn map_id(&self) -> Option<&MapId> {
        match self {
            SensorBinding::Map { map_id, .. } => Some(map_id),
            SensorBinding::Separate(_) => None,
        }
    }
}

/// A named point of interest on a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    /// Sensor identifier, unique across the whole configuration.
    pub id: Uuid,

    /// Human-readable description.
    pub description: String,

    /// Access mode.
    pub mode: SensorMode,

    /// Change threshold below which updates are suppressed; <= 0 means unset.
    pub update_threshold: f64,

    /// Lower value bound, if any.
    pub min_value: Option<f64>,

    /// Upper value bound, if any.
    pub max_value: Option<f64>,

    /// Opaque correction expression applied to raw values.
    pub correction: String,

    /// Address binding.
    pub binding: SensorBinding,
}

impl Sensor {
    /// Creates a read-mode sensor with no bounds or correction.
    pub fn new(id: Uuid, binding: SensorBinding) -> Self {
        Self {
            id,
            description: String::new(),
            mode: SensorMode::Read,
            update_threshold: 0.0,
            min_value: None,
            max_value: None,
            correction: String::new(),
            binding,
        }
    }
}

// =============================================================================
// Device
// =============================================================================

/// A Modbus-polled device with its register maps and sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier, unique across the configuration.
    pub id: Uuid,

    /// Human-readable description.
    pub description: String,

    /// Transport parameters.
    pub params: ConnectionParams,

    /// Register maps keyed by id. Ordered for deterministic serialization.
    pub maps: BTreeMap<MapId, SensorsMap>,

    /// Sensors keyed by id. Ordered for deterministic serialization.
    pub sensors: BTreeMap<Uuid, Sensor>,
}

impl Device {
    /// Creates a device with no maps or sensors.
    pub fn new(id: Uuid, params: ConnectionParams, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            params,
            maps: BTreeMap::new(),
            sensors: BTreeMap::new(),
        }
    }

    /// Returns the sensors referencing `map_id` through a map binding.
    pub fn sensors_using_map<'a>(&'a self, map_id: &'a MapId) -> impl Iterator<Item = &'a Sensor> {
        self.sensors
            .values()
            .filter(move |sensor| sensor.binding.map_id() == Some(map_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RegisterType, ValueType};

    fn holding_address() -> RegisterAddress {
        RegisterAddress::new(
            1,
            40001,
            ValueType::UInt16,
            RegisterType::AnalogOutputHoldingRegisters,
        )
    }

    #[test]
    fn test_global_settings_defaults() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.server_url, "http://localhost:8888");
        assert_eq!(settings.write_request_ttl, 180);
    }

    #[test]
    fn test_map_id() {
        let id = MapId::new("m1");
        assert_eq!(id.as_str(), "m1");
        assert!(!id.is_empty());
        assert!(MapId::new("").is_empty());
    }

    #[test]
    fn test_sensor_binding_accessors() {
        let separate = SensorBinding::Separate(holding_address());
        assert!(!separate.is_map());
        assert_eq!(separate.map_id(), None);

        let map = SensorBinding::Map {
            map_id: MapId::new("m1"),
            offset: 3,
        };
        assert!(map.is_map());
        assert_eq!(map.map_id(), Some(&MapId::new("m1")));
    }

    #[test]
    fn test_sensors_using_map() {
        let mut device = Device::new(Uuid::new_v4(), ConnectionParams::default(), "plc");
        let map = SensorsMap::new("m1", holding_address(), 4);
        device.maps.insert(map.id.clone(), map);

        let bound = Sensor::new(
            Uuid::new_v4(),
            SensorBinding::Map {
                map_id: MapId::new("m1"),
                offset: 0,
            },
        );
        let standalone = Sensor::new(Uuid::new_v4(), SensorBinding::Separate(holding_address()));
        device.sensors.insert(bound.id, bound.clone());
        device.sensors.insert(standalone.id, standalone);

        let m1 = MapId::new("m1");
        let users: Vec<_> = device.sensors_using_map(&m1).collect();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, bound.id);

        let other = MapId::new("m2");
        assert_eq!(device.sensors_using_map(&other).count(), 0);
    }
}
