// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The in-memory configuration store and its invariants.
//!
//! [`ConfigModel`] owns the global settings and all devices. Every mutator
//! validates first and touches the store only once validation has passed,
//! so a failed call leaves the model exactly as it was.
//!
//! Upserts are keyed by an optional previous identifier: `None` means
//! "insert new", `Some(prev)` means "update the entity currently keyed by
//! `prev`", renaming it when the new identifier differs. Renaming a
//! register map atomically re-points every sensor bound to it.

use crate::error::{ModelError, ModelResult};
use modcfg_core::{
    ConnectionParams, CoreError, Device, GlobalSettings, MapId, Sensor, SensorBinding, SensorsMap,
};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;
use uuid::Uuid;

/// The single active configuration being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigModel {
    settings: GlobalSettings,
    devices: BTreeMap<Uuid, Device>,
}

impl ConfigModel {
    /// Creates an empty model with default global settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the model to default settings and no devices.
    pub fn clear(&mut self) {
        self.settings = GlobalSettings::default();
        self.devices.clear();
    }

    // =========================================================================
    // Devices
    // =========================================================================

    /// Inserts, updates or renames a device.
    ///
    /// With `prev_id == None` a new device is inserted. With
    /// `prev_id == Some(prev)` the device keyed by `prev` is updated,
    /// changing its key when `new_id` differs; if no such device exists a
    /// new one is inserted. Existing maps and sensors survive an update.
    pub fn upsert_device(
        &mut self,
        new_id: Uuid,
        prev_id: Option<Uuid>,
        params: ConnectionParams,
        description: impl Into<String>,
    ) -> ModelResult<()> {
        if new_id.is_nil() {
            return Err(ModelError::NilDeviceId);
        }
        params.validate()?;
        if prev_id != Some(new_id) && self.devices.contains_key(&new_id) {
            return Err(ModelError::DuplicateDevice { device_id: new_id });
        }

        let description = description.into();
        match prev_id.and_then(|prev| self.devices.remove(&prev)) {
            Some(mut device) => {
                device.id = new_id;
                device.description = description;
                device.params = params;
                self.devices.insert(new_id, device);
                debug!(device_id = %new_id, "device updated");
            }
            None => {
                self.devices
                    .insert(new_id, Device::new(new_id, params, description));
                debug!(device_id = %new_id, "device inserted");
            }
        }
        Ok(())
    }

    /// Deletes a device and everything on it.
    pub fn delete_device(&mut self, device_id: &Uuid) -> ModelResult<()> {
        if self.devices.remove(device_id).is_none() {
            return Err(ModelError::DeviceNotFound {
                device_id: *device_id,
            });
        }
        debug!(device_id = %device_id, "device deleted");
        Ok(())
    }

    // =========================================================================
    // Global Settings
    // =========================================================================

    /// Replaces the global settings wholesale.
    ///
    /// Fails when the server URL is not URL-like. Scheme-less input is
    /// accepted by retrying with an `http://` prefix, the way browsers
    /// treat address-bar input.
    pub fn set_common_settings(&mut self, settings: GlobalSettings) -> ModelResult<()> {
        check_server_url(&settings.server_url)?;
        self.settings = settings;
        Ok(())
    }

    // =========================================================================
    // Sensors
    // =========================================================================

    /// Inserts, updates or renames a sensor on a device.
    ///
    /// The sensor's own id must be non-nil and unique across every device
    /// in the configuration. `prev_sensor_id` follows the same upsert
    /// protocol as [`ConfigModel::upsert_device`].
    pub fn upsert_sensor(
        &mut self,
        device_id: &Uuid,
        prev_sensor_id: Option<Uuid>,
        sensor: Sensor,
    ) -> ModelResult<()> {
        if sensor.id.is_nil() {
            return Err(ModelError::NilSensorId);
        }
        let device = self
            .devices
            .get(device_id)
            .ok_or(ModelError::DeviceNotFound {
                device_id: *device_id,
            })?;
        check_sensor(device, &sensor)?;

        // Global uniqueness scan. The only tolerated occurrence of the id
        // is the one being updated in place on this very device.
        let duplicated = self.devices.iter().any(|(owner, d)| {
            d.sensors.contains_key(&sensor.id)
                && !(owner == device_id && prev_sensor_id == Some(sensor.id))
        });
        if duplicated {
            return Err(ModelError::DuplicateSensor {
                sensor_id: sensor.id,
            });
        }

        let device = self
            .devices
            .get_mut(device_id)
            .ok_or(ModelError::DeviceNotFound {
                device_id: *device_id,
            })?;
        if let Some(prev) = prev_sensor_id {
            device.sensors.remove(&prev);
        }
        debug!(device_id = %device_id, sensor_id = %sensor.id, "sensor upserted");
        device.sensors.insert(sensor.id, sensor);
        Ok(())
    }

    /// Deletes a sensor from a device.
    pub fn delete_sensor(&mut self, device_id: &Uuid, sensor_id: &Uuid) -> ModelResult<()> {
        let device = self
            .devices
            .get_mut(device_id)
            .ok_or(ModelError::DeviceNotFound {
                device_id: *device_id,
            })?;
        if device.sensors.remove(sensor_id).is_none() {
            return Err(ModelError::SensorNotFound {
                sensor_id: *sensor_id,
            });
        }
        debug!(device_id = %device_id, sensor_id = %sensor_id, "sensor deleted");
        Ok(())
    }

    // =========================================================================
    // Register Maps
    // =========================================================================

    /// Inserts, updates or renames a register map on a device.
    ///
    /// On a rename every sensor bound to `prev_map_id` is re-pointed to
    /// the new id. The update is rejected before anything is touched when
    /// a bound sensor's offset would not fit the new `value_count`, so the
    /// cascade is atomic.
    pub fn upsert_sensor_map(
        &mut self,
        device_id: &Uuid,
        prev_map_id: Option<&MapId>,
        map: SensorsMap,
    ) -> ModelResult<()> {
        let device = self
            .devices
            .get(device_id)
            .ok_or(ModelError::DeviceNotFound {
                device_id: *device_id,
            })?;
        if map.id.is_empty() {
            return Err(ModelError::EmptyMapId);
        }
        if map.value_count == 0 {
            return Err(ModelError::ZeroValueCount {
                map_id: map.id.clone(),
            });
        }
        let renaming_from = prev_map_id.filter(|prev| !prev.is_empty());
        if renaming_from != Some(&map.id) && device.maps.contains_key(&map.id) {
            return Err(ModelError::DuplicateMap {
                map_id: map.id.clone(),
            });
        }
        map.address.validate()?;

        // Bound sensors must still fit before any mutation happens; this
        // also collects the rename targets.
        let mut bound: Vec<Uuid> = Vec::new();
        if let Some(prev) = renaming_from {
            for sensor in device.sensors.values() {
                if let SensorBinding::Map { map_id, offset } = &sensor.binding {
                    if map_id == prev {
                        if *offset >= map.value_count {
                            return Err(ModelError::MapShrinkBelowOffset {
                                sensor: sensor.description.clone(),
                            });
                        }
                        bound.push(sensor.id);
                    }
                }
            }
        }

        let device = self
            .devices
            .get_mut(device_id)
            .ok_or(ModelError::DeviceNotFound {
                device_id: *device_id,
            })?;
        if let Some(prev) = renaming_from {
            if *prev != map.id {
                let prev = prev.clone();
                for sensor_id in bound {
                    if let Some(sensor) = device.sensors.get_mut(&sensor_id) {
                        if let SensorBinding::Map { map_id, .. } = &mut sensor.binding {
                            *map_id = map.id.clone();
                        }
                    }
                }
                device.maps.remove(&prev);
            }
        }
        // TODO: validate default_value against the range of the map's value type.
        debug!(device_id = %device_id, map_id = %map.id, "register map upserted");
        device.maps.insert(map.id.clone(), map);
        Ok(())
    }

    /// Deletes a register map, refusing while any sensor still uses it.
    pub fn delete_sensor_map(&mut self, device_id: &Uuid, map_id: &MapId) -> ModelResult<()> {
        let device = self
            .devices
            .get(device_id)
            .ok_or(ModelError::DeviceNotFound {
                device_id: *device_id,
            })?;
        if !device.maps.contains_key(map_id) {
            return Err(ModelError::MapNotFound {
                map_id: map_id.clone(),
            });
        }
        if let Some(sensor) = device.sensors_using_map(map_id).next() {
            return Err(ModelError::MapInUse {
                sensor: sensor.description.clone(),
            });
        }
        let device = self
            .devices
            .get_mut(device_id)
            .ok_or(ModelError::DeviceNotFound {
                device_id: *device_id,
            })?;
        device.maps.remove(map_id);
        debug!(device_id = %device_id, map_id = %map_id, "register map deleted");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the global settings.
    pub fn common_settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Returns a device by id.
    pub fn device(&self, device_id: &Uuid) -> Option<&Device> {
        self.devices.get(device_id)
    }

    /// Returns all device ids, in stable order.
    pub fn device_ids(&self) -> Vec<Uuid> {
        self.devices.keys().copied().collect()
    }

    /// Iterates over all devices, in stable order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Returns the number of devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

/// Validates a sensor against its device.
///
/// Separate sensors get register-address and mode/register-type checks;
/// map sensors get reference-resolution and offset checks.
pub fn check_sensor(device: &Device, sensor: &Sensor) -> ModelResult<()> {
    match &sensor.binding {
        SensorBinding::Separate(address) => {
            address.validate()?;
            if sensor.mode.is_write_capable() && !address.register_type.supports_write() {
                return Err(ModelError::ModeIncompatible {
                    register_type: address.register_type.human_name().to_string(),
                    mode: sensor.mode.human_name().to_string(),
                });
            }
            Ok(())
        }
        SensorBinding::Map { map_id, offset } => {
            if map_id.is_empty() {
                return Err(ModelError::EmptyMapId);
            }
            let map = device
                .maps
                .get(map_id)
                .ok_or_else(|| ModelError::DanglingMapReference {
                    map_id: map_id.clone(),
                })?;
            if *offset >= map.value_count {
                return Err(ModelError::OffsetOutOfRange {
                    offset: *offset,
                    value_count: map.value_count,
                });
            }
            Ok(())
        }
    }
}

/// Accepts anything `Url::parse` accepts, retrying scheme-less input
/// with an `http://` prefix.
fn check_server_url(url: &str) -> ModelResult<()> {
    if url.is_empty() {
        return Err(CoreError::InvalidUrl {
            url: url.to_string(),
        }
        .into());
    }
    if Url::parse(url).is_ok() || Url::parse(&format!("http://{url}")).is_ok() {
        return Ok(());
    }
    Err(CoreError::InvalidUrl {
        url: url.to_string(),
    }
    .into())
}
