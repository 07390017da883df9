// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The configuration document codec.
//!
//! Encodes a [`ConfigModel`] into the JSON layout consumed by the
//! data-collection service and rebuilds a model from such a document.
//! Encoding follows an absent-if-default policy: empty strings, empty
//! containers and non-positive numbers are simply not written.
//!
//! Decoding rebuilds the model through its regular mutators and fails
//! fast on the first rejected value. A failed decode returns only the
//! error; whatever was inserted before the failure is discarded along
//! with the partial model. Global settings are the one tolerated
//! exception: a missing or unparsable server URL keeps the defaults and
//! logs a warning instead of aborting.

use crate::error::{DocumentError, DocumentResult};
use modcfg_core::{
    check_register, check_slave_address, ConnectionParams, GlobalSettings, RegisterAddress,
    RegisterType, Sensor, SensorBinding, SensorMode, SensorsMap, ValueType,
};
use modcfg_model::ConfigModel;
use serde_json::{json, Map, Value};
use tracing::warn;
use uuid::Uuid;

type JsonMap = Map<String, Value>;

// =============================================================================
// Document Keys
// =============================================================================

const SETTINGS_KEY: &str = "settings";
const SENSORS_KEY: &str = "sensors";
const SENSORS_MAP_KEY: &str = "sensors_map";

const UPAK_SERVER_URL_KEY: &str = "upak_server_url";
const UPAK_USERNAME_KEY: &str = "upak_username";
const UPAK_PASSWORD_KEY: &str = "upak_password";
const WRITE_REQUEST_TTL_KEY: &str = "write_request_ttl";

const ADDRESS_KEY: &str = "address";
const DESCRIPTION_KEY: &str = "description";

const SLAVE_ADDR_KEY: &str = "slave_addr";
const REG_ADDRESS_KEY: &str = "reg_address";
const START_REG_ADDRESS_KEY: &str = "start_reg_address";
const REG_TYPE_KEY: &str = "reg_type";
const VAL_TYPE_KEY: &str = "val_type";
const VAL_TYPE_ORDER_KEY: &str = "val_type_order";

const MODE_KEY: &str = "mode";
// Key spelling is fixed by the wire format, typo included.
const UPDATE_TRESHOLD_KEY: &str = "update_treshold";
const CORRECT_FUNC_KEY: &str = "correct_func";
const MIN_VAL_KEY: &str = "min_val";
const MAX_VAL_KEY: &str = "max_val";
const MAP_ID_KEY: &str = "map_id";
const MAP_OFFSET_KEY: &str = "map_offset";

const VAL_COUNT_KEY: &str = "val_count";
const DEFAULT_VAL_KEY: &str = "default_val";

/// Which JSON key holds the register number of an address block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddressContext {
    /// A register map's base address, under `start_reg_address`.
    Map,
    /// A stand-alone sensor's address, under `reg_address`.
    Sensor,
}

impl AddressContext {
    fn register_key(self) -> &'static str {
        match self {
            AddressContext::Map => START_REG_ADDRESS_KEY,
            AddressContext::Sensor => REG_ADDRESS_KEY,
        }
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes the model into the service's JSON document layout.
pub fn serialize(model: &ConfigModel) -> Value {
    let mut root = JsonMap::new();

    let settings = model.common_settings();
    set_string(&mut root, UPAK_SERVER_URL_KEY, &settings.server_url);
    set_string(&mut root, UPAK_USERNAME_KEY, &settings.username);
    set_string(&mut root, UPAK_PASSWORD_KEY, &settings.password);
    if settings.write_request_ttl > 0 {
        root.insert(
            WRITE_REQUEST_TTL_KEY.to_string(),
            json!(settings.write_request_ttl),
        );
    }

    let mut devices_obj = JsonMap::new();
    for device in model.devices() {
        let mut device_obj = JsonMap::new();
        set_string(
            &mut device_obj,
            ADDRESS_KEY,
            &device.params.to_connection_string(),
        );
        set_string(&mut device_obj, DESCRIPTION_KEY, &device.description);

        let mut sensors_obj = JsonMap::new();
        for (sensor_id, sensor) in &device.sensors {
            sensors_obj.insert(sensor_id.to_string(), encode_sensor(sensor));
        }
        if !sensors_obj.is_empty() {
            device_obj.insert(SENSORS_KEY.to_string(), Value::Object(sensors_obj));
        }

        let mut maps_obj = JsonMap::new();
        for (map_id, map) in &device.maps {
            maps_obj.insert(map_id.to_string(), encode_map(map));
        }
        if !maps_obj.is_empty() {
            device_obj.insert(SENSORS_MAP_KEY.to_string(), Value::Object(maps_obj));
        }

        devices_obj.insert(device.id.to_string(), Value::Object(device_obj));
    }
    if !devices_obj.is_empty() {
        root.insert(SETTINGS_KEY.to_string(), Value::Object(devices_obj));
    }

    Value::Object(root)
}

/// Encodes the model as pretty-printed JSON text.
pub fn to_string_pretty(model: &ConfigModel) -> DocumentResult<String> {
    Ok(serde_json::to_string_pretty(&serialize(model))?)
}

fn encode_sensor(sensor: &Sensor) -> Value {
    let mut obj = JsonMap::new();
    if let Some(max) = sensor.max_value {
        obj.insert(MAX_VAL_KEY.to_string(), json!(max));
    }
    if let Some(min) = sensor.min_value {
        obj.insert(MIN_VAL_KEY.to_string(), json!(min));
    }
    set_string(&mut obj, DESCRIPTION_KEY, &sensor.description);
    if sensor.update_threshold > 0.0 {
        obj.insert(UPDATE_TRESHOLD_KEY.to_string(), json!(sensor.update_threshold));
    }
    set_string(&mut obj, CORRECT_FUNC_KEY, &sensor.correction);
    set_string(&mut obj, MODE_KEY, sensor.mode.token());
    match &sensor.binding {
        SensorBinding::Separate(address) => {
            encode_register_address(&mut obj, AddressContext::Sensor, address);
        }
        SensorBinding::Map { map_id, offset } => {
            set_string(&mut obj, MAP_ID_KEY, map_id.as_str());
            obj.insert(MAP_OFFSET_KEY.to_string(), json!(offset));
        }
    }
    Value::Object(obj)
}

fn encode_map(map: &SensorsMap) -> Value {
    let mut obj = JsonMap::new();
    encode_register_address(&mut obj, AddressContext::Map, &map.address);
    obj.insert(VAL_COUNT_KEY.to_string(), json!(map.value_count));
    if let Some(default) = map.default_value {
        obj.insert(DEFAULT_VAL_KEY.to_string(), json!(default));
    }
    Value::Object(obj)
}

fn encode_register_address(obj: &mut JsonMap, context: AddressContext, address: &RegisterAddress) {
    obj.insert(SLAVE_ADDR_KEY.to_string(), json!(address.slave_address));
    if let Some(order) = &address.byte_order {
        set_string(obj, VAL_TYPE_ORDER_KEY, order);
    }
    obj.insert(context.register_key().to_string(), json!(address.register));
    obj.insert(VAL_TYPE_KEY.to_string(), json!(address.value_type.token()));
    obj.insert(REG_TYPE_KEY.to_string(), json!(address.register_type.token()));
}

fn set_string(obj: &mut JsonMap, key: &str, value: &str) {
    if !value.is_empty() {
        obj.insert(key.to_string(), Value::String(value.to_string()));
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Rebuilds a model from JSON text.
pub fn from_str(text: &str) -> DocumentResult<ConfigModel> {
    let root: Value = serde_json::from_str(text)?;
    deserialize(&root)
}

/// Rebuilds a model from a parsed JSON document.
pub fn deserialize(root: &Value) -> DocumentResult<ConfigModel> {
    let root = root.as_object().ok_or(DocumentError::RootNotAnObject)?;
    let mut model = ConfigModel::new();

    decode_settings(root, &mut model);

    let empty = JsonMap::new();
    let devices_obj = get_object(root, SETTINGS_KEY).unwrap_or(&empty);
    for (device_key, device_value) in devices_obj {
        let device_id =
            Uuid::try_parse(device_key).map_err(|_| DocumentError::InvalidDeviceKey {
                key: device_key.clone(),
            })?;
        if device_id.is_nil() {
            return Err(DocumentError::InvalidDeviceKey {
                key: device_key.clone(),
            });
        }
        let device_obj = device_value.as_object().unwrap_or(&empty);

        let params =
            ConnectionParams::parse(get_str(device_obj, ADDRESS_KEY), &device_id.to_string())?;
        model.upsert_device(device_id, None, params, get_str(device_obj, DESCRIPTION_KEY))?;

        // Maps first, so sensor map references resolve.
        if let Some(maps_obj) = get_object(device_obj, SENSORS_MAP_KEY) {
            for (map_key, map_value) in maps_obj {
                let map_obj = map_value.as_object().unwrap_or(&empty);
                let map = decode_map(map_key, map_obj)?;
                model.upsert_sensor_map(&device_id, None, map)?;
            }
        }

        if let Some(sensors_obj) = get_object(device_obj, SENSORS_KEY) {
            for (sensor_key, sensor_value) in sensors_obj {
                let sensor_id =
                    Uuid::try_parse(sensor_key).map_err(|_| DocumentError::InvalidSensorKey {
                        key: sensor_key.clone(),
                    })?;
                let sensor_obj = sensor_value.as_object().unwrap_or(&empty);
                let sensor = decode_sensor(sensor_id, sensor_obj)?;
                model.upsert_sensor(&device_id, None, sensor)?;
            }
        }
    }

    Ok(model)
}

/// Applies the document's global settings, keeping defaults when they
/// do not pass validation.
fn decode_settings(root: &JsonMap, model: &mut ConfigModel) {
    let ttl = root
        .get(WRITE_REQUEST_TTL_KEY)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);
    let settings = GlobalSettings {
        server_url: get_str(root, UPAK_SERVER_URL_KEY).to_string(),
        username: get_str(root, UPAK_USERNAME_KEY).to_string(),
        password: get_str(root, UPAK_PASSWORD_KEY).to_string(),
        write_request_ttl: ttl,
    };
    if let Err(error) = model.set_common_settings(settings) {
        warn!(%error, "document settings rejected, keeping defaults");
    }
}

fn decode_sensor(id: Uuid, obj: &JsonMap) -> DocumentResult<Sensor> {
    let map_id = get_str(obj, MAP_ID_KEY);
    let binding = if map_id.is_empty() {
        SensorBinding::Separate(decode_register_address(obj, AddressContext::Sensor)?)
    } else {
        let offset = match obj.get(MAP_OFFSET_KEY) {
            None => 0,
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| DocumentError::InvalidMapOffset {
                    value: value.clone(),
                })?,
        };
        SensorBinding::Map {
            map_id: map_id.into(),
            offset,
        }
    };

    let mut sensor = Sensor::new(id, binding);
    sensor.description = get_str(obj, DESCRIPTION_KEY).to_string();
    sensor.mode = SensorMode::from_token(get_str(obj, MODE_KEY));
    sensor.update_threshold = obj
        .get(UPDATE_TRESHOLD_KEY)
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    sensor.correction = get_str(obj, CORRECT_FUNC_KEY).to_string();
    // Bounds survive only as JSON numbers; strings and nulls are dropped.
    sensor.min_value = obj.get(MIN_VAL_KEY).and_then(Value::as_f64);
    sensor.max_value = obj.get(MAX_VAL_KEY).and_then(Value::as_f64);
    Ok(sensor)
}

fn decode_map(id: &str, obj: &JsonMap) -> DocumentResult<SensorsMap> {
    let address = decode_register_address(obj, AddressContext::Map)?;
    let value_count = match obj.get(VAL_COUNT_KEY) {
        None => 0,
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| DocumentError::InvalidValueCount {
                value: value.clone(),
            })?,
    };
    let mut map = SensorsMap::new(id, address, value_count);
    map.default_value = obj.get(DEFAULT_VAL_KEY).and_then(Value::as_f64);
    Ok(map)
}

fn decode_register_address(
    obj: &JsonMap,
    context: AddressContext,
) -> DocumentResult<RegisterAddress> {
    let slave_address = check_slave_address(get_i64(obj, SLAVE_ADDR_KEY, -1))?;
    let register_type = RegisterType::from_token(get_str(obj, REG_TYPE_KEY))?;
    let register = get_i64(obj, context.register_key(), -1);
    check_register(register_type, register)?;
    let value_type = ValueType::from_token(get_str(obj, VAL_TYPE_KEY))?;
    // Narrowing is safe after the range check; all ranges fit u16.
    let address = RegisterAddress::new(slave_address, register as u16, value_type, register_type)
        .with_byte_order(get_str(obj, VAL_TYPE_ORDER_KEY));
    Ok(address)
}

fn get_str<'a>(obj: &'a JsonMap, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

fn get_i64(obj: &JsonMap, key: &str, default: i64) -> i64 {
    obj.get(key).and_then(Value::as_i64).unwrap_or(default)
}

fn get_object<'a>(obj: &'a JsonMap, key: &str) -> Option<&'a JsonMap> {
    obj.get(key).and_then(Value::as_object)
}
