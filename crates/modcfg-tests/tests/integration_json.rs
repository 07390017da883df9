// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # JSON Integration Tests
//!
//! Integration tests for the modcfg-json document codec:
//!
//! - Round-trip encoding of a populated configuration
//! - Document key layout and absent-if-default policy
//! - Fail-fast decoding of malformed documents
//! - Tolerant handling of global settings
//!
//! ## Test Categories
//!
//! - `test_encode_*`: Serialization tests
//! - `test_decode_*`: Deserialization tests
//! - `test_round_trip_*`: Full round-trip tests

use modcfg_core::{CoreError, GlobalSettings, MapId, SensorMode};
use modcfg_json::{document, DocumentError};
use modcfg_model::ModelError;
use modcfg_tests::common::init_test_logging;
use modcfg_tests::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_populated_model() {
    init_test_logging();
    let model = ModelFixtures::populated();
    let text = document::to_string_pretty(&model).expect("encode");
    let decoded = document::from_str(&text).expect("decode");
    assert_eq!(decoded, model);
}

#[test]
fn test_round_trip_empty_model() {
    let model = ModelFixtures::empty();
    let doc = document::serialize(&model);
    assert_eq!(document::deserialize(&doc).expect("decode"), model);
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_device_and_settings_layout() {
    let doc = document::serialize(&ModelFixtures::populated());

    assert_eq!(doc["upak_server_url"], json!("http://collector.plant.local:8888"));
    assert_eq!(doc["upak_username"], json!("gateway"));
    assert_eq!(doc["upak_password"], json!("hunter2"));
    assert_eq!(doc["write_request_ttl"], json!(120));

    let devices = doc["settings"].as_object().expect("settings object");
    assert_eq!(devices.len(), 2);

    let tcp = &devices[&KnownIds::tcp_device().to_string()];
    assert_eq!(tcp["address"], json!("tcp:192.168.10.20:502"));
    assert_eq!(tcp["description"], json!("boiler room PLC"));

    let serial = &devices[&KnownIds::serial_device().to_string()];
    assert_eq!(
        serial["address"],
        json!("serial_rtu:/dev/ttyUSB0:19200:8:E:1:none")
    );
    // No sensors and no maps means no keys at all.
    assert_eq!(serial.get("sensors"), None);
    assert_eq!(serial.get("sensors_map"), None);
}

#[test]
fn test_encode_sensor_and_map_layout() {
    let doc = document::serialize(&ModelFixtures::populated());
    let tcp = &doc["settings"][KnownIds::tcp_device().to_string()];

    let map = &tcp["sensors_map"]["temps"];
    assert_eq!(map["start_reg_address"], json!(30010));
    assert_eq!(map["slave_addr"], json!(2));
    assert_eq!(map["val_type"], json!("float"));
    assert_eq!(map["val_type_order"], json!("4321"));
    assert_eq!(map["reg_type"], json!("analog_input_registers"));
    assert_eq!(map["val_count"], json!(8));
    assert_eq!(map["default_val"], json!(0.0));

    let setpoint = &tcp["sensors"][KnownIds::setpoint_sensor().to_string()];
    assert_eq!(setpoint["reg_address"], json!(40001));
    assert_eq!(setpoint["mode"], json!("rw"));
    assert_eq!(setpoint["update_treshold"], json!(0.5));
    assert_eq!(setpoint["correct_func"], json!("x * 0.1"));
    assert_eq!(setpoint["min_val"], json!(10.0));
    assert_eq!(setpoint["max_val"], json!(95.0));
    assert_eq!(setpoint.get("map_id"), None);

    let temperature = &tcp["sensors"][KnownIds::temperature_sensor().to_string()];
    assert_eq!(temperature["map_id"], json!("temps"));
    assert_eq!(temperature["map_offset"], json!(2));
    assert_eq!(temperature["mode"], json!("r"));
    assert_eq!(temperature.get("reg_address"), None);
    assert_eq!(temperature.get("update_treshold"), None);
}

#[test]
fn test_encode_absent_if_default_policy() {
    let doc = document::serialize(&ModelFixtures::empty());
    let obj = doc.as_object().expect("root object");
    // Default settings are non-empty strings, so they are written; the
    // devices object is dropped entirely.
    assert!(obj.contains_key("upak_server_url"));
    assert!(obj.contains_key("write_request_ttl"));
    assert_eq!(obj.get("settings"), None);

    let mut model = ModelFixtures::empty();
    let blank = GlobalSettings {
        server_url: "http://collector:8888".to_string(),
        username: String::new(),
        password: String::new(),
        write_request_ttl: 0,
    };
    model.set_common_settings(blank).expect("settings");
    let doc = document::serialize(&model);
    let obj = doc.as_object().expect("root object");
    assert_eq!(obj.get("upak_username"), None);
    assert_eq!(obj.get("upak_password"), None);
    assert_eq!(obj.get("write_request_ttl"), None);
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_minimal_document() {
    init_test_logging();
    let model = document::from_str(DocumentFixtures::minimal()).expect("decode");
    assert_eq!(model.device_count(), 1);
    assert_eq!(model.common_settings().server_url, "http://collector:8888");

    let device = model.device(&KnownIds::tcp_device()).expect("device");
    assert_eq!(device.description, "lone device");
    let sensor = &device.sensors[&KnownIds::setpoint_sensor()];
    assert_eq!(sensor.mode, SensorMode::Read);
    assert_eq!(sensor.binding.map_id(), None);
}

#[test]
fn test_decode_settings_are_tolerant() {
    // No URL at all: defaults survive, devices still decode.
    let text = r#"{"settings": {"c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1": {
        "address": "tcp:10.1.2.3:502"
    }}}"#;
    let model = document::from_str(text).expect("decode");
    assert_eq!(model.common_settings(), &GlobalSettings::default());
    assert_eq!(model.device_count(), 1);
}

#[test]
fn test_decode_fails_fast_on_first_error() {
    // The second device carries a bad address; decoding returns the
    // error instead of a partial model.
    let text = r#"{"settings": {
        "c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1": {"address": "tcp:10.1.2.3:502"},
        "8a0f5c31-44ce-4da8-9ba5-6de5b36a24c4": {"address": "tcp:10.1.2.3:70000"}
    }}"#;
    let err = document::from_str(text).expect_err("bad port");
    assert!(matches!(
        err,
        DocumentError::Core(CoreError::InvalidTcpPort { .. })
    ));
}

#[test]
fn test_decode_rejects_duplicate_sensor_across_devices() {
    let sensor = r#"{
        "slave_addr": 1, "reg_address": 40001,
        "val_type": "uint16", "reg_type": "analog_output_holding_registers"
    }"#;
    let text = format!(
        r#"{{"settings": {{
            "c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1": {{
                "address": "tcp:10.1.2.3:502",
                "sensors": {{"0b2fe447-8f2f-4d2f-8a3b-2c3952937b0e": {sensor}}}
            }},
            "8a0f5c31-44ce-4da8-9ba5-6de5b36a24c4": {{
                "address": "tcp:10.1.2.4:502",
                "sensors": {{"0b2fe447-8f2f-4d2f-8a3b-2c3952937b0e": {sensor}}}
            }}
        }}}}"#
    );
    let err = document::from_str(&text).expect_err("duplicate sensor id");
    assert!(matches!(
        err,
        DocumentError::Model(ModelError::DuplicateSensor { .. })
    ));
}

#[test]
fn test_decode_maps_resolve_before_sensors() {
    // Key order in the JSON text puts sensors before sensors_map; the
    // decoder still resolves the reference because maps go first.
    let text = r#"{"settings": {"c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1": {
        "address": "tcp:10.1.2.3:502",
        "sensors": {"0b2fe447-8f2f-4d2f-8a3b-2c3952937b0e": {
            "map_id": "block", "map_offset": 1
        }},
        "sensors_map": {"block": {
            "slave_addr": 1, "start_reg_address": 40001, "val_count": 2,
            "val_type": "uint16", "reg_type": "analog_output_holding_registers"
        }}
    }}}"#;
    let model = document::from_str(text).expect("decode");
    let device = model.device(&KnownIds::tcp_device()).expect("device");
    assert!(device.maps.contains_key(&MapId::new("block")));
}

#[test]
fn test_decode_rejects_garbage() {
    for text in [
        "not json at all",
        "42",
        r#"{"settings": {"nope": {}}}"#,
        r#"{"settings": {"c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1": {"address": ""}}}"#,
    ] {
        assert!(document::from_str(text).is_err(), "accepted: {text}");
    }
}

#[test]
fn test_decode_ignores_unknown_keys() {
    let text = r#"{
        "made_up_top_level": true,
        "settings": {"c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1": {
            "address": "tcp:10.1.2.3:502",
            "firmware": "v2"
        }}
    }"#;
    let model = document::from_str(text).expect("decode");
    assert_eq!(model.device_count(), 1);
}

#[test]
fn test_decode_value_type_tokens_one_to_one() {
    // Each width-4 and width-8 signedness variant keeps its identity
    // through a decode.
    for (token, expected) in [
        ("int32", "int32"),
        ("uint32", "uint32"),
        ("int64", "int64"),
        ("uint64", "uint64"),
    ] {
        let text = format!(
            r#"{{"settings": {{"c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1": {{
                "address": "tcp:10.1.2.3:502",
                "sensors": {{"0b2fe447-8f2f-4d2f-8a3b-2c3952937b0e": {{
                    "slave_addr": 1, "reg_address": 40001,
                    "val_type": "{token}", "reg_type": "analog_output_holding_registers"
                }}}}
            }}}}}}"#
        );
        let model = document::from_str(&text).expect("decode");
        let reencoded: Value = document::serialize(&model);
        let sensor = &reencoded["settings"][KnownIds::tcp_device().to_string()]["sensors"]
            [KnownIds::setpoint_sensor().to_string()];
        assert_eq!(sensor["val_type"], json!(expected), "token {token}");
    }
}
