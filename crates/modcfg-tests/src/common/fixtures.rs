// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built models and documents for consistent testing.

use crate::common::builders::{SensorBuilder, SensorsMapBuilder};
use modcfg_core::{
    ConnectionParams, GlobalSettings, RegisterAddress, RegisterType, SensorMode, ValueType,
};
use modcfg_model::ConfigModel;
use uuid::Uuid;

/// Fixed UUIDs so fixtures and expected documents stay in sync.
pub struct KnownIds;

impl KnownIds {
    /// The TCP device of [`ModelFixtures::populated`].
    pub fn tcp_device() -> Uuid {
        uuid_of("c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1")
    }

    /// The serial device of [`ModelFixtures::populated`].
    pub fn serial_device() -> Uuid {
        uuid_of("8a0f5c31-44ce-4da8-9ba5-6de5b36a24c4")
    }

    /// The stand-alone setpoint sensor on the TCP device.
    pub fn setpoint_sensor() -> Uuid {
        uuid_of("0b2fe447-8f2f-4d2f-8a3b-2c3952937b0e")
    }

    /// The map-bound temperature sensor on the TCP device.
    pub fn temperature_sensor() -> Uuid {
        uuid_of("f3b9e9a7-16ce-4d0a-9e2b-7d0e9b3c5a11")
    }
}

fn uuid_of(text: &str) -> Uuid {
    Uuid::try_parse(text).expect("fixture UUID is valid")
}

/// Pre-built configuration models.
pub struct ModelFixtures;

impl ModelFixtures {
    /// An empty model with its default settings.
    pub fn empty() -> ConfigModel {
        ConfigModel::new()
    }

    /// A two-device model exercising both transports, a register map,
    /// and both sensor binding variants.
    pub fn populated() -> ConfigModel {
        let mut model = ConfigModel::new();

        let settings = GlobalSettings {
            server_url: "http://collector.plant.local:8888".to_string(),
            username: "gateway".to_string(),
            password: "hunter2".to_string(),
            write_request_ttl: 120,
        };
        model.set_common_settings(settings).expect("settings fixture");

        let tcp = KnownIds::tcp_device();
        let params = ConnectionParams::parse("tcp:192.168.10.20:502", "fixture")
            .expect("tcp params fixture");
        model
            .upsert_device(tcp, None, params, "boiler room PLC")
            .expect("tcp device fixture");

        let serial = KnownIds::serial_device();
        let params = ConnectionParams::parse("serial_rtu:/dev/ttyUSB0:19200:8:E:1:none", "fixture")
            .expect("serial params fixture");
        model
            .upsert_device(serial, None, params, "pump controller")
            .expect("serial device fixture");

        let map = SensorsMapBuilder::new("temps")
            .address(
                RegisterAddress::new(
                    2,
                    30010,
                    ValueType::Float,
                    RegisterType::AnalogInputRegisters,
                )
                .with_byte_order("4321"),
            )
            .value_count(8)
            .default_value(0.0)
            .build();
        model
            .upsert_sensor_map(&tcp, None, map)
            .expect("map fixture");

        let setpoint = SensorBuilder::new()
            .id(KnownIds::setpoint_sensor())
            .description("boiler setpoint")
            .mode(SensorMode::ReadWrite)
            .update_threshold(0.5)
            .bounds(10.0, 95.0)
            .correction("x * 0.1")
            .separate(RegisterAddress::new(
                2,
                40001,
                ValueType::UInt16,
                RegisterType::AnalogOutputHoldingRegisters,
            ))
            .build();
        model
            .upsert_sensor(&tcp, None, setpoint)
            .expect("setpoint fixture");

        let temperature = SensorBuilder::new()
            .id(KnownIds::temperature_sensor())
            .description("supply temperature")
            .mapped("temps", 2)
            .build();
        model
            .upsert_sensor(&tcp, None, temperature)
            .expect("temperature fixture");

        model
    }
}

/// Pre-built JSON documents.
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// A minimal hand-written document with one device and one sensor.
    pub fn minimal() -> &'static str {
        r#"{
            "upak_server_url": "http://collector:8888",
            "settings": {
                "c5ec4bc4-5f97-44a6-8c13-5b1e0a63d1a1": {
                    "address": "tcp:10.1.2.3:502",
                    "description": "lone device",
                    "sensors": {
                        "0b2fe447-8f2f-4d2f-8a3b-2c3952937b0e": {
                            "slave_addr": 1,
                            "reg_address": 40001,
                            "val_type": "uint16",
                            "reg_type": "analog_output_holding_registers"
                        }
                    }
                }
            }
        }"#
    }
}
