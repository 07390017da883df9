// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Transport connection parameters and the single-line connection string.
//!
//! Inside the JSON document a device's transport is a single string:
//!
//! - TCP: `tcp:<ipv4-or-ipv6>:<port>`
//! - Serial: `serial_rtu:<device-path>:<baudrate>:<databits>:<parity>:<stopbits>:<flow>`
//!
//! [`ConnectionParams::parse`] decodes that string (validating every
//! field) and [`ConnectionParams::to_connection_string`] re-encodes it.

use crate::error::{CoreError, CoreResult};
use crate::types::{FlowControl, Parity, StopBits};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

/// Maximum accepted serial baud rate.
pub const MAX_BAUD_RATE: u32 = 921_600;

/// Minimum serial data bits.
pub const MIN_DATA_BITS: u8 = 5;

/// Maximum serial data bits.
pub const MAX_DATA_BITS: u8 = 9;

/// Transport parameters of a Modbus device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConnectionParams {
    /// Modbus TCP transport.
    Tcp {
        /// Device IP address.
        host: IpAddr,
        /// TCP port, 1-65535.
        port: u16,
    },

    /// Modbus RTU over a serial line.
    RtuSerial {
        /// Serial device path, e.g. `/dev/ttyS0`.
        device: String,
        /// Baud rate, 0-921600.
        baud_rate: u32,
        /// Data bits, 5-9.
        data_bits: u8,
        /// Parity setting.
        parity: Parity,
        /// Stop bits.
        stop_bits: StopBits,
        /// Flow control.
        flow_control: FlowControl,
    },
}

impl ConnectionParams {
    /// Decodes a connection string. `device_id` only flavors error messages.
    pub fn parse(address: &str, device_id: &str) -> CoreResult<Self> {
        if address.is_empty() {
            return Err(CoreError::UnknownTransport {
                device_id: device_id.to_string(),
            });
        }
        let parts: Vec<&str> = address.split(':').collect();
        match parts[0] {
            "tcp" => Self::parse_tcp(&parts, device_id),
            "serial_rtu" => Self::parse_serial(&parts, device_id),
            _ => Err(CoreError::UnknownTransport {
                device_id: device_id.to_string(),
            }),
        }
    }

    fn parse_tcp(parts: &[&str], device_id: &str) -> CoreResult<Self> {
        if parts.len() < 3 {
            return Err(CoreError::MalformedTcp {
                device_id: device_id.to_string(),
            });
        }
        // IPv6 hosts contain ':' themselves, so the port is the last part
        // and the host is everything in between.
        let port_part = parts[parts.len() - 1];
        let host_part = parts[1..parts.len() - 1].join(":");
        let host = IpAddr::from_str(&host_part).map_err(|_| CoreError::InvalidTcpHost {
            host: host_part.clone(),
            device_id: device_id.to_string(),
        })?;
        let port: u16 = port_part
            .parse::<i64>()
            .ok()
            .filter(|p| (1..=65535).contains(p))
            .and_then(|p| u16::try_from(p).ok())
            .ok_or_else(|| CoreError::InvalidTcpPort {
                port: port_part.to_string(),
                device_id: device_id.to_string(),
            })?;
        Ok(ConnectionParams::Tcp { host, port })
    }

    fn parse_serial(parts: &[&str], device_id: &str) -> CoreResult<Self> {
        if parts.len() < 7 {
            return Err(CoreError::MalformedSerial {
                device_id: device_id.to_string(),
            });
        }
        let param_err = |field: &'static str, value: &str| CoreError::InvalidSerialParam {
            field,
            value: value.to_string(),
            device_id: device_id.to_string(),
        };

        let baud_rate = parts[2]
            .parse::<i64>()
            .ok()
            .filter(|b| (0..=i64::from(MAX_BAUD_RATE)).contains(b))
            .and_then(|b| u32::try_from(b).ok())
            .ok_or_else(|| param_err("baudrate", parts[2]))?;
        let data_bits = parts[3]
            .parse::<u8>()
            .ok()
            .filter(|b| (MIN_DATA_BITS..=MAX_DATA_BITS).contains(b))
            .ok_or_else(|| param_err("databits", parts[3]))?;
        let parity = Parity::from_token(parts[4]).ok_or_else(|| param_err("parity", parts[4]))?;
        let stop_bits =
            StopBits::from_token(parts[5]).ok_or_else(|| param_err("stopbits", parts[5]))?;
        let flow_control =
            FlowControl::from_token(parts[6]).ok_or_else(|| param_err("flowcontrol", parts[6]))?;

        Ok(ConnectionParams::RtuSerial {
            device: parts[1].to_string(),
            baud_rate,
            data_bits,
            parity,
            stop_bits,
            flow_control,
        })
    }

    /// Encodes the parameters back into the single-line form.
    pub fn to_connection_string(&self) -> String {
        match self {
            ConnectionParams::Tcp { host, port } => format!("tcp:{host}:{port}"),
            ConnectionParams::RtuSerial {
                device,
                baud_rate,
                data_bits,
                parity,
                stop_bits,
                flow_control,
            } => format!(
                "serial_rtu:{device}:{baud_rate}:{data_bits}:{parity}:{stop_bits}:{flow_control}"
            ),
        }
    }

    /// Structural validation for parameters built directly (not parsed).
    ///
    /// Parsed parameters always pass; this guards values assembled by a
    /// caller, keeping the direct path as strict as the JSON path.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            ConnectionParams::Tcp { port, .. } => {
                if *port == 0 {
                    return Err(CoreError::InvalidTcpPort {
                        port: "0".to_string(),
                        device_id: String::new(),
                    });
                }
            }
            ConnectionParams::RtuSerial {
                baud_rate,
                data_bits,
                ..
            } => {
                if *baud_rate > MAX_BAUD_RATE {
                    return Err(CoreError::InvalidSerialParam {
                        field: "baudrate",
                        value: baud_rate.to_string(),
                        device_id: String::new(),
                    });
                }
                if !(MIN_DATA_BITS..=MAX_DATA_BITS).contains(data_bits) {
                    return Err(CoreError::InvalidSerialParam {
                        field: "databits",
                        value: data_bits.to_string(),
                        device_id: String::new(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` for the TCP variant.
    #[inline]
    pub fn is_tcp(&self) -> bool {
        matches!(self, ConnectionParams::Tcp { .. })
    }
}

impl Default for ConnectionParams {
    fn default() -> Self {
        ConnectionParams::Tcp {
            host: IpAddr::V6(Ipv6Addr::LOCALHOST),
            port: 502,
        }
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

impl FromStr for ConnectionParams {
    type Err = CoreError;

    /// Like [`ConnectionParams::parse`] with no device id in errors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parse_tcp() {
        let params = ConnectionParams::parse("tcp:10.0.0.5:502", "dev").unwrap();
        assert_eq!(
            params,
            ConnectionParams::Tcp {
                host: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
                port: 502,
            }
        );
        assert_eq!(params.to_connection_string(), "tcp:10.0.0.5:502");
    }

    #[test]
    fn test_parse_tcp_ipv6() {
        let params = ConnectionParams::parse("tcp:::1:502", "dev").unwrap();
        assert_eq!(
            params,
            ConnectionParams::Tcp {
                host: IpAddr::V6(Ipv6Addr::LOCALHOST),
                port: 502,
            }
        );
    }

    #[test]
    fn test_parse_tcp_rejects_bad_host() {
        let error = ConnectionParams::parse("tcp:999.1.1.1:502", "dev").unwrap_err();
        assert!(matches!(error, CoreError::InvalidTcpHost { .. }));
    }

    #[test]
    fn test_parse_tcp_rejects_bad_port() {
        for addr in ["tcp:10.0.0.1:0", "tcp:10.0.0.1:65536", "tcp:10.0.0.1:x"] {
            let error = ConnectionParams::parse(addr, "dev").unwrap_err();
            assert!(matches!(error, CoreError::InvalidTcpPort { .. }), "{addr}");
        }
    }

    #[test]
    fn test_parse_tcp_rejects_short_form() {
        assert!(matches!(
            ConnectionParams::parse("tcp:10.0.0.1", "dev"),
            Err(CoreError::MalformedTcp { .. })
        ));
    }

    #[test]
    fn test_parse_serial() {
        let params =
            ConnectionParams::parse("serial_rtu:/dev/ttyS0:56000:8:N:1:none", "dev").unwrap();
        assert_eq!(
            params,
            ConnectionParams::RtuSerial {
                device: "/dev/ttyS0".to_string(),
                baud_rate: 56000,
                data_bits: 8,
                parity: Parity::None,
                stop_bits: StopBits::One,
                flow_control: FlowControl::None,
            }
        );
        assert_eq!(
            params.to_connection_string(),
            "serial_rtu:/dev/ttyS0:56000:8:N:1:none"
        );
    }

    #[test]
    fn test_parse_serial_rejects_baud_out_of_range() {
        let error =
            ConnectionParams::parse("serial_rtu:/dev/ttyS0:999999:8:N:1:none", "dev").unwrap_err();
        match error {
            CoreError::InvalidSerialParam { field, .. } => assert_eq!(field, "baudrate"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_serial_rejects_bad_fields() {
        let cases = [
            ("serial_rtu:/dev/ttyS0:9600:4:N:1:none", "databits"),
            ("serial_rtu:/dev/ttyS0:9600:8:X:1:none", "parity"),
            ("serial_rtu:/dev/ttyS0:9600:8:N:3:none", "stopbits"),
            ("serial_rtu:/dev/ttyS0:9600:8:N:1:xon", "flowcontrol"),
        ];
        for (addr, expected_field) in cases {
            match ConnectionParams::parse(addr, "dev").unwrap_err() {
                CoreError::InvalidSerialParam { field, .. } => assert_eq!(field, expected_field),
                other => panic!("unexpected error for {addr}: {other}"),
            }
        }
    }

    #[test]
    fn test_parse_serial_one_and_half_stop_bits() {
        let params =
            ConnectionParams::parse("serial_rtu:/dev/ttyUSB0:9600:7:E:1.5:soft", "dev").unwrap();
        match &params {
            ConnectionParams::RtuSerial {
                parity, stop_bits, ..
            } => {
                assert_eq!(*parity, Parity::Even);
                assert_eq!(*stop_bits, StopBits::OneAndHalf);
            }
            other => panic!("unexpected params: {other:?}"),
        }
        assert_eq!(
            params.to_connection_string(),
            "serial_rtu:/dev/ttyUSB0:9600:7:E:1.5:soft"
        );
    }

    #[test]
    fn test_from_str() {
        let params: ConnectionParams = "tcp:10.0.0.5:502".parse().unwrap();
        assert_eq!(params.to_string(), "tcp:10.0.0.5:502");
        assert!("tcp:10.0.0.5".parse::<ConnectionParams>().is_err());
    }

    #[test]
    fn test_parse_unknown_transport() {
        assert!(matches!(
            ConnectionParams::parse("udp:10.0.0.1:502", "dev"),
            Err(CoreError::UnknownTransport { .. })
        ));
        assert!(matches!(
            ConnectionParams::parse("", "dev"),
            Err(CoreError::UnknownTransport { .. })
        ));
    }

    #[test]
    fn test_validate_direct_construction() {
        let ok = ConnectionParams::Tcp {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 502,
        };
        assert!(ok.validate().is_ok());

        let bad_port = ConnectionParams::Tcp {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        };
        assert!(bad_port.validate().is_err());

        let bad_bits = ConnectionParams::RtuSerial {
            device: "/dev/ttyS0".to_string(),
            baud_rate: 9600,
            data_bits: 12,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
        };
        assert!(bad_bits.validate().is_err());
    }
}
