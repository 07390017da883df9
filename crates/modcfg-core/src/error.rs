// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Range and format errors for the configuration domain types.
//!
//! Every failure a codec or address check can produce is a variant here,
//! with a human-readable message suitable for direct display in an editor
//! UI. Cross-entity failures (duplicates, dangling references) live in
//! `modcfg-model`, which wraps this type.

use thiserror::Error;

/// Range and format errors raised by codecs and address validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Register number outside the range published for its register type.
    #[error(
        "For register type {register_type} the register address must be between {min} and {max}"
    )]
    RegisterOutOfRange {
        /// Human-readable register type name.
        register_type: String,
        /// Lower inclusive bound.
        min: u16,
        /// Upper inclusive bound.
        max: u16,
    },

    /// Unrecognized register type token.
    #[error("Unknown register type: '{token}'")]
    UnknownRegisterType {
        /// The offending token.
        token: String,
    },

    /// Unrecognized value type token.
    #[error("Unknown register value type: '{token}'")]
    UnknownValueType {
        /// The offending token.
        token: String,
    },

    /// Byte order given for a type that has none.
    #[error("Type '{value_type}' cannot have a byte order")]
    ByteOrderForbidden {
        /// Value type token.
        value_type: String,
    },

    /// Byte order string has the wrong number of characters.
    #[error("For type '{value_type}' the byte order must contain exactly {expected} characters")]
    ByteOrderLength {
        /// Value type token.
        value_type: String,
        /// Required character count.
        expected: usize,
    },

    /// Byte order string is not a permutation of the expected digits.
    #[error(
        "For type '{value_type}' the byte order must be a permutation of the digits {expected}"
    )]
    ByteOrderNotPermutation {
        /// Value type token.
        value_type: String,
        /// The digit template, e.g. "1234".
        expected: String,
    },

    /// Slave address outside 0..=255.
    #[error("Slave address must be between 0 and 255, got {value}")]
    SlaveAddressOutOfRange {
        /// The offending value.
        value: i64,
    },

    /// Connection string does not start with a known transport prefix.
    #[error("No transport address defined for device '{device_id}'")]
    UnknownTransport {
        /// Device the string belongs to.
        device_id: String,
    },

    /// TCP connection string does not have the `tcp:ip:port` shape.
    #[error(
        "Invalid tcp address format for device '{device_id}', \
         expected 'tcp:ip:port', e.g. 'tcp:192.1.1.1:9999'"
    )]
    MalformedTcp {
        /// Device the string belongs to.
        device_id: String,
    },

    /// TCP host part is not a valid IP address.
    #[error("Invalid tcp host '{host}' for device '{device_id}'")]
    InvalidTcpHost {
        /// The offending host part.
        host: String,
        /// Device the string belongs to.
        device_id: String,
    },

    /// TCP port part is not in 1..=65535.
    #[error("Invalid tcp port '{port}' for device '{device_id}'")]
    InvalidTcpPort {
        /// The offending port part.
        port: String,
        /// Device the string belongs to.
        device_id: String,
    },

    /// Serial connection string does not have the seven-field shape.
    #[error(
        "Invalid serial rtu address format for device '{device_id}', \
         expected 'serial_rtu:/dev/ttyS0:56000:8:N:1:none'"
    )]
    MalformedSerial {
        /// Device the string belongs to.
        device_id: String,
    },

    /// One of the serial parameter fields failed to parse or is out of range.
    #[error("Invalid {field} ('{value}') for serial rtu device '{device_id}'")]
    InvalidSerialParam {
        /// The parameter name (baudrate, databits, parity, ...).
        field: &'static str,
        /// The offending value.
        value: String,
        /// Device the string belongs to.
        device_id: String,
    },

    /// Server URL could not be parsed.
    #[error("Invalid collection server URL: '{url}'")]
    InvalidUrl {
        /// The offending URL string.
        url: String,
    },
}

impl CoreError {
    /// Returns the error type as a string for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            CoreError::RegisterOutOfRange { .. } => "register_out_of_range",
            CoreError::UnknownRegisterType { .. } => "unknown_register_type",
            CoreError::UnknownValueType { .. } => "unknown_value_type",
            CoreError::ByteOrderForbidden { .. } => "byte_order_forbidden",
            CoreError::ByteOrderLength { .. } => "byte_order_length",
            CoreError::ByteOrderNotPermutation { .. } => "byte_order_not_permutation",
            CoreError::SlaveAddressOutOfRange { .. } => "slave_address_out_of_range",
            CoreError::UnknownTransport { .. } => "unknown_transport",
            CoreError::MalformedTcp { .. } => "malformed_tcp",
            CoreError::InvalidTcpHost { .. } => "invalid_tcp_host",
            CoreError::InvalidTcpPort { .. } => "invalid_tcp_port",
            CoreError::MalformedSerial { .. } => "malformed_serial",
            CoreError::InvalidSerialParam { .. } => "invalid_serial_param",
            CoreError::InvalidUrl { .. } => "invalid_url",
        }
    }
}

/// A Result type with [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
