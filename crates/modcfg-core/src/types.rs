// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Register, value and mode enumerations with their wire token codecs.
//!
//! Every enum here maps to a fixed lower-case token in the JSON document
//! (`"analog_input_registers"`, `"uint16"`, `"rw"`, ...). Decoding is
//! case-insensitive; encoding always emits the canonical lower-case form.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

// =============================================================================
// Register Type
// =============================================================================

/// The four Modbus register classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterType {
    /// Coils (read/write, 1 bit). Addresses 1-9999.
    DiscreteOutputCoils,
    /// Discrete input contacts (1 bit). Addresses 10001-19999.
    DiscreteInputContacts,
    /// Analog input registers (16 bit). Addresses 30001-39999.
    AnalogInputRegisters,
    /// Analog output holding registers (16 bit). Addresses 40001-49999.
    AnalogOutputHoldingRegisters,
}

impl RegisterType {
    /// All register types, in address-range order.
    pub const ALL: [RegisterType; 4] = [
        RegisterType::DiscreteOutputCoils,
        RegisterType::DiscreteInputContacts,
        RegisterType::AnalogInputRegisters,
        RegisterType::AnalogOutputHoldingRegisters,
    ];

    /// Returns the canonical wire token.
    pub fn token(&self) -> &'static str {
        match self {
            RegisterType::DiscreteOutputCoils => "discrete_output_coils",
            RegisterType::DiscreteInputContacts => "discrete_input_contacts",
            RegisterType::AnalogInputRegisters => "analog_input_registers",
            RegisterType::AnalogOutputHoldingRegisters => "analog_output_holding_registers",
        }
    }

    /// Decodes a wire token, case-insensitively.
    pub fn from_token(token: &str) -> CoreResult<Self> {
        match token.to_ascii_lowercase().as_str() {
            "discrete_output_coils" => Ok(RegisterType::DiscreteOutputCoils),
            "discrete_input_contacts" => Ok(RegisterType::DiscreteInputContacts),
            "analog_input_registers" => Ok(RegisterType::AnalogInputRegisters),
            "analog_output_holding_registers" => Ok(RegisterType::AnalogOutputHoldingRegisters),
            _ => Err(CoreError::UnknownRegisterType {
                token: token.to_string(),
            }),
        }
    }

    /// Returns the human-readable name used in error messages.
    pub fn human_name(&self) -> &'static str {
        match self {
            RegisterType::DiscreteOutputCoils => "Discrete Output Coils",
            RegisterType::DiscreteInputContacts => "Discrete Input Contacts",
            RegisterType::AnalogInputRegisters => "Analog Input Registers",
            RegisterType::AnalogOutputHoldingRegisters => "Analog Output Holding Registers",
        }
    }

    /// Returns the inclusive register number range for this type.
    pub fn range(&self) -> RangeInclusive<u16> {
        match self {
            RegisterType::DiscreteOutputCoils => 1..=9999,
            RegisterType::DiscreteInputContacts => 10001..=19999,
            RegisterType::AnalogInputRegisters => 30001..=39999,
            RegisterType::AnalogOutputHoldingRegisters => 40001..=49999,
        }
    }

    /// Returns `true` if sensors on this register type may use a
    /// write-capable mode.
    #[inline]
    pub fn supports_write(&self) -> bool {
        matches!(
            self,
            RegisterType::DiscreteInputContacts | RegisterType::AnalogOutputHoldingRegisters
        )
    }
}

impl fmt::Display for RegisterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// =============================================================================
// Value Type
// =============================================================================

/// Data type of the value carried by a register block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Boolean (single bit/register).
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl ValueType {
    /// Returns the canonical wire token.
    pub fn token(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int8 => "int8",
            ValueType::UInt8 => "uint8",
            ValueType::Int16 => "int16",
            ValueType::UInt16 => "uint16",
            ValueType::Int32 => "int32",
            ValueType::UInt32 => "uint32",
            ValueType::Int64 => "int64",
            ValueType::UInt64 => "uint64",
            ValueType::Float => "float",
            ValueType::Double => "double",
        }
    }

    /// Decodes a wire token, case-insensitively.
    ///
    /// The mapping is one-to-one: `int32` decodes to [`ValueType::Int32`]
    /// and `uint64` to [`ValueType::UInt64`], so signedness survives a
    /// decode/encode round trip.
    pub fn from_token(token: &str) -> CoreResult<Self> {
        match token.to_ascii_lowercase().as_str() {
            "bool" => Ok(ValueType::Bool),
            "int8" => Ok(ValueType::Int8),
            "uint8" => Ok(ValueType::UInt8),
            "int16" => Ok(ValueType::Int16),
            "uint16" => Ok(ValueType::UInt16),
            "int32" => Ok(ValueType::Int32),
            "uint32" => Ok(ValueType::UInt32),
            "int64" => Ok(ValueType::Int64),
            "uint64" => Ok(ValueType::UInt64),
            "float" => Ok(ValueType::Float),
            "double" => Ok(ValueType::Double),
            _ => Err(CoreError::UnknownValueType {
                token: token.to_string(),
            }),
        }
    }

    /// Returns the byte width relevant for byte-order strings.
    ///
    /// Bool and the 8-bit types have width 0: they fit in a single byte
    /// and a byte order is meaningless (and rejected) for them.
    pub fn byte_width(&self) -> usize {
        match self {
            ValueType::Bool | ValueType::Int8 | ValueType::UInt8 => 0,
            ValueType::Int16 | ValueType::UInt16 => 2,
            ValueType::Int32 | ValueType::UInt32 | ValueType::Float => 4,
            ValueType::Int64 | ValueType::UInt64 | ValueType::Double => 8,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// =============================================================================
// Sensor Mode
// =============================================================================

/// Access mode of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorMode {
    /// Read-only (wire token `r`, the default).
    #[default]
    Read,
    /// Write-only (wire token `w`).
    Write,
    /// Read and write (wire token `rw`).
    ReadWrite,
}

impl SensorMode {
    /// Returns the canonical wire token.
    pub fn token(&self) -> &'static str {
        match self {
            SensorMode::Read => "r",
            SensorMode::Write => "w",
            SensorMode::ReadWrite => "rw",
        }
    }

    /// Decodes a wire token. Anything other than `w`/`rw` (any case)
    /// decodes to [`SensorMode::Read`].
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "w" => SensorMode::Write,
            "rw" => SensorMode::ReadWrite,
            _ => SensorMode::Read,
        }
    }

    /// Returns the human-readable name used in error messages.
    pub fn human_name(&self) -> &'static str {
        match self {
            SensorMode::Read => "Read",
            SensorMode::Write => "Write",
            SensorMode::ReadWrite => "ReadWrite",
        }
    }

    /// Returns `true` if this mode writes to the device.
    #[inline]
    pub fn is_write_capable(&self) -> bool {
        !matches!(self, SensorMode::Read)
    }
}

impl fmt::Display for SensorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// =============================================================================
// Serial Line Parameters
// =============================================================================

/// Serial parity setting (connection-string letters `N|E|O|S|M`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    /// No parity (`N`).
    #[default]
    None,
    /// Even parity (`E`).
    Even,
    /// Odd parity (`O`).
    Odd,
    /// Space parity (`S`).
    Space,
    /// Mark parity (`M`).
    Mark,
}

impl Parity {
    /// Returns the single-letter wire token.
    pub fn token(&self) -> &'static str {
        match self {
            Parity::None => "N",
            Parity::Even => "E",
            Parity::Odd => "O",
            Parity::Space => "S",
            Parity::Mark => "M",
        }
    }

    /// Decodes the single-letter token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "N" => Some(Parity::None),
            "E" => Some(Parity::Even),
            "O" => Some(Parity::Odd),
            "S" => Some(Parity::Space),
            "M" => Some(Parity::Mark),
            _ => None,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Serial stop bits (connection-string tokens `1|1.5|2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopBits {
    /// One stop bit.
    #[default]
    One,
    /// One and a half stop bits.
    OneAndHalf,
    /// Two stop bits.
    Two,
}

impl StopBits {
    /// Returns the wire token.
    pub fn token(&self) -> &'static str {
        match self {
            StopBits::One => "1",
            StopBits::OneAndHalf => "1.5",
            StopBits::Two => "2",
        }
    }

    /// Decodes the wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(StopBits::One),
            "1.5" => Some(StopBits::OneAndHalf),
            "2" => Some(StopBits::Two),
            _ => None,
        }
    }
}

impl fmt::Display for StopBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Serial flow control (connection-string tokens `none|soft|hard`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowControl {
    /// No flow control.
    #[default]
    None,
    /// Software (XON/XOFF) flow control.
    Software,
    /// Hardware (RTS/CTS) flow control.
    Hardware,
}

impl FlowControl {
    /// Returns the wire token.
    pub fn token(&self) -> &'static str {
        match self {
            FlowControl::None => "none",
            FlowControl::Software => "soft",
            FlowControl::Hardware => "hard",
        }
    }

    /// Decodes the wire token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "none" => Some(FlowControl::None),
            "soft" => Some(FlowControl::Software),
            "hard" => Some(FlowControl::Hardware),
            _ => None,
        }
    }
}

impl fmt::Display for FlowControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// =============================================================================
// Tests
// =============================================================================
