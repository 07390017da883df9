// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Modbus register addresses and their validation rules.
//!
//! A [`RegisterAddress`] combines the slave address, the register number,
//! the value type and an optional byte-order string. Validation checks the
//! register number against the fixed range of its register type and the
//! byte order against the value type's byte width.

use crate::error::{CoreError, CoreResult};
use crate::types::{RegisterType, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully specified Modbus register address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterAddress {
    /// Slave (unit) address, 0-255.
    pub slave_address: u8,

    /// Register number within the register type's range.
    pub register: u16,

    /// Value type carried at this address.
    pub value_type: ValueType,

    /// Register class.
    pub register_type: RegisterType,

    /// Optional byte-order permutation, e.g. "21" or "4321".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_order: Option<String>,
}

impl RegisterAddress {
    /// Creates an address with no byte order.
    pub fn new(
        slave_address: u8,
        register: u16,
        value_type: ValueType,
        register_type: RegisterType,
    ) -> Self {
        Self {
            slave_address,
            register,
            value_type,
            register_type,
            byte_order: None,
        }
    }

    /// Sets the byte-order string.
    pub fn with_byte_order(mut self, order: impl Into<String>) -> Self {
        let order = order.into();
        self.byte_order = if order.is_empty() { None } else { Some(order) };
        self
    }

    /// Validates the register range and the byte order.
    pub fn validate(&self) -> CoreResult<()> {
        check_register(self.register_type, i64::from(self.register))?;
        if let Some(order) = &self.byte_order {
            check_byte_order(order, self.value_type)?;
        }
        Ok(())
    }
}

impl fmt::Display for RegisterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{} ({})",
            self.register_type, self.slave_address, self.register, self.value_type
        )
    }
}

/// Checks that `register` lies within the published range of `register_type`.
///
/// Takes an `i64` so callers holding raw JSON numbers can range-check
/// before narrowing.
pub fn check_register(register_type: RegisterType, register: i64) -> CoreResult<()> {
    let range = register_type.range();
    if register >= i64::from(*range.start()) && register <= i64::from(*range.end()) {
        return Ok(());
    }
    Err(CoreError::RegisterOutOfRange {
        register_type: register_type.human_name().to_string(),
        min: *range.start(),
        max: *range.end(),
    })
}

/// Checks that `slave` lies within 0..=255 and narrows it.
pub fn check_slave_address(slave: i64) -> CoreResult<u8> {
    u8::try_from(slave).map_err(|_| CoreError::SlaveAddressOutOfRange { value: slave })
}

/// Validates a byte-order string against the value type's byte width.
///
/// An order for a width-0 type (bool and the 8-bit types) is an error.
/// For wider types the string must be exactly `width` characters and a
/// permutation of the digits `1..=width`.
pub fn check_byte_order(order: &str, value_type: ValueType) -> CoreResult<()> {
    let width = value_type.byte_width();
    if width == 0 {
        return Err(CoreError::ByteOrderForbidden {
            value_type: value_type.token().to_string(),
        });
    }
    if order.chars().count() != width {
        return Err(CoreError::ByteOrderLength {
            value_type: value_type.token().to_string(),
            expected: width,
        });
    }
    // Single-digit positions only (width <= 8), so a containment check
    // over "1".."width" together with the length check proves a permutation.
    let template: String = (1..=width).map(|i| char::from(b'0' + i as u8)).collect();
    for digit in template.chars() {
        if !order.contains(digit) {
            return Err(CoreError::ByteOrderNotPermutation {
                value_type: value_type.token().to_string(),
                expected: template,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_register_boundaries() {
        for rt in RegisterType::ALL {
            let range = rt.range();
            assert!(check_register(rt, i64::from(*range.start())).is_ok());
            assert!(check_register(rt, i64::from(*range.end())).is_ok());
            assert!(check_register(rt, i64::from(*range.start()) - 1).is_err());
            assert!(check_register(rt, i64::from(*range.end()) + 1).is_err());
        }
        // Negative raw values never pass.
        assert!(check_register(RegisterType::DiscreteOutputCoils, -1).is_err());
    }

    #[test]
    fn test_check_register_error_names_type_and_bounds() {
        let error = check_register(RegisterType::AnalogInputRegisters, 29999).unwrap_err();
        let msg = error.to_string();
        assert!(msg.contains("Analog Input Registers"));
        assert!(msg.contains("30001"));
        assert!(msg.contains("39999"));
    }

    #[test]
    fn test_check_slave_address() {
        assert_eq!(check_slave_address(0).unwrap(), 0);
        assert_eq!(check_slave_address(255).unwrap(), 255);
        assert!(check_slave_address(-1).is_err());
        assert!(check_slave_address(256).is_err());
    }

    #[test]
    fn test_byte_order_forbidden_for_narrow_types() {
        for vt in [ValueType::Bool, ValueType::Int8, ValueType::UInt8] {
            assert!(matches!(
                check_byte_order("12", vt),
                Err(CoreError::ByteOrderForbidden { .. })
            ));
        }
    }

    #[test]
    fn test_byte_order_permutations() {
        assert!(check_byte_order("12", ValueType::UInt16).is_ok());
        assert!(check_byte_order("21", ValueType::Int16).is_ok());
        assert!(check_byte_order("4321", ValueType::Float).is_ok());
        assert!(check_byte_order("2143", ValueType::UInt32).is_ok());
        assert!(check_byte_order("87654321", ValueType::Double).is_ok());

        // Wrong length.
        assert!(matches!(
            check_byte_order("123", ValueType::UInt16),
            Err(CoreError::ByteOrderLength { .. })
        ));
        // Right length, repeated digit.
        assert!(matches!(
            check_byte_order("11", ValueType::UInt16),
            Err(CoreError::ByteOrderNotPermutation { .. })
        ));
        // Digit out of range.
        assert!(matches!(
            check_byte_order("1235", ValueType::Float),
            Err(CoreError::ByteOrderNotPermutation { .. })
        ));
    }

    #[test]
    fn test_register_address_validate() {
        let addr = RegisterAddress::new(
            1,
            40001,
            ValueType::UInt16,
            RegisterType::AnalogOutputHoldingRegisters,
        );
        assert!(addr.validate().is_ok());

        let addr = addr.clone().with_byte_order("21");
        assert!(addr.validate().is_ok());

        let bad_range = RegisterAddress::new(
            1,
            50000,
            ValueType::UInt16,
            RegisterType::AnalogOutputHoldingRegisters,
        );
        assert!(bad_range.validate().is_err());

        let bad_order = RegisterAddress::new(
            1,
            40001,
            ValueType::UInt16,
            RegisterType::AnalogOutputHoldingRegisters,
        )
        .with_byte_order("13");
        assert!(bad_order.validate().is_err());
    }

    #[test]
    fn test_with_byte_order_normalizes_empty() {
        let addr = RegisterAddress::new(
            1,
            30001,
            ValueType::UInt16,
            RegisterType::AnalogInputRegisters,
        )
        .with_byte_order("");
        assert_eq!(addr.byte_order, None);
    }
}
