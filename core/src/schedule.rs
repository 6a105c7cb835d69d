// Vesting Unlock
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Type definitions for the vesting schedules and balances the engine consumes.
//!
//! Values coming from outside the engine are first read into the `Raw*` types, which accept
//! any integer as a JSON number or a string. Converting them with [TryFrom] validates them.
//! Negative values and non-integers never reach the calculations.

use core::convert::TryFrom;
use core::fmt;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::{Balance, BlockNumber, VestingError};

/// A linear vesting tranche.
///
/// Starting at [VestingSchedule::starting_block] the schedule releases
/// [VestingSchedule::per_block] with every block until [VestingSchedule::locked] is released.
///
/// # Invariants
///
/// * All values are non-negative. This is guaranteed by the types.
///
/// A `per_block` of zero is representable and denotes a schedule that never completes. See
/// [crate::Completion::Never].
#[derive(Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(try_from = "RawVestingSchedule")]
pub struct VestingSchedule {
    /// Total amount originally locked under this tranche.
    pub locked: Balance,
    /// Amount released per elapsed block.
    pub per_block: Balance,
    /// Block height at which the release begins.
    pub starting_block: BlockNumber,
}

impl VestingSchedule {
    pub fn new(
        locked: impl Into<Balance>,
        per_block: impl Into<Balance>,
        starting_block: BlockNumber,
    ) -> Self {
        VestingSchedule {
            locked: locked.into(),
            per_block: per_block.into(),
            starting_block,
        }
    }
}

/// Balance of an account as reported by the chain.
#[derive(Deserialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawAccountBalance")]
pub struct AccountBalance {
    /// Spendable balance including the amount locked by vesting.
    pub free: Balance,
    /// Balance held for reasons unrelated to vesting.
    pub reserved: Balance,
}

impl AccountBalance {
    pub fn new(free: impl Into<Balance>, reserved: impl Into<Balance>) -> Self {
        AccountBalance {
            free: free.into(),
            reserved: reserved.into(),
        }
    }

    /// Sum of the free and the reserved balance.
    pub fn full(&self) -> Balance {
        &self.free + &self.reserved
    }
}

/// An unvalidated integer as found in external input.
///
/// Deserializes from JSON integers and from strings. Strings may be decimal or `0x` prefixed
/// hexadecimal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawInteger(String);

impl RawInteger {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RawInteger {
    fn default() -> Self {
        RawInteger("0".to_string())
    }
}

impl From<&str> for RawInteger {
    fn from(value: &str) -> Self {
        RawInteger(value.to_string())
    }
}

impl From<String> for RawInteger {
    fn from(value: String) -> Self {
        RawInteger(value)
    }
}

impl From<i64> for RawInteger {
    fn from(value: i64) -> Self {
        RawInteger(value.to_string())
    }
}

impl From<u64> for RawInteger {
    fn from(value: u64) -> Self {
        RawInteger(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RawInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawIntegerVisitor)
    }
}

struct RawIntegerVisitor;

impl<'de> Visitor<'de> for RawIntegerVisitor {
    type Value = RawInteger;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.into())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.into())
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<Self::Value, E> {
        Ok(RawInteger(value.to_string()))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
        Ok(RawInteger(value.to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.into())
    }
}

/// [VestingSchedule] before validation.
#[derive(Deserialize, Clone, Debug)]
pub struct RawVestingSchedule {
    pub locked: RawInteger,
    #[serde(alias = "perBlock")]
    pub per_block: RawInteger,
    #[serde(alias = "startingBlock")]
    pub starting_block: RawInteger,
}

impl TryFrom<RawVestingSchedule> for VestingSchedule {
    type Error = VestingError;

    fn try_from(raw: RawVestingSchedule) -> Result<Self, Self::Error> {
        Ok(VestingSchedule {
            locked: parse_balance("locked", raw.locked.as_str())?,
            per_block: parse_balance("per_block", raw.per_block.as_str())?,
            starting_block: parse_block("starting_block", raw.starting_block.as_str())?,
        })
    }
}

/// [AccountBalance] before validation. Missing fields default to zero.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawAccountBalance {
    #[serde(default)]
    pub free: RawInteger,
    #[serde(default)]
    pub reserved: RawInteger,
}

impl TryFrom<RawAccountBalance> for AccountBalance {
    type Error = VestingError;

    fn try_from(raw: RawAccountBalance) -> Result<Self, Self::Error> {
        Ok(AccountBalance {
            free: parse_balance("free", raw.free.as_str())?,
            reserved: parse_balance("reserved", raw.reserved.as_str())?,
        })
    }
}

/// Parse a non-negative amount from decimal or `0x` prefixed hexadecimal text.
///
/// `field` names the value in the returned error.
pub fn parse_balance(field: &'static str, text: &str) -> Result<Balance, VestingError> {
    let text = text.trim();
    let invalid = || VestingError::InvalidInteger {
        field,
        value: text.to_string(),
    };

    if let Some(magnitude) = text.strip_prefix('-') {
        let magnitude = parse_unsigned(magnitude).ok_or_else(invalid)?;
        if magnitude.is_zero() {
            return Ok(magnitude);
        }
        return Err(VestingError::NegativeValue {
            field,
            value: text.to_string(),
        });
    }

    parse_unsigned(text.strip_prefix('+').unwrap_or(text)).ok_or_else(invalid)
}

/// Parse a block height. Like [parse_balance] but the value must fit into a [BlockNumber].
pub fn parse_block(field: &'static str, text: &str) -> Result<BlockNumber, VestingError> {
    parse_balance(field, text)?
        .to_u64()
        .ok_or(VestingError::BlockOverflow { field })
}

fn parse_unsigned(text: &str) -> Option<BigUint> {
    let (digits, radix) = match text.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };
    if digits.is_empty() || !digits.bytes().all(|b| (b as char).is_digit(radix)) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}
