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

//! Presentation of amounts, block numbers and dates.
//!
//! Amounts are formatted with integer arithmetic only, so large balances are shown exactly.

use num_bigint::BigUint;
use time::OffsetDateTime;
use vesting_unlock_core::Balance;

/// Format `amount` of the smallest unit as a decimal number of tokens with `decimals` decimals.
///
/// Shows at most `precision` fraction digits. Further digits are truncated.
///
/// ```rust
/// # use vesting_unlock_cli::format::format_balance;
/// # use num_bigint::BigUint;
/// let amount = BigUint::from(123_456_789_012u64);
/// assert_eq!(format_balance(&amount, 10, 4), "12.3456");
/// ```
pub fn format_balance(amount: &Balance, decimals: u32, precision: u32) -> String {
    let unit = BigUint::from(10u32).pow(decimals);
    let whole = amount / &unit;
    let shown = precision.min(decimals) as usize;
    if shown == 0 {
        return whole.to_string();
    }
    let fraction = format!(
        "{:0>width$}",
        (amount % &unit).to_string(),
        width = decimals as usize
    );
    format!("{}.{}", whole, &fraction[..shown])
}

/// Format a block number with thousands separators.
pub fn format_block(block: u64) -> String {
    let digits = block.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Format the date of `timestamp`, e.g. `Mar 5, 2026`.
pub fn format_date(timestamp: OffsetDateTime) -> Result<String, time::error::Format> {
    timestamp.format(time::macros::format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
}

/// Format `timestamp` as RFC 3339.
pub fn format_rfc3339(timestamp: OffsetDateTime) -> Result<String, time::error::Format> {
    timestamp.format(&time::format_description::well_known::Rfc3339)
}

#[cfg(test)]
mod test {
    use super::*;

    fn amount(value: u128) -> Balance {
        Balance::from(value)
    }

    #[test]
    fn balances() {
        assert_eq!(format_balance(&amount(0), 10, 4), "0.0000");
        assert_eq!(format_balance(&amount(5), 10, 4), "0.0000");
        assert_eq!(format_balance(&amount(10_000_000_000), 10, 4), "1.0000");
        assert_eq!(format_balance(&amount(123_456_789_012), 10, 4), "12.3456");
        assert_eq!(format_balance(&amount(123_456_789_012), 10, 0), "12");
        assert_eq!(format_balance(&amount(1_500_000), 6, 10), "1.500000");
        assert_eq!(format_balance(&amount(42), 0, 4), "42");
    }

    #[test]
    fn huge_balance() {
        let huge = amount(u128::MAX) * 10u32;
        assert_eq!(
            format_balance(&huge, 10, 4),
            "340282366920938463463374607431.7682"
        );
    }

    #[test]
    fn blocks() {
        assert_eq!(format_block(0), "0");
        assert_eq!(format_block(999), "999");
        assert_eq!(format_block(1000), "1,000");
        assert_eq!(format_block(26_123_456), "26,123,456");
    }

    #[test]
    fn dates() {
        let timestamp = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(format_date(timestamp).unwrap(), "Nov 14, 2023");
        assert_eq!(
            format_rfc3339(timestamp).unwrap(),
            "2023-11-14T22:13:20Z"
        );
    }
}
