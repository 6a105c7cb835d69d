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

//! Miscellaneous helpers used throughout the vesting engine tests.

use rand::Rng;

use vesting_unlock_core::{AccountBalance, Balance, BlockNumber, VestingSchedule};

/// Largest duration in blocks of a schedule created by [random_schedule]. About a year at six
/// seconds per block.
pub const MAX_RANDOM_DURATION: BlockNumber = 5_000_000;

/// Largest starting block of a schedule created by [random_schedule].
pub const MAX_RANDOM_START: BlockNumber = 20_000_000;

pub fn schedule(locked: u128, per_block: u128, starting_block: BlockNumber) -> VestingSchedule {
    VestingSchedule::new(locked, per_block, starting_block)
}

pub fn balance(free: u128, reserved: u128) -> AccountBalance {
    AccountBalance::new(free, reserved)
}

/// Create a schedule that completes at most [MAX_RANDOM_DURATION] blocks after it starts.
///
/// Locked amounts span up to 10^20, which is ten billion tokens with ten decimals.
pub fn random_schedule() -> VestingSchedule {
    let mut rng = rand::thread_rng();
    let locked: u128 = if rng.gen_bool(0.05) {
        0
    } else {
        rng.gen_range(1, 100_000_000_000_000_000_000)
    };
    let duration = u128::from(rng.gen_range(1, MAX_RANDOM_DURATION));
    let per_block = (locked / duration).max(1);
    schedule(locked, per_block, rng.gen_range(0, MAX_RANDOM_START))
}

/// Create up to `max_count` random schedules. The result may be empty.
pub fn random_schedules(max_count: usize) -> Vec<VestingSchedule> {
    let count = rand::thread_rng().gen_range(0, max_count + 1);
    (0..count).map(|_| random_schedule()).collect()
}

/// A block anywhere between before the earliest start and after the latest completion of
/// random schedules.
pub fn random_block() -> BlockNumber {
    rand::thread_rng().gen_range(0, MAX_RANDOM_START + 2 * MAX_RANDOM_DURATION)
}

pub fn random_balance() -> AccountBalance {
    let mut rng = rand::thread_rng();
    AccountBalance::new(
        rng.gen_range(0u128, 100_000_000_000_000_000_000),
        rng.gen_range(0u128, 1_000_000_000_000),
    )
}

/// Sum of the amounts initially locked by `schedules`.
pub fn total_locked(schedules: &[VestingSchedule]) -> Balance {
    schedules.iter().map(|schedule| &schedule.locked).sum()
}
