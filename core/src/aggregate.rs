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

//! Aggregation of locked and unlocked amounts over all vesting schedules of an account.

use num_traits::Zero;

use crate::{Balance, BlockNumber, VestingSchedule};

/// Locked and unlocked amounts of a set of schedules at a reference block.
///
/// # Invariants
///
/// * `total_unlocked <= total_locked`
/// * `currently_locked == total_locked - total_unlocked`
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AggregateVestingState {
    /// Sum of [VestingSchedule::locked] over all schedules.
    pub total_locked: Balance,
    /// Sum of the amounts released by the reference block.
    pub total_unlocked: Balance,
    /// Vesting that is still locked at the reference block.
    pub currently_locked: Balance,
}

/// Amount released by `schedule` at `block`.
///
/// Release starts at [VestingSchedule::starting_block] and is capped at
/// [VestingSchedule::locked], so the result is never larger than what was locked.
pub fn unlocked_at(schedule: &VestingSchedule, block: BlockNumber) -> Balance {
    let blocks_elapsed = block.saturating_sub(schedule.starting_block);
    let unlocked = &schedule.per_block * blocks_elapsed;
    if unlocked >= schedule.locked {
        schedule.locked.clone()
    } else {
        unlocked
    }
}

/// Amount of `schedule` that is still locked at `block`.
pub fn locked_at(schedule: &VestingSchedule, block: BlockNumber) -> Balance {
    &schedule.locked - unlocked_at(schedule, block)
}

/// Compute the [AggregateVestingState] of `schedules` at `block`.
///
/// An empty list of schedules yields the all-zero state.
pub fn aggregate(schedules: &[VestingSchedule], block: BlockNumber) -> AggregateVestingState {
    let mut total_locked = Balance::zero();
    let mut total_unlocked = Balance::zero();
    for schedule in schedules {
        total_locked += &schedule.locked;
        total_unlocked += unlocked_at(schedule, block);
    }
    let currently_locked = &total_locked - &total_unlocked;

    AggregateVestingState {
        total_locked,
        total_unlocked,
        currently_locked,
    }
}
