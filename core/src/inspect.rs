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

//! Facts about a single vesting schedule, independent of the other schedules of the account.

use num_traits::{ToPrimitive, Zero};

use crate::aggregate::unlocked_at;
use crate::{Balance, BlockNumber, VestingSchedule};

/// The completion block of a schedule, `starting_block + locked / per_block` rounded down.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Completion {
    /// Complete from this block on.
    At(BlockNumber),
    /// The completion block is larger than the largest [BlockNumber]. No representable block
    /// reaches it.
    Beyond,
    /// The schedule releases nothing per block but has a locked amount, so it stays locked
    /// indefinitely.
    Never,
}

impl Completion {
    pub fn block(self) -> Option<BlockNumber> {
        match self {
            Completion::At(block) => Some(block),
            Completion::Beyond | Completion::Never => None,
        }
    }

    /// True if the schedule is complete at `block`.
    pub fn is_reached_at(self, block: BlockNumber) -> bool {
        match self {
            Completion::At(completion_block) => block >= completion_block,
            Completion::Beyond | Completion::Never => false,
        }
    }
}

/// Result of [inspect].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleReport {
    /// Amount released at the reference block.
    pub unlocked_amount: Balance,
    /// Amount still locked at the reference block.
    pub locked_amount: Balance,
    pub completion: Completion,
    /// Released share in whole percent, rounded down. Zero if nothing was locked.
    pub percent_unlocked: u8,
    pub is_complete: bool,
    /// Blocks from the reference block until completion. Zero if complete, `None` if the
    /// completion block is not a representable block.
    pub blocks_remaining: Option<BlockNumber>,
}

/// Compute the [Completion] of `schedule`.
///
/// The block count `locked / per_block` is rounded down. If [VestingSchedule::locked] is not a
/// multiple of [VestingSchedule::per_block] the remainder is released one block after the
/// completion block, see [fully_unlocked_block].
pub fn completion(schedule: &VestingSchedule) -> Completion {
    if schedule.locked.is_zero() {
        return Completion::At(schedule.starting_block);
    }
    if schedule.per_block.is_zero() {
        log::warn!(
            "vesting schedule starting at block {} releases nothing per block and never completes",
            schedule.starting_block
        );
        return Completion::Never;
    }

    let blocks_to_unlock = &schedule.locked / &schedule.per_block;
    match (blocks_to_unlock + schedule.starting_block).to_u64() {
        Some(block) => Completion::At(block),
        None => Completion::Beyond,
    }
}

/// The first block at which `schedule` has nothing locked any more.
///
/// Equals the block of [completion] if the locked amount is a multiple of the per block amount
/// and is one block later otherwise. Saturates at the largest [BlockNumber]. `None` if the
/// schedule never completes.
pub fn fully_unlocked_block(schedule: &VestingSchedule) -> Option<BlockNumber> {
    if schedule.locked.is_zero() {
        return Some(schedule.starting_block);
    }
    if schedule.per_block.is_zero() {
        return None;
    }
    let blocks_to_unlock = (&schedule.locked + &schedule.per_block - 1u32) / &schedule.per_block;
    Some(
        (blocks_to_unlock + schedule.starting_block)
            .to_u64()
            .unwrap_or(BlockNumber::MAX),
    )
}

/// Inspect `schedule` at `reference_block`.
pub fn inspect(schedule: &VestingSchedule, reference_block: BlockNumber) -> ScheduleReport {
    let completion = completion(schedule);
    let unlocked_amount = unlocked_at(schedule, reference_block);
    let locked_amount = &schedule.locked - &unlocked_amount;

    let percent_unlocked = if schedule.locked.is_zero() {
        0
    } else {
        // At most 100 since the unlocked amount is capped at the locked amount.
        (&unlocked_amount * 100u32 / &schedule.locked)
            .to_u8()
            .unwrap_or(100)
    };

    let is_complete = schedule.locked.is_zero() || completion.is_reached_at(reference_block);
    let blocks_remaining = if is_complete {
        Some(0)
    } else {
        completion
            .block()
            .map(|block| block.saturating_sub(reference_block))
    };

    ScheduleReport {
        unlocked_amount,
        locked_amount,
        completion,
        percent_unlocked,
        is_complete,
        blocks_remaining,
    }
}
