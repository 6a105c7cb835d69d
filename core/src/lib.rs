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

//! Calculation engine for linear vesting schedules.
//!
//! Given the vesting schedules of an account and a reference block the engine derives
//!
//! * the aggregate locked and unlocked amounts ([aggregate]),
//! * the transferable balance of the account ([balance]),
//! * per schedule facts like completion block and progress ([inspect]),
//! * a time sampled projection of the locked amount for charting ([projection]).
//!
//! All functions are pure. Callers supply a consistent snapshot of schedules, reference block and
//! balance on every call and nothing is cached between calls.

pub mod aggregate;
pub mod balance;
pub mod codec;
pub mod inspect;
pub mod projection;
pub mod schedule;

mod error;
pub use error::VestingError;

pub use aggregate::{aggregate, unlocked_at, AggregateVestingState};
pub use balance::resolve_transferable;
pub use inspect::{inspect, Completion, ScheduleReport};
pub use projection::{sample, sample_from_now, Projection, ProjectionConfig, ProjectionSample};
pub use schedule::{AccountBalance, RawAccountBalance, RawVestingSchedule, VestingSchedule};

/// Amount of tokens in the smallest indivisible unit of the chain.
///
/// Amounts are unbounded so that arithmetic on them is always exact.
pub type Balance = num_bigint::BigUint;

/// Height of a block on the reference chain.
pub type BlockNumber = u64;

/// Block time of the reference chain.
pub const SECONDS_PER_BLOCK: u32 = 6;

/// Upper bound for the number of projection steps.
pub const DEFAULT_MAX_POINTS: usize = 100;

/// Lower bound for the number of projection steps so that short curves stay readable.
pub const DEFAULT_MIN_POINTS: usize = 10;
