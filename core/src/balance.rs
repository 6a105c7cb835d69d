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

//! Transferable balance of an account with locked vesting.

use num_traits::Zero;

use crate::{AccountBalance, Balance};

/// Part of the free balance that is not held back by vesting.
///
/// Returns `balance.free - locked_vesting`, or zero if the locked vesting exceeds the free
/// balance. The reserved balance is not considered. See [AccountBalance::full] for the sum of
/// free and reserved balance.
pub fn resolve_transferable(balance: &AccountBalance, locked_vesting: &Balance) -> Balance {
    if &balance.free > locked_vesting {
        &balance.free - locked_vesting
    } else {
        Balance::zero()
    }
}
