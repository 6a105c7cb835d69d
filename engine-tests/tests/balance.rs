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

use vesting_unlock_core::*;
use vesting_unlock_test_utils::*;

/// The transferable balance is the free balance minus the locked vesting, but never negative.
#[test]
fn transferable_is_clamped() {
    for _ in 0..200 {
        let account = random_balance();
        let schedules = random_schedules(5);
        let locked = aggregate(&schedules, random_block()).currently_locked;
        let transferable = resolve_transferable(&account, &locked);

        assert!(transferable <= account.free);
        if locked <= account.free {
            assert_eq!(&transferable + &locked, account.free);
        } else {
            assert_eq!(transferable, Balance::from(0u32));
        }
    }
}

#[test]
fn reserved_is_not_transferable() {
    let account = balance(300, 1_000_000);
    let locked = aggregate(&[schedule(1000, 10, 100)], 150).currently_locked;
    assert_eq!(resolve_transferable(&account, &locked), Balance::from(0u32));
    assert_eq!(account.full(), Balance::from(1_000_300u32));
}
