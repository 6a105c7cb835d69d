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

//! Define the `summary` command.

use super::*;
use crate::format::format_block;
use serde_json::json;
use vesting_unlock_core::{aggregate, resolve_transferable};

#[derive(StructOpt, Debug, Clone)]
/// Show the balances and the locked vesting of an account
pub struct Summary {
    #[structopt(flatten)]
    snapshot: SnapshotOptions,

    #[structopt(flatten)]
    display: DisplayOptions,
}

impl CommandT for Summary {
    fn run(&self) -> Result<(), CommandError> {
        let snapshot = self.snapshot.load()?;
        let state = aggregate(&snapshot.schedules, snapshot.reference_block);
        let transferable = snapshot
            .balance
            .as_ref()
            .map(|balance| resolve_transferable(balance, &state.currently_locked));

        if self.display.json {
            let balance = snapshot.balance.as_ref();
            return print_json(&json!({
                "reference_block": snapshot.reference_block,
                "schedule_count": snapshot.schedules.len(),
                "full_balance": balance.map(|b| b.full().to_string()),
                "free_balance": balance.map(|b| b.free.to_string()),
                "reserved_balance": balance.map(|b| b.reserved.to_string()),
                "transferable_balance": transferable.map(|t| t.to_string()),
                "total_locked": state.total_locked.to_string(),
                "total_unlocked": state.total_unlocked.to_string(),
                "currently_locked": state.currently_locked.to_string(),
            }));
        }

        let display = &self.display;
        println!(
            "Reference block:   {}",
            format_block(snapshot.reference_block)
        );
        if let Some(balance) = &snapshot.balance {
            println!("Full balance:      {}", display.amount(&balance.full()));
            println!("Free balance:      {}", display.amount(&balance.free));
        }
        if snapshot.schedules.is_empty() {
            println!("No vesting schedule found");
            return Ok(());
        }
        if let Some(transferable) = &transferable {
            println!("Transferable:      {}", display.amount(transferable));
        }
        println!(
            "Locked vesting:    {}",
            display.amount(&state.currently_locked)
        );
        println!(
            "                   across {} vesting schedule{}",
            snapshot.schedules.len(),
            plural(snapshot.schedules.len())
        );
        println!("Total vested:      {}", display.amount(&state.total_locked));
        println!("Total unlocked:    {}", display.amount(&state.total_unlocked));
        Ok(())
    }
}
