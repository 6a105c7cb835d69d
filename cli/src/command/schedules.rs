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

//! Define the `schedules` command.

use super::*;
use crate::format::{format_balance, format_block, format_date, format_rfc3339};
use serde_json::json;
use time::OffsetDateTime;
use vesting_unlock_core::{inspect, Completion, ProjectionConfig};

#[derive(StructOpt, Debug, Clone)]
/// Show the progress of every vesting schedule of an account
pub struct Schedules {
    #[structopt(flatten)]
    snapshot: SnapshotOptions,

    #[structopt(flatten)]
    display: DisplayOptions,

    #[structopt(flatten)]
    projection: ProjectionOptions,
}

impl CommandT for Schedules {
    fn run(&self) -> Result<(), CommandError> {
        let snapshot = self.snapshot.load()?;
        let config = self.projection.config();
        config.validate()?;
        let now = OffsetDateTime::now_utc();
        let reference_block = snapshot.reference_block;

        let mut reports = Vec::with_capacity(snapshot.schedules.len());
        for (index, schedule) in snapshot.schedules.iter().enumerate() {
            let report = inspect(schedule, reference_block);
            let end_timestamp = report
                .completion
                .block()
                .and_then(|block| config.timestamp_at(now, reference_block, block));
            let days_remaining = report.blocks_remaining.map(|blocks| config.days_for(blocks));

            if self.display.json {
                reports.push(json!({
                    "number": index + 1,
                    "locked": schedule.locked.to_string(),
                    "per_block": schedule.per_block.to_string(),
                    "starting_block": schedule.starting_block,
                    "unlocked_amount": report.unlocked_amount.to_string(),
                    "locked_amount": report.locked_amount.to_string(),
                    "percent_unlocked": report.percent_unlocked,
                    "is_complete": report.is_complete,
                    "completion_block": report.completion.block(),
                    "never_completes": report.completion == Completion::Never,
                    "completion_beyond_max_block": report.completion == Completion::Beyond,
                    "blocks_remaining": report.blocks_remaining,
                    "days_remaining": days_remaining,
                    "end_timestamp": end_timestamp.map(format_rfc3339).transpose()?,
                }));
                continue;
            }

            let display = &self.display;
            if index > 0 {
                println!();
            }
            if report.is_complete {
                println!("Schedule #{}  ✓ Complete", index + 1);
            } else {
                println!("Schedule #{}", index + 1);
            }
            println!("  Initial locked:    {}", display.amount(&schedule.locked));
            println!("  Currently locked:  {}", display.amount(&report.locked_amount));
            println!("  Unlocked:          {}", display.amount(&report.unlocked_amount));
            println!(
                "  Per block:         {} {}",
                format_balance(
                    &schedule.per_block,
                    display.decimals,
                    display.precision.max(PER_BLOCK_PRECISION)
                ),
                display.symbol
            );
            println!("  Progress:          {}%", report.percent_unlocked);
            println!(
                "  Starting block:    {}",
                format_block(schedule.starting_block)
            );
            match report.completion {
                Completion::At(block) => println!("  End block:         {}", format_block(block)),
                Completion::Beyond => println!("  End block:         beyond the largest block number"),
                Completion::Never => println!("  End block:         never, nothing is released per block"),
            }
            if let (false, Some(days)) = (report.is_complete, days_remaining) {
                match end_timestamp {
                    Some(end) => println!(
                        "  {} days remaining ({} months), fully unlocked {}",
                        days,
                        ProjectionConfig::months_for(days),
                        format_date(end)?
                    ),
                    None => println!(
                        "  {} days remaining ({} months)",
                        days,
                        ProjectionConfig::months_for(days)
                    ),
                }
            }
        }

        if self.display.json {
            return print_json(&serde_json::Value::Array(reports));
        }
        if snapshot.schedules.is_empty() {
            println!("No vesting schedule found");
        }
        Ok(())
    }
}
