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

//! Define the `projection` command.

use super::*;
use crate::format::{format_block, format_date, format_rfc3339};
use serde_json::json;
use vesting_unlock_core::{sample_from_now, ProjectionConfig};

#[derive(StructOpt, Debug, Clone)]
/// Show how the locked vesting of an account decreases until everything is unlocked
pub struct Projection {
    #[structopt(flatten)]
    snapshot: SnapshotOptions,

    #[structopt(flatten)]
    display: DisplayOptions,

    #[structopt(flatten)]
    projection: ProjectionOptions,

    /// Project only the schedule with this number, starting at 1.
    #[structopt(long, value_name = "number")]
    schedule: Option<usize>,
}

impl CommandT for Projection {
    fn run(&self) -> Result<(), CommandError> {
        let snapshot = self.snapshot.load()?;
        let schedules = match self.schedule {
            Some(number) if number >= 1 && number <= snapshot.schedules.len() => {
                &snapshot.schedules[number - 1..number]
            }
            Some(number) => {
                return Err(CommandError::ScheduleNotFound {
                    index: number,
                    count: snapshot.schedules.len(),
                })
            }
            None => &snapshot.schedules[..],
        };

        let config = self.projection.config();
        let projection = sample_from_now(schedules, snapshot.reference_block, &config)?;
        let days_remaining = projection
            .end_block()
            .map(|end| config.days_for(end.saturating_sub(snapshot.reference_block)));

        if self.display.json {
            let mut samples = Vec::with_capacity(projection.len());
            for sample in projection.clone() {
                samples.push(json!({
                    "block": sample.block,
                    "timestamp": sample.timestamp.map(format_rfc3339).transpose()?,
                    "locked_amount": sample.locked_amount.to_string(),
                    "is_reference_point": sample.is_reference_point,
                }));
            }
            return print_json(&json!({
                "reference_block": projection.reference_block(),
                "currently_locked": projection.currently_locked().to_string(),
                "end_block": projection.end_block(),
                "end_timestamp": projection.end_timestamp().map(format_rfc3339).transpose()?,
                "days_remaining": days_remaining,
                "samples": samples,
            }));
        }

        let display = &self.display;
        match self.schedule {
            Some(number) => println!("Unlock timeline for schedule #{}", number),
            None => println!("Vesting unlock timeline"),
        }
        println!(
            "Currently locked:    {}",
            display.amount(&projection.currently_locked())
        );
        match (projection.end_block(), projection.end_timestamp()) {
            (Some(_), Some(end)) => println!("Fully unlocked by:   {}", format_date(end)?),
            (Some(block), None) => println!("Fully unlocked at:   block {}", format_block(block)),
            (None, _) => println!("Fully unlocked by:   never"),
        }
        if let Some(days) = days_remaining {
            println!(
                "Days remaining:      {} (≈ {} months)",
                days,
                ProjectionConfig::months_for(days)
            );
        }
        println!();

        for sample in projection {
            let date = match sample.timestamp {
                _ if sample.is_reference_point => "Today".to_string(),
                Some(timestamp) => format_date(timestamp)?,
                None => "-".to_string(),
            };
            println!(
                "{:>14}  {:<13} {}",
                format_block(sample.block),
                date,
                display.amount(&sample.locked_amount)
            );
        }
        Ok(())
    }
}
