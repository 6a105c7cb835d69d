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

//! Define the command line parser and interface.

use std::path::PathBuf;
use std::str::FromStr;

use lazy_static::lazy_static;
use structopt::StructOpt;
use thiserror::Error as ThisError;
use vesting_unlock_core::schedule::parse_block;
use vesting_unlock_core::{
    BlockNumber, ProjectionConfig, VestingError, DEFAULT_MAX_POINTS, DEFAULT_MIN_POINTS,
    SECONDS_PER_BLOCK,
};

pub mod format;
pub mod input;
pub mod logger;

mod command;
use command::{projection, schedules, summary};

use input::Snapshot;

/// The type that captures the command line.
#[derive(StructOpt, Clone)]
#[structopt(max_term_width = 80)]
pub struct CommandLine {
    #[structopt(subcommand)]
    pub command: Command,
}

impl CommandLine {
    pub fn run(self) -> Result<(), CommandError> {
        self.command.run()
    }
}

/// Options that select the account snapshot the commands operate on.
///
/// The snapshot is either read from a JSON file or assembled from the SCALE encoded storage
/// values of `Vesting.Vesting` and `System.Account`.
#[derive(StructOpt, Clone, Debug)]
pub struct SnapshotOptions {
    /// JSON file with `reference_block`, `balance` and `schedules`. Use `-` for stdin.
    #[structopt(long, short = "s", value_name = "path")]
    pub snapshot: Option<PathBuf>,

    /// SCALE encoded `Vesting.Vesting` storage value in hex
    #[structopt(long, value_name = "hex", conflicts_with = "snapshot")]
    pub vesting_hex: Option<HexBytes>,

    /// SCALE encoded `System.Account` storage value in hex
    #[structopt(long, value_name = "hex", conflicts_with = "snapshot")]
    pub account_hex: Option<HexBytes>,

    /// Block height at which amounts are evaluated. Overrides the value of the snapshot.
    #[structopt(
        long,
        env = "VESTING_REFERENCE_BLOCK",
        value_name = "block",
        parse(try_from_str = parse_reference_block)
    )]
    pub reference_block: Option<BlockNumber>,
}

impl SnapshotOptions {
    pub fn load(&self) -> Result<Snapshot, CommandError> {
        let snapshot = match (&self.snapshot, &self.vesting_hex) {
            (Some(path), _) => Snapshot::read(path, self.reference_block)?,
            (None, Some(vesting)) => Snapshot::from_storage(
                &vesting.0,
                self.account_hex.as_ref().map(|account| account.0.as_slice()),
                self.reference_block,
            )?,
            (None, None) => return Err(CommandError::MissingInput),
        };
        log::debug!(
            "loaded {} vesting schedules at reference block {}",
            snapshot.schedules.len(),
            snapshot.reference_block
        );
        Ok(snapshot)
    }
}

fn parse_reference_block(text: &str) -> Result<BlockNumber, VestingError> {
    parse_block("reference_block", text)
}

/// Bytes given as a hex string with an optional `0x` prefix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HexBytes(pub Vec<u8>);

impl FromStr for HexBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        hex::decode(s.strip_prefix("0x").unwrap_or(s)).map(HexBytes)
    }
}

/// Options for presenting amounts.
#[derive(StructOpt, Clone, Debug)]
pub struct DisplayOptions {
    /// Print machine readable JSON. Amounts are exact integers in the smallest unit.
    #[structopt(long)]
    pub json: bool,

    /// Number of decimals of the token, at most 38.
    #[structopt(
        long,
        default_value = "10",
        env = "VESTING_TOKEN_DECIMALS",
        parse(try_from_str = parse_decimals)
    )]
    pub decimals: u32,

    /// Symbol appended to amounts.
    #[structopt(long, default_value = "DOT", env = "VESTING_TOKEN_SYMBOL")]
    pub symbol: String,

    /// Number of fraction digits shown for amounts.
    #[structopt(long, default_value = "4")]
    pub precision: u32,
}

impl DisplayOptions {
    pub fn amount(&self, amount: &vesting_unlock_core::Balance) -> String {
        format!(
            "{} {}",
            format::format_balance(amount, self.decimals, self.precision),
            self.symbol
        )
    }
}

/// Largest supported number of token decimals. `u128` amounts have at most 39 digits.
pub const MAX_DECIMALS: u32 = 38;

fn parse_decimals(text: &str) -> Result<u32, String> {
    let decimals = text.parse::<u32>().map_err(|error| error.to_string())?;
    if decimals > MAX_DECIMALS {
        return Err(format!("must be at most {}", MAX_DECIMALS));
    }
    Ok(decimals)
}

/// Options for the unlock projection.
#[derive(StructOpt, Clone, Debug)]
pub struct ProjectionOptions {
    /// Maximum number of samples after the current block.
    #[structopt(long, default_value = &MAX_POINTS_DEFAULT, env = "VESTING_MAX_POINTS")]
    pub max_points: usize,

    /// Block time of the reference chain in seconds.
    #[structopt(
        long,
        default_value = &BLOCK_TIME_DEFAULT,
        env = "VESTING_BLOCK_TIME",
        value_name = "seconds"
    )]
    pub block_time: u32,
}

impl ProjectionOptions {
    pub fn config(&self) -> ProjectionConfig {
        ProjectionConfig {
            max_points: self.max_points,
            min_points: DEFAULT_MIN_POINTS,
            seconds_per_block: self.block_time,
        }
    }
}

lazy_static! {
    static ref MAX_POINTS_DEFAULT: String = DEFAULT_MAX_POINTS.to_string();
    static ref BLOCK_TIME_DEFAULT: String = SECONDS_PER_BLOCK.to_string();
}

/// The supported [CommandLine] commands.
#[derive(StructOpt, Clone)]
pub enum Command {
    Summary(summary::Summary),
    Schedules(schedules::Schedules),
    Projection(projection::Projection),
}

impl CommandT for Command {
    fn run(&self) -> Result<(), CommandError> {
        match self {
            Command::Summary(cmd) => cmd.run(),
            Command::Schedules(cmd) => cmd.run(),
            Command::Projection(cmd) => cmd.run(),
        }
    }
}

/// The trait that every command must implement.
pub trait CommandT {
    fn run(&self) -> Result<(), CommandError>;
}

/// Error returned by [CommandT::run].
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error(transparent)]
    Vesting(#[from] VestingError),

    #[error("Failed to read the snapshot {}", .path.display())]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON")]
    Json(#[from] serde_json::Error),

    #[error("Formatting a timestamp failed")]
    TimeFormat(#[from] time::error::Format),

    #[error("No input given, use --snapshot or --vesting-hex")]
    MissingInput,

    #[error("No reference block given, use --reference-block or set `reference_block` in the snapshot")]
    MissingReferenceBlock,

    #[error("Schedule #{index} does not exist, the account has {count} vesting schedules")]
    ScheduleNotFound { index: usize, count: usize },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decimals_are_bounded() {
        assert_eq!(parse_decimals("0"), Ok(0));
        assert_eq!(parse_decimals("38"), Ok(38));
        assert!(parse_decimals("39").is_err());
        assert!(parse_decimals("4000000000").is_err());
        assert!(parse_decimals("ten").is_err());

        let args = ["vesting-unlock", "summary", "--decimals", "4000000000"];
        assert!(CommandLine::from_iter_safe(&args).is_err());
        let args = ["vesting-unlock", "summary", "--decimals", "12"];
        assert!(CommandLine::from_iter_safe(&args).is_ok());
    }

    #[test]
    fn hex_bytes() {
        assert_eq!("0x0a0b".parse::<HexBytes>().unwrap(), HexBytes(vec![10, 11]));
        assert_eq!("0a0b".parse::<HexBytes>().unwrap(), HexBytes(vec![10, 11]));
        assert!("0xzz".parse::<HexBytes>().is_err());
    }
}
