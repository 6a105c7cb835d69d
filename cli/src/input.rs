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

//! Reads the account snapshot the commands operate on.

use std::io::Read as _;
use std::path::Path;

use serde::Deserialize;
use vesting_unlock_core::codec::{decode_account_balance, decode_schedules};
use vesting_unlock_core::schedule::{parse_block, RawInteger};
use vesting_unlock_core::{AccountBalance, BlockNumber, VestingSchedule};

use crate::CommandError;

/// Schedules, balance and reference block of an account, taken at the same moment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub schedules: Vec<VestingSchedule>,
    /// `None` if the snapshot does not contain the account balance.
    pub balance: Option<AccountBalance>,
    pub reference_block: BlockNumber,
}

/// The JSON file format of a [Snapshot].
#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(default, alias = "referenceBlock")]
    reference_block: Option<RawInteger>,
    #[serde(default)]
    balance: Option<AccountBalance>,
    #[serde(default, alias = "vestingInfo")]
    schedules: Vec<VestingSchedule>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file. The path `-` reads from stdin.
    ///
    /// `reference_block` takes precedence over the reference block in the file.
    pub fn read(path: &Path, reference_block: Option<BlockNumber>) -> Result<Self, CommandError> {
        let read_error = |source| CommandError::ReadSnapshot {
            path: path.to_path_buf(),
            source,
        };
        let json = if path == Path::new("-") {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .map_err(read_error)?;
            json
        } else {
            std::fs::read_to_string(path).map_err(read_error)?
        };
        Self::from_json(&json, reference_block)
    }

    pub fn from_json(json: &str, reference_block: Option<BlockNumber>) -> Result<Self, CommandError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        let reference_block = match (reference_block, file.reference_block) {
            (Some(block), _) => block,
            (None, Some(raw)) => parse_block("reference_block", raw.as_str())?,
            (None, None) => return Err(CommandError::MissingReferenceBlock),
        };
        Ok(Snapshot {
            schedules: file.schedules,
            balance: file.balance,
            reference_block,
        })
    }

    /// Assemble a snapshot from SCALE encoded storage values.
    pub fn from_storage(
        vesting: &[u8],
        account: Option<&[u8]>,
        reference_block: Option<BlockNumber>,
    ) -> Result<Self, CommandError> {
        let reference_block = reference_block.ok_or(CommandError::MissingReferenceBlock)?;
        let balance = match account {
            Some(bytes) => Some(decode_account_balance(bytes)?),
            None => None,
        };
        Ok(Snapshot {
            schedules: decode_schedules(vesting)?,
            balance,
            reference_block,
        })
    }
}
