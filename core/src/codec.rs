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

//! Decoders for the SCALE encoded storage values that feed the engine.
//!
//! The chain state queries are performed elsewhere. This module only turns the raw storage bytes
//! of `Vesting.Vesting` and `System.Account` into [VestingSchedule]s and an [AccountBalance].

use parity_scale_codec::{Decode, Encode, Error as CodecError};

use crate::{AccountBalance, VestingError, VestingSchedule};

/// Storage representation of a single vesting schedule.
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct VestingInfo {
    pub locked: u128,
    pub per_block: u128,
    pub starting_block: u32,
}

impl From<VestingInfo> for VestingSchedule {
    fn from(info: VestingInfo) -> Self {
        VestingSchedule::new(info.locked, info.per_block, u64::from(info.starting_block))
    }
}

/// Balance part of the `System.Account` storage value.
#[derive(Decode, Encode, Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountData {
    pub free: u128,
    pub reserved: u128,
    pub frozen: u128,
    pub flags: u128,
}

/// Storage representation of `System.Account`.
#[derive(Decode, Encode, Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountInfo {
    pub nonce: u32,
    pub consumers: u32,
    pub providers: u32,
    pub sufficients: u32,
    pub data: AccountData,
}

impl From<AccountInfo> for AccountBalance {
    fn from(info: AccountInfo) -> Self {
        AccountBalance::new(info.data.free, info.data.reserved)
    }
}

/// Decode the `Vesting.Vesting` storage value of an account.
///
/// An empty input denotes a missing storage entry and yields no schedules.
pub fn decode_schedules(bytes: &[u8]) -> Result<Vec<VestingSchedule>, VestingError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let infos: Vec<VestingInfo> = decode_exact(bytes)?;
    log::debug!("decoded {} vesting schedules", infos.len());
    Ok(infos.into_iter().map(VestingSchedule::from).collect())
}

/// Decode the `System.Account` storage value of an account.
pub fn decode_account_balance(bytes: &[u8]) -> Result<AccountBalance, VestingError> {
    let info: AccountInfo = decode_exact(bytes)?;
    Ok(info.into())
}

fn decode_exact<T: Decode>(bytes: &[u8]) -> Result<T, VestingError> {
    let mut input = bytes;
    let value = T::decode(&mut input)?;
    if !input.is_empty() {
        return Err(CodecError::from("Input contains trailing bytes").into());
    }
    Ok(value)
}
