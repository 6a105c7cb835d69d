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

use parity_scale_codec::Error as CodecError;

/// Errors returned by the vesting engine.
///
/// Input validation errors are raised at the boundary, before any arithmetic takes place. The
/// arithmetic itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum VestingError {
    /// A negative amount or block height was supplied
    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: String },

    /// The supplied text is not an integer
    #[error("{field} is not an integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    /// A supplied block height does not fit into a block number
    #[error("{field} exceeds the largest block number")]
    BlockOverflow { field: &'static str },

    /// Projection parameters that cannot produce a sequence
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Decoding chain storage failed
    #[error("Decoding the storage value failed")]
    Codec(#[from] CodecError),
}
