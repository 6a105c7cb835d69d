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

//! Log output of the `vesting-unlock` binary.
//!
//! Records are filtered with `RUST_LOG` and go to stderr, so the command output on stdout
//! stays machine readable.

use std::io::{self, Write as _};

use env_logger::fmt::{Color, Formatter};
use log::{Level, Record};
use time::OffsetDateTime;

/// Install the logger as the global [log] backend.
pub fn init() {
    env_logger::Builder::from_default_env()
        .format(write_record)
        .target(env_logger::Target::Stderr)
        .init();
}

fn write_record(formatter: &mut Formatter, record: &Record) -> io::Result<()> {
    let prefix = record_prefix(OffsetDateTime::now_utc(), record.level(), record.target())?;

    let mut prefix_style = formatter.style();
    // Intense black renders as grey on most terminals.
    prefix_style.set_color(Color::Black).set_intense(true);
    let mut message_style = formatter.style();
    match record.level() {
        Level::Error => {
            message_style.set_color(Color::Red);
        }
        Level::Warn => {
            message_style.set_color(Color::Yellow);
        }
        _ => {}
    }

    writeln!(
        formatter,
        "{}  {}",
        prefix_style.value(prefix),
        message_style.value(record.args())
    )
}

/// `HH:MM:SS.mmm LEVEL target` in UTC.
fn record_prefix(now: OffsetDateTime, level: Level, target: &str) -> io::Result<String> {
    let clock = now
        .format(time::macros::format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        ))
        .map_err(|error| io::Error::new(io::ErrorKind::Other, error))?;
    Ok(format!("{} {:<5} {}", clock, level, target))
}
