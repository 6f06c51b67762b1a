// Chainword – A front-end for an on-chain word game
// Copyright (C) 2026  The Chainword authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;

/// How long to wait for a transaction receipt before giving up on it.
#[derive(Eq, PartialEq, PartialOrd, Ord, Debug, Clone, Copy)]
pub enum Timeout {
    Milliseconds(u32),
    Forever,
}

pub const DEFAULT_CONFIRMATION_TIMEOUT: Timeout =
    Timeout::Milliseconds(120_000);

impl Timeout {
    pub fn as_millis(self) -> Option<u32> {
        match self {
            Timeout::Milliseconds(ms) => Some(ms),
            Timeout::Forever => None,
        }
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Timeout::Milliseconds(ms) => write!(f, "{}ms", ms),
            Timeout::Forever => f.write_str("forever"),
        }
    }
}
