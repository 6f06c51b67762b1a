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

pub mod word;
pub mod guess_buffer;
pub mod letter_status;
pub mod gateway;
pub mod notification;
pub mod read_state;
pub mod allowance;
pub mod coordinator;
pub mod board;
pub mod key;
pub mod timeout;
pub mod config;

#[cfg(test)]
mod fake;
