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

/// Score of a single letter of a guess as reported by the contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
}

impl LetterStatus {
    pub fn from_code(code: u8) -> Option<LetterStatus> {
        match code {
            0 => Some(LetterStatus::Absent),
            1 => Some(LetterStatus::Present),
            2 => Some(LetterStatus::Correct),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            LetterStatus::Absent => 0,
            LetterStatus::Present => 1,
            LetterStatus::Correct => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LetterStatus::Absent => "absent",
            LetterStatus::Present => "present",
            LetterStatus::Correct => "correct",
        }
    }
}
