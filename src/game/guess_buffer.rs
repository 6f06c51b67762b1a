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

use super::word::{self, Word, WORD_LENGTH};

/// The guess that the player is currently typing. It only ever
/// holds uppercase letters A–Z and never more than [WORD_LENGTH] of
/// them.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GuessBuffer {
    in_progress_guess: String,
}

impl GuessBuffer {
    pub fn new() -> GuessBuffer {
        GuessBuffer::default()
    }

    /// Adds a letter to the end of the guess. Returns whether the
    /// buffer changed.
    pub fn append(&mut self, letter: char) -> bool {
        if self.in_progress_guess.len() >= WORD_LENGTH {
            return false;
        }

        let Some(letter) = word::normalize_letter(letter)
        else {
            return false;
        };

        self.in_progress_guess.push(letter);

        true
    }

    /// Removes the last letter. Returns whether the buffer changed.
    pub fn delete_last(&mut self) -> bool {
        self.in_progress_guess.pop().is_some()
    }

    pub fn reset(&mut self) {
        self.in_progress_guess.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.in_progress_guess
    }

    pub fn len(&self) -> usize {
        self.in_progress_guess.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_progress_guess.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.in_progress_guess.len() == WORD_LENGTH
    }

    pub fn to_word(&self) -> Option<Word> {
        if self.is_complete() {
            Word::parse(&self.in_progress_guess).ok()
        } else {
            None
        }
    }
}
