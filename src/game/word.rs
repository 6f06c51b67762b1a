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
use std::str::FromStr;

/// Number of letters in every word accepted by the contract.
pub const WORD_LENGTH: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("word must be 5 letters, got {0}")]
    WrongLength(usize),
    #[error("invalid letter {0:?}")]
    InvalidLetter(char),
}

/// Returns the uppercase form of `letter` if it is one of A–Z.
pub fn normalize_letter(letter: char) -> Option<char> {
    let letter = letter.to_ascii_uppercase();

    if letter.is_ascii_uppercase() {
        Some(letter)
    } else {
        None
    }
}

/// A complete five-letter word, ready to be sent to the contract
/// either as a guess or as the new secret word.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word {
    letters: [u8; WORD_LENGTH],
}

impl Word {
    pub fn parse(text: &str) -> Result<Word, WordError> {
        let length = text.chars().count();

        if length != WORD_LENGTH {
            return Err(WordError::WrongLength(length));
        }

        let mut letters = [0u8; WORD_LENGTH];

        for (slot, ch) in letters.iter_mut().zip(text.chars()) {
            let Some(letter) = normalize_letter(ch)
            else {
                return Err(WordError::InvalidLetter(ch));
            };

            *slot = letter as u8;
        }

        Ok(Word { letters })
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored
        std::str::from_utf8(&self.letters).unwrap_or_default()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().map(|&b| b as char)
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Word, WordError> {
        Word::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Word({})", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(Word::parse("crane").unwrap().as_str(), "CRANE");
        assert_eq!(Word::parse("AuDiO").unwrap().to_string(), "AUDIO");

        assert_eq!(Word::parse("CRAN"), Err(WordError::WrongLength(4)));
        assert_eq!(Word::parse("CRANES"), Err(WordError::WrongLength(6)));
        assert_eq!(Word::parse(""), Err(WordError::WrongLength(0)));
        assert_eq!(Word::parse("CR4NE"), Err(WordError::InvalidLetter('4')));
        // Non-ASCII letters count as one character each
        assert_eq!(Word::parse("ĈAPEL"), Err(WordError::InvalidLetter('Ĉ')));
    }

    #[test]
    fn letters() {
        let word: Word = "hello".parse().unwrap();
        assert_eq!(word.letters().collect::<String>(), "HELLO");
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_letter('a'), Some('A'));
        assert_eq!(normalize_letter('Z'), Some('Z'));
        assert_eq!(normalize_letter('ŝ'), None);
        assert_eq!(normalize_letter(' '), None);
    }
}
