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

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Backspace,
    Enter,
}

impl Key {
    /// Maps the `key` property of a keyboard event.
    pub fn from_key_name(name: &str) -> Option<Key> {
        match name {
            "Enter" => Some(Key::Enter),
            "Backspace" => Some(Key::Backspace),
            s => {
                let mut chars = s.chars();

                chars.next().and_then(|ch| {
                    if chars.next().is_none() && ch.is_alphabetic() {
                        Some(Key::Letter(ch))
                    } else {
                        None
                    }
                })
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn key_names() {
        assert_eq!(Key::from_key_name("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_key_name("Backspace"), Some(Key::Backspace));
        assert_eq!(Key::from_key_name("q"), Some(Key::Letter('q')));
        assert_eq!(Key::from_key_name("Q"), Some(Key::Letter('Q')));
        assert_eq!(Key::from_key_name("Shift"), None);
        assert_eq!(Key::from_key_name("1"), None);
        assert_eq!(Key::from_key_name(""), None);
    }
}
