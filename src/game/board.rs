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

use super::guess_buffer::GuessBuffer;
use super::letter_status::LetterStatus;
use super::read_state::ReadSnapshot;
use super::word::WORD_LENGTH;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub letter: Option<char>,
    pub status: Option<LetterStatus>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    Guessed,
    InProgress,
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub tiles: [Tile; WORD_LENGTH],
}

impl Row {
    fn empty(kind: RowKind) -> Row {
        Row {
            kind,
            tiles: [Tile::default(); WORD_LENGTH],
        }
    }

    fn guessed(guess: &str, statuses: &[LetterStatus]) -> Row {
        let mut row = Row::empty(RowKind::Guessed);

        for (i, tile) in row.tiles.iter_mut().enumerate() {
            tile.letter = guess.chars()
                .nth(i)
                .map(|ch| ch.to_ascii_uppercase());
            tile.status = statuses.get(i).copied();
        }

        row
    }

    fn in_progress(buffer: &GuessBuffer) -> Row {
        let mut row = Row::empty(RowKind::InProgress);

        for (tile, letter) in row.tiles.iter_mut().zip(buffer.as_str().chars()) {
            tile.letter = Some(letter);
        }

        row
    }
}

/// The letter grid as it should be shown: the confirmed guesses with
/// their statuses, then the guess being typed and then blank rows up
/// to the guess limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Row>,
}

impl Board {
    pub fn new(
        snapshot: &ReadSnapshot,
        buffer: &GuessBuffer,
        guess_limit: usize,
    ) -> Board {
        let mut rows = snapshot.guesses.iter()
            .enumerate()
            .map(|(i, guess)| {
                let statuses = snapshot.letter_statuses.get(i)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                Row::guessed(guess, statuses)
            })
            .collect::<Vec<Row>>();

        if rows.len() < guess_limit && !snapshot.has_guessed_correctly {
            rows.push(Row::in_progress(buffer));
        }

        while rows.len() < guess_limit {
            rows.push(Row::empty(RowKind::Empty));
        }

        Board { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn letters(row: &Row) -> String {
        row.tiles.iter().map(|tile| tile.letter.unwrap_or('.')).collect()
    }

    #[test]
    fn layout() {
        let snapshot = ReadSnapshot {
            guesses: vec!["crane".to_string(), "AUDIO".to_string()],
            letter_statuses: vec![vec![
                LetterStatus::Absent,
                LetterStatus::Present,
                LetterStatus::Correct,
                LetterStatus::Absent,
                LetterStatus::Absent,
            ]],
            ..Default::default()
        };

        let mut buffer = GuessBuffer::new();
        buffer.append('P');
        buffer.append('L');

        let board = Board::new(&snapshot, &buffer, 5);
        let rows = board.rows();

        assert_eq!(rows.len(), 5);

        assert_eq!(rows[0].kind, RowKind::Guessed);
        assert_eq!(letters(&rows[0]), "CRANE");
        assert_eq!(rows[0].tiles[2].status, Some(LetterStatus::Correct));

        // The statuses of the second guess are missing
        assert_eq!(letters(&rows[1]), "AUDIO");
        assert!(rows[1].tiles.iter().all(|tile| tile.status.is_none()));

        assert_eq!(rows[2].kind, RowKind::InProgress);
        assert_eq!(letters(&rows[2]), "PL...");

        assert_eq!(rows[3].kind, RowKind::Empty);
        assert_eq!(rows[4].kind, RowKind::Empty);
    }

    #[test]
    fn solved() {
        let snapshot = ReadSnapshot {
            guesses: vec!["PLUMS".to_string()],
            letter_statuses: vec![vec![LetterStatus::Correct; WORD_LENGTH]],
            has_guessed_correctly: true,
            ..Default::default()
        };

        let board = Board::new(&snapshot, &GuessBuffer::new(), 5);

        assert!(board.rows()
            .iter()
            .all(|row| row.kind != RowKind::InProgress));
        assert_eq!(board.rows().len(), 5);
    }

    #[test]
    fn out_of_guesses() {
        let snapshot = ReadSnapshot {
            guesses: vec!["ABCDE".to_string(); 5],
            ..Default::default()
        };

        let board = Board::new(&snapshot, &GuessBuffer::new(), 5);

        assert_eq!(board.rows().len(), 5);
        assert!(board.rows().iter().all(|row| row.kind == RowKind::Guessed));
    }
}
