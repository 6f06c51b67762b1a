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
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn name(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// Every condition that the player is told about with a toast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    InsufficientAllowance,
    AlreadySolved,
    GuessLimitExceeded,
    IncompleteGuess,
    SubmissionInFlight,
    InvalidWord,
    NotAdmin,
    SubmitFailed,
    SetWordFailed,
    ConfirmationFailed,
    GuessSubmitted,
    WordSet,
}

impl Notification {
    pub fn kind(self) -> NotificationKind {
        match self {
            Notification::GuessSubmitted |
            Notification::WordSet => NotificationKind::Success,
            _ => NotificationKind::Error,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notification::InsufficientAllowance =>
                "You need allowance to play the game.",
            Notification::AlreadySolved =>
                "You have already guessed correctly!",
            Notification::GuessLimitExceeded =>
                "You already exceeded the limit play tries for today!",
            Notification::IncompleteGuess =>
                "Your guess must have 5 letters.",
            Notification::SubmissionInFlight =>
                "Please wait for the previous transaction to be confirmed.",
            Notification::InvalidWord =>
                "Word must be 5 letters!",
            Notification::NotAdmin =>
                "Only the admin can set the word.",
            Notification::SubmitFailed =>
                "Failed to submit guess. Please try again.",
            Notification::SetWordFailed =>
                "Failed to set word. Please try again.",
            Notification::ConfirmationFailed =>
                "The transaction was not confirmed. Please try again.",
            Notification::GuessSubmitted =>
                "Guess submitted successfully!",
            Notification::WordSet =>
                "Word set successfully!",
        }
    }
}

/// The toast surface.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}
