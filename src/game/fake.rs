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

//! In-memory stand-ins for the contracts and the toast surface used
//! by the unit tests.

use std::cell::{Cell, RefCell};
use tokio::sync::oneshot;
use super::gateway::{
    Address, AllowanceGateway, ContractGateway, GatewayError, TxHash,
};
use super::letter_status::LetterStatus;
use super::notification::{Notification, Notifier};
use super::timeout::Timeout;
use super::word::{Word, WORD_LENGTH};

pub fn player() -> Address {
    Address::parse(&format!("0x{}", "11".repeat(20))).unwrap()
}

pub fn admin() -> Address {
    Address::parse(&format!("0x{}", "aa".repeat(20))).unwrap()
}

pub fn hash(n: u64) -> TxHash {
    TxHash::parse(&format!("0x{:064x}", n)).unwrap()
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub admin: usize,
    pub user_guesses: usize,
    pub has_user_guessed_correctly: usize,
    pub letter_statuses: usize,
    pub set_word: usize,
    pub make_guess: usize,
    pub wait_for_receipt: usize,
}

impl Calls {
    pub fn writes(&self) -> usize {
        self.set_word + self.make_guess
    }
}

#[derive(Default)]
pub struct FakeContract {
    guesses: RefCell<Vec<(String, Vec<u8>)>>,
    unconfirmed_guess: RefCell<Option<String>>,
    word: RefCell<Option<String>>,
    correct: Cell<bool>,
    fail_reads: Cell<bool>,
    write_error: RefCell<Option<GatewayError>>,
    receipt_error: RefCell<Option<GatewayError>>,
    last_timeout: Cell<Option<Timeout>>,
    n_transactions: Cell<u64>,
    calls: Cell<Calls>,
    held_guesses: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeContract {
    pub fn new() -> FakeContract {
        FakeContract::default()
    }

    /// Adds an already confirmed guess. Status codes that the
    /// contract would never return make that row fail to decode.
    pub fn push_guess(&self, guess: &str, codes: &[u8]) {
        self.guesses.borrow_mut().push((guess.to_string(), codes.to_vec()));
    }

    pub fn set_correct(&self, correct: bool) {
        self.correct.set(correct);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, error: Option<GatewayError>) {
        *self.write_error.borrow_mut() = error;
    }

    pub fn fail_receipts(&self, error: Option<GatewayError>) {
        *self.receipt_error.borrow_mut() = error;
    }

    pub fn calls(&self) -> Calls {
        self.calls.get()
    }

    pub fn word(&self) -> Option<String> {
        self.word.borrow().clone()
    }

    pub fn unconfirmed_guess(&self) -> Option<String> {
        self.unconfirmed_guess.borrow().clone()
    }

    pub fn last_timeout(&self) -> Option<Timeout> {
        self.last_timeout.get()
    }

    /// Makes the next read of the guesses wait after it has looked at
    /// the chain until the returned sender is used or dropped.
    pub fn hold_guesses(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        *self.held_guesses.borrow_mut() = Some(receiver);
        sender
    }

    fn count(&self, f: impl FnOnce(&mut Calls)) {
        let mut calls = self.calls.get();
        f(&mut calls);
        self.calls.set(calls);
    }

    fn check_read(&self) -> Result<(), GatewayError> {
        if self.fail_reads.get() {
            Err(GatewayError::Js("read failed".to_string()))
        } else {
            Ok(())
        }
    }

    fn issue(&self) -> Result<TxHash, GatewayError> {
        if let Some(e) = self.write_error.borrow().clone() {
            return Err(e);
        }

        let n = self.n_transactions.get() + 1;
        self.n_transactions.set(n);

        Ok(hash(n))
    }
}

impl ContractGateway for FakeContract {
    async fn admin(&self) -> Result<Address, GatewayError> {
        self.count(|c| c.admin += 1);
        self.check_read()?;
        Ok(admin())
    }

    async fn user_guesses(
        &self,
        _player: &Address,
    ) -> Result<Vec<String>, GatewayError> {
        self.count(|c| c.user_guesses += 1);
        self.check_read()?;

        let guesses = self.guesses.borrow()
            .iter()
            .map(|(g, _)| g.clone())
            .collect();

        let held = self.held_guesses.borrow_mut().take();

        if let Some(receiver) = held {
            let _ = receiver.await;
        }

        Ok(guesses)
    }

    async fn has_user_guessed_correctly(
        &self,
        _player: &Address,
    ) -> Result<bool, GatewayError> {
        self.count(|c| c.has_user_guessed_correctly += 1);
        self.check_read()?;
        Ok(self.correct.get())
    }

    async fn letter_statuses(
        &self,
        _player: &Address,
        index: usize,
    ) -> Result<Vec<LetterStatus>, GatewayError> {
        self.count(|c| c.letter_statuses += 1);
        self.check_read()?;

        let guesses = self.guesses.borrow();

        let Some((_, codes)) = guesses.get(index)
        else {
            return Err(GatewayError::Js("index out of range".to_string()));
        };

        codes.iter().map(|&code| {
            LetterStatus::from_code(code).ok_or_else(|| GatewayError::Decode {
                call: "getLetterStatuses",
                reason: format!("unknown status {}", code),
            })
        }).collect()
    }

    async fn set_word(&self, word: &Word) -> Result<TxHash, GatewayError> {
        self.count(|c| c.set_word += 1);
        let hash = self.issue()?;
        *self.word.borrow_mut() = Some(word.to_string());
        Ok(hash)
    }

    async fn make_guess(&self, guess: &Word) -> Result<TxHash, GatewayError> {
        self.count(|c| c.make_guess += 1);
        let hash = self.issue()?;
        *self.unconfirmed_guess.borrow_mut() = Some(guess.to_string());
        Ok(hash)
    }

    async fn wait_for_receipt(
        &self,
        _hash: &TxHash,
        timeout: Timeout,
    ) -> Result<(), GatewayError> {
        self.count(|c| c.wait_for_receipt += 1);
        self.last_timeout.set(Some(timeout));

        if let Some(e) = self.receipt_error.borrow().clone() {
            return Err(e);
        }

        if let Some(guess) = self.unconfirmed_guess.borrow_mut().take() {
            self.push_guess(&guess, &[0; WORD_LENGTH]);
        }

        Ok(())
    }
}

pub struct FakeToken {
    amount: Cell<u128>,
    fail: Cell<bool>,
    allowance_calls: Cell<usize>,
    held: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeToken {
    pub fn new(amount: u128) -> FakeToken {
        FakeToken {
            amount: Cell::new(amount),
            fail: Cell::new(false),
            allowance_calls: Cell::new(0),
            held: RefCell::new(None),
        }
    }

    pub fn fail(&self, fail: bool) {
        self.fail.set(fail);
    }

    pub fn set_amount(&self, amount: u128) {
        self.amount.set(amount);
    }

    /// Like [FakeContract::hold_guesses] for the next allowance read.
    pub fn hold(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        *self.held.borrow_mut() = Some(receiver);
        sender
    }

    pub fn allowance_calls(&self) -> usize {
        self.allowance_calls.get()
    }
}

impl AllowanceGateway for FakeToken {
    async fn allowance(&self, _owner: &Address) -> Result<u128, GatewayError> {
        self.allowance_calls.set(self.allowance_calls.get() + 1);

        let result = if self.fail.get() {
            Err(GatewayError::Js("allowance failed".to_string()))
        } else {
            Ok(self.amount.get())
        };

        let held = self.held.borrow_mut().take();

        if let Some(receiver) = held {
            let _ = receiver.await;
        }

        result
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> RecordingNotifier {
        RecordingNotifier::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.borrow_mut())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}
