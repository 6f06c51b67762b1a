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

use std::cell::{Cell, RefCell};
use std::future::Future;
use tracing::{error, info, warn};
use super::allowance::AllowanceState;
use super::config::Config;
use super::guess_buffer::GuessBuffer;
use super::gateway::{
    Address, AllowanceGateway, ContractGateway, GatewayError, TxHash,
};
use super::notification::{Notification, Notifier};
use super::read_state::{ReadSnapshot, ReadStateAggregator};
use super::timeout::Timeout;
use super::word::Word;

pub enum Event {
    GuessConfirmed,
    WordSet,
    StateChanged,
}

/// Why a write was refused before anything was sent to the chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    SubmissionInFlight,
    InsufficientAllowance,
    AlreadySolved,
    GuessLimitExceeded,
    IncompleteGuess,
    InvalidWord,
    NotAdmin,
}

impl Rejection {
    pub fn notification(self) -> Notification {
        match self {
            Rejection::SubmissionInFlight => Notification::SubmissionInFlight,
            Rejection::InsufficientAllowance =>
                Notification::InsufficientAllowance,
            Rejection::AlreadySolved => Notification::AlreadySolved,
            Rejection::GuessLimitExceeded => Notification::GuessLimitExceeded,
            Rejection::IncompleteGuess => Notification::IncompleteGuess,
            Rejection::InvalidWord => Notification::InvalidWord,
            Rejection::NotAdmin => Notification::NotAdmin,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Guess,
    SetWord,
}

impl TransactionKind {
    fn failure(self) -> Notification {
        match self {
            TransactionKind::Guess => Notification::SubmitFailed,
            TransactionKind::SetWord => Notification::SetWordFailed,
        }
    }

    fn success(self) -> Notification {
        match self {
            TransactionKind::Guess => Notification::GuessSubmitted,
            TransactionKind::SetWord => Notification::WordSet,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    /// Waiting for the wallet to sign and send the transaction.
    Submitting(TransactionKind),
    /// The transaction was sent and its receipt is being awaited.
    Pending { hash: TxHash, kind: TransactionKind },
    /// The receipt arrived and the cached state is being refetched.
    Confirmed { hash: TxHash, kind: TransactionKind },
}

/// The cached state that a guess is checked against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessRequest<'a> {
    pub allowance: u128,
    pub guess: &'a str,
    pub prior_guess_count: usize,
    pub has_guessed_correctly: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(Rejection),
    Failed(GatewayError),
    Pending(TxHash),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    NothingPending,
    Confirmed(TransactionKind),
    Failed(GatewayError),
}

/// Everything that is refetched once a transaction is confirmed.
pub struct SyncTargets<'a, G, A> {
    pub contract: &'a G,
    pub token: &'a A,
    pub reads: &'a ReadStateAggregator,
    pub allowance: &'a AllowanceState,
    pub player: &'a Address,
}

/// Checks guesses against the cached state, sends them to the
/// contract and tracks the resulting transaction until it is
/// confirmed.
///
/// Only one transaction is tracked at a time. Nothing is reset on
/// failure so the player can simply try again. On confirmation the
/// coordinator queues [Event::GuessConfirmed], and it is up to the UI
/// to clear its guess buffer in response.
pub struct SubmissionCoordinator<N> {
    notifier: N,
    guess_limit: usize,
    confirmation_timeout: Timeout,
    state: RefCell<SubmissionState>,
    guess_confirmed_queued: Cell<bool>,
    word_set_queued: Cell<bool>,
    state_changed_queued: Cell<bool>,
}

impl<N: Notifier> SubmissionCoordinator<N> {
    pub fn new(notifier: N, config: &Config) -> SubmissionCoordinator<N> {
        SubmissionCoordinator {
            notifier,
            guess_limit: config.guess_limit,
            confirmation_timeout: config.confirmation_timeout,
            state: RefCell::new(SubmissionState::Idle),
            guess_confirmed_queued: Cell::new(false),
            word_set_queued: Cell::new(false),
            state_changed_queued: Cell::new(false),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        !matches!(*self.state.borrow(), SubmissionState::Idle)
    }

    pub fn pending_hash(&self) -> Option<TxHash> {
        match &*self.state.borrow() {
            SubmissionState::Pending { hash, .. } |
            SubmissionState::Confirmed { hash, .. } => Some(hash.clone()),
            SubmissionState::Idle |
            SubmissionState::Submitting(_) => None,
        }
    }

    pub fn get_event(&self) -> Option<Event> {
        if self.guess_confirmed_queued.replace(false) {
            Some(Event::GuessConfirmed)
        } else if self.word_set_queued.replace(false) {
            Some(Event::WordSet)
        } else if self.state_changed_queued.replace(false) {
            Some(Event::StateChanged)
        } else {
            None
        }
    }

    /// Drains the event queue, clearing `buffer` once a guess has been
    /// confirmed. Returns whether there was anything that should be
    /// redrawn.
    pub fn flush_events(&self, buffer: &mut GuessBuffer) -> bool {
        let mut update_queued = false;

        while let Some(event) = self.get_event() {
            match event {
                Event::GuessConfirmed => {
                    buffer.reset();
                    update_queued = true;
                },
                Event::WordSet |
                Event::StateChanged => {
                    update_queued = true;
                },
            }
        }

        update_queued
    }

    fn set_state(&self, state: SubmissionState) {
        *self.state.borrow_mut() = state;
        self.state_changed_queued.set(true);
    }

    fn reject(&self, rejection: Rejection) -> SubmitOutcome {
        info!(?rejection, "write refused");
        self.notifier.notify(rejection.notification());
        SubmitOutcome::Rejected(rejection)
    }

    /// Guards in priority order. The first one that fails decides
    /// the rejection.
    pub fn check_guess(
        &self,
        request: &GuessRequest,
    ) -> Result<Word, Rejection> {
        if self.is_busy() {
            return Err(Rejection::SubmissionInFlight);
        }

        if request.allowance == 0 {
            return Err(Rejection::InsufficientAllowance);
        }

        if request.has_guessed_correctly {
            return Err(Rejection::AlreadySolved);
        }

        if request.prior_guess_count >= self.guess_limit {
            return Err(Rejection::GuessLimitExceeded);
        }

        Word::parse(request.guess).map_err(|_| Rejection::IncompleteGuess)
    }

    pub fn check_new_word(
        &self,
        snapshot: &ReadSnapshot,
        player: &Address,
        word: &str,
    ) -> Result<Word, Rejection> {
        if self.is_busy() {
            return Err(Rejection::SubmissionInFlight);
        }

        let Ok(word) = Word::parse(word)
        else {
            return Err(Rejection::InvalidWord);
        };

        // The contract has the final say if the admin isn’t known yet
        if snapshot.admin.is_some() && !snapshot.is_admin(player) {
            return Err(Rejection::NotAdmin);
        }

        Ok(word)
    }

    async fn issue<F>(&self, kind: TransactionKind, write: F) -> SubmitOutcome
    where
        F: Future<Output = Result<TxHash, GatewayError>>,
    {
        self.set_state(SubmissionState::Submitting(kind));

        match write.await {
            Ok(hash) => {
                info!(%hash, ?kind, "transaction sent");
                self.set_state(SubmissionState::Pending {
                    hash: hash.clone(),
                    kind,
                });
                SubmitOutcome::Pending(hash)
            },
            Err(e) => {
                error!(error = %e, ?kind, "failed to send transaction");
                self.set_state(SubmissionState::Idle);
                self.notifier.notify(kind.failure());
                SubmitOutcome::Failed(e)
            },
        }
    }

    pub async fn submit_guess<G: ContractGateway>(
        &self,
        contract: &G,
        request: &GuessRequest<'_>,
    ) -> SubmitOutcome {
        let word = match self.check_guess(request) {
            Ok(word) => word,
            Err(rejection) => return self.reject(rejection),
        };

        self.issue(TransactionKind::Guess, contract.make_guess(&word)).await
    }

    /// Replaces the secret word. Only the admin may do this.
    pub async fn set_word<G: ContractGateway>(
        &self,
        contract: &G,
        snapshot: &ReadSnapshot,
        player: &Address,
        word: &str,
    ) -> SubmitOutcome {
        let word = match self.check_new_word(snapshot, player, word) {
            Ok(word) => word,
            Err(rejection) => return self.reject(rejection),
        };

        self.issue(TransactionKind::SetWord, contract.set_word(&word)).await
    }

    /// Waits for the tracked transaction to be confirmed and then
    /// refetches all of the read state and the allowance once each.
    pub async fn await_confirmation<G, A>(
        &self,
        targets: &SyncTargets<'_, G, A>,
    ) -> ConfirmOutcome
    where
        G: ContractGateway,
        A: AllowanceGateway,
    {
        let (hash, kind) = match &*self.state.borrow() {
            SubmissionState::Pending { hash, kind } => (hash.clone(), *kind),
            _ => return ConfirmOutcome::NothingPending,
        };

        let receipt = targets.contract.wait_for_receipt(
            &hash,
            self.confirmation_timeout,
        ).await;

        if let Err(e) = receipt {
            warn!(error = %e, %hash, "transaction not confirmed");
            self.set_state(SubmissionState::Idle);
            self.notifier.notify(Notification::ConfirmationFailed);
            return ConfirmOutcome::Failed(e);
        }

        info!(%hash, ?kind, "transaction confirmed");

        self.set_state(SubmissionState::Confirmed { hash, kind });

        targets.reads.refresh_all(targets.contract, targets.player).await;
        targets.allowance.refresh(targets.token, targets.player).await;

        self.set_state(SubmissionState::Idle);
        self.notifier.notify(kind.success());

        match kind {
            TransactionKind::Guess => self.guess_confirmed_queued.set(true),
            TransactionKind::SetWord => self.word_set_queued.set(true),
        }

        ConfirmOutcome::Confirmed(kind)
    }
}
