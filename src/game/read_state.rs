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
use tracing::{debug, warn};
use super::gateway::{Address, ContractGateway};
use super::letter_status::LetterStatus;

/// Cached copy of everything that the game reads from the contract.
/// It is only ever replaced by refetching, never updated locally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadSnapshot {
    pub admin: Option<Address>,
    pub guesses: Vec<String>,
    pub has_guessed_correctly: bool,
    pub letter_statuses: Vec<Vec<LetterStatus>>,
}

impl ReadSnapshot {
    pub fn is_admin(&self, player: &Address) -> bool {
        self.admin.as_ref() == Some(player)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Admin,
    Guesses,
    Correctness,
    LetterStatuses,
}

const N_QUERIES: usize = 4;

impl Query {
    fn index(self) -> usize {
        match self {
            Query::Admin => 0,
            Query::Guesses => 1,
            Query::Correctness => 2,
            Query::LetterStatuses => 3,
        }
    }
}

// Reads of one query that haven’t finished yet, and the number of
// the most recently started one
#[derive(Default)]
struct QueryState {
    in_flight: Cell<usize>,
    generation: Cell<u64>,
}

// Counts a read as in flight until it is dropped
struct Loading<'a> {
    query: &'a QueryState,
    generation: u64,
}

impl<'a> Loading<'a> {
    fn new(query: &'a QueryState) -> Loading<'a> {
        let generation = query.generation.get() + 1;

        query.generation.set(generation);
        query.in_flight.set(query.in_flight.get() + 1);

        Loading { query, generation }
    }

    // False once a later read of the same query has been started
    fn is_current(&self) -> bool {
        self.query.generation.get() == self.generation
    }
}

impl<'a> Drop for Loading<'a> {
    fn drop(&mut self) {
        self.query.in_flight.set(self.query.in_flight.get() - 1);
    }
}

/// Combines the four independent contract reads into one snapshot
/// with a single loading flag.
///
/// All of the methods take `&self` so that the aggregator can be
/// shared between tasks on the event loop. The snapshot is never
/// borrowed across an await point. Reads of the same query may
/// overlap, in which case only the result of the one started last is
/// kept.
#[derive(Default)]
pub struct ReadStateAggregator {
    snapshot: RefCell<ReadSnapshot>,
    queries: [QueryState; N_QUERIES],
}

impl ReadStateAggregator {
    pub fn new() -> ReadStateAggregator {
        ReadStateAggregator::default()
    }

    pub fn snapshot(&self) -> ReadSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn guess_count(&self) -> usize {
        self.snapshot.borrow().guesses.len()
    }

    pub fn has_guessed_correctly(&self) -> bool {
        self.snapshot.borrow().has_guessed_correctly
    }

    pub fn is_loading(&self) -> bool {
        self.queries.iter().any(|query| query.in_flight.get() > 0)
    }

    pub fn is_query_loading(&self, query: Query) -> bool {
        self.queries[query.index()].in_flight.get() > 0
    }

    fn start_loading(&self, query: Query) -> Loading<'_> {
        Loading::new(&self.queries[query.index()])
    }

    fn store(
        &self,
        loading: &Loading,
        query: Query,
        update: impl FnOnce(&mut ReadSnapshot),
    ) {
        if loading.is_current() {
            update(&mut *self.snapshot.borrow_mut());
        } else {
            debug!(?query, "dropping the result of an outdated read");
        }
    }

    pub async fn refresh_admin<G: ContractGateway>(&self, contract: &G) {
        let loading = self.start_loading(Query::Admin);

        let admin = match contract.admin().await {
            Ok(admin) => Some(admin),
            Err(e) => {
                warn!(error = %e, "failed to read the admin address");
                None
            },
        };

        self.store(&loading, Query::Admin, |s| s.admin = admin);
    }

    pub async fn refresh_guesses<G: ContractGateway>(
        &self,
        contract: &G,
        player: &Address,
    ) {
        let loading = self.start_loading(Query::Guesses);

        let guesses = match contract.user_guesses(player).await {
            Ok(guesses) => guesses,
            Err(e) => {
                warn!(error = %e, %player, "failed to read the guesses");
                Vec::new()
            },
        };

        debug!(n_guesses = guesses.len(), "guesses refreshed");

        self.store(&loading, Query::Guesses, |s| s.guesses = guesses);
    }

    pub async fn refresh_correctness<G: ContractGateway>(
        &self,
        contract: &G,
        player: &Address,
    ) {
        let loading = self.start_loading(Query::Correctness);

        let correct = match contract.has_user_guessed_correctly(player).await {
            Ok(correct) => correct,
            Err(e) => {
                warn!(
                    error = %e,
                    %player,
                    "failed to read whether the word was guessed"
                );
                false
            },
        };

        self.store(&loading, Query::Correctness, |s| {
            s.has_guessed_correctly = correct;
        });
    }

    /// Fetches the statuses of every guess that is currently in the
    /// snapshot with one call per guess.
    pub async fn refresh_letter_statuses<G: ContractGateway>(
        &self,
        contract: &G,
        player: &Address,
    ) {
        let loading = self.start_loading(Query::LetterStatuses);

        let n_guesses = self.guess_count();
        let mut letter_statuses = Vec::with_capacity(n_guesses);

        for index in 0..n_guesses {
            let row = match contract.letter_statuses(player, index).await {
                Ok(row) => row,
                Err(e) => {
                    warn!(
                        error = %e,
                        index,
                        "failed to read the letter statuses"
                    );
                    Vec::new()
                },
            };

            letter_statuses.push(row);
        }

        self.store(&loading, Query::LetterStatuses, |s| {
            s.letter_statuses = letter_statuses;
        });
    }

    /// Refetches every query once. The guesses are read before the
    /// letter statuses so that a status is fetched for each guess.
    pub async fn refresh_all<G: ContractGateway>(
        &self,
        contract: &G,
        player: &Address,
    ) {
        self.refresh_admin(contract).await;
        self.refresh_guesses(contract, player).await;
        self.refresh_correctness(contract, player).await;
        self.refresh_letter_statuses(contract, player).await;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::fake::{self, FakeContract};

    #[tokio::test]
    async fn refresh_all() {
        let contract = FakeContract::new();
        contract.push_guess("CRANE", &[0, 1, 2, 0, 0]);
        contract.push_guess("AUDIO", &[2, 2, 2, 2, 2]);
        contract.set_correct(true);

        let reads = ReadStateAggregator::new();
        reads.refresh_all(&contract, &fake::player()).await;

        let snapshot = reads.snapshot();

        assert_eq!(snapshot.admin, Some(fake::admin()));
        assert_eq!(snapshot.guesses, vec!["CRANE", "AUDIO"]);
        assert!(snapshot.has_guessed_correctly);
        assert_eq!(snapshot.letter_statuses.len(), 2);
        assert_eq!(
            snapshot.letter_statuses[0],
            vec![
                LetterStatus::Absent,
                LetterStatus::Present,
                LetterStatus::Correct,
                LetterStatus::Absent,
                LetterStatus::Absent,
            ],
        );
        assert!(snapshot.is_admin(&fake::admin()));
        assert!(!snapshot.is_admin(&fake::player()));

        let calls = contract.calls();
        assert_eq!(calls.admin, 1);
        assert_eq!(calls.user_guesses, 1);
        assert_eq!(calls.has_user_guessed_correctly, 1);
        assert_eq!(calls.letter_statuses, 2);

        assert!(!reads.is_loading());
    }

    #[tokio::test]
    async fn failed_reads() {
        let contract = FakeContract::new();
        contract.push_guess("CRANE", &[0, 0, 0, 0, 0]);

        let reads = ReadStateAggregator::new();
        reads.refresh_all(&contract, &fake::player()).await;
        assert_eq!(reads.guess_count(), 1);

        contract.fail_reads(true);
        reads.refresh_all(&contract, &fake::player()).await;

        assert_eq!(reads.snapshot(), ReadSnapshot::default());
        assert!(!reads.is_loading());
    }

    #[tokio::test]
    async fn failed_status_row() {
        let contract = FakeContract::new();
        contract.push_guess("CRANE", &[0, 0, 0, 0, 0]);
        contract.push_guess("SLATE", &[0, 0, 7, 0, 0]);

        let reads = ReadStateAggregator::new();
        reads.refresh_all(&contract, &fake::player()).await;

        let snapshot = reads.snapshot();
        assert_eq!(snapshot.letter_statuses[0].len(), 5);
        assert!(snapshot.letter_statuses[1].is_empty());
    }

    #[tokio::test]
    async fn overlapping_loading() {
        let player = fake::player();
        let contract = FakeContract::new();
        let reads = ReadStateAggregator::new();
        let release = contract.hold_guesses();

        tokio::join!(
            reads.refresh_guesses(&contract, &player),
            async {
                reads.refresh_guesses(&contract, &player).await;

                // The held read is still in flight
                assert!(reads.is_query_loading(Query::Guesses));
                assert!(reads.is_loading());

                let _ = release.send(());
            },
        );

        assert!(!reads.is_loading());
    }

    #[tokio::test]
    async fn outdated_refresh() {
        let player = fake::player();
        let contract = FakeContract::new();
        contract.push_guess("CRANE", &[0, 1, 2, 0, 0]);

        let reads = ReadStateAggregator::new();
        let release = contract.hold_guesses();

        tokio::join!(
            // Sees only CRANE and then waits
            reads.refresh_all(&contract, &player),
            async {
                contract.push_guess("AUDIO", &[2, 2, 2, 2, 2]);
                reads.refresh_all(&contract, &player).await;
                assert_eq!(reads.guess_count(), 2);

                let _ = release.send(());
            },
        );

        let snapshot = reads.snapshot();

        assert_eq!(snapshot.guesses, vec!["CRANE", "AUDIO"]);
        assert_eq!(snapshot.letter_statuses.len(), 2);
        assert_eq!(snapshot.letter_statuses[1], vec![LetterStatus::Correct; 5]);
        assert!(!reads.is_loading());
    }

    #[test]
    fn loading_flag() {
        let reads = ReadStateAggregator::new();

        assert!(!reads.is_loading());

        {
            let _loading = reads.start_loading(Query::LetterStatuses);
            assert!(reads.is_loading());
            assert!(reads.is_query_loading(Query::LetterStatuses));
            assert!(!reads.is_query_loading(Query::Admin));
        }

        assert!(!reads.is_loading());

        let first = reads.start_loading(Query::Admin);
        let second = reads.start_loading(Query::Admin);

        assert!(!first.is_current());
        assert!(second.is_current());

        drop(second);
        assert!(reads.is_query_loading(Query::Admin));

        drop(first);
        assert!(!reads.is_loading());
    }
}
