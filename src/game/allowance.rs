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

use std::cell::Cell;
use tracing::{debug, warn};
use super::gateway::{Address, AllowanceGateway};

/// Last known token allowance of the player. Approving more tokens
/// happens outside of the game, this only keeps the amount fresh.
#[derive(Default)]
pub struct AllowanceState {
    amount: Cell<Option<u128>>,
    in_flight: Cell<usize>,
    generation: Cell<u64>,
}

impl AllowanceState {
    pub fn new() -> AllowanceState {
        AllowanceState::default()
    }

    /// The cached amount, or `None` if it has never been fetched.
    pub fn amount(&self) -> Option<u128> {
        self.amount.get()
    }

    /// The amount to check guesses against. An allowance that
    /// couldn’t be fetched counts as zero.
    pub fn effective_amount(&self) -> u128 {
        self.amount.get().unwrap_or(0)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    pub async fn refresh<A: AllowanceGateway>(
        &self,
        token: &A,
        owner: &Address,
    ) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.in_flight.set(self.in_flight.get() + 1);

        let amount = match token.allowance(owner).await {
            Ok(amount) => {
                debug!(%amount, "allowance refreshed");
                Some(amount)
            },
            Err(e) => {
                warn!(error = %e, %owner, "failed to read the allowance");
                None
            },
        };

        if self.generation.get() == generation {
            self.amount.set(amount);
        } else {
            debug!("dropping the result of an outdated allowance read");
        }

        self.in_flight.set(self.in_flight.get() - 1);
    }
}
