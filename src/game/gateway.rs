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

//! The seams between the game workflow and the chain. The game
//! contract and the token contract are both reached through a wallet
//! library that lives outside of this crate, so they are modelled as
//! traits. Every call is asynchronous and may fail.
//!
//! None of the futures need to be `Send`: everything runs on the
//! browser’s event loop.

use std::fmt;
use super::letter_status::LetterStatus;
use super::timeout::Timeout;
use super::word::Word;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("expected a 0x prefix")]
    MissingPrefix,
    #[error("expected {expected} hex digits, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

fn parse_hex(text: &str, n_digits: usize) -> Result<String, HexError> {
    let Some(digits) = text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    else {
        return Err(HexError::MissingPrefix);
    };

    if let Some(ch) = digits.chars().find(|ch| !ch.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit(ch));
    }

    if digits.len() != n_digits {
        return Err(HexError::WrongLength {
            expected: n_digits,
            actual: digits.len(),
        });
    }

    Ok(format!("0x{}", digits.to_ascii_lowercase()))
}

/// An account or contract address. Stored in lowercase so that
/// checksummed and plain forms compare equal.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Address(String);

impl Address {
    pub fn parse(text: &str) -> Result<Address, HexError> {
        parse_hex(text, 40).map(Address)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash of a submitted transaction, used to wait for its receipt.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TxHash(String);

impl TxHash {
    pub fn parse(text: &str) -> Result<TxHash, HexError> {
        parse_hex(text, 64).map(TxHash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("the wallet rejected the request: {0}")]
    Rejected(String),
    #[error("transaction {hash} was not confirmed within {timeout}")]
    ReceiptTimeout { hash: TxHash, timeout: Timeout },
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("unexpected response from {call}: {reason}")]
    Decode { call: &'static str, reason: String },
    #[error("{0}")]
    Js(String),
}

/// Read and write calls of the word game contract.
#[allow(async_fn_in_trait)]
pub trait ContractGateway {
    async fn admin(&self) -> Result<Address, GatewayError>;

    async fn user_guesses(
        &self,
        player: &Address,
    ) -> Result<Vec<String>, GatewayError>;

    async fn has_user_guessed_correctly(
        &self,
        player: &Address,
    ) -> Result<bool, GatewayError>;

    async fn letter_statuses(
        &self,
        player: &Address,
        index: usize,
    ) -> Result<Vec<LetterStatus>, GatewayError>;

    async fn set_word(&self, word: &Word) -> Result<TxHash, GatewayError>;

    async fn make_guess(&self, guess: &Word) -> Result<TxHash, GatewayError>;

    /// Resolves once the transaction has been included and succeeded.
    async fn wait_for_receipt(
        &self,
        hash: &TxHash,
        timeout: Timeout,
    ) -> Result<(), GatewayError>;
}

/// The part of the token contract that gates whether the player may
/// play at all.
#[allow(async_fn_in_trait)]
pub trait AllowanceGateway {
    async fn allowance(&self, owner: &Address) -> Result<u128, GatewayError>;
}
