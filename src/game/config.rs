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

use super::gateway::{Address, HexError};
use super::timeout::{Timeout, DEFAULT_CONFIRMATION_TIMEOUT};

/// Number of guesses that the contract allows each day.
pub const DEFAULT_GUESS_LIMIT: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid player address: {0}")]
    InvalidPlayer(#[from] HexError),
    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("the guess limit must be at least 1")]
    ZeroGuessLimit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The connected wallet account that plays the game.
    pub player: Address,
    pub guess_limit: usize,
    pub confirmation_timeout: Timeout,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn new(player: Address) -> Config {
        Config {
            player,
            guess_limit: DEFAULT_GUESS_LIMIT,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            log_level: tracing::Level::INFO,
        }
    }

    pub fn validate(self) -> Result<Config, ConfigError> {
        if self.guess_limit == 0 {
            return Err(ConfigError::ZeroGuessLimit);
        }

        Ok(self)
    }

    /// Converts a timeout in milliseconds as given by the page. A
    /// missing or negative value keeps the default.
    pub fn timeout_from_millis(ms: Option<f64>) -> Timeout {
        match ms {
            Some(ms) if ms >= 0.0 => {
                Timeout::Milliseconds(ms.min(u32::MAX as f64) as u32)
            },
            _ => DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    pub fn parse_log_level(text: &str) -> Result<tracing::Level, ConfigError> {
        text.parse().map_err(|_| ConfigError::InvalidValue {
            field: "logLevel",
            value: text.to_string(),
        })
    }

    /// Reads the configuration object passed in by the page:
    ///
    /// ```js
    /// { player: "0x…", guessLimit: 5, confirmationTimeoutMs: 120000,
    ///   logLevel: "info" }
    /// ```
    ///
    /// Only `player` is required. A `null` timeout waits forever.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: &wasm_bindgen::JsValue) -> Result<Config, ConfigError> {
        let get = |key: &str| {
            js_sys::Reflect::get(value, &key.into())
                .unwrap_or(wasm_bindgen::JsValue::UNDEFINED)
        };

        let Some(player) = get("player").as_string()
        else {
            return Err(ConfigError::Missing("player"));
        };

        let mut config = Config::new(Address::parse(&player)?);

        let guess_limit = get("guessLimit");

        if !guess_limit.is_undefined() {
            match guess_limit.as_f64() {
                Some(limit) if limit >= 0.0 && limit.fract() == 0.0 => {
                    config.guess_limit = limit as usize;
                },
                _ => return Err(ConfigError::InvalidValue {
                    field: "guessLimit",
                    value: format!("{:?}", guess_limit),
                }),
            }
        }

        let timeout = get("confirmationTimeoutMs");

        config.confirmation_timeout = if timeout.is_null() {
            Timeout::Forever
        } else {
            Config::timeout_from_millis(timeout.as_f64())
        };

        if let Some(level) = get("logLevel").as_string() {
            config.log_level = Config::parse_log_level(&level)?;
        }

        config.validate()
    }
}
