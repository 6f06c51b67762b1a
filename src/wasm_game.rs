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

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::console;
use js_sys::{Array, Function, Object, Promise, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error};
use super::game;
use super::logging;
use game::allowance::AllowanceState;
use game::board::{Board, RowKind};
use game::config::Config;
use game::coordinator::{
    GuessRequest, SubmissionCoordinator, SubmitOutcome, SyncTargets,
};
use game::gateway::{
    Address, AllowanceGateway, ContractGateway, GatewayError, TxHash,
};
use game::guess_buffer::GuessBuffer;
use game::key::Key;
use game::letter_status::LetterStatus;
use game::notification::{Notification, Notifier};
use game::read_state::ReadStateAggregator;
use game::timeout::Timeout;
use game::word::Word;

fn show_error(message: &str) {
    console::log_1(&message.into());

    let Some(window) = web_sys::window()
    else {
        return;
    };

    let Some(document) = window.document()
    else {
        return;
    };

    let Some(message_elem) = document.get_element_by_id("message")
    else {
        return;
    };

    message_elem.set_text_content(Some("An error occurred"));
}

#[wasm_bindgen]
extern "C" {
    /// The word game contract, bound to the connected wallet by the
    /// page. Every method returns a promise.
    pub type GameContract;

    #[wasm_bindgen(method, catch, js_name = admin)]
    fn admin_promise(this: &GameContract) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getUserGuesses)]
    fn user_guesses_promise(
        this: &GameContract,
        player: &str,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getHasUserGuessedCorrectly)]
    fn has_user_guessed_correctly_promise(
        this: &GameContract,
        player: &str,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getLetterStatuses)]
    fn letter_statuses_promise(
        this: &GameContract,
        player: &str,
        index: u32,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setWord)]
    fn set_word_promise(
        this: &GameContract,
        word: &str,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = makeGuess)]
    fn make_guess_promise(
        this: &GameContract,
        guess: &str,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = waitForTransactionReceipt)]
    fn receipt_promise(
        this: &GameContract,
        hash: &str,
        timeout_ms: Option<u32>,
    ) -> Result<Promise, JsValue>;

    /// The token contract that holds the player’s allowance.
    pub type TokenContract;

    #[wasm_bindgen(method, catch, js_name = allowance)]
    fn allowance_promise(
        this: &TokenContract,
        owner: &str,
    ) -> Result<Promise, JsValue>;
}

fn error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        String::from(error.message())
    } else if let Some(s) = value.as_string() {
        s
    } else {
        format!("{:?}", value)
    }
}

fn error_name(value: &JsValue) -> String {
    Reflect::get(value, &"name".into())
        .ok()
        .and_then(|name| name.as_string())
        .unwrap_or_default()
}

fn js_error(value: JsValue) -> GatewayError {
    if error_name(&value).contains("UserRejected") {
        GatewayError::Rejected(error_message(&value))
    } else {
        GatewayError::Js(error_message(&value))
    }
}

async fn resolve(
    promise: Result<Promise, JsValue>,
) -> Result<JsValue, GatewayError> {
    let promise = promise.map_err(js_error)?;
    JsFuture::from(promise).await.map_err(js_error)
}

fn decode_error(call: &'static str, reason: impl ToString) -> GatewayError {
    GatewayError::Decode { call, reason: reason.to_string() }
}

fn decode_hash(
    call: &'static str,
    value: JsValue,
) -> Result<TxHash, GatewayError> {
    let Some(text) = value.as_string()
    else {
        return Err(decode_error(call, "expected a transaction hash"));
    };

    TxHash::parse(&text).map_err(|e| decode_error(call, e))
}

// Contract integers may arrive either as numbers or as BigInts
fn decode_amount(
    call: &'static str,
    value: &JsValue,
) -> Result<u128, GatewayError> {
    if value.is_bigint() {
        let digits = value.unchecked_ref::<js_sys::BigInt>()
            .to_string(10)
            .map_err(|_| decode_error(call, "bad BigInt"))?;
        let digits = String::from(digits);

        if digits.starts_with('-') {
            return Err(decode_error(call, digits));
        }

        // Unlimited approvals are common and don’t fit in a u128
        Ok(digits.parse::<u128>().unwrap_or(u128::MAX))
    } else if let Some(n) = value.as_f64() {
        if n < 0.0 || n.fract() != 0.0 {
            Err(decode_error(call, n))
        } else {
            Ok(n as u128)
        }
    } else {
        Err(decode_error(call, "expected a number"))
    }
}

impl ContractGateway for GameContract {
    async fn admin(&self) -> Result<Address, GatewayError> {
        let value = resolve(self.admin_promise()).await?;

        let Some(text) = value.as_string()
        else {
            return Err(decode_error("admin", "expected an address"));
        };

        Address::parse(&text).map_err(|e| decode_error("admin", e))
    }

    async fn user_guesses(
        &self,
        player: &Address,
    ) -> Result<Vec<String>, GatewayError> {
        let value = resolve(self.user_guesses_promise(player.as_str())).await?;

        if !Array::is_array(&value) {
            return Ok(Vec::new());
        }

        Array::from(&value)
            .iter()
            .map(|guess| {
                guess.as_string().ok_or_else(|| {
                    decode_error("getUserGuesses", "expected a string")
                })
            })
            .collect()
    }

    async fn has_user_guessed_correctly(
        &self,
        player: &Address,
    ) -> Result<bool, GatewayError> {
        let value = resolve(
            self.has_user_guessed_correctly_promise(player.as_str())
        ).await?;

        value.as_bool().ok_or_else(|| {
            decode_error("getHasUserGuessedCorrectly", "expected a boolean")
        })
    }

    async fn letter_statuses(
        &self,
        player: &Address,
        index: usize,
    ) -> Result<Vec<LetterStatus>, GatewayError> {
        const CALL: &str = "getLetterStatuses";

        let index = u32::try_from(index)
            .map_err(|_| decode_error(CALL, "index out of range"))?;
        let value = resolve(
            self.letter_statuses_promise(player.as_str(), index)
        ).await?;

        if !Array::is_array(&value) {
            return Err(decode_error(CALL, "expected an array"));
        }

        Array::from(&value)
            .iter()
            .map(|code| {
                let code = decode_amount(CALL, &code)?;

                u8::try_from(code)
                    .ok()
                    .and_then(LetterStatus::from_code)
                    .ok_or_else(|| {
                        decode_error(CALL, format!("unknown status {}", code))
                    })
            })
            .collect()
    }

    async fn set_word(&self, word: &Word) -> Result<TxHash, GatewayError> {
        let value = resolve(self.set_word_promise(word.as_str())).await?;
        decode_hash("setWord", value)
    }

    async fn make_guess(&self, guess: &Word) -> Result<TxHash, GatewayError> {
        let value = resolve(self.make_guess_promise(guess.as_str())).await?;
        decode_hash("makeGuess", value)
    }

    async fn wait_for_receipt(
        &self,
        hash: &TxHash,
        timeout: Timeout,
    ) -> Result<(), GatewayError> {
        let promise = self.receipt_promise(hash.as_str(), timeout.as_millis())
            .map_err(js_error)?;

        let receipt = match JsFuture::from(promise).await {
            Ok(receipt) => receipt,
            Err(e) if error_name(&e).contains("Timeout") => {
                return Err(GatewayError::ReceiptTimeout {
                    hash: hash.clone(),
                    timeout,
                });
            },
            Err(e) => return Err(js_error(e)),
        };

        let status = Reflect::get(&receipt, &"status".into())
            .ok()
            .and_then(|status| status.as_string());

        match status.as_deref() {
            Some("reverted") => Err(GatewayError::Reverted(hash.clone())),
            _ => Ok(()),
        }
    }
}

impl AllowanceGateway for TokenContract {
    async fn allowance(&self, owner: &Address) -> Result<u128, GatewayError> {
        let value = resolve(self.allowance_promise(owner.as_str())).await?;
        decode_amount("allowance", &value)
    }
}

struct ToastNotifier {
    toast: Function,
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let result = self.toast.call2(
            &JsValue::NULL,
            &notification.kind().name().into(),
            &notification.message().into(),
        );

        if let Err(e) = result {
            error!(
                message = notification.message(),
                error = %error_message(&e),
                "toast callback failed"
            );
        }
    }
}

struct Game {
    config: Config,
    contract: GameContract,
    token: TokenContract,
    reads: ReadStateAggregator,
    allowance: AllowanceState,
    coordinator: SubmissionCoordinator<ToastNotifier>,
    guess: RefCell<GuessBuffer>,
    on_update: Function,
}

impl Game {
    fn queue_update(&self) {
        if let Err(e) = self.on_update.call0(&JsValue::NULL) {
            error!(error = %error_message(&e), "update callback failed");
        }
    }

    fn flush_coordinator_events(&self) {
        let update_queued = self.coordinator.flush_events(
            &mut self.guess.borrow_mut(),
        );

        if update_queued {
            self.queue_update();
        }
    }

    fn targets(&self) -> SyncTargets<'_, GameContract, TokenContract> {
        SyncTargets {
            contract: &self.contract,
            token: &self.token,
            reads: &self.reads,
            allowance: &self.allowance,
            player: &self.config.player,
        }
    }

    async fn refresh(&self) {
        self.reads.refresh_all(&self.contract, &self.config.player).await;
        self.allowance.refresh(&self.token, &self.config.player).await;
        self.queue_update();
    }

    async fn finish_submission(&self, outcome: SubmitOutcome) {
        self.flush_coordinator_events();

        if let SubmitOutcome::Pending(hash) = outcome {
            debug!(%hash, "waiting for confirmation");
            self.coordinator.await_confirmation(&self.targets()).await;
            self.flush_coordinator_events();
        }
    }

    async fn submit_guess(&self) {
        let guess = self.guess.borrow().as_str().to_string();

        let request = GuessRequest {
            allowance: self.allowance.effective_amount(),
            guess: &guess,
            prior_guess_count: self.reads.guess_count(),
            has_guessed_correctly: self.reads.has_guessed_correctly(),
        };

        let outcome = self.coordinator.submit_guess(
            &self.contract,
            &request,
        ).await;

        self.finish_submission(outcome).await;
    }

    async fn set_word(&self, word: String) {
        let outcome = self.coordinator.set_word(
            &self.contract,
            &self.reads.snapshot(),
            &self.config.player,
            &word,
        ).await;

        self.finish_submission(outcome).await;
    }

    fn press_key(self: &Rc<Game>, key: Key) {
        let changed = match key {
            Key::Letter(letter) => self.guess.borrow_mut().append(letter),
            Key::Backspace => self.guess.borrow_mut().delete_last(),
            Key::Enter => {
                // The submit action is unavailable until the guess is
                // complete and the previous transaction is done
                if self.guess.borrow().is_complete()
                    && !self.coordinator.is_busy()
                {
                    let game = Rc::clone(self);
                    spawn_local(async move { game.submit_guess().await });
                }
                false
            },
        };

        if changed {
            self.queue_update();
        }
    }
}

fn tile_object(letter: Option<char>, status: Option<LetterStatus>) -> Object {
    let tile = Object::new();

    let letter = letter
        .map(|ch| JsValue::from_str(&ch.to_string()))
        .unwrap_or(JsValue::NULL);
    let status = status
        .map(|status| JsValue::from_str(status.name()))
        .unwrap_or(JsValue::NULL);

    let _ = Reflect::set(&tile, &"letter".into(), &letter);
    let _ = Reflect::set(&tile, &"status".into(), &status);

    tile
}

fn row_kind_name(kind: RowKind) -> &'static str {
    match kind {
        RowKind::Guessed => "guessed",
        RowKind::InProgress => "in-progress",
        RowKind::Empty => "empty",
    }
}

#[wasm_bindgen]
pub struct Chainword {
    game: Rc<Game>,
    document: Option<web_sys::Document>,
    keydown_closure: Option<Closure::<dyn Fn(JsValue)>>,
}

#[wasm_bindgen]
impl Chainword {
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        contract: GameContract,
        token: TokenContract,
        toast: Function,
        on_update: Function,
    ) -> Result<Chainword, JsValue> {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config = match Config::from_js(&config) {
            Ok(config) => config,
            Err(e) => {
                let message = format!("bad configuration: {}", e);
                show_error(&message);
                return Err(JsValue::from_str(&message));
            },
        };

        logging::init(config.log_level);

        let coordinator = SubmissionCoordinator::new(
            ToastNotifier { toast },
            &config,
        );

        let game = Rc::new(Game {
            config,
            contract,
            token,
            reads: ReadStateAggregator::new(),
            allowance: AllowanceState::new(),
            coordinator,
            guess: RefCell::new(GuessBuffer::new()),
            on_update,
        });

        let mut chainword = Chainword {
            game,
            document: None,
            keydown_closure: None,
        };

        chainword.listen_for_keys();
        chainword.refresh();

        Ok(chainword)
    }

    /// Refetches all of the contract state and the allowance.
    pub fn refresh(&self) {
        let game = Rc::clone(&self.game);
        spawn_local(async move { game.refresh().await });
    }

    pub fn press_key(&self, name: &str) {
        if let Some(key) = Key::from_key_name(name) {
            self.game.press_key(key);
        }
    }

    pub fn press_letter(&self, letter: &str) {
        let mut chars = letter.chars();

        if let (Some(ch), None) = (chars.next(), chars.next()) {
            self.game.press_key(Key::Letter(ch));
        }
    }

    pub fn delete_letter(&self) {
        self.game.press_key(Key::Backspace);
    }

    pub fn submit_guess(&self) {
        let game = Rc::clone(&self.game);
        spawn_local(async move { game.submit_guess().await });
    }

    pub fn set_word(&self, word: String) {
        let game = Rc::clone(&self.game);
        spawn_local(async move { game.set_word(word).await });
    }

    pub fn guess(&self) -> String {
        self.game.guess.borrow().as_str().to_string()
    }

    pub fn can_submit(&self) -> bool {
        self.game.guess.borrow().is_complete()
            && !self.game.coordinator.is_busy()
    }

    pub fn is_loading(&self) -> bool {
        self.game.reads.is_loading()
            || self.game.allowance.is_loading()
            || self.game.coordinator.is_busy()
    }

    pub fn is_admin(&self) -> bool {
        self.game.reads.snapshot().is_admin(&self.game.config.player)
    }

    pub fn has_guessed_correctly(&self) -> bool {
        self.game.reads.has_guessed_correctly()
    }

    /// The allowance as a decimal string, or `undefined` if it isn’t
    /// known.
    pub fn allowance(&self) -> Option<String> {
        self.game.allowance.amount().map(|amount| amount.to_string())
    }

    pub fn pending_transaction(&self) -> Option<String> {
        self.game.coordinator.pending_hash().map(|hash| hash.to_string())
    }

    /// The board as an array of `{ kind, tiles }` rows where each tile
    /// is `{ letter, status }`.
    pub fn rows(&self) -> Array {
        let board = Board::new(
            &self.game.reads.snapshot(),
            &self.game.guess.borrow(),
            self.game.config.guess_limit,
        );

        board.rows().iter().map(|row| {
            let tiles = row.tiles.iter()
                .map(|tile| tile_object(tile.letter, tile.status))
                .collect::<Array>();

            let object = Object::new();
            let _ = Reflect::set(
                &object,
                &"kind".into(),
                &row_kind_name(row.kind).into(),
            );
            let _ = Reflect::set(&object, &"tiles".into(), &tiles);

            JsValue::from(object)
        }).collect()
    }
}

impl Chainword {
    fn listen_for_keys(&mut self) {
        let Some(document) = web_sys::window().and_then(|w| w.document())
        else {
            show_error("failed to get document");
            return;
        };

        let game = Rc::clone(&self.game);

        let keydown_closure = Closure::<dyn Fn(JsValue)>::new(
            move |event: JsValue| {
                let Ok(event) = event.dyn_into::<web_sys::KeyboardEvent>()
                else {
                    return;
                };

                if let Some(key) = Key::from_key_name(&event.key()) {
                    game.press_key(key);
                }
            }
        );

        let _ = document.add_event_listener_with_callback(
            "keydown",
            keydown_closure.as_ref().unchecked_ref(),
        );

        self.document = Some(document);
        self.keydown_closure = Some(keydown_closure);
    }
}

impl Drop for Chainword {
    fn drop(&mut self) {
        if let (Some(document), Some(closure)) =
            (self.document.as_ref(), self.keydown_closure.as_ref())
        {
            let _ = document.remove_event_listener_with_callback(
                "keydown",
                closure.as_ref().unchecked_ref(),
            );
        }
    }
}
