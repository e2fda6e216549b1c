//! Card storage and administration
//!
//! This module provides the `CardStore` that holds every card record and
//! implements the administrative card lifecycle: issuing, projection,
//! listing, and deletion.
//!
//! # Concurrency
//!
//! Every card is wrapped in its own mutex. The transaction and status
//! engines clone a card's handle out of the map and hold its lock for
//! the entire read-validate-mutate sequence, which guarantees at most
//! one in-flight balance mutation per card. The map itself is a
//! `DashMap`, so lookups of different cards never contend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, Months};
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;

use crate::core::status::CardStatusEngine;
use crate::types::{Card, CardId, CardStatus, CardView, EngineError, Principal, UserId};

/// Shared, lockable card record
///
/// Locking the mutex is acquiring the card's mutation right.
pub(crate) type CardHandle = Arc<Mutex<Card>>;

/// Holds all card records
///
/// Cards are never physically deleted by the engines; deletion is an
/// administrative side-channel, and ledger rows referencing a deleted
/// card stay intact.
pub struct CardStore {
    /// Map of card IDs to lockable card records
    cards: DashMap<CardId, CardHandle>,

    /// Next card ID to assign
    next_id: AtomicU64,
}

impl CardStore {
    /// Create a new CardStore with no cards
    pub fn new() -> Self {
        CardStore {
            cards: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Issue a new card (administrative)
    ///
    /// The card receives a freshly generated unique 16-digit number,
    /// status ACTIVE, and an expiration date two years from today.
    ///
    /// # Arguments
    ///
    /// * `principal` - The requesting principal; must be an administrator
    /// * `owner` - The user the card is issued to
    /// * `initial_balance` - Starting balance, must not be negative
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The principal is not an administrator
    /// - The initial balance is negative
    pub fn create(
        &self,
        principal: Principal,
        owner: UserId,
        initial_balance: Decimal,
    ) -> Result<CardView, EngineError> {
        if !principal.is_admin() {
            return Err(EngineError::admin_required(principal.id, "create card"));
        }
        if initial_balance < Decimal::ZERO {
            return Err(EngineError::negative_balance(initial_balance));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let today = Local::now().date_naive();
        let card = Card {
            id,
            number: self.generate_card_number(),
            owner,
            expiration_date: today + Months::new(24),
            status: CardStatus::Active,
            balance: initial_balance,
        };

        let view = card.to_view();
        self.cards.insert(id, Arc::new(Mutex::new(card)));
        info!(card = id, owner, "card issued");
        Ok(view)
    }

    /// Fetch a card projection
    ///
    /// Applies the automatic expiration check before projecting, so a
    /// read of a stale card persists its EXPIRED status.
    ///
    /// # Errors
    ///
    /// Returns an error if the card does not exist, or if the principal
    /// is neither an administrator nor the card's owner.
    pub fn get(&self, principal: Principal, card: CardId) -> Result<CardView, EngineError> {
        let handle = self.handle(card)?;
        let mut record = handle.lock();
        CardStatusEngine::refresh_expiration(&mut record, Local::now().date_naive());

        if !principal.is_admin() && record.owner != principal.id {
            return Err(EngineError::not_card_owner(card, principal.id));
        }
        Ok(record.to_view())
    }

    /// List card projections visible to the principal
    ///
    /// Administrators see every card; users see only their own. The
    /// optional status filter is applied after the automatic expiration
    /// check, so filtering on EXPIRED also finds cards whose date lapsed
    /// since the last read. Results are sorted by card ID for
    /// deterministic output.
    pub fn list(&self, principal: Principal, status: Option<CardStatus>) -> Vec<CardView> {
        let today = Local::now().date_naive();
        let mut views: Vec<CardView> = self
            .cards
            .iter()
            .filter_map(|entry| {
                let mut record = entry.value().lock();
                CardStatusEngine::refresh_expiration(&mut record, today);

                if !principal.is_admin() && record.owner != principal.id {
                    return None;
                }
                if let Some(wanted) = status {
                    if record.status != wanted {
                        return None;
                    }
                }
                Some(record.to_view())
            })
            .collect();
        views.sort_by_key(|view| view.id);
        views
    }

    /// Delete a card (administrative)
    ///
    /// Ledger rows referencing the card are left untouched; they carry
    /// their own copy of the card number and stay renderable.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is not an administrator or the
    /// card does not exist.
    pub fn delete(&self, principal: Principal, card: CardId) -> Result<(), EngineError> {
        if !principal.is_admin() {
            return Err(EngineError::admin_required(principal.id, "delete card"));
        }
        self.cards
            .remove(&card)
            .ok_or_else(|| EngineError::card_not_found(card))?;
        info!(card, "card deleted");
        Ok(())
    }

    /// Check whether a full card number is already taken
    pub fn number_exists(&self, number: &str) -> bool {
        self.cards
            .iter()
            .any(|entry| entry.value().lock().number == number)
    }

    /// Get the lockable record for a card
    ///
    /// # Errors
    ///
    /// Returns `CardNotFound` if the card does not exist.
    pub(crate) fn handle(&self, card: CardId) -> Result<CardHandle, EngineError> {
        self.cards
            .get(&card)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::card_not_found(card))
    }

    /// IDs of all cards owned by a user, sorted ascending
    pub(crate) fn ids_owned_by(&self, owner: UserId) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self
            .cards
            .iter()
            .filter(|entry| entry.value().lock().owner == owner)
            .map(|entry| *entry.key())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Generate a globally unique 16-digit card number
    ///
    /// Draws random digit strings until one is free. Collisions are
    /// vanishingly rare at 10^16 possibilities, so the loop terminates
    /// almost always on the first draw.
    fn generate_card_number(&self) -> String {
        let mut rng = rand::rng();
        loop {
            let number: String = (0..16)
                .map(|_| char::from(b'0' + rng.random_range(0..10)))
                .collect();
            if !self.number_exists(&number) {
                return number;
            }
        }
    }
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}
