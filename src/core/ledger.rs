//! Append-only transaction ledger
//!
//! This module provides the `TransactionLedger` that records every
//! completed balance-affecting operation. Rows are append-only: they are
//! never mutated or deleted by the engines, which is what makes the
//! history auditable.
//!
//! Queries filter by card and type, and the windowed WITHDRAW sum backs
//! the daily-limit evaluation. Appends always happen while the posting
//! engine holds the card lock(s) of the operation, so a balance write
//! and its ledger row commit as one unit.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::types::{CardId, Transaction, TransactionDraft, TransactionType};

/// Append-only record of completed operations
pub struct TransactionLedger {
    /// All posted rows in append order
    rows: RwLock<Vec<Transaction>>,

    /// Next transaction ID to assign
    next_id: AtomicU64,
}

impl TransactionLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        TransactionLedger {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Post a transaction
    ///
    /// Assigns the row its ID and appends it. The draft is only built by
    /// the engine once every precondition has passed, so posting itself
    /// is infallible.
    pub fn append(&self, draft: TransactionDraft) -> Transaction {
        let row = Transaction {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            card: draft.card,
            card_number: draft.card_number,
            tx_type: draft.tx_type,
            amount: draft.amount,
            timestamp: draft.timestamp,
            description: draft.description,
        };
        self.rows.write().push(row.clone());
        row
    }

    /// All rows posted against a card, optionally filtered by type
    pub fn by_card(&self, card: CardId, tx_type: Option<TransactionType>) -> Vec<Transaction> {
        self.rows
            .read()
            .iter()
            .filter(|row| row.card == card && tx_type.is_none_or(|t| row.tx_type == t))
            .cloned()
            .collect()
    }

    /// All rows posted against any of the given cards
    ///
    /// Used for owner-scoped history queries; `cards` is the set of
    /// card IDs the owner holds.
    pub fn by_cards(&self, cards: &[CardId], tx_type: Option<TransactionType>) -> Vec<Transaction> {
        self.rows
            .read()
            .iter()
            .filter(|row| cards.contains(&row.card) && tx_type.is_none_or(|t| row.tx_type == t))
            .cloned()
            .collect()
    }

    /// Every posted row, optionally filtered by type
    pub fn all(&self, tx_type: Option<TransactionType>) -> Vec<Transaction> {
        self.rows
            .read()
            .iter()
            .filter(|row| tx_type.is_none_or(|t| row.tx_type == t))
            .cloned()
            .collect()
    }

    /// Sum of WITHDRAW amounts for a card inside an inclusive window
    ///
    /// Returns zero if no matching rows exist. Transfers never count
    /// toward the sum.
    pub fn withdrawn_between(
        &self,
        card: CardId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Decimal {
        self.rows
            .read()
            .iter()
            .filter(|row| {
                row.card == card
                    && row.tx_type == TransactionType::Withdraw
                    && row.timestamp >= start
                    && row.timestamp <= end
            })
            .map(|row| row.amount)
            .sum()
    }

    /// Number of posted rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the ledger holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new()
    }
}
