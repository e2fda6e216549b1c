//! Transaction processing engine
//!
//! This module provides the TransactionEngine that orchestrates the
//! balance-affecting operations by coordinating the CardStore, the
//! CardStatusEngine, the LimitEvaluator, and the TransactionLedger.
//!
//! The engine enforces the business rules:
//! - Ownership checks before any operation (administrators are not
//!   exempt for money movement)
//! - Card state validation (blocked and expired cards move no money)
//! - Daily withdrawal limit evaluation
//! - Sufficient-balance checks before any debit
//!
//! # Atomicity
//!
//! Every operation runs under the exclusive lock(s) of the card(s) it
//! touches. For a withdrawal, the limit check, balance check, debit,
//! and ledger append all happen while holding the card's lock, so two
//! concurrent withdrawals against one card serialize and cannot jointly
//! exceed the balance or the limit. A transfer acquires both card locks
//! in ascending card-ID order before mutating either, which keeps two
//! opposite-direction transfers between the same pair deadlock-free.
//! Every rejected precondition aborts before any mutation, so a failed
//! operation leaves no partial state.

use std::sync::Arc;

use chrono::Local;
use rust_decimal::Decimal;
use tracing::info;

use crate::core::card_store::CardStore;
use crate::core::ledger::TransactionLedger;
use crate::core::limit_evaluator::LimitEvaluator;
use crate::core::limit_store::LimitStore;
use crate::core::status::CardStatusEngine;
use crate::types::{
    CardId, EngineError, Principal, Transaction, TransactionDraft, TransactionType,
    TransactionView, TransferSummary,
};

/// Orchestrates withdraw and transfer operations
pub struct TransactionEngine {
    cards: Arc<CardStore>,
    ledger: Arc<TransactionLedger>,
    evaluator: LimitEvaluator,
}

impl TransactionEngine {
    /// Create a new TransactionEngine over the given stores
    pub fn new(
        cards: Arc<CardStore>,
        ledger: Arc<TransactionLedger>,
        limits: Arc<LimitStore>,
    ) -> Self {
        let evaluator = LimitEvaluator::new(Arc::clone(&ledger), limits);
        TransactionEngine {
            cards,
            ledger,
            evaluator,
        }
    }

    /// Withdraw funds from a card owned by the principal
    ///
    /// Runs entirely under the card's exclusive lock: resolve, ownership
    /// check, status check, daily-limit check, balance check, debit, and
    /// ledger append form one atomic unit.
    ///
    /// # Arguments
    ///
    /// * `principal` - The requesting principal; must own the card
    /// * `card_id` - The card to debit
    /// * `amount` - The amount to withdraw, must be positive
    /// * `description` - Optional free text recorded on the ledger row
    ///
    /// # Returns
    ///
    /// The posted WITHDRAW transaction with a display-masked card number
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - The card does not exist or is not owned by the principal
    /// - The card is blocked or expired
    /// - Today's withdrawals plus the amount would exceed the daily limit
    /// - The balance does not cover the amount
    pub fn withdraw(
        &self,
        principal: Principal,
        card_id: CardId,
        amount: Decimal,
        description: Option<&str>,
    ) -> Result<TransactionView, EngineError> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::non_positive_amount(amount));
        }

        let handle = self.cards.handle(card_id)?;
        let mut card = handle.lock();

        if card.owner != principal.id {
            return Err(EngineError::not_card_owner(card_id, principal.id));
        }

        let now = Local::now().naive_local();
        CardStatusEngine::ensure_operable(&mut card, now.date())?;
        self.evaluator.check_withdrawal(card_id, amount, now)?;

        if card.balance < amount {
            return Err(EngineError::insufficient_balance(
                card_id,
                card.balance,
                amount,
            ));
        }

        card.balance -= amount;
        let row = self.ledger.append(TransactionDraft {
            card: card_id,
            card_number: card.number.clone(),
            tx_type: TransactionType::Withdraw,
            amount,
            timestamp: now,
            description: description.map(str::to_string),
        });

        info!(card = card_id, %amount, "withdrawal posted");
        Ok(row.to_view())
    }

    /// Transfer funds between two cards of the same owner
    ///
    /// Both cards must be owned by the principal and operable. The two
    /// locks are acquired in ascending card-ID order; the debit, the
    /// credit, and both ledger rows commit while both are held. The two
    /// rows share one timestamp and each names the counterpart card in
    /// its description. Transfers are not subject to the daily
    /// withdrawal limit.
    ///
    /// # Arguments
    ///
    /// * `principal` - The requesting principal; must own both cards
    /// * `from_id` - The card to debit
    /// * `to_id` - The card to credit, must differ from `from_id`
    /// * `amount` - The amount to move, must be positive
    /// * `description` - Optional free text appended to both rows
    ///
    /// # Returns
    ///
    /// A summary carrying both masked numbers, the amount, and the
    /// description
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - Source and destination are the same card
    /// - Either card does not exist or is not owned by the principal
    /// - Either card is blocked or expired
    /// - The source balance does not cover the amount
    pub fn transfer(
        &self,
        principal: Principal,
        from_id: CardId,
        to_id: CardId,
        amount: Decimal,
        description: Option<&str>,
    ) -> Result<TransferSummary, EngineError> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::non_positive_amount(amount));
        }
        if from_id == to_id {
            return Err(EngineError::same_card_transfer(from_id));
        }

        let from_handle = self.cards.handle(from_id)?;
        let to_handle = self.cards.handle(to_id)?;

        // Fixed acquisition order keyed on card ID. The transfer moving
        // funds the opposite way locks the same pair in the same order.
        let (mut from_card, mut to_card) = if from_id < to_id {
            let from = from_handle.lock();
            let to = to_handle.lock();
            (from, to)
        } else {
            let to = to_handle.lock();
            let from = from_handle.lock();
            (from, to)
        };

        if from_card.owner != principal.id {
            return Err(EngineError::not_card_owner(from_id, principal.id));
        }
        if to_card.owner != principal.id {
            return Err(EngineError::not_card_owner(to_id, principal.id));
        }

        let now = Local::now().naive_local();
        CardStatusEngine::ensure_operable(&mut from_card, now.date())?;
        CardStatusEngine::ensure_operable(&mut to_card, now.date())?;

        if from_card.balance < amount {
            return Err(EngineError::insufficient_balance(
                from_id,
                from_card.balance,
                amount,
            ));
        }

        from_card.balance -= amount;
        to_card.balance += amount;

        let suffix = description
            .map(|text| format!(" - {text}"))
            .unwrap_or_default();
        self.ledger.append(TransactionDraft {
            card: from_id,
            card_number: from_card.number.clone(),
            tx_type: TransactionType::Transfer,
            amount,
            timestamp: now,
            description: Some(format!("Transfer to card #{}{}", to_card.number, suffix)),
        });
        self.ledger.append(TransactionDraft {
            card: to_id,
            card_number: to_card.number.clone(),
            tx_type: TransactionType::Transfer,
            amount,
            timestamp: now,
            description: Some(format!("Received from card #{}{}", from_card.number, suffix)),
        });

        info!(from = from_id, to = to_id, %amount, "transfer posted");
        Ok(TransferSummary {
            message: "Transfer completed successfully".to_string(),
            from_masked_number: from_card.masked_number(),
            to_masked_number: to_card.masked_number(),
            amount,
            description: description.map(str::to_string),
        })
    }

    /// Transaction history of one card
    ///
    /// Visible to the card's owner and to administrators, optionally
    /// filtered by type.
    ///
    /// # Errors
    ///
    /// Returns an error if the card does not exist or the principal is
    /// neither its owner nor an administrator.
    pub fn transactions_for_card(
        &self,
        principal: Principal,
        card_id: CardId,
        tx_type: Option<TransactionType>,
    ) -> Result<Vec<TransactionView>, EngineError> {
        {
            let handle = self.cards.handle(card_id)?;
            let card = handle.lock();
            if !principal.is_admin() && card.owner != principal.id {
                return Err(EngineError::not_card_owner(card_id, principal.id));
            }
        }

        Ok(self
            .ledger
            .by_card(card_id, tx_type)
            .iter()
            .map(Transaction::to_view)
            .collect())
    }

    /// Transaction history visible to the principal
    ///
    /// Administrators see every ledger row; users see the rows of cards
    /// they currently own.
    pub fn transactions_for(
        &self,
        principal: Principal,
        tx_type: Option<TransactionType>,
    ) -> Vec<TransactionView> {
        let rows = if principal.is_admin() {
            self.ledger.all(tx_type)
        } else {
            let owned = self.cards.ids_owned_by(principal.id);
            self.ledger.by_cards(&owned, tx_type)
        };
        rows.iter().map(Transaction::to_view).collect()
    }
}
