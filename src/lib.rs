//! Bank-Cards Engine Library
//! # Overview
//!
//! This library provides the transaction core for a bank-card account
//! system: card lifecycle, balance-affecting operations, a configurable
//! daily withdrawal limit, and an auditable transaction history.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Card, Transaction, Principal, etc.)
//! - [`core`] - Business logic components:
//!   - [`core::card_store`] - Card storage and administrative lifecycle
//!   - [`core::status`] - Card status state machine
//!   - [`core::ledger`] - Append-only transaction history
//!   - [`core::limit_store`] - The singleton daily withdrawal limit
//!   - [`core::limit_evaluator`] - Daily-limit evaluation
//!   - [`core::engine`] - Withdraw/transfer orchestration
//!
//! # Operations
//!
//! The engine supports two balance-affecting operations:
//!
//! - **Withdraw**: Debit funds from a card (requires ownership,
//!   sufficient balance, and headroom under the daily limit)
//! - **Transfer**: Move funds between two cards of the same owner,
//!   recording one ledger row on each card
//!
//! # Card States
//!
//! Each card is ACTIVE, BLOCKED, or EXPIRED. Blocked and expired cards
//! move no money; expiration is applied automatically once the card's
//! expiration date has passed. Balances never go negative: every
//! operation validates before it mutates, and each card's mutations are
//! serialized through its own lock, so concurrent withdrawals cannot
//! jointly overdraw a card or overshoot the daily limit.
//!
//! # Authorization
//!
//! Callers pass an authenticated [`types::Principal`] with every
//! request. Card issuing, deletion, and limit updates require the ADMIN
//! role; money movement requires card ownership, administrators
//! included.

// Module declarations
pub mod core;
pub mod types;

pub use core::{
    CardStatusEngine, CardStore, LimitEvaluator, LimitStore, TransactionEngine, TransactionLedger,
};
pub use types::{
    mask_card_number, Card, CardId, CardStatus, CardView, EngineError, ErrorKind, Limit, Principal,
    Role, Transaction, TransactionId, TransactionType, TransactionView, TransferSummary, UserId,
};
