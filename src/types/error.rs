//! Error types for the bank-cards engine
//!
//! This module defines all errors that can occur while processing card
//! operations. Every variant carries enough context to diagnose the
//! rejection, and each maps onto one of five coarse kinds consumed by
//! the excluded API layer (typically for HTTP status selection).
//!
//! No error is silently swallowed: every rejected precondition aborts
//! the whole operation before any mutation occurs.

use rust_decimal::Decimal;
use thiserror::Error;

use super::card::{CardId, CardStatus};
use super::principal::UserId;

/// Coarse error taxonomy
///
/// The engines return descriptive [`EngineError`] variants; callers that
/// only care about the category (for response shaping) use
/// [`EngineError::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced card, user, or limit does not exist
    NotFound,

    /// The principal lacks ownership or administrative right
    Forbidden,

    /// The card is blocked or expired when money movement is attempted
    InvalidState,

    /// A validation failure: bad amount, insufficient balance, limit
    /// exceeded, disallowed status change
    InvalidArgument,

    /// Concurrent-mutation detection under an optimistic scheme
    ///
    /// Unused by the lock-based stores in this crate; reserved for
    /// implementations that replace the per-card locks with version
    /// checks.
    Conflict,
}

/// Main error type for the bank-cards engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The referenced card does not exist
    #[error("Card {card} not found")]
    CardNotFound {
        /// Card ID that was not found
        card: CardId,
    },

    /// The principal does not own the referenced card
    #[error("User {user} does not own card {card}")]
    NotCardOwner {
        /// The card in question
        card: CardId,
        /// The requesting user
        user: UserId,
    },

    /// The operation requires administrative authority
    #[error("User {user} requires administrative rights to {operation}")]
    AdminRequired {
        /// The requesting user
        user: UserId,
        /// Operation that was attempted
        operation: String,
    },

    /// Money movement was attempted against a blocked card
    #[error("Card {card} is blocked")]
    CardBlocked {
        /// The blocked card
        card: CardId,
    },

    /// Money movement or a status change was attempted against an
    /// expired card
    #[error("Card {card} is expired")]
    CardExpired {
        /// The expired card
        card: CardId,
    },

    /// The requested amount is zero or negative
    #[error("Amount {amount} must be positive")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A card was requested with a negative initial balance
    #[error("Initial balance {balance} must not be negative")]
    NegativeBalance {
        /// The rejected balance
        balance: Decimal,
    },

    /// The card balance does not cover the requested amount
    ///
    /// The operation is rejected and the balance remains unchanged.
    #[error("Insufficient balance on card {card}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// The card in question
        card: CardId,
        /// Balance at evaluation time
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// The withdrawal would push the card over its daily limit
    #[error("Daily withdrawal limit exceeded for card {card}: withdrawn today {withdrawn_today}, requested {requested}, limit {limit}")]
    DailyLimitExceeded {
        /// The card in question
        card: CardId,
        /// Sum of today's withdrawals at evaluation time
        withdrawn_today: Decimal,
        /// Requested amount
        requested: Decimal,
        /// Configured daily limit
        limit: Decimal,
    },

    /// A transfer named the same card as source and destination
    #[error("Cannot transfer from card {card} to itself")]
    SameCardTransfer {
        /// The card named twice
        card: CardId,
    },

    /// A non-administrative owner requested a status other than BLOCKED
    #[error("Card owners may only block their own cards; requested {requested:?} on card {card}")]
    OwnerMayOnlyBlock {
        /// The card in question
        card: CardId,
        /// The disallowed target status
        requested: CardStatus,
    },
}

impl EngineError {
    /// The coarse taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::CardNotFound { .. } => ErrorKind::NotFound,
            EngineError::NotCardOwner { .. } | EngineError::AdminRequired { .. } => {
                ErrorKind::Forbidden
            }
            EngineError::CardBlocked { .. } | EngineError::CardExpired { .. } => {
                ErrorKind::InvalidState
            }
            EngineError::NonPositiveAmount { .. }
            | EngineError::NegativeBalance { .. }
            | EngineError::InsufficientBalance { .. }
            | EngineError::DailyLimitExceeded { .. }
            | EngineError::SameCardTransfer { .. }
            | EngineError::OwnerMayOnlyBlock { .. } => ErrorKind::InvalidArgument,
        }
    }
}

// Helper functions for creating common errors

impl EngineError {
    /// Create a CardNotFound error
    pub fn card_not_found(card: CardId) -> Self {
        EngineError::CardNotFound { card }
    }

    /// Create a NotCardOwner error
    pub fn not_card_owner(card: CardId, user: UserId) -> Self {
        EngineError::NotCardOwner { card, user }
    }

    /// Create an AdminRequired error
    pub fn admin_required(user: UserId, operation: &str) -> Self {
        EngineError::AdminRequired {
            user,
            operation: operation.to_string(),
        }
    }

    /// Create a CardBlocked error
    pub fn card_blocked(card: CardId) -> Self {
        EngineError::CardBlocked { card }
    }

    /// Create a CardExpired error
    pub fn card_expired(card: CardId) -> Self {
        EngineError::CardExpired { card }
    }

    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Decimal) -> Self {
        EngineError::NonPositiveAmount { amount }
    }

    /// Create a NegativeBalance error
    pub fn negative_balance(balance: Decimal) -> Self {
        EngineError::NegativeBalance { balance }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(card: CardId, balance: Decimal, requested: Decimal) -> Self {
        EngineError::InsufficientBalance {
            card,
            balance,
            requested,
        }
    }

    /// Create a DailyLimitExceeded error
    pub fn daily_limit_exceeded(
        card: CardId,
        withdrawn_today: Decimal,
        requested: Decimal,
        limit: Decimal,
    ) -> Self {
        EngineError::DailyLimitExceeded {
            card,
            withdrawn_today,
            requested,
            limit,
        }
    }

    /// Create a SameCardTransfer error
    pub fn same_card_transfer(card: CardId) -> Self {
        EngineError::SameCardTransfer { card }
    }

    /// Create an OwnerMayOnlyBlock error
    pub fn owner_may_only_block(card: CardId, requested: CardStatus) -> Self {
        EngineError::OwnerMayOnlyBlock { card, requested }
    }
}
