//! Transaction-related types
//!
//! This module defines the ledger row recorded for every completed
//! balance-affecting operation, the draft the engine hands to the ledger
//! for posting, and the display projections returned to callers.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::card::{mask_card_number, CardId};

/// Transaction identifier
///
/// Opaque, immutable, assigned by the ledger at posting time.
pub type TransactionId = u64;

/// Operations recorded in the ledger
///
/// A transfer between two cards produces two rows, both typed
/// `Transfer`: one on the source card and one on the destination card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Debit funds from a card
    Withdraw,

    /// Move funds between two cards of the same owner
    Transfer,
}

/// A posted ledger row
///
/// Append-only: never mutated or deleted by the core. The full card
/// number is carried alongside the card ID so that rows stay renderable
/// after an administrative card deletion; it is only ever displayed in
/// masked form.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The transaction ID
    pub id: TransactionId,

    /// The card this row was posted against
    pub card: CardId,

    /// Full number of the card at posting time
    pub card_number: String,

    /// The operation type
    pub tx_type: TransactionType,

    /// The magnitude moved, always positive, never signed
    pub amount: Decimal,

    /// Creation instant, set by the engine
    pub timestamp: NaiveDateTime,

    /// Optional free text
    pub description: Option<String>,
}

impl Transaction {
    /// Project the row into its display form
    pub fn to_view(&self) -> TransactionView {
        TransactionView {
            id: self.id,
            masked_card_number: mask_card_number(&self.card_number),
            tx_type: self.tx_type,
            amount: self.amount,
            timestamp: self.timestamp,
            description: self.description.clone(),
        }
    }
}

/// A transaction ready for posting
///
/// Built by the engine once every precondition has passed; the ledger
/// assigns the ID.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    /// The card the row is posted against
    pub card: CardId,

    /// Full number of the card at posting time
    pub card_number: String,

    /// The operation type
    pub tx_type: TransactionType,

    /// The magnitude moved
    pub amount: Decimal,

    /// Creation instant chosen by the engine
    pub timestamp: NaiveDateTime,

    /// Optional free text
    pub description: Option<String>,
}

/// Display projection of a ledger row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    /// The transaction ID
    pub id: TransactionId,

    /// The masked card number
    pub masked_card_number: String,

    /// The operation type
    pub tx_type: TransactionType,

    /// The magnitude moved
    pub amount: Decimal,

    /// Creation instant
    pub timestamp: NaiveDateTime,

    /// Optional free text
    pub description: Option<String>,
}

/// Result summary of a completed transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferSummary {
    /// Human-readable outcome message
    pub message: String,

    /// Masked number of the source card
    pub from_masked_number: String,

    /// Masked number of the destination card
    pub to_masked_number: String,

    /// The transferred amount
    pub amount: Decimal,

    /// The caller-supplied description
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_view_masks_card_number() {
        let row = Transaction {
            id: 3,
            card: 1,
            card_number: "1111222233334444".to_string(),
            tx_type: TransactionType::Withdraw,
            amount: Decimal::new(50_000, 2),
            timestamp: NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            description: Some("groceries".to_string()),
        };

        let view = row.to_view();
        assert_eq!(view.masked_card_number, "**** **** **** 4444");
        assert_eq!(view.tx_type, TransactionType::Withdraw);
        assert_eq!(view.amount, Decimal::new(50_000, 2));
        assert_eq!(view.description.as_deref(), Some("groceries"));
    }
}
