//! Card-related types
//!
//! This module defines the card record held by the card store, the card
//! status enumeration, and the display projection that carries a masked
//! card number instead of the full one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::principal::UserId;

/// Card identifier
///
/// Opaque, immutable after creation, assigned by the card store.
pub type CardId = u64;

/// Lifecycle status of a card
///
/// `Blocked` and `Expired` are terminal with respect to money movement:
/// the transaction engine rejects withdrawals and transfers against a
/// card in either state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardStatus {
    /// Card can move money
    Active,

    /// Card is administratively or owner-blocked
    Blocked,

    /// Card has reached its end of life
    ///
    /// Entered automatically once the expiration date has passed, or set
    /// directly by an administrator. There is no transition back out.
    Expired,
}

/// A bank-card record
///
/// The balance is the single mutable numeric field and must never go
/// negative after a committed operation. Ownership never changes after
/// creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// The card ID
    pub id: CardId,

    /// The full 16-digit card number, globally unique
    ///
    /// Only used internally for uniqueness checks and counterpart
    /// identification; every number leaving the core is masked first.
    pub number: String,

    /// The owning user
    pub owner: UserId,

    /// The card's hard end-of-life date
    pub expiration_date: NaiveDate,

    /// Current lifecycle status
    pub status: CardStatus,

    /// Current balance, non-negative
    pub balance: Decimal,
}

impl Card {
    /// The card number in display form, e.g. `**** **** **** 1234`
    pub fn masked_number(&self) -> String {
        mask_card_number(&self.number)
    }

    /// Whether the expiration date is strictly before the given day
    pub fn is_expired_as_of(&self, today: NaiveDate) -> bool {
        self.expiration_date < today
    }

    /// Project the record into its display form
    pub fn to_view(&self) -> CardView {
        CardView {
            id: self.id,
            masked_number: self.masked_number(),
            expiration_date: self.expiration_date,
            status: self.status,
            balance: self.balance,
            owner: self.owner,
        }
    }
}

/// Display projection of a card
///
/// The only card shape handed to consumers of the core. Carries the
/// masked number; the full number never leaves the stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// The card ID
    pub id: CardId,

    /// The masked card number
    pub masked_number: String,

    /// The card's expiration date
    pub expiration_date: NaiveDate,

    /// Current lifecycle status
    pub status: CardStatus,

    /// Current balance
    pub balance: Decimal,

    /// The owning user
    pub owner: UserId,
}

/// Mask a card number for display, keeping only the last four digits
///
/// # Arguments
///
/// * `number` - The full card number
///
/// # Returns
///
/// The number with all but the last four digits replaced by three groups
/// of four mask characters: `**** **** **** 1234`
pub fn mask_card_number(number: &str) -> String {
    let last_four = &number[number.len().saturating_sub(4)..];
    format!("**** **** **** {last_four}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_only_last_four_digits() {
        assert_eq!(
            mask_card_number("1234567812345678"),
            "**** **** **** 5678"
        );
    }

    #[test]
    fn test_view_carries_masked_number() {
        let card = Card {
            id: 1,
            number: "9999000011112222".to_string(),
            owner: 7,
            expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            status: CardStatus::Active,
            balance: Decimal::new(100_000, 2),
        };

        let view = card.to_view();
        assert_eq!(view.masked_number, "**** **** **** 2222");
        assert_eq!(view.owner, 7);
        assert_eq!(view.status, CardStatus::Active);
        assert_eq!(view.balance, Decimal::new(100_000, 2));
    }

    #[test]
    fn test_expiration_boundary_is_strict() {
        let card = Card {
            id: 1,
            number: "1234567812345678".to_string(),
            owner: 1,
            expiration_date: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
            status: CardStatus::Active,
            balance: Decimal::ZERO,
        };

        // A card expiring today is still usable today.
        assert!(!card.is_expired_as_of(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()));
        assert!(card.is_expired_as_of(NaiveDate::from_ymd_opt(2026, 6, 16).unwrap()));
    }
}
