//! Card status state machine
//!
//! Governs the ACTIVE / BLOCKED / EXPIRED lifecycle:
//!
//! - Expiration is automatic and unconditional. A card whose expiration
//!   date has passed is persisted as EXPIRED before any requested
//!   transition or balance operation is evaluated, and the pending
//!   request is overridden by that outcome.
//! - Administrators may set any status on a non-expired card.
//! - Owners may only request BLOCKED, and only on their own cards.
//! - There is no transition out of EXPIRED through this engine.
//!
//! The transaction engine consults [`CardStatusEngine::ensure_operable`]
//! before any balance mutation.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::core::card_store::CardStore;
use crate::types::{Card, CardId, CardStatus, CardView, EngineError, Principal};

/// Governs card status transitions
pub struct CardStatusEngine {
    cards: Arc<CardStore>,
}

impl CardStatusEngine {
    /// Create a new CardStatusEngine over the given store
    pub fn new(cards: Arc<CardStore>) -> Self {
        CardStatusEngine { cards }
    }

    /// Apply the automatic expiration override
    ///
    /// Moves a card whose expiration date is strictly before `today`
    /// into EXPIRED. Callers invoke this with the card's lock held, so
    /// the write is the persisted state.
    ///
    /// # Returns
    ///
    /// `true` if this call moved the card into EXPIRED
    pub(crate) fn refresh_expiration(card: &mut Card, today: NaiveDate) -> bool {
        if card.status != CardStatus::Expired && card.is_expired_as_of(today) {
            card.status = CardStatus::Expired;
            return true;
        }
        false
    }

    /// Reject money movement against a card that is not ACTIVE
    ///
    /// Runs the automatic expiration check first, then fails on BLOCKED
    /// or EXPIRED. Called by the transaction engine with the card's lock
    /// held, before any balance mutation.
    ///
    /// # Errors
    ///
    /// * `CardBlocked` - The card is blocked
    /// * `CardExpired` - The card is expired, or just became so
    pub(crate) fn ensure_operable(card: &mut Card, today: NaiveDate) -> Result<(), EngineError> {
        Self::refresh_expiration(card, today);
        match card.status {
            CardStatus::Active => Ok(()),
            CardStatus::Blocked => Err(EngineError::card_blocked(card.id)),
            CardStatus::Expired => Err(EngineError::card_expired(card.id)),
        }
    }

    /// Request a status change on behalf of a principal
    ///
    /// The automatic expiration check runs first and overrides the
    /// request: a card whose date has lapsed is persisted as EXPIRED and
    /// returned as such, whatever was asked for. Otherwise
    /// administrators may set any status, and owners may only block
    /// their own cards.
    ///
    /// # Errors
    ///
    /// * `CardNotFound` - The card does not exist
    /// * `CardExpired` - The card was already EXPIRED; there is no way
    ///   back out through this engine
    /// * `NotCardOwner` - A non-administrator touched a card they do
    ///   not own
    /// * `OwnerMayOnlyBlock` - An owner requested a status other than
    ///   BLOCKED
    pub fn change_status(
        &self,
        principal: Principal,
        card_id: CardId,
        new_status: CardStatus,
    ) -> Result<CardView, EngineError> {
        let handle = self.cards.handle(card_id)?;
        let mut card = handle.lock();
        let today = Local::now().date_naive();

        if Self::refresh_expiration(&mut card, today) {
            info!(card = card_id, "card auto-expired, requested change overridden");
            return Ok(card.to_view());
        }
        if card.status == CardStatus::Expired {
            return Err(EngineError::card_expired(card_id));
        }

        if !principal.is_admin() {
            if card.owner != principal.id {
                return Err(EngineError::not_card_owner(card_id, principal.id));
            }
            if new_status != CardStatus::Blocked {
                return Err(EngineError::owner_may_only_block(card_id, new_status));
            }
        }

        card.status = new_status;
        info!(card = card_id, status = ?new_status, "card status changed");
        Ok(card.to_view())
    }
}
