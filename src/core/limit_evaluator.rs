//! Daily withdrawal limit evaluation
//!
//! Computes the cumulative WITHDRAW total for a card within one calendar
//! day in server-local time and compares it against the configured
//! limit.
//!
//! The window runs from 00:00:00.000 to 23:59:59.000 of the same day,
//! both ends inclusive. The upper bound deliberately sits at the last
//! whole second: sub-second activity after 23:59:59.000 falls outside
//! the day.

use std::sync::Arc;

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::core::ledger::TransactionLedger;
use crate::core::limit_store::LimitStore;
use crate::types::{CardId, EngineError};

/// Evaluates withdrawals against the daily limit
pub struct LimitEvaluator {
    ledger: Arc<TransactionLedger>,
    limits: Arc<LimitStore>,
}

impl LimitEvaluator {
    /// Create a new LimitEvaluator over the given ledger and limit store
    pub fn new(ledger: Arc<TransactionLedger>, limits: Arc<LimitStore>) -> Self {
        LimitEvaluator { ledger, limits }
    }

    /// Total withdrawn from a card on the day containing `as_of`
    ///
    /// Zero if the card has no WITHDRAW rows inside the window.
    pub fn withdrawn_today(&self, card: CardId, as_of: NaiveDateTime) -> Decimal {
        let day = as_of.date();
        let start = day.and_time(NaiveTime::MIN);
        let end = day.and_hms_opt(23, 59, 59).expect("23:59:59 is a valid time");
        self.ledger.withdrawn_between(card, start, end)
    }

    /// Check whether a withdrawal of `amount` would exceed the daily limit
    ///
    /// The caller evaluates this inside the same atomic boundary as the
    /// balance decrement, so two concurrent withdrawals cannot both pass
    /// independently.
    ///
    /// # Errors
    ///
    /// Returns `DailyLimitExceeded` when
    /// `withdrawn_today + amount > current limit`. Spending exactly up
    /// to the limit passes.
    pub fn check_withdrawal(
        &self,
        card: CardId,
        amount: Decimal,
        as_of: NaiveDateTime,
    ) -> Result<(), EngineError> {
        let limit = self.limits.current().value;
        let withdrawn_today = self.withdrawn_today(card, as_of);

        if withdrawn_today.saturating_add(amount) > limit {
            return Err(EngineError::daily_limit_exceeded(
                card,
                withdrawn_today,
                amount,
                limit,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Principal, TransactionDraft, TransactionType};
    use chrono::NaiveDate;

    fn setup() -> (Arc<TransactionLedger>, Arc<LimitStore>, LimitEvaluator) {
        let ledger = Arc::new(TransactionLedger::new());
        let limits = Arc::new(LimitStore::new());
        let evaluator = LimitEvaluator::new(Arc::clone(&ledger), Arc::clone(&limits));
        (ledger, limits, evaluator)
    }

    fn withdraw_row(card: CardId, amount: i64, at: NaiveDateTime) -> TransactionDraft {
        TransactionDraft {
            card,
            card_number: "1234567812345678".to_string(),
            tx_type: TransactionType::Withdraw,
            amount: Decimal::new(amount, 2),
            timestamp: at,
            description: None,
        }
    }

    fn noon(day: NaiveDate) -> NaiveDateTime {
        day.and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_withdrawn_today_is_zero_without_history() {
        let (_, _, evaluator) = setup();
        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        assert_eq!(evaluator.withdrawn_today(1, noon(day)), Decimal::ZERO);
    }

    #[test]
    fn test_withdrawn_today_ignores_other_days() {
        let (ledger, _, evaluator) = setup();
        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();

        ledger.append(withdraw_row(1, 10_000, noon(day)));
        ledger.append(withdraw_row(1, 77_700, noon(yesterday)));

        assert_eq!(
            evaluator.withdrawn_today(1, noon(day)),
            Decimal::new(10_000, 2)
        );
    }

    #[test]
    fn test_check_passes_when_exactly_at_limit() {
        let (ledger, limits, evaluator) = setup();
        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        limits
            .set(Principal::admin(1), Decimal::new(100_000, 2))
            .unwrap();
        ledger.append(withdraw_row(1, 60_000, noon(day)));

        // 600.00 already withdrawn, 400.00 more lands exactly on 1000.00.
        assert!(evaluator
            .check_withdrawal(1, Decimal::new(40_000, 2), noon(day))
            .is_ok());
    }

    #[test]
    fn test_check_fails_one_cent_over_limit() {
        let (ledger, limits, evaluator) = setup();
        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        limits
            .set(Principal::admin(1), Decimal::new(100_000, 2))
            .unwrap();
        ledger.append(withdraw_row(1, 60_000, noon(day)));

        let result = evaluator.check_withdrawal(1, Decimal::new(40_001, 2), noon(day));
        assert!(matches!(
            result.unwrap_err(),
            EngineError::DailyLimitExceeded { .. }
        ));
    }

    #[test]
    fn test_check_scopes_to_card() {
        let (ledger, limits, evaluator) = setup();
        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        limits
            .set(Principal::admin(1), Decimal::new(100_000, 2))
            .unwrap();
        ledger.append(withdraw_row(2, 100_000, noon(day)));

        // Card 2 exhausted its limit; card 1 is unaffected.
        assert!(evaluator
            .check_withdrawal(1, Decimal::new(100_000, 2), noon(day))
            .is_ok());
    }
}
