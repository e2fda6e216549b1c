//! Daily limit storage
//!
//! Holds the single named limit value. The row is materialized with its
//! default at construction rather than on first read, so two concurrent
//! first reads cannot race to create it. It is never deleted; an
//! administrative update is the only mutation.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::info;

use crate::types::{default_daily_limit, EngineError, Limit, Principal, DAILY_LIMIT_NAME};

/// Holds the singleton daily withdrawal limit
pub struct LimitStore {
    /// Ceiling on one card's daily withdrawal total
    value: RwLock<Decimal>,
}

impl LimitStore {
    /// Create the store with the default daily limit already in place
    pub fn new() -> Self {
        LimitStore {
            value: RwLock::new(default_daily_limit()),
        }
    }

    /// Current limit projection
    pub fn current(&self) -> Limit {
        Limit {
            name: DAILY_LIMIT_NAME.to_string(),
            value: *self.value.read(),
        }
    }

    /// Overwrite the limit value (administrative)
    ///
    /// The new value is assumed validated as non-negative before it
    /// reaches the store; the store does not clamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is not an administrator.
    pub fn set(&self, principal: Principal, new_value: Decimal) -> Result<Limit, EngineError> {
        if !principal.is_admin() {
            return Err(EngineError::admin_required(principal.id, "update limit"));
        }
        *self.value.write() = new_value;
        info!(%new_value, "daily limit updated");
        Ok(self.current())
    }
}

impl Default for LimitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Principal;

    #[test]
    fn test_default_is_in_place_at_construction() {
        let store = LimitStore::new();

        let limit = store.current();
        assert_eq!(limit.name, DAILY_LIMIT_NAME);
        assert_eq!(limit.value, default_daily_limit());
    }

    #[test]
    fn test_admin_updates_limit() {
        let store = LimitStore::new();

        let updated = store
            .set(Principal::admin(1), Decimal::new(100_000, 2))
            .unwrap();
        assert_eq!(updated.value, Decimal::new(100_000, 2));
        assert_eq!(store.current().value, Decimal::new(100_000, 2));
    }

    #[test]
    fn test_user_may_not_update_limit() {
        let store = LimitStore::new();

        let result = store.set(Principal::user(2), Decimal::new(100_000, 2));
        assert!(matches!(
            result.unwrap_err(),
            EngineError::AdminRequired { .. }
        ));
        assert_eq!(store.current().value, default_daily_limit());
    }
}
