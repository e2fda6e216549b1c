//! Types module
//!
//! Contains core data structures used throughout the crate.
//! This module organizes types into logical submodules:
//! - `card`: Card records, status enumeration, and number masking
//! - `principal`: Authenticated principals and their roles
//! - `transaction`: Ledger rows and their display projections
//! - `limit`: The daily withdrawal limit
//! - `error`: Error types for the engine

pub mod card;
pub mod error;
pub mod limit;
pub mod principal;
pub mod transaction;

pub use card::{mask_card_number, Card, CardId, CardStatus, CardView};
pub use error::{EngineError, ErrorKind};
pub use limit::{default_daily_limit, Limit, DAILY_LIMIT_NAME};
pub use principal::{Principal, Role, UserId};
pub use transaction::{
    Transaction, TransactionDraft, TransactionId, TransactionType, TransactionView,
    TransferSummary,
};
