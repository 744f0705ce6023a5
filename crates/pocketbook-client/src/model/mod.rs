pub mod amount;
pub mod transaction;

pub use amount::{Amount, parse_raw_amount};
pub use transaction::{Transaction, TransactionDraft, TransactionId, TransactionKind};
