//! Personal finance ledger: a flat list of income and expense transactions,
//! persisted in one storage slot, with totals, month buckets, and chart data
//! derived on demand.

pub mod aggregate;
pub mod chart;
pub mod commands;
pub mod contracts;
pub mod error;
pub mod ledger_csv;
pub mod migrations;
pub mod model;
pub mod session;
pub mod setup;
pub mod state;
pub mod storage;
pub mod store;
pub mod summary;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use model::{Amount, Transaction, TransactionDraft, TransactionId, TransactionKind};
pub use session::{DashboardCapture, Presenter, Session};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage};
pub use store::{STORAGE_KEY, TransactionStore};
pub use summary::Summary;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
