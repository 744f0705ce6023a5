//! The authoritative transaction list.
//!
//! A [`TransactionStore`] loads its list once, when constructed, from a
//! single storage slot. Every mutation writes the whole list back before
//! returning, so storage never lags behind memory. Derived views (totals,
//! month buckets, years, export text) are computed on demand and never
//! cached.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::aggregate::{self, MonthBucket, MonthlyAggregate};
use crate::contracts::types::ImportIssue;
use crate::ledger_csv::{self, ImportRow};
use crate::model::{Amount, Transaction, TransactionDraft, TransactionId};
use crate::storage::KeyValueStorage;
use crate::summary::Summary;
use crate::{ClientError, ClientResult};

pub const STORAGE_KEY: &str = "transactions";

#[derive(Debug)]
pub struct TransactionStore<S> {
    storage: S,
    transactions: Vec<Transaction>,
    /// `None` once the id space is used up.
    next_id: Option<TransactionId>,
}

impl<S: KeyValueStorage> TransactionStore<S> {
    /// Reads the stored list. A missing or unreadable blob starts an empty
    /// ledger; storage failures are returned.
    pub fn load(storage: S) -> ClientResult<Self> {
        let transactions = match storage.get(STORAGE_KEY)? {
            Some(blob) => decode_ledger(&blob),
            None => Vec::new(),
        };
        let next_id = transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .map_or(Some(1), |id| id.checked_add(1));

        tracing::debug!(count = transactions.len(), ?next_id, "loaded ledger");
        Ok(Self {
            storage,
            transactions,
            next_id,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn add(&mut self, draft: TransactionDraft) -> ClientResult<Transaction> {
        self.add_dated(draft, Utc::now())
    }

    /// Validates the draft, appends it with the next id, and persists.
    /// Nothing changes when validation or the write fails.
    pub fn add_dated(
        &mut self,
        draft: TransactionDraft,
        date: DateTime<Utc>,
    ) -> ClientResult<Transaction> {
        let magnitude = Amount::from_major(draft.raw_amount.abs())
            .ok_or_else(|| ClientError::invalid_amount(&draft.raw_amount.to_string()))?;
        let amount = draft.kind.signed(magnitude);
        if self.summarize().checked_record(amount).is_none() {
            return Err(ClientError::amount_exceeds_ledger_limit(&amount.to_string()));
        }
        let transaction = Transaction {
            id: self.allocate_id()?,
            amount,
            category: draft.category.trim().to_string(),
            date,
            text: draft
                .text
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        };

        self.transactions.push(transaction.clone());
        if let Err(error) = self.persist() {
            self.transactions.pop();
            self.next_id = Some(transaction.id);
            return Err(error);
        }

        tracing::info!(
            id = transaction.id,
            amount = %transaction.amount,
            category = %transaction.category,
            "added transaction"
        );
        Ok(transaction)
    }

    /// Drops the transaction with `id`. An unknown id leaves the list as it
    /// was and is not an error.
    pub fn remove(&mut self, id: TransactionId) -> ClientResult<Option<Transaction>> {
        let previous = self.transactions.clone();
        let position = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id);
        let removed = position.map(|index| self.transactions.remove(index));

        if let Err(error) = self.persist() {
            self.transactions = previous;
            return Err(error);
        }

        match &removed {
            Some(_) => tracing::info!(id, "removed transaction"),
            None => tracing::debug!(id, "remove ignored unknown id"),
        }
        Ok(removed)
    }

    /// Adds every row of an exported CSV. Rows are validated up front; the
    /// ledger is written once after all rows are appended.
    pub fn import_csv(&mut self, content: &str) -> ClientResult<Vec<Transaction>> {
        let rows = ledger_csv::read_import(content)?;
        self.check_import_totals(&rows)?;
        let previous_len = self.transactions.len();
        let previous_next_id = self.next_id;

        let mut inserted = Vec::with_capacity(rows.len());
        let mut appended = Ok(());
        for row in rows {
            match self.transaction_from_import(row) {
                Ok(transaction) => {
                    self.transactions.push(transaction.clone());
                    inserted.push(transaction);
                }
                Err(error) => {
                    appended = Err(error);
                    break;
                }
            }
        }

        if let Err(error) = appended.and_then(|()| self.persist()) {
            self.transactions.truncate(previous_len);
            self.next_id = previous_next_id;
            return Err(error);
        }

        tracing::info!(count = inserted.len(), "imported transactions");
        Ok(inserted)
    }

    pub fn summarize(&self) -> Summary {
        Summary::from_transactions(&self.transactions)
    }

    pub fn monthly_aggregate(&self, year: i32) -> MonthlyAggregate {
        aggregate::monthly_aggregate(&self.transactions, year)
    }

    pub fn monthly_history(&self) -> Vec<MonthBucket> {
        aggregate::monthly_history(&self.transactions)
    }

    pub fn available_years(&self) -> Vec<i32> {
        aggregate::available_years(&self.transactions)
    }

    pub fn export_csv(&self) -> ClientResult<String> {
        ledger_csv::write_export(&self.transactions)
    }

    /// Replays the rows over the current totals and reports each row that
    /// would push income or expense out of range.
    fn check_import_totals(&self, rows: &[ImportRow]) -> ClientResult<()> {
        let mut totals = self.summarize();
        let mut issues = Vec::new();
        for row in rows {
            match totals.checked_record(row.kind.signed(row.magnitude)) {
                Some(next) => totals = next,
                None => issues.push(ImportIssue {
                    row: row.row,
                    field: "Amount".to_string(),
                    message: "Amount would push ledger totals past the largest amount Pocketbook can store."
                        .to_string(),
                }),
            }
        }

        if issues.is_empty() {
            return Ok(());
        }
        Err(ClientError::import_validation_failed(rows.len() as i64, issues))
    }

    fn transaction_from_import(&mut self, row: ImportRow) -> ClientResult<Transaction> {
        Ok(Transaction {
            id: self.allocate_id()?,
            amount: row.kind.signed(row.magnitude),
            category: row.category,
            date: row.date,
            text: row.text,
        })
    }

    fn allocate_id(&mut self) -> ClientResult<TransactionId> {
        let id = self.next_id.ok_or_else(|| {
            ClientError::new(
                "internal_id_exhausted",
                "No transaction ids are left in this ledger.",
                Vec::new(),
            )
        })?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }

    fn persist(&mut self) -> ClientResult<()> {
        let blob = serde_json::to_string(&self.transactions)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
        self.storage.set(STORAGE_KEY, &blob)
    }
}

/// Decodes the stored JSON array. A blob that is not an array yields an
/// empty list; individual records that fail to decode, or repeat an earlier
/// id, are skipped.
fn decode_ledger(blob: &str) -> Vec<Transaction> {
    let items = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Null) => return Vec::new(),
        Ok(_) => {
            tracing::warn!("stored ledger is not a JSON array; starting empty");
            return Vec::new();
        }
        Err(error) => {
            tracing::warn!(%error, "stored ledger is not valid JSON; starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut transactions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(item) {
            Ok(transaction) if seen.insert(transaction.id) => transactions.push(transaction),
            Ok(transaction) => {
                tracing::warn!(index, id = transaction.id, "skipping duplicate transaction id");
            }
            Err(error) => {
                tracing::warn!(index, %error, "skipping unreadable transaction");
            }
        }
    }
    transactions
}
