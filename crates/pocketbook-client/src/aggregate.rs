//! Month-level aggregation of the ledger for charts and reports.
//!
//! Buckets use the UTC calendar month of each transaction's date. Income is
//! the sum of non-negative amounts; expense is the sum of the magnitudes of
//! negative amounts, so both series plot upward.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::model::{Amount, Transaction};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month_label: String,
    pub income: Amount,
    pub expense: Amount,
}

impl MonthBucket {
    fn empty(month_label: &str) -> Self {
        Self {
            month_label: month_label.to_string(),
            income: Amount::ZERO,
            expense: Amount::ZERO,
        }
    }

    fn record(&mut self, amount: Amount) {
        if amount.is_negative() {
            self.expense += amount.abs();
        } else {
            self.income += amount;
        }
    }
}

/// Twelve buckets, January through December, for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub buckets: Vec<MonthBucket>,
}

impl MonthlyAggregate {
    pub fn income_series(&self) -> Vec<Amount> {
        self.buckets.iter().map(|bucket| bucket.income).collect()
    }

    pub fn expense_series(&self) -> Vec<Amount> {
        self.buckets.iter().map(|bucket| bucket.expense).collect()
    }
}

pub fn monthly_aggregate(transactions: &[Transaction], year: i32) -> MonthlyAggregate {
    let mut buckets = MONTH_LABELS
        .iter()
        .map(|label| MonthBucket::empty(label))
        .collect::<Vec<MonthBucket>>();

    for transaction in transactions {
        if transaction.date.year() != year {
            continue;
        }
        let index = transaction.date.month0() as usize;
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.record(transaction.amount);
        }
    }

    MonthlyAggregate { year, buckets }
}

/// One bucket per `YYYY-MM` that has at least one transaction, oldest first.
pub fn monthly_history(transactions: &[Transaction]) -> Vec<MonthBucket> {
    let mut by_month: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();

    for transaction in transactions {
        let key = (transaction.date.year(), transaction.date.month());
        by_month
            .entry(key)
            .or_insert_with(|| MonthBucket::empty(&format!("{:04}-{:02}", key.0, key.1)))
            .record(transaction.amount);
    }

    by_month.into_values().collect()
}

/// Distinct years present in the ledger, newest first.
pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    let years = transactions
        .iter()
        .map(|transaction| transaction.date.year())
        .collect::<BTreeSet<i32>>();
    years.into_iter().rev().collect()
}

/// The year a view opens on: the newest year on record, or the current
/// year for an empty ledger.
pub fn default_year(years: &[i32]) -> i32 {
    years.first().copied().unwrap_or_else(|| Utc::now().year())
}
