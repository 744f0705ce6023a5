use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use crate::{ClientError, ClientResult};

pub type TransactionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn for_amount(amount: Amount) -> Self {
        if amount.is_negative() {
            Self::Expense
        } else {
            Self::Income
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Applies the direction to a user-entered magnitude. The sign of the
    /// input is discarded.
    pub fn signed(self, magnitude: Amount) -> Amount {
        match self {
            Self::Income => magnitude.abs(),
            Self::Expense => -magnitude.abs(),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ClientError;

    fn from_str(value: &str) -> ClientResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ClientError::invalid_argument(&format!(
                "Transaction type `{value}` must be `income` or `expense`."
            ))),
        }
    }
}

/// What a caller supplies to create a transaction. The amount is the raw
/// user value; it is validated and sign-adjusted by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub raw_amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub text: Option<String>,
}

impl TransactionDraft {
    pub fn new(raw_amount: f64, kind: TransactionKind, category: &str) -> Self {
        Self {
            raw_amount,
            kind,
            category: category.to_string(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTransaction")]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Amount,
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::for_amount(self.amount)
    }
}

/// On-disk layout. Older ledgers carry no `date`; their id is the creation
/// time in Unix milliseconds.
#[derive(Debug, Deserialize)]
struct StoredTransaction {
    id: TransactionId,
    amount: Amount,
    #[serde(default)]
    category: String,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    text: Option<String>,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = String;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        let date = match stored.date {
            Some(date) => date,
            None => i64::try_from(stored.id)
                .ok()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .ok_or_else(|| {
                    format!(
                        "transaction {} has no date and its id is not a timestamp",
                        stored.id
                    )
                })?,
        };
        Ok(Self {
            id: stored.id,
            amount: stored.amount,
            category: stored.category,
            date,
            text: stored.text.filter(|value| !value.is_empty()),
        })
    }
}
