use serde::Serialize;

use crate::model::{Amount, Transaction};

/// Running totals over the whole ledger. `expense` keeps its sign, so
/// `income + expense == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: Amount,
    pub income: Amount,
    pub expense: Amount,
}

impl Summary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self::default();
        for transaction in transactions {
            summary.total += transaction.amount;
            if transaction.amount.is_negative() {
                summary.expense += transaction.amount;
            } else {
                summary.income += transaction.amount;
            }
        }
        summary
    }

    /// The totals after one more transaction, or `None` when income or
    /// expense would leave the range an [`Amount`] holds exactly.
    pub fn checked_record(self, amount: Amount) -> Option<Self> {
        let mut next = self;
        if amount.is_negative() {
            next.expense = self.expense.checked_add(amount)?;
        } else {
            next.income = self.income.checked_add(amount)?;
        }
        next.total = next.income + next.expense;
        Some(next)
    }

    pub fn expense_magnitude(&self) -> Amount {
        self.expense.abs()
    }

    pub fn display(&self) -> SummaryDisplay {
        SummaryDisplay {
            balance: format_money(self.total),
            income: format!("+{}", format_money(self.income)),
            expense: format!("-{}", format_money(self.expense_magnitude())),
        }
    }
}

/// The three summary figures as display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryDisplay {
    pub balance: String,
    pub income: String,
    pub expense: String,
}

/// `$750.00`, `-$250.00`.
pub fn format_money(amount: Amount) -> String {
    if amount.is_negative() {
        format!("-${}", amount.abs())
    } else {
        format!("${amount}")
    }
}
