use serde::Serialize;

use crate::aggregate::MonthBucket;
use crate::chart::ChartDataset;
use crate::model::{Transaction, TransactionId};
use crate::summary::{Summary, SummaryDisplay};

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub summary: Summary,
    pub display: SummaryDisplay,
}

impl SummaryData {
    pub fn from_summary(summary: Summary) -> Self {
        Self {
            summary,
            display: summary.display(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddData {
    pub transaction: Transaction,
    pub totals: SummaryData,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveData {
    pub id: TransactionId,
    pub removed: Option<Transaction>,
    pub totals: SummaryData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListData {
    pub transactions: Vec<Transaction>,
    pub totals: SummaryData,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyData {
    /// `None` when every month ever seen is listed.
    pub year: Option<i32>,
    pub buckets: Vec<MonthBucket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearsData {
    pub years: Vec<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashData {
    pub transactions: Vec<Transaction>,
    pub totals: SummaryData,
    pub years: Vec<i32>,
    pub selected_year: i32,
    pub chart: ChartDataset,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    /// Where the file was written; `None` when the content is returned inline.
    pub path: Option<String>,
    pub rows_written: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub path: String,
    pub rows_read: i64,
    pub inserted: i64,
    pub first_id: Option<TransactionId>,
    pub last_id: Option<TransactionId>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportIssue {
    pub row: i64,
    pub field: String,
    pub message: String,
}
