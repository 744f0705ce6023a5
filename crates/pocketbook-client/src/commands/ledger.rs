use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::contracts::envelope::SuccessEnvelope;
use crate::contracts::types::{AddData, ListData, RemoveData, SummaryData};
use crate::model::{TransactionDraft, TransactionId, TransactionKind, parse_raw_amount};
use crate::session::{DashboardCapture, Session};
use crate::setup::open_store;

#[derive(Debug)]
pub struct AddOptions<'a> {
    pub amount: String,
    pub kind: TransactionKind,
    pub category: String,
    pub text: Option<String>,
    /// Books the transaction at midnight UTC on this day instead of now.
    pub date: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct RemoveOptions<'a> {
    pub id: TransactionId,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ListOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn add(
    amount: &str,
    kind: TransactionKind,
    category: &str,
    text: Option<String>,
    date: Option<NaiveDate>,
) -> ClientResult<SuccessEnvelope> {
    add_with_options(AddOptions {
        amount: amount.to_string(),
        kind,
        category: category.to_string(),
        text,
        date,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn add_with_options(options: AddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let raw_amount = parse_raw_amount(&options.amount)?;
    let draft = TransactionDraft {
        raw_amount,
        kind: options.kind,
        category: options.category,
        text: options.text,
    };

    let (_, store) = open_store(options.home_override)?;
    let mut session = Session::open(store, DashboardCapture::default());
    let transaction = match options.date.and_then(|day| day.and_hms_opt(0, 0, 0)) {
        Some(naive) => session.add_dated(draft, naive.and_utc())?,
        None => session.add(draft)?,
    };

    let data = AddData {
        transaction,
        totals: SummaryData::from_summary(session.presenter().summary),
    };
    SuccessEnvelope::new("add", data)
}

pub fn remove(id: TransactionId) -> ClientResult<SuccessEnvelope> {
    remove_with_options(RemoveOptions {
        id,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn remove_with_options(options: RemoveOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (_, store) = open_store(options.home_override)?;
    let mut session = Session::open(store, DashboardCapture::default());
    let removed = session.remove(options.id)?;

    let data = RemoveData {
        id: options.id,
        removed,
        totals: SummaryData::from_summary(session.presenter().summary),
    };
    SuccessEnvelope::new("remove", data)
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(ListOptions::default())
}

#[doc(hidden)]
pub fn list_with_options(options: ListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (_, store) = open_store(options.home_override)?;
    let data = ListData {
        transactions: store.transactions().to_vec(),
        totals: SummaryData::from_summary(store.summarize()),
    };
    SuccessEnvelope::new("list", data)
}
