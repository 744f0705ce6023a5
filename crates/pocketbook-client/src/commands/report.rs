use std::path::Path;

use crate::ClientResult;
use crate::aggregate::default_year;
use crate::chart::ChartDataset;
use crate::contracts::envelope::SuccessEnvelope;
use crate::contracts::types::{DashData, MonthlyData, SummaryData, YearsData};
use crate::session::{DashboardCapture, Session};
use crate::setup::open_store;

#[derive(Debug, Default)]
pub struct SummaryOptions<'a> {
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct MonthlyOptions<'a> {
    /// Year to bucket; the newest year on record when `None`.
    pub year: Option<i32>,
    /// List every month ever seen instead of one year.
    pub all_months: bool,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct YearsOptions<'a> {
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct DashOptions<'a> {
    pub year: Option<i32>,
    pub home_override: Option<&'a Path>,
}

pub fn summary() -> ClientResult<SuccessEnvelope> {
    summary_with_options(SummaryOptions::default())
}

#[doc(hidden)]
pub fn summary_with_options(options: SummaryOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (_, store) = open_store(options.home_override)?;
    SuccessEnvelope::new("summary", SummaryData::from_summary(store.summarize()))
}

pub fn monthly(year: Option<i32>, all_months: bool) -> ClientResult<SuccessEnvelope> {
    monthly_with_options(MonthlyOptions {
        year,
        all_months,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn monthly_with_options(options: MonthlyOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (_, store) = open_store(options.home_override)?;
    let data = if options.all_months {
        MonthlyData {
            year: None,
            buckets: store.monthly_history(),
        }
    } else {
        let year = options
            .year
            .unwrap_or_else(|| default_year(&store.available_years()));
        let aggregate = store.monthly_aggregate(year);
        MonthlyData {
            year: Some(aggregate.year),
            buckets: aggregate.buckets,
        }
    };
    SuccessEnvelope::new("monthly", data)
}

pub fn years() -> ClientResult<SuccessEnvelope> {
    years_with_options(YearsOptions::default())
}

#[doc(hidden)]
pub fn years_with_options(options: YearsOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (_, store) = open_store(options.home_override)?;
    SuccessEnvelope::new(
        "years",
        YearsData {
            years: store.available_years(),
        },
    )
}

pub fn dash(year: Option<i32>) -> ClientResult<SuccessEnvelope> {
    dash_with_options(DashOptions {
        year,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn dash_with_options(options: DashOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (_, store) = open_store(options.home_override)?;
    let session = Session::open_at_year(store, DashboardCapture::default(), options.year);
    let selected_year = session.selected_year();
    let fallback_chart = || {
        ChartDataset::monthly_overview(&session.store().monthly_aggregate(selected_year))
    };
    let chart = session
        .presenter()
        .chart
        .clone()
        .unwrap_or_else(fallback_chart);
    let capture = session.presenter();

    let data = DashData {
        transactions: capture.transactions.clone(),
        totals: SummaryData::from_summary(capture.summary),
        years: capture.years.clone(),
        selected_year,
        chart,
    };
    SuccessEnvelope::new("dash", data)
}
