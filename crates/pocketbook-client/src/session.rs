//! Keeps a UI in step with a [`TransactionStore`].
//!
//! A [`Session`] owns one store and one [`Presenter`]. It renders every view
//! when opened and after every mutation, so the transaction list, the
//! totals, the year selector, and the chart never disagree. Chart data is
//! rebuilt from scratch on each render.

use chrono::{DateTime, Utc};

use crate::ClientResult;
use crate::aggregate::default_year;
use crate::chart::ChartDataset;
use crate::model::{Transaction, TransactionDraft, TransactionId};
use crate::storage::KeyValueStorage;
use crate::store::TransactionStore;
use crate::summary::Summary;

/// The surface a session draws on.
pub trait Presenter {
    /// The full list, in insertion order. Each row is addressed by its id.
    fn render_transactions(&mut self, transactions: &[Transaction]);

    fn render_summary(&mut self, summary: &Summary);

    fn render_year_options(&mut self, years: &[i32], selected: i32);

    /// Replaces any previously drawn chart.
    fn render_chart(&mut self, chart: ChartDataset);
}

#[derive(Debug)]
pub struct Session<S, P> {
    store: TransactionStore<S>,
    presenter: P,
    selected_year: i32,
}

impl<S: KeyValueStorage, P: Presenter> Session<S, P> {
    pub fn open(store: TransactionStore<S>, presenter: P) -> Self {
        Self::open_at_year(store, presenter, None)
    }

    /// Opens with `year` selected, or the newest year on record when `None`.
    pub fn open_at_year(store: TransactionStore<S>, presenter: P, year: Option<i32>) -> Self {
        let selected_year = year.unwrap_or_else(|| default_year(&store.available_years()));
        let mut session = Self {
            store,
            presenter,
            selected_year,
        };
        session.refresh();
        session
    }

    pub fn store(&self) -> &TransactionStore<S> {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn add(&mut self, draft: TransactionDraft) -> ClientResult<Transaction> {
        let transaction = self.store.add(draft)?;
        self.refresh();
        Ok(transaction)
    }

    pub fn add_dated(
        &mut self,
        draft: TransactionDraft,
        date: DateTime<Utc>,
    ) -> ClientResult<Transaction> {
        let transaction = self.store.add_dated(draft, date)?;
        self.refresh();
        Ok(transaction)
    }

    pub fn remove(&mut self, id: TransactionId) -> ClientResult<Option<Transaction>> {
        let removed = self.store.remove(id)?;
        self.refresh();
        Ok(removed)
    }

    pub fn import_csv(&mut self, content: &str) -> ClientResult<Vec<Transaction>> {
        let inserted = self.store.import_csv(content)?;
        self.refresh();
        Ok(inserted)
    }

    /// Changing the year only affects the chart.
    pub fn select_year(&mut self, year: i32) {
        self.selected_year = year;
        self.render_chart();
    }

    fn refresh(&mut self) {
        let years = self.store.available_years();
        if !years.is_empty() && !years.contains(&self.selected_year) {
            self.selected_year = default_year(&years);
        }

        self.presenter
            .render_transactions(self.store.transactions());
        self.presenter.render_summary(&self.store.summarize());
        self.presenter
            .render_year_options(&years, self.selected_year);
        self.render_chart();
    }

    fn render_chart(&mut self) {
        let aggregate = self.store.monthly_aggregate(self.selected_year);
        self.presenter
            .render_chart(ChartDataset::monthly_overview(&aggregate));
    }
}

/// Keeps the latest output of each view, for surfaces that print once
/// instead of redrawing.
#[derive(Debug, Clone, Default)]
pub struct DashboardCapture {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    pub years: Vec<i32>,
    pub selected_year: Option<i32>,
    pub chart: Option<ChartDataset>,
    pub renders: usize,
}

impl Presenter for DashboardCapture {
    fn render_transactions(&mut self, transactions: &[Transaction]) {
        self.transactions = transactions.to_vec();
    }

    fn render_summary(&mut self, summary: &Summary) {
        self.summary = *summary;
    }

    fn render_year_options(&mut self, years: &[i32], selected: i32) {
        self.years = years.to_vec();
        self.selected_year = Some(selected);
    }

    fn render_chart(&mut self, chart: ChartDataset) {
        self.chart = Some(chart);
        self.renders += 1;
    }
}
