use serde::Serialize;

use crate::aggregate::MonthlyAggregate;
use crate::model::Amount;

pub const INCOME_SERIES_LABEL: &str = "Income";
pub const EXPENSE_SERIES_LABEL: &str = "Expense";
pub const INCOME_COLOR: &str = "#708238";
pub const EXPENSE_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub values: Vec<Amount>,
}

/// Input for a grouped bar chart. A new dataset is built for every render;
/// chart surfaces replace whatever they drew before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartDataset {
    pub fn monthly_overview(aggregate: &MonthlyAggregate) -> Self {
        Self {
            title: format!("Monthly Overview - {}", aggregate.year),
            labels: aggregate
                .buckets
                .iter()
                .map(|bucket| bucket.month_label.clone())
                .collect(),
            series: vec![
                ChartSeries {
                    label: INCOME_SERIES_LABEL.to_string(),
                    color: INCOME_COLOR.to_string(),
                    values: aggregate.income_series(),
                },
                ChartSeries {
                    label: EXPENSE_SERIES_LABEL.to_string(),
                    color: EXPENSE_COLOR.to_string(),
                    values: aggregate.expense_series(),
                },
            ],
        }
    }

    /// Largest single value across all series, used to scale bars.
    pub fn peak(&self) -> Amount {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .max()
            .unwrap_or(Amount::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartDataset, EXPENSE_COLOR, INCOME_COLOR};
    use crate::aggregate::monthly_aggregate;
    use crate::model::Amount;

    #[test]
    fn empty_year_has_two_flat_series() {
        let dataset = ChartDataset::monthly_overview(&monthly_aggregate(&[], 2026));
        assert_eq!(dataset.title, "Monthly Overview - 2026");
        assert_eq!(dataset.labels.len(), 12);
        assert_eq!(dataset.labels[0], "Jan");
        assert_eq!(dataset.series.len(), 2);
        assert_eq!(dataset.series[0].label, "Income");
        assert_eq!(dataset.series[0].color, INCOME_COLOR);
        assert_eq!(dataset.series[1].label, "Expense");
        assert_eq!(dataset.series[1].color, EXPENSE_COLOR);
        assert!(dataset.series.iter().all(|series| series.values.len() == 12));
        assert_eq!(dataset.peak(), Amount::ZERO);
    }
}
