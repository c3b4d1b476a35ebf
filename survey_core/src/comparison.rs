/*!
Reusable renderers for two-year comparisons.

Each strategy consumes one of the shapes below, extracted independently for
the active year and for the comparison year. The combined statistics of a
comparison add the two years together.
*/

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::Stats;

pub mod dumbbell;
pub mod horizontal_bar;
pub mod scatter;
pub mod stacked_bar;
pub mod yes_no_not_sure;

pub use dumbbell::{DumbbellOptions, DumbbellSort, DumbbellStrategy};
pub use horizontal_bar::horizontal_bar_comparison;
pub use scatter::scatter_plot_comparison;
pub use stacked_bar::stacked_bar_comparison;
pub use yes_no_not_sure::yes_no_not_sure_comparison;

const FONT_FAMILY: &str = "PP Mori, sans-serif";

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BarItem {
    pub label: String,
    pub value: f64,
}

/// Labelled values, typically counts per answer.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorizontalBarData {
    pub items: Vec<BarItem>,
    pub stats: Stats,
}

impl HorizontalBarData {
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.items.iter().find(|i| i.label == label).map(|i| i.value)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YesNoNotSureCounts {
    pub yes: u64,
    pub no: u64,
    pub not_sure: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct YesNoNotSureData {
    pub counts: YesNoNotSureCounts,
    pub stats: Stats,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StackedSeries {
    /// e.g. `Yes`, `No`, `Not sure`
    pub label: String,
    /// One value per category.
    pub values: Vec<f64>,
    pub color: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackedBarData {
    /// e.g. age groups or roles
    pub categories: Vec<String>,
    pub series: Vec<StackedSeries>,
    pub stats: Stats,
}

/// Adds the statistics of two years.
///
/// The eligible population is only reported when at least one year reported
/// a non-zero one.
pub fn combine_stats(current: &Stats, compare: &Stats) -> Stats {
    let combined_eligible =
        current.total_eligible.unwrap_or(0) + compare.total_eligible.unwrap_or(0);
    Stats {
        number_of_responses: current.number_of_responses + compare.number_of_responses,
        total_eligible: if combined_eligible > 0 {
            Some(combined_eligible)
        } else {
            None
        },
    }
}

/// All the labels of both years, each once, in first-seen order.
pub(crate) fn union_labels<'a>(
    current: impl Iterator<Item = &'a str>,
    compare: impl Iterator<Item = &'a str>,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    current
        .chain(compare)
        .filter(|l| seen.insert(l))
        .map(|l| l.to_string())
        .collect()
}

/// A value as a percentage of a total. A zero total counts as one.
pub(crate) fn percentage(value: f64, total: u64) -> f64 {
    let denominator = if total == 0 { 1 } else { total };
    value / denominator as f64 * 100.0
}
