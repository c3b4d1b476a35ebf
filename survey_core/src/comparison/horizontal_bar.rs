use serde_json::json;
use serde_json::Value as JSValue;
use std::collections::HashMap;

use super::{combine_stats, union_labels, HorizontalBarData, FONT_FAMILY};
use crate::config::*;

/// Value of each label for both years. Labels present in only one year are 0
/// for the other.
pub(crate) struct PairedItem {
    pub label: String,
    pub current: f64,
    pub compare: f64,
}

pub(crate) fn pair_items(
    current: &HorizontalBarData,
    compare: &HorizontalBarData,
) -> Vec<PairedItem> {
    let current_map: HashMap<&str, f64> = current
        .items
        .iter()
        .map(|i| (i.label.as_str(), i.value))
        .collect();
    let compare_map: HashMap<&str, f64> = compare
        .items
        .iter()
        .map(|i| (i.label.as_str(), i.value))
        .collect();
    union_labels(
        current.items.iter().map(|i| i.label.as_str()),
        compare.items.iter().map(|i| i.label.as_str()),
    )
    .into_iter()
    .map(|label| PairedItem {
        current: current_map.get(label.as_str()).cloned().unwrap_or(0.0),
        compare: compare_map.get(label.as_str()).cloned().unwrap_or(0.0),
        label,
    })
    .collect()
}

fn bar_trace(
    name: &str,
    items: &[PairedItem],
    value: fn(&PairedItem) -> f64,
    color: &str,
    palette: &ChartPalette,
) -> JSValue {
    json!({
        "type": "bar",
        "orientation": "h",
        "name": name,
        "x": items.iter().map(value).collect::<Vec<f64>>(),
        "y": items.iter().map(|i| i.label.clone()).collect::<Vec<String>>(),
        "marker": { "color": color },
        "text": items.iter().map(|i| value(i).to_string()).collect::<Vec<String>>(),
        "textposition": "outside",
        "textfont": {
            "family": FONT_FAMILY,
            "size": 12,
            "color": palette.grey,
        },
        "cliponaxis": false,
        "hoverinfo": "x+name",
    })
}

/// Grouped horizontal bars, one bar per year for each label.
///
/// Labels are sorted by their value in the current year, smallest first, so
/// that the largest bar ends up at the top of a horizontal chart.
pub fn horizontal_bar_comparison(
    current: &HorizontalBarData,
    compare: &HorizontalBarData,
    current_year: &str,
    compare_year: &str,
    palette: &ChartPalette,
) -> Option<ChartProcessorResult> {
    let mut items = pair_items(current, compare);
    items.sort_by(|a, b| a.current.total_cmp(&b.current));

    let traces = vec![
        bar_trace(current_year, &items, |i| i.current, &palette.berry, palette),
        bar_trace(compare_year, &items, |i| i.compare, &palette.spring, palette),
    ];
    Some(ChartProcessorResult::traces(
        traces,
        combine_stats(&current.stats, &compare.stats),
    ))
}
