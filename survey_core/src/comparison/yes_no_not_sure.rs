use serde_json::json;
use serde_json::Value as JSValue;

use super::{combine_stats, YesNoNotSureCounts, YesNoNotSureData, FONT_FAMILY};
use crate::config::*;

pub const YES_NO_NOT_SURE_LABELS: [&str; 3] = ["Yes", "No", "Not sure"];

impl YesNoNotSureCounts {
    /// The counts in the order of [`YES_NO_NOT_SURE_LABELS`].
    pub fn values(&self) -> [u64; 3] {
        [self.yes, self.no, self.not_sure]
    }
}

fn bar(name: &str, values: [u64; 3], color: &str, palette: &ChartPalette) -> JSValue {
    json!({
        "type": "bar",
        "name": name,
        "x": YES_NO_NOT_SURE_LABELS,
        "y": values,
        "marker": { "color": color },
        "text": values.iter().map(|v| v.to_string()).collect::<Vec<String>>(),
        "textposition": "outside",
        "textfont": {
            "family": FONT_FAMILY,
            "size": 12,
            "color": palette.grey,
        },
        "cliponaxis": false,
        "hoverinfo": "y+name",
    })
}

/// Grouped vertical bars over the three fixed answers.
pub fn yes_no_not_sure_comparison(
    current: &YesNoNotSureData,
    compare: &YesNoNotSureData,
    current_year: &str,
    compare_year: &str,
    palette: &ChartPalette,
) -> Option<ChartProcessorResult> {
    let traces = vec![
        bar(current_year, current.counts.values(), &palette.berry, palette),
        bar(compare_year, compare.counts.values(), &palette.spring, palette),
    ];
    Some(ChartProcessorResult::traces(
        traces,
        combine_stats(&current.stats, &compare.stats),
    ))
}
