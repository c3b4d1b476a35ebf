use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;

use super::horizontal_bar::{pair_items, PairedItem};
use super::{combine_stats, percentage, HorizontalBarData};
use crate::config::*;
use crate::processor::ComparisonStrategy;

/// The order of the rows, from the bottom of the chart to the top.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DumbbellSort {
    /// Current-year value.
    Value,
    /// Signed change `current - compare`.
    Difference,
    /// Size of the change. The longest dumbbell ends up at the top.
    AbsoluteDifference,
}

impl Default for DumbbellSort {
    fn default() -> Self {
        DumbbellSort::AbsoluteDifference
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DumbbellOptions {
    /// Defaults to true.
    pub normalize_to_percentage: Option<bool>,
    /// Defaults to the normalization setting.
    pub format_as_percentage: Option<bool>,
    pub sort_by: DumbbellSort,
}

impl DumbbellOptions {
    pub fn normalize(&self) -> bool {
        self.normalize_to_percentage.unwrap_or(true)
    }

    pub fn format_percent(&self) -> bool {
        self.format_as_percentage.unwrap_or_else(|| self.normalize())
    }
}

/// One line per label, going from the compare-year value to the current-year
/// value, with a marker at each end.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct DumbbellStrategy {
    pub options: DumbbellOptions,
}

impl DumbbellStrategy {
    pub fn new(options: DumbbellOptions) -> DumbbellStrategy {
        DumbbellStrategy { options }
    }

    fn sorted_items(
        &self,
        current: &HorizontalBarData,
        compare: &HorizontalBarData,
    ) -> Vec<PairedItem> {
        let mut items = pair_items(current, compare);
        if self.options.normalize() {
            for item in items.iter_mut() {
                item.current = percentage(item.current, current.stats.number_of_responses);
                item.compare = percentage(item.compare, compare.stats.number_of_responses);
            }
        }
        match self.options.sort_by {
            DumbbellSort::Value => items.sort_by(|a, b| a.current.total_cmp(&b.current)),
            DumbbellSort::Difference => {
                items.sort_by(|a, b| (a.current - a.compare).total_cmp(&(b.current - b.compare)))
            }
            DumbbellSort::AbsoluteDifference => items.sort_by(|a, b| {
                (a.current - a.compare)
                    .abs()
                    .total_cmp(&(b.current - b.compare).abs())
            }),
        }
        items
    }

    fn hover_template(&self, year: &str) -> String {
        if self.options.format_percent() {
            format!("<b>{}</b>: %{{x:.1f}}%<extra></extra>", year)
        } else {
            format!("<b>{}</b>: %{{x}}<extra></extra>", year)
        }
    }

    fn markers(&self, name: &str, xs: Vec<f64>, items: &[PairedItem], color: &str) -> JSValue {
        json!({
            "type": "scatter",
            "mode": "markers",
            "name": name,
            "x": xs,
            "y": items.iter().map(|i| i.label.clone()).collect::<Vec<String>>(),
            "marker": {
                "color": color,
                "size": 10,
                "symbol": "circle",
            },
            "hovertemplate": self.hover_template(name),
        })
    }
}

impl ComparisonStrategy<HorizontalBarData> for DumbbellStrategy {
    fn compare(
        &self,
        current: &HorizontalBarData,
        compare: &HorizontalBarData,
        current_year: &str,
        compare_year: &str,
        palette: &ChartPalette,
    ) -> Option<ChartProcessorResult> {
        let items = self.sorted_items(current, compare);

        // Each segment is followed by a null to break the line.
        let mut line_x: Vec<Option<f64>> = Vec::new();
        let mut line_y: Vec<Option<String>> = Vec::new();
        for item in items.iter() {
            line_x.extend([Some(item.compare), Some(item.current), None]);
            line_y.extend([Some(item.label.clone()), Some(item.label.clone()), None]);
        }
        let connectors = json!({
            "type": "scatter",
            "mode": "lines",
            "x": line_x,
            "y": line_y,
            "line": {
                "color": palette.grey02,
                "width": 2,
            },
            "showlegend": false,
            "hoverinfo": "skip",
        });

        let compare_markers = self.markers(
            compare_year,
            items.iter().map(|i| i.compare).collect(),
            &items,
            &palette.spring,
        );
        let current_markers = self.markers(
            current_year,
            items.iter().map(|i| i.current).collect(),
            &items,
            &palette.berry,
        );

        let percent = self.options.format_percent();
        let layout = json!({
            "xaxis": {
                "showgrid": true,
                "zeroline": false,
                "gridcolor": palette.grey02,
                "title": { "text": if percent { "% of Respondents" } else { "Value" } },
                "ticksuffix": if percent { "%" } else { "" },
            },
            "yaxis": {
                "type": "category",
                "showgrid": false,
                "automargin": true,
                "ticks": "outside",
                "tickcolor": "rgba(0,0,0,0)",
            },
            "legend": {
                "orientation": "h",
                "yanchor": "bottom",
                "y": 1.02,
                "xanchor": "right",
                "x": 1,
            },
        });

        Some(ChartProcessorResult::Traces {
            traces: vec![connectors, compare_markers, current_markers],
            layout: Some(layout),
            stats: combine_stats(&current.stats, &compare.stats),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::BarItem;

    fn data(items: &[(&str, f64)], responses: u64) -> HorizontalBarData {
        HorizontalBarData {
            items: items
                .iter()
                .map(|(label, value)| BarItem {
                    label: label.to_string(),
                    value: *value,
                })
                .collect(),
            stats: Stats::new(responses),
        }
    }

    fn run(
        strategy: &DumbbellStrategy,
        current: &HorizontalBarData,
        compare: &HorizontalBarData,
    ) -> (Vec<JSValue>, JSValue, Stats) {
        match strategy.compare(current, compare, "2026", "2025", &ChartPalette::default()) {
            Some(ChartProcessorResult::Traces {
                traces,
                layout: Some(layout),
                stats,
            }) => (traces, layout, stats),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn defaults() {
        let o = DumbbellOptions::default();
        assert!(o.normalize());
        assert!(o.format_percent());
        assert_eq!(o.sort_by, DumbbellSort::AbsoluteDifference);

        let o = DumbbellOptions {
            normalize_to_percentage: Some(false),
            ..DumbbellOptions::default()
        };
        assert!(!o.format_percent());
    }

    #[test]
    fn percentages_sorted_by_absolute_difference() {
        let current = data(&[("A", 1.0), ("B", 3.0)], 4);
        let compare = data(&[("A", 1.0), ("B", 1.0)], 2);
        let (traces, layout, stats) = run(&DumbbellStrategy::default(), &current, &compare);
        assert_eq!(traces.len(), 3);
        // A: 25 vs 50 (diff 25), B: 75 vs 50 (diff 25), stable order.
        assert_eq!(traces[2]["y"], json!(["A", "B"]));
        assert_eq!(traces[2]["x"], json!([25.0, 75.0]));
        assert_eq!(traces[1]["x"], json!([50.0, 50.0]));
        assert_eq!(traces[0]["x"], json!([50.0, 25.0, null, 50.0, 75.0, null]));
        assert_eq!(traces[0]["y"], json!(["A", "A", null, "B", "B", null]));
        assert_eq!(traces[1]["name"], json!("2025"));
        assert_eq!(traces[2]["hovertemplate"], json!("<b>2026</b>: %{x:.1f}%<extra></extra>"));
        assert_eq!(layout["xaxis"]["ticksuffix"], json!("%"));
        assert_eq!(stats, Stats::new(6));
    }

    #[test]
    fn raw_values_sorted_by_signed_difference() {
        let strategy = DumbbellStrategy::new(DumbbellOptions {
            normalize_to_percentage: Some(false),
            format_as_percentage: None,
            sort_by: DumbbellSort::Difference,
        });
        let current = data(&[("up", 5.0), ("down", 1.0), ("flat", 2.0)], 8);
        let compare = data(&[("up", 1.0), ("down", 4.0), ("flat", 2.0)], 7);
        let (traces, layout, _) = run(&strategy, &current, &compare);
        assert_eq!(traces[2]["y"], json!(["down", "flat", "up"]));
        assert_eq!(traces[2]["x"], json!([1.0, 2.0, 5.0]));
        assert_eq!(traces[2]["hovertemplate"], json!("<b>2026</b>: %{x}<extra></extra>"));
        assert_eq!(layout["xaxis"]["title"]["text"], json!("Value"));
    }

    #[test]
    fn empty_year_counts_as_one_response() {
        let strategy = DumbbellStrategy::new(DumbbellOptions {
            sort_by: DumbbellSort::Value,
            ..DumbbellOptions::default()
        });
        let current = data(&[("A", 2.0)], 4);
        let compare = data(&[], 0);
        let (traces, _, stats) = run(&strategy, &current, &compare);
        assert_eq!(traces[1]["x"], json!([0.0]));
        assert_eq!(traces[2]["x"], json!([50.0]));
        assert_eq!(stats, Stats::new(4));
    }
}
