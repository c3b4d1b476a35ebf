use serde_json::json;

use super::{combine_stats, union_labels, StackedBarData, StackedSeries, FONT_FAMILY};
use crate::config::*;

const CURRENT_OPACITY: f64 = 1.0;
const COMPARE_OPACITY: f64 = 0.65;

fn series_color(label: &str, index: usize, palette: &ChartPalette) -> String {
    match label.trim().to_lowercase().as_str() {
        "yes" => palette.spring.clone(),
        "no" => palette.mandarin.clone(),
        "not sure" => palette.grey02.clone(),
        _ => {
            let fallback = [
                &palette.berry,
                &palette.light_berry,
                &palette.light_spring,
                &palette.dark_spring,
                &palette.transport,
                &palette.grey,
            ];
            fallback[index % fallback.len()].clone()
        }
    }
}

fn find<'a>(data: &'a StackedBarData, label: &str) -> Option<&'a StackedSeries> {
    data.series.iter().find(|s| s.label == label)
}

fn explicit_color(series: Option<&StackedSeries>) -> Option<String> {
    series.and_then(|s| s.color.clone()).filter(|c| !c.is_empty())
}

/// Both years stacked on the same horizontal axis.
///
/// Each category gets one row per year, `"<category> (<year>)"`, and pairs of
/// rows are separated by a blank spacer row. Spacers are made of a distinct
/// number of spaces each, so the renderer does not merge them into a single
/// category. The compare year is drawn with a reduced opacity.
pub fn stacked_bar_comparison(
    current: &StackedBarData,
    compare: &StackedBarData,
    current_year: &str,
    compare_year: &str,
    palette: &ChartPalette,
) -> Option<ChartProcessorResult> {
    let n_current = current.categories.len();
    let n_compare = compare.categories.len();
    let rows = n_current.max(n_compare);

    let mut row_labels: Vec<String> = Vec::new();
    for i in 0..rows {
        if let Some(cat) = current.categories.get(i) {
            row_labels.push(format!("{} ({})", cat, current_year));
        }
        if let Some(cat) = compare.categories.get(i) {
            row_labels.push(format!("{} ({})", cat, compare_year));
        }
        if i + 1 < rows {
            row_labels.push(" ".repeat(i + 1));
        }
    }

    let series_labels = union_labels(
        current.series.iter().map(|s| s.label.as_str()),
        compare.series.iter().map(|s| s.label.as_str()),
    );

    let mut traces = Vec::new();
    for (series_index, label) in series_labels.iter().enumerate() {
        let current_series = find(current, label);
        let compare_series = find(compare, label);
        let color = explicit_color(current_series)
            .or_else(|| explicit_color(compare_series))
            .unwrap_or_else(|| series_color(label, series_index, palette));

        let mut values: Vec<f64> = Vec::new();
        let mut opacities: Vec<f64> = Vec::new();
        let mut text: Vec<String> = Vec::new();
        let mut push = |value: f64, opacity: f64| {
            values.push(value);
            opacities.push(opacity);
            text.push(if value > 0.0 { value.to_string() } else { String::new() });
        };
        let value_at = |series: Option<&StackedSeries>, i: usize| -> f64 {
            series.and_then(|s| s.values.get(i)).cloned().unwrap_or(0.0)
        };
        for i in 0..rows {
            if i < n_current {
                push(value_at(current_series, i), CURRENT_OPACITY);
            }
            if i < n_compare {
                push(value_at(compare_series, i), COMPARE_OPACITY);
            }
            if i + 1 < rows {
                push(0.0, 0.0);
            }
        }

        traces.push(json!({
            "type": "bar",
            "name": label,
            "orientation": "h",
            "y": row_labels,
            "x": values,
            "marker": {
                "color": color,
                "opacity": opacities,
            },
            "text": text,
            "textposition": "inside",
            "insidetextanchor": "middle",
            "textfont": {
                "family": FONT_FAMILY,
                "size": 13,
                "color": "#FFFFFF",
            },
            "hoverinfo": "x+y+name",
        }));
    }

    Some(ChartProcessorResult::traces(
        traces,
        combine_stats(&current.stats, &compare.stats),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: &str, values: &[f64], color: Option<&str>) -> StackedSeries {
        StackedSeries {
            label: label.to_string(),
            values: values.to_vec(),
            color: color.map(|c| c.to_string()),
        }
    }

    #[test]
    fn interleaved_rows_with_spacers() {
        let palette = ChartPalette::default();
        let current = StackedBarData {
            categories: vec!["18-24".to_string(), "25-34".to_string()],
            series: vec![series("Yes", &[3.0, 1.0], None), series("No", &[0.0, 2.0], None)],
            stats: Stats::new(6),
        };
        let compare = StackedBarData {
            categories: vec!["18-24".to_string()],
            series: vec![series("Yes", &[2.0], None), series("Other", &[1.0], Some("#123456"))],
            stats: Stats::new(3),
        };
        let res = stacked_bar_comparison(&current, &compare, "2026", "2025", &palette).unwrap();
        let traces = match &res {
            ChartProcessorResult::Traces { traces, .. } => traces,
            _ => panic!("expected traces"),
        };
        assert_eq!(traces.len(), 3);
        let rows = json!(["18-24 (2026)", "18-24 (2025)", " ", "25-34 (2026)"]);
        assert_eq!(traces[0]["y"], rows);

        assert_eq!(traces[0]["name"], json!("Yes"));
        assert_eq!(traces[0]["x"], json!([3.0, 2.0, 0.0, 1.0]));
        assert_eq!(traces[0]["marker"]["opacity"], json!([1.0, 0.65, 0.0, 1.0]));
        assert_eq!(traces[0]["text"], json!(["3", "2", "", "1"]));
        assert_eq!(traces[0]["marker"]["color"], json!(palette.spring));

        assert_eq!(traces[1]["name"], json!("No"));
        assert_eq!(traces[1]["x"], json!([0.0, 0.0, 0.0, 2.0]));
        assert_eq!(traces[1]["marker"]["color"], json!(palette.mandarin));

        assert_eq!(traces[2]["name"], json!("Other"));
        assert_eq!(traces[2]["marker"]["color"], json!("#123456"));
        assert_eq!(res.stats(), &Stats::new(9));
    }

    #[test]
    fn fallback_colors_cycle() {
        let palette = ChartPalette::default();
        assert_eq!(series_color(" NOT SURE ", 0, &palette), palette.grey02);
        assert_eq!(series_color("Maybe", 0, &palette), palette.berry);
        assert_eq!(series_color("Maybe", 4, &palette), palette.transport);
        assert_eq!(series_color("Maybe", 6, &palette), palette.berry);
    }

    #[test]
    fn spacers_are_distinct() {
        let cats: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let data = StackedBarData {
            categories: cats,
            series: vec![series("Yes", &[1.0], None)],
            stats: Stats::new(1),
        };
        let empty = StackedBarData::default();
        let palette = ChartPalette::default();
        let res = stacked_bar_comparison(&data, &empty, "2026", "2025", &palette).unwrap();
        if let ChartProcessorResult::Traces { traces, .. } = res {
            assert_eq!(traces[0]["y"], json!(["a (2026)", " ", "b (2026)", "  ", "c (2026)"]));
            // Values beyond the series length read as 0.
            assert_eq!(traces[0]["x"], json!([1.0, 0.0, 0.0, 0.0, 0.0]));
        } else {
            panic!("expected traces");
        }
    }

    #[test]
    fn no_series() {
        let res = stacked_bar_comparison(
            &StackedBarData::default(),
            &StackedBarData::default(),
            "2026",
            "2025",
            &ChartPalette::default(),
        )
        .unwrap();
        if let ChartProcessorResult::Traces { traces, stats, .. } = res {
            assert!(traces.is_empty());
            assert_eq!(stats, Stats::new(0));
        } else {
            panic!("expected traces");
        }
    }
}
