use serde_json::json;

use super::{combine_stats, percentage, union_labels, HorizontalBarData, FONT_FAMILY};
use crate::config::*;

fn share_of(data: &HorizontalBarData, label: &str) -> f64 {
    data.value_of(label)
        .map(|v| percentage(v, data.stats.number_of_responses))
        .unwrap_or(0.0)
}

/// Compare year on the x axis, current year on the y axis, both as
/// percentages of the responses of their year.
///
/// Points above the dotted diagonal grew between the two years. Suited to
/// charts with many labels, where grouped bars get crowded.
pub fn scatter_plot_comparison(
    current: &HorizontalBarData,
    compare: &HorizontalBarData,
    current_year: &str,
    compare_year: &str,
    palette: &ChartPalette,
) -> Option<ChartProcessorResult> {
    let labels = union_labels(
        current.items.iter().map(|i| i.label.as_str()),
        compare.items.iter().map(|i| i.label.as_str()),
    );
    let xs: Vec<f64> = labels.iter().map(|l| share_of(compare, l)).collect();
    let ys: Vec<f64> = labels.iter().map(|l| share_of(current, l)).collect();

    let max_value = xs.iter().chain(ys.iter()).cloned().fold(0.0, f64::max);
    let range_max = (max_value * 1.1).ceil();

    let diagonal = json!({
        "type": "scatter",
        "mode": "lines",
        "x": [0.0, range_max],
        "y": [0.0, range_max],
        "line": {
            "color": palette.grey02,
            "dash": "dot",
            "width": 2,
        },
        "hoverinfo": "skip",
        "showlegend": false,
        "opacity": 0.5,
    });
    let points = json!({
        "type": "scatter",
        "mode": "markers+text",
        "x": xs,
        "y": ys,
        "text": labels,
        "textposition": "top center",
        "textfont": {
            "family": FONT_FAMILY,
            "size": 11,
            "color": palette.night,
        },
        "marker": {
            "color": palette.berry,
            "size": 12,
            "opacity": 0.9,
            "line": { "color": "#FFFFFF", "width": 1 },
        },
        "name": "Regions",
        "hovertemplate": format!(
            "<b>%{{text}}</b><br>{}: %{{x:.1f}}%<br>{}: %{{y:.1f}}%<extra></extra>",
            compare_year, current_year
        ),
    });
    let layout = json!({
        "xaxis": {
            "title": { "text": format!("{} (%)", compare_year) },
            "range": [0.0, range_max],
            "zeroline": false,
            "showgrid": true,
            "dtick": 10,
        },
        "yaxis": {
            "title": { "text": format!("{} (%)", current_year) },
            "range": [0.0, range_max],
            "zeroline": false,
            "showgrid": true,
            "dtick": 10,
            "scaleanchor": "x",
            "scaleratio": 1,
        },
        "showlegend": false,
        "hovermode": "closest",
        "margin": { "t": 40, "r": 40, "b": 60, "l": 60 },
    });

    Some(ChartProcessorResult::Traces {
        traces: vec![diagonal, points],
        layout: Some(layout),
        stats: combine_stats(&current.stats, &compare.stats),
    })
}
