// The generic analytics routines driven by the configuration.

use std::collections::HashMap;

use crate::dashboard::*;

use survey_core::comparison::*;

/// The columns of a chart, resolved from their configuration names.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChartColumns {
    /// The main column first, then the fallbacks.
    answer: Vec<SurveyColumnKey>,
    filter: Option<(SurveyColumnKey, String)>,
    split: Option<SurveyColumnKey>,
}

fn resolve(graph_id: &str, name: &str) -> DashboardResult<SurveyColumnKey> {
    SurveyColumnKey::parse(name).context(InvalidChartSnafu { graph_id })
}

impl ChartColumns {
    pub fn from_config(chart: &ChartConfig) -> DashboardResult<ChartColumns> {
        let graph_id = chart.graph_id.as_str();
        let mut answer = vec![resolve(graph_id, &chart.column)?];
        for name in chart.fallback_columns.iter() {
            answer.push(resolve(graph_id, name)?);
        }
        let filter = match (&chart.filter_column, &chart.filter_value) {
            (Some(column), Some(value)) => Some((resolve(graph_id, column)?, value.clone())),
            (None, None) => None,
            _ => whatever!(
                "Chart {}: filterColumn and filterValue must be given together",
                graph_id
            ),
        };
        let split = match &chart.split_column {
            Some(name) => Some(resolve(graph_id, name)?),
            None => None,
        };
        Ok(ChartColumns { answer, filter, split })
    }

    fn answer_of<'r>(&self, response: &'r SurveyResponse) -> &'r str {
        response.first_non_empty(&self.answer)
    }

    /// The respondents the chart is about.
    fn eligible<'r>(&self, responses: &'r [SurveyResponse]) -> Vec<&'r SurveyResponse> {
        responses
            .iter()
            .filter(|r| match &self.filter {
                Some((key, value)) => r.get(*key) == value,
                None => true,
            })
            .collect()
    }

    /// Only a filtered chart has its own eligible population.
    fn stats(&self, answered: usize, eligible: usize) -> Stats {
        if self.filter.is_some() {
            Stats::with_eligible(answered as u64, eligible as u64)
        } else {
            Stats::new(answered as u64)
        }
    }

    /// Number of respondents per answer, in the order answers first appear.
    pub fn value_counts(&self, responses: &[SurveyResponse]) -> HorizontalBarData {
        let eligible = self.eligible(responses);
        let mut items: Vec<BarItem> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut answered = 0;
        for r in eligible.iter() {
            let answer = self.answer_of(r);
            if answer.is_empty() {
                continue;
            }
            answered += 1;
            match positions.get(answer) {
                Some(pos) => items[*pos].value += 1.0,
                None => {
                    positions.insert(answer, items.len());
                    items.push(BarItem {
                        label: answer.to_string(),
                        value: 1.0,
                    });
                }
            }
        }
        HorizontalBarData {
            items,
            stats: self.stats(answered, eligible.len()),
        }
    }

    pub fn yes_no_not_sure(&self, responses: &[SurveyResponse]) -> YesNoNotSureData {
        let eligible = self.eligible(responses);
        let mut counts = YesNoNotSureCounts::default();
        for r in eligible.iter() {
            match self.answer_of(r).trim().to_lowercase().as_str() {
                "yes" => counts.yes += 1,
                "no" => counts.no += 1,
                "not sure" => counts.not_sure += 1,
                _ => {}
            }
        }
        let answered = (counts.yes + counts.no + counts.not_sure) as usize;
        YesNoNotSureData {
            counts,
            stats: self.stats(answered, eligible.len()),
        }
    }

    /// The answers, split by the answers of the split column.
    ///
    /// Respondents who skipped either question are not counted.
    pub fn stacked(&self, responses: &[SurveyResponse]) -> StackedBarData {
        let eligible = self.eligible(responses);
        let split = match self.split {
            Some(key) => key,
            None => return StackedBarData::default(),
        };
        let mut categories: Vec<String> = Vec::new();
        let mut series: Vec<StackedSeries> = Vec::new();
        let mut answered = 0;
        for r in eligible.iter() {
            let category = r.get(split);
            let answer = self.answer_of(r);
            if category.is_empty() || answer.is_empty() {
                continue;
            }
            answered += 1;
            let cat_idx = match categories.iter().position(|c| c == category) {
                Some(idx) => idx,
                None => {
                    categories.push(category.to_string());
                    for s in series.iter_mut() {
                        s.values.push(0.0);
                    }
                    categories.len() - 1
                }
            };
            let series_idx = match series.iter().position(|s| s.label == answer) {
                Some(idx) => idx,
                None => {
                    series.push(StackedSeries {
                        label: answer.to_string(),
                        values: vec![0.0; categories.len()],
                        color: None,
                    });
                    series.len() - 1
                }
            };
            series[series_idx].values[cat_idx] += 1.0;
        }
        StackedBarData {
            categories,
            series,
            stats: self.stats(answered, eligible.len()),
        }
    }

    pub fn free_text(&self, responses: &[SurveyResponse]) -> Option<ChartProcessorResult> {
        let eligible = self.eligible(responses);
        let items: Vec<String> = eligible
            .iter()
            .map(|r| self.answer_of(r))
            .filter(|a| !a.is_empty())
            .map(|a| a.to_string())
            .collect();
        if items.is_empty() {
            return None;
        }
        let stats = self.stats(items.len(), eligible.len());
        Some(ChartProcessorResult::items(items, stats))
    }
}

/// A single horizontal bar per answer, the most frequent at the top.
pub fn value_counts_chart(
    data: HorizontalBarData,
    palette: &ChartPalette,
) -> Option<ChartProcessorResult> {
    if data.items.is_empty() {
        return None;
    }
    let mut items = data.items;
    items.sort_by(|a, b| a.value.total_cmp(&b.value));
    let trace = json!({
        "type": "bar",
        "orientation": "h",
        "x": items.iter().map(|i| i.value).collect::<Vec<f64>>(),
        "y": items.iter().map(|i| i.label.clone()).collect::<Vec<String>>(),
        "marker": { "color": palette.berry },
        "text": items.iter().map(|i| i.value.to_string()).collect::<Vec<String>>(),
        "textposition": "outside",
        "cliponaxis": false,
        "hoverinfo": "x",
    });
    Some(ChartProcessorResult::traces(vec![trace], data.stats))
}

pub fn yes_no_not_sure_chart(
    data: YesNoNotSureData,
    palette: &ChartPalette,
) -> Option<ChartProcessorResult> {
    if data.stats.number_of_responses == 0 {
        return None;
    }
    let values = data.counts.values();
    let trace = json!({
        "type": "bar",
        "x": yes_no_not_sure::YES_NO_NOT_SURE_LABELS,
        "y": values,
        "marker": { "color": [palette.spring, palette.mandarin, palette.grey02] },
        "text": values.iter().map(|v| v.to_string()).collect::<Vec<String>>(),
        "textposition": "outside",
        "cliponaxis": false,
        "hoverinfo": "y",
    });
    Some(ChartProcessorResult::traces(vec![trace], data.stats))
}

fn check_comparison(chart: &ChartConfig, columns: &ChartColumns) -> DashboardResult<()> {
    let supported = match (chart.kind, chart.comparison) {
        (_, None) => true,
        (ChartKind::FreeText, Some(_)) => false,
        (_, Some(ComparisonKind::StackedBar)) => {
            if columns.split.is_none() {
                whatever!("Chart {}: the stackedBar comparison needs a splitColumn", chart.graph_id)
            }
            true
        }
        (ChartKind::ValueCounts, Some(c)) => c != ComparisonKind::YesNoNotSure,
        (ChartKind::YesNoNotSure, Some(c)) => c == ComparisonKind::YesNoNotSure,
    };
    if !supported {
        whatever!(
            "Chart {}: comparison {:?} is not available for {:?} charts",
            chart.graph_id,
            chart.comparison,
            chart.kind
        )
    }
    Ok(())
}

/// Renders a chart with the extractor and strategy matching its
/// configuration.
pub fn render_chart(
    orchestrator: &ChartOrchestrator<'_>,
    chart: &ChartConfig,
    state: &ChartState,
) -> DashboardResult<Option<ChartView>> {
    let columns = ChartColumns::from_config(chart)?;
    check_comparison(chart, &columns)?;
    let c = &columns;
    let graph_id = chart.graph_id.as_str();
    let explore = chart.explore.clone();

    let processor = move |responses: &[SurveyResponse], palette: &ChartPalette| match chart.kind {
        ChartKind::ValueCounts => value_counts_chart(c.value_counts(responses), palette),
        ChartKind::FreeText => c.free_text(responses),
        ChartKind::YesNoNotSure => yes_no_not_sure_chart(c.yes_no_not_sure(responses), palette),
    };
    let bars = move |responses: &[SurveyResponse]| c.value_counts(responses);

    let view = match chart.comparison {
        None => {
            let spec: ChartSpec = ChartSpec::new(graph_id, processor).with_explore_ids(explore);
            orchestrator.render(&spec, state)
        }
        Some(ComparisonKind::HorizontalBar) => {
            let spec = ChartSpec::new(graph_id, processor)
                .with_comparison(bars, horizontal_bar_comparison)
                .with_explore_ids(explore);
            orchestrator.render(&spec, state)
        }
        Some(ComparisonKind::Dumbbell) => {
            let strategy = DumbbellStrategy::new(chart.dumbbell.clone().unwrap_or_default());
            let spec = ChartSpec::new(graph_id, processor)
                .with_comparison(bars, strategy)
                .with_explore_ids(explore);
            orchestrator.render(&spec, state)
        }
        Some(ComparisonKind::Scatter) => {
            let spec = ChartSpec::new(graph_id, processor)
                .with_comparison(bars, scatter_plot_comparison)
                .with_explore_ids(explore);
            orchestrator.render(&spec, state)
        }
        Some(ComparisonKind::YesNoNotSure) => {
            let spec = ChartSpec::new(graph_id, processor)
                .with_comparison(
                    move |responses: &[SurveyResponse]| c.yes_no_not_sure(responses),
                    yes_no_not_sure_comparison,
                )
                .with_explore_ids(explore);
            orchestrator.render(&spec, state)
        }
        Some(ComparisonKind::StackedBar) => {
            let spec = ChartSpec::new(graph_id, processor)
                .with_comparison(
                    move |responses: &[SurveyResponse]| c.stacked(responses),
                    stacked_bar_comparison,
                )
                .with_explore_ids(explore);
            orchestrator.render(&spec, state)
        }
    };
    view.context(LoadingSurveySnafu {})
}
