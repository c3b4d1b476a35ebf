/*!
Runs one chart: selects between single-year and comparison rendering,
attaches the response rate and the texts of the chart, and tracks the
drill-down navigation shared by all the charts.
*/

use log::debug;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::*;
use crate::descriptions::DescriptionLookup;
use crate::processor::{ChartProcessor, ComparisonPair, ComparisonStrategy, DataExtractor};
use crate::repository::{Responses, SurveyRepository};
use crate::response::SurveyResponse;

/// The active year and its responses.
///
/// Built once from the repository and handed explicitly to whatever renders
/// charts. Cloning shares the responses.
#[derive(Debug, Clone)]
pub struct SurveyContext {
    pub year: String,
    pub responses: Responses,
}

impl SurveyContext {
    pub fn new(year: &str, responses: Responses) -> SurveyContext {
        SurveyContext {
            year: year.to_string(),
            responses,
        }
    }

    pub fn from_repository(
        repository: &SurveyRepository,
        year: &str,
    ) -> SurveyResult<SurveyContext> {
        Ok(SurveyContext::new(year, repository.get_responses(year)?))
    }

    pub fn responses(&self) -> &[SurveyResponse] {
        &self.responses
    }
}

/// Percentage of the eligible population that answered.
///
/// Without an explicit eligible population, every response of the active year
/// is eligible. A zero denominator gives 0. Values above 100 are not clamped.
pub fn response_rate(stats: &Stats, total_responses: usize) -> f64 {
    let denominator = stats.total_eligible.unwrap_or(total_responses as u64);
    if denominator == 0 {
        0.0
    } else {
        stats.number_of_responses as f64 / denominator as f64 * 100.0
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ExploreState {
    Collapsed,
    Exploring,
}

#[derive(Debug, Default)]
struct Navigation {
    active_id: Option<String>,
    saved_scroll: Option<f64>,
}

/// The single drill-down shared by all charts.
///
/// At most one chart is explored at a time. While it is, every other chart
/// is hidden. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct ExploreNavigator {
    inner: Arc<Mutex<Navigation>>,
}

impl ExploreNavigator {
    pub fn new() -> ExploreNavigator {
        ExploreNavigator::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Navigation> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Explores a chart, remembering where the page was scrolled.
    ///
    /// Exploring another chart while one is active switches to it and keeps
    /// the position saved by the first explore.
    pub fn explore(&self, graph_id: &str, scroll_position: f64) {
        let mut nav = self.lock();
        if nav.active_id.is_none() {
            nav.saved_scroll = Some(scroll_position);
        }
        debug!("explore: {} (was {:?})", graph_id, nav.active_id);
        nav.active_id = Some(graph_id.to_string());
    }

    /// Leaves the drill-down. Returns the scroll position to restore, or
    /// `None` if nothing was explored.
    pub fn back(&self) -> Option<f64> {
        let mut nav = self.lock();
        let previous = nav.active_id.take();
        debug!("back: leaving {:?}", previous);
        previous.and(nav.saved_scroll.take())
    }

    pub fn active_id(&self) -> Option<String> {
        self.lock().active_id.clone()
    }

    pub fn state_of(&self, graph_id: &str) -> ExploreState {
        match self.lock().active_id.as_deref() {
            Some(id) if id == graph_id => ExploreState::Exploring,
            _ => ExploreState::Collapsed,
        }
    }

    /// True when another chart is being explored.
    pub fn is_hidden(&self, graph_id: &str) -> bool {
        matches!(self.lock().active_id.as_deref(), Some(id) if id != graph_id)
    }
}

/// The comparison year selected for one chart instance.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ChartState {
    compare_year: Option<String>,
}

impl ChartState {
    pub fn new() -> ChartState {
        ChartState::default()
    }

    pub fn comparing(year: &str) -> ChartState {
        ChartState {
            compare_year: Some(year.to_string()),
        }
    }

    pub fn compare_year(&self) -> Option<&str> {
        self.compare_year.as_deref()
    }

    /// Selects a year, or clears the selection if that year was already
    /// selected.
    pub fn toggle_compare_year(&mut self, year: &str) {
        if self.compare_year.as_deref() == Some(year) {
            self.compare_year = None;
        } else {
            self.compare_year = Some(year.to_string());
        }
    }
}

/// Everything needed to render a chart.
///
/// `T` is the intermediate shape of the comparison, if any.
pub struct ChartSpec<'a, T = ()> {
    pub graph_id: String,
    pub processor: Box<dyn ChartProcessor + 'a>,
    pub comparison: Option<ComparisonPair<'a, T>>,
    /// The charts shown when this one is explored.
    pub explore_ids: Vec<String>,
}

impl<'a, T> ChartSpec<'a, T> {
    pub fn new(graph_id: &str, processor: impl ChartProcessor + 'a) -> ChartSpec<'a, T> {
        ChartSpec {
            graph_id: graph_id.to_string(),
            processor: Box::new(processor),
            comparison: None,
            explore_ids: Vec::new(),
        }
    }

    pub fn with_comparison(
        mut self,
        extractor: impl DataExtractor<T> + 'a,
        strategy: impl ComparisonStrategy<T> + 'a,
    ) -> ChartSpec<'a, T> {
        self.comparison = Some(ComparisonPair::new(extractor, strategy));
        self
    }

    pub fn with_explore_ids(mut self, ids: Vec<String>) -> ChartSpec<'a, T> {
        self.explore_ids = ids;
        self
    }
}

/// A rendered chart with its texts and response rate.
#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub graph_id: String,
    pub question: String,
    pub description: Option<String>,
    pub number_of_responses: u64,
    pub response_rate: f64,
    pub result: ChartProcessorResult,
    #[serde(skip)]
    pub explorable: bool,
}

pub struct ChartOrchestrator<'a> {
    pub repository: &'a SurveyRepository,
    pub context: &'a SurveyContext,
    pub palette: &'a ChartPalette,
    pub descriptions: &'a dyn DescriptionLookup,
    pub navigator: &'a ExploreNavigator,
}

impl<'a> ChartOrchestrator<'a> {
    /// The years a chart can be compared with, newest first.
    pub fn compare_year_candidates(&self) -> Vec<String> {
        let mut years: Vec<String> = self
            .repository
            .available_years()
            .into_iter()
            .filter(|y| *y != self.context.year)
            .collect();
        years.reverse();
        years
    }

    /// Computes the result of a chart, without the texts.
    ///
    /// The comparison path is taken only when a compare year is selected and
    /// the chart has an extractor and a strategy. The compare year is fetched
    /// from the repository, and an unknown year gives no responses.
    pub fn run<T>(
        &self,
        spec: &ChartSpec<'_, T>,
        state: &ChartState,
    ) -> SurveyResult<Option<ChartProcessorResult>> {
        match (state.compare_year(), spec.comparison.as_ref()) {
            (Some(compare_year), Some(pair)) => {
                debug!(
                    "run: {} comparing {} with {}",
                    spec.graph_id, self.context.year, compare_year
                );
                let compare_responses = self.repository.get_responses(compare_year)?;
                let current = pair.extractor.extract(self.context.responses());
                let compare = pair.extractor.extract(&compare_responses);
                Ok(pair
                    .strategy
                    .compare(&current, &compare, &self.context.year, compare_year, self.palette))
            }
            _ => {
                debug!("run: {} for {}", spec.graph_id, self.context.year);
                Ok(spec.processor.process(self.context.responses(), self.palette))
            }
        }
    }

    /// Renders a chart. `None` means that there is nothing to show.
    pub fn render<T>(
        &self,
        spec: &ChartSpec<'_, T>,
        state: &ChartState,
    ) -> SurveyResult<Option<ChartView>> {
        let result = match self.run(spec, state)? {
            Some(r) => r,
            None => {
                debug!("render: nothing to render for {}", spec.graph_id);
                return Ok(None);
            }
        };
        let stats = *result.stats();
        let described = self.descriptions.describe(&spec.graph_id, &self.context.year);
        let (question, description) = match described {
            Some(d) => (d.question, d.description),
            None => (spec.graph_id.clone(), None),
        };
        Ok(Some(ChartView {
            graph_id: spec.graph_id.clone(),
            question,
            description,
            number_of_responses: stats.number_of_responses,
            response_rate: response_rate(&stats, self.context.responses.len()),
            result,
            explorable: !spec.explore_ids.is_empty(),
        }))
    }

    /// False while another chart is explored.
    pub fn is_visible(&self, spec_id: &str) -> bool {
        !self.navigator.is_hidden(spec_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::SurveyColumnKey;
    use crate::comparison::{horizontal_bar_comparison, BarItem, HorizontalBarData};
    use crate::descriptions::{GraphDescriptions, NoDescriptions};
    use serde_json::json;
    use std::cell::Cell;

    const CSV_2025: &str = "Response ID,What is your age?\n1,18-24\n2,25-34\n";
    const CSV_2026: &str = "Response ID,What is your age?\n3,25-34\n4,25-34\n5,\n";

    fn repository() -> SurveyRepository {
        let age = SurveyColumnKey::AgeGroup.header();
        SurveyRepository::from_sources([
            ("2025", CSV_2025.replace("What is your age?", age)),
            ("2026", CSV_2026.replace("What is your age?", age)),
            ("2024", "Response ID\n".to_string()),
        ])
    }

    fn age_counts(responses: &[SurveyResponse]) -> HorizontalBarData {
        let mut items: Vec<BarItem> = Vec::new();
        let mut answered = 0;
        for r in responses {
            let age = r.get(SurveyColumnKey::AgeGroup);
            if age.is_empty() {
                continue;
            }
            answered += 1;
            match items.iter_mut().find(|i| i.label == age) {
                Some(item) => item.value += 1.0,
                None => items.push(BarItem {
                    label: age.to_string(),
                    value: 1.0,
                }),
            }
        }
        HorizontalBarData {
            items,
            stats: Stats::new(answered),
        }
    }

    fn age_processor(
        responses: &[SurveyResponse],
        _: &ChartPalette,
    ) -> Option<ChartProcessorResult> {
        let data = age_counts(responses);
        if data.items.is_empty() {
            return None;
        }
        Some(ChartProcessorResult::items(
            data.items.iter().map(|i| i.label.clone()).collect(),
            data.stats,
        ))
    }

    struct Fixture {
        repository: SurveyRepository,
        context: SurveyContext,
        palette: ChartPalette,
        navigator: ExploreNavigator,
    }

    impl Fixture {
        fn new(year: &str) -> Fixture {
            let repository = repository();
            let context = SurveyContext::from_repository(&repository, year).unwrap();
            Fixture {
                repository,
                context,
                palette: ChartPalette::default(),
                navigator: ExploreNavigator::new(),
            }
        }

        fn orchestrator<'a>(
            &'a self,
            descriptions: &'a dyn DescriptionLookup,
        ) -> ChartOrchestrator<'a> {
            ChartOrchestrator {
                repository: &self.repository,
                context: &self.context,
                palette: &self.palette,
                descriptions,
                navigator: &self.navigator,
            }
        }
    }

    #[test]
    fn response_rates() {
        assert_eq!(response_rate(&Stats::new(3), 4), 75.0);
        assert_eq!(response_rate(&Stats::with_eligible(3, 6), 4), 50.0);
        assert_eq!(response_rate(&Stats::new(3), 0), 0.0);
        assert_eq!(response_rate(&Stats::with_eligible(3, 0), 10), 0.0);
        // Not clamped.
        assert_eq!(response_rate(&Stats::with_eligible(3, 2), 10), 150.0);
    }

    #[test]
    fn single_year() {
        let f = Fixture::new("2026");
        let mut descriptions = GraphDescriptions::new();
        descriptions
            .add_json(
                "2025",
                r#"{"age": {"question": "How old are you?", "description": "In years"}}"#,
            )
            .unwrap();
        let o = f.orchestrator(&descriptions);
        let spec: ChartSpec = ChartSpec::new("age", age_processor);
        let view = o.render(&spec, &ChartState::new()).unwrap().unwrap();
        assert_eq!(view.question, "How old are you?");
        assert_eq!(view.description.as_deref(), Some("In years"));
        assert_eq!(view.number_of_responses, 2);
        // 2 of the 3 responses of 2026.
        assert!((view.response_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            view.result,
            ChartProcessorResult::items(vec!["25-34".to_string()], Stats::new(2))
        );
        assert!(!view.explorable);
    }

    #[test]
    fn no_result_no_render() {
        let f = Fixture::new("2024");
        let o = f.orchestrator(&NoDescriptions);
        let called = Cell::new(false);
        let processor = |responses: &[SurveyResponse], palette: &ChartPalette| {
            called.set(true);
            age_processor(responses, palette)
        };
        let spec: ChartSpec = ChartSpec::new("age", processor);
        assert_eq!(o.render(&spec, &ChartState::new()).unwrap(), None);
        assert!(called.get());
    }

    #[test]
    fn comparison_path() {
        let f = Fixture::new("2026");
        let o = f.orchestrator(&NoDescriptions);
        let spec = ChartSpec::new("age", age_processor)
            .with_comparison(age_counts, horizontal_bar_comparison)
            .with_explore_ids(vec!["ageByRole".to_string()]);
        let view = o.render(&spec, &ChartState::comparing("2025")).unwrap().unwrap();
        assert_eq!(view.question, "age");
        assert!(view.explorable);
        // 2 answers in 2026 and 2 in 2025, against the 3 responses of 2026.
        assert_eq!(view.number_of_responses, 4);
        assert!((view.response_rate - 400.0 / 3.0).abs() < 1e-9);
        match view.result {
            ChartProcessorResult::Traces { traces, .. } => {
                assert_eq!(traces[0]["name"], json!("2026"));
                assert_eq!(traces[0]["y"], json!(["18-24", "25-34"]));
                assert_eq!(traces[1]["x"], json!([1.0, 1.0]));
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn compare_year_without_pair_uses_processor() {
        let f = Fixture::new("2026");
        let o = f.orchestrator(&NoDescriptions);
        let spec: ChartSpec<HorizontalBarData> = ChartSpec::new("age", age_processor);
        let res = o.run(&spec, &ChartState::comparing("2025")).unwrap().unwrap();
        assert!(matches!(res, ChartProcessorResult::Items { .. }));
    }

    #[test]
    fn unknown_compare_year_is_empty() {
        let f = Fixture::new("2026");
        let o = f.orchestrator(&NoDescriptions);
        let spec = ChartSpec::new("age", age_processor)
            .with_comparison(age_counts, horizontal_bar_comparison);
        let res = o.run(&spec, &ChartState::comparing("2099")).unwrap().unwrap();
        assert_eq!(res.stats(), &Stats::new(2));
    }

    #[test]
    fn broken_compare_year_is_an_error() {
        let f = Fixture::new("2026");
        let repository = SurveyRepository::from_sources([("2023", "")]);
        let o = ChartOrchestrator {
            repository: &repository,
            ..f.orchestrator(&NoDescriptions)
        };
        let spec = ChartSpec::new("age", age_processor)
            .with_comparison(age_counts, horizontal_bar_comparison);
        assert!(o.run(&spec, &ChartState::comparing("2023")).is_err());
    }

    #[test]
    fn candidates_newest_first() {
        let f = Fixture::new("2025");
        let o = f.orchestrator(&NoDescriptions);
        assert_eq!(o.compare_year_candidates(), vec!["2026", "2024"]);
    }

    #[test]
    fn toggling_compare_year() {
        let mut state = ChartState::new();
        assert_eq!(state.compare_year(), None);
        state.toggle_compare_year("2025");
        assert_eq!(state.compare_year(), Some("2025"));
        state.toggle_compare_year("2024");
        assert_eq!(state.compare_year(), Some("2024"));
        state.toggle_compare_year("2024");
        assert_eq!(state.compare_year(), None);
    }

    #[test]
    fn drill_down() {
        let nav = ExploreNavigator::new();
        let shared = nav.clone();
        assert_eq!(nav.state_of("age"), ExploreState::Collapsed);
        assert!(!nav.is_hidden("age"));
        assert_eq!(nav.back(), None);

        nav.explore("age", 120.0);
        assert_eq!(shared.active_id().as_deref(), Some("age"));
        assert_eq!(shared.state_of("age"), ExploreState::Exploring);
        assert!(shared.is_hidden("role"));
        assert!(!shared.is_hidden("age"));

        // Switching keeps the first position.
        shared.explore("role", 900.0);
        assert_eq!(nav.state_of("age"), ExploreState::Collapsed);
        assert!(nav.is_hidden("age"));
        assert_eq!(nav.back(), Some(120.0));
        assert_eq!(nav.active_id(), None);
        assert!(!nav.is_hidden("age"));

        nav.explore("age", 40.0);
        assert_eq!(nav.back(), Some(40.0));
    }

    #[test]
    fn hidden_charts_are_not_visible() {
        let f = Fixture::new("2026");
        let o = f.orchestrator(&NoDescriptions);
        assert!(o.is_visible("age"));
        f.navigator.explore("role", 0.0);
        assert!(!o.is_visible("age"));
        assert!(o.is_visible("role"));
    }
}
