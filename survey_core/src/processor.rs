/*!
The contract implemented by analytics routines.

A routine never sees where the responses come from. It receives them, with the
palette, and returns something to render or `None` when there is nothing to
show.

- [`ChartProcessor`] renders a single year.
- [`DataExtractor`] reduces the responses of one year to an intermediate,
  year-agnostic shape `T`.
- [`ComparisonStrategy`] renders two extracted `T`s (current year and comparison
  year) into one combined result. A handful of strategies are shared by many
  charts, see [`crate::comparison`].

Plain closures implement all three traits.

```
use survey_core::*;

let processor = |responses: &[SurveyResponse], _: &ChartPalette| {
    if responses.is_empty() {
        None
    } else {
        Some(ChartProcessorResult::items(vec![], Stats::new(0)))
    }
};
assert!(processor.process(&[], &ChartPalette::default()).is_none());
```
*/

use crate::config::*;
use crate::response::SurveyResponse;

pub trait ChartProcessor {
    fn process(
        &self,
        responses: &[SurveyResponse],
        palette: &ChartPalette,
    ) -> Option<ChartProcessorResult>;
}

impl<F> ChartProcessor for F
where
    F: Fn(&[SurveyResponse], &ChartPalette) -> Option<ChartProcessorResult>,
{
    fn process(
        &self,
        responses: &[SurveyResponse],
        palette: &ChartPalette,
    ) -> Option<ChartProcessorResult> {
        self(responses, palette)
    }
}

pub trait DataExtractor<T> {
    fn extract(&self, responses: &[SurveyResponse]) -> T;
}

impl<T, F> DataExtractor<T> for F
where
    F: Fn(&[SurveyResponse]) -> T,
{
    fn extract(&self, responses: &[SurveyResponse]) -> T {
        self(responses)
    }
}

pub trait ComparisonStrategy<T> {
    fn compare(
        &self,
        current: &T,
        compare: &T,
        current_year: &str,
        compare_year: &str,
        palette: &ChartPalette,
    ) -> Option<ChartProcessorResult>;
}

impl<T, F> ComparisonStrategy<T> for F
where
    F: Fn(&T, &T, &str, &str, &ChartPalette) -> Option<ChartProcessorResult>,
{
    fn compare(
        &self,
        current: &T,
        compare: &T,
        current_year: &str,
        compare_year: &str,
        palette: &ChartPalette,
    ) -> Option<ChartProcessorResult> {
        self(current, compare, current_year, compare_year, palette)
    }
}

/// An extractor paired with the strategy that renders its output.
pub struct ComparisonPair<'a, T> {
    pub extractor: Box<dyn DataExtractor<T> + 'a>,
    pub strategy: Box<dyn ComparisonStrategy<T> + 'a>,
}

impl<'a, T> ComparisonPair<'a, T> {
    pub fn new(
        extractor: impl DataExtractor<T> + 'a,
        strategy: impl ComparisonStrategy<T> + 'a,
    ) -> ComparisonPair<'a, T> {
        ComparisonPair {
            extractor: Box::new(extractor),
            strategy: Box::new(strategy),
        }
    }
}
