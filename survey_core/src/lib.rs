/*!
Loading of yearly survey exports and the plumbing shared by chart analytics.

Each year of the survey is exported as a CSV file whose column headers are the
literal texts of the questions. The headers drift between years, and some
texts appear in several columns. This crate maps every export onto a fixed set
of logical keys ([`columns::SurveyColumnKey`]), so that analytics are written
once against the keys and work for every year.

The main pieces:
- [`tokenizer`] turns the text of an export into rows of cells
- [`schema`] resolves the position of each logical key from the header row
- [`repository::SurveyRepository`] holds the yearly exports, parsed on demand
- [`processor`] is the contract of analytics routines, and [`comparison`]
  holds the renderers shared by two-year comparisons
- [`orchestrator`] runs a chart for the active year or a comparison year

See the [`manual`] for the input formats.
*/

mod config;

pub mod columns;
pub mod comparison;
pub mod descriptions;
pub mod manual;
pub mod orchestrator;
pub mod processor;
pub mod record;
pub mod repository;
pub mod response;
pub mod schema;
pub mod tokenizer;

pub use crate::config::*;

pub use crate::columns::SurveyColumnKey;
pub use crate::descriptions::{DescriptionLookup, GraphDescription, GraphDescriptions};
pub use crate::orchestrator::{
    response_rate, ChartOrchestrator, ChartSpec, ChartState, ChartView, ExploreNavigator,
    ExploreState, SurveyContext,
};
pub use crate::processor::{ChartProcessor, ComparisonPair, ComparisonStrategy, DataExtractor};
pub use crate::record::{SurveyRecord, SurveyTable};
pub use crate::repository::{Responses, SurveyRepository};
pub use crate::response::SurveyResponse;
