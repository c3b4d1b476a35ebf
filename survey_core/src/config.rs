// ********* Input data structures ***********

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::Snafu;
use std::path::PathBuf;

/// A single cell-level row as produced by the tokenizer.
/// Rows are positional: nothing is keyed yet.
pub type RawRow = Vec<String>;

/// The link between a stable logical key and the literal header text used
/// in the yearly exports.
///
/// The order of a list of definitions matters: it is the claim order used
/// when several columns share the same header text.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnDefinition<K> {
    pub key: K,
    /// Exact expected header, including the whitespace quirks of the export.
    pub header: &'static str,
}

/// The named colors handed to every analytics routine.
///
/// The core never owns colors, it only passes them along.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartPalette {
    pub berry: String,
    pub light_berry: String,
    pub super_light_berry: String,
    pub spring: String,
    pub light_spring: String,
    pub dark_spring: String,
    pub mandarin: String,
    pub transport: String,
    pub night: String,
    pub grey: String,
    pub grey02: String,
}

impl Default for ChartPalette {
    fn default() -> Self {
        ChartPalette {
            berry: "#831E82".to_string(),
            light_berry: "#C581C4".to_string(),
            super_light_berry: "#F3E6F3".to_string(),
            spring: "#A4C639".to_string(),
            light_spring: "#D2E39C".to_string(),
            dark_spring: "#5E7A1E".to_string(),
            mandarin: "#F28C28".to_string(),
            transport: "#2F7FC1".to_string(),
            night: "#1D1D35".to_string(),
            grey: "#3C3C3B".to_string(),
            grey02: "#BDBCBC".to_string(),
        }
    }
}

// ******** Output data structures *********

/// Counting statistics attached to every result.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub number_of_responses: u64,
    /// The population the response rate is computed against.
    /// When absent, all the responses of the active year are eligible.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_eligible: Option<u64>,
}

impl Stats {
    pub fn new(number_of_responses: u64) -> Stats {
        Stats {
            number_of_responses,
            total_eligible: None,
        }
    }

    pub fn with_eligible(number_of_responses: u64, total_eligible: u64) -> Stats {
        Stats {
            number_of_responses,
            total_eligible: Some(total_eligible),
        }
    }
}

/// What an analytics routine hands to the rendering layer.
///
/// The graphical and the free-text payloads are mutually exclusive.
/// The absence of a result (`None` at the call sites) means that there is
/// nothing to render.
#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartProcessorResult {
    Traces {
        /// Opaque chart traces, interpreted by the charting library.
        traces: Vec<JSValue>,
        /// Optional layout overrides merged by the renderer.
        #[serde(skip_serializing_if = "Option::is_none")]
        layout: Option<JSValue>,
        stats: Stats,
    },
    Items {
        items: Vec<String>,
        stats: Stats,
    },
}

impl ChartProcessorResult {
    pub fn traces(traces: Vec<JSValue>, stats: Stats) -> ChartProcessorResult {
        ChartProcessorResult::Traces {
            traces,
            layout: None,
            stats,
        }
    }

    pub fn items(items: Vec<String>, stats: Stats) -> ChartProcessorResult {
        ChartProcessorResult::Items { items, stats }
    }

    pub fn stats(&self) -> &Stats {
        match self {
            ChartProcessorResult::Traces { stats, .. } => stats,
            ChartProcessorResult::Items { stats, .. } => stats,
        }
    }
}

// ********* Errors **********

/// Errors that prevent survey data from being loaded.
///
/// Missing years and missing columns are not errors: they are expected
/// variations between exports and degrade to empty values.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("The survey source is missing a header row"))]
    MissingHeader {},

    #[snafu(display("Could not load the survey for year {year}: {source}"))]
    LoadingYear {
        year: String,
        #[snafu(source(from(SurveyError, Box::new)))]
        source: Box<SurveyError>,
    },

    #[snafu(display("Error reading survey source {}", path.display()))]
    ReadingSource {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("Error listing the directory {}", path.display()))]
    ReadingDirectory {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("Error reading the chart descriptions {}", path.display()))]
    ReadingDescriptions {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("Error parsing the chart descriptions for year {year}"))]
    ParsingDescriptions {
        source: serde_json::Error,
        year: String,
    },

    #[snafu(display("Unknown survey column: {name}"))]
    UnknownColumn { name: String },
}

pub type SurveyResult<T> = Result<T, SurveyError>;
