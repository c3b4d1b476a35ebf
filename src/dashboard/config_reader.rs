use crate::dashboard::*;

use serde::{Deserialize, Serialize};
use survey_core::comparison::DumbbellOptions;
use survey_core::ChartPalette;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub title: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            title: "Survey dashboard".to_string(),
            output_directory: None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    ValueCounts,
    FreeText,
    YesNoNotSure,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonKind {
    HorizontalBar,
    Dumbbell,
    Scatter,
    YesNoNotSure,
    StackedBar,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "graphId")]
    pub graph_id: String,
    pub kind: ChartKind,
    pub column: String,
    #[serde(rename = "fallbackColumns", default)]
    pub fallback_columns: Vec<String>,
    #[serde(rename = "filterColumn")]
    pub filter_column: Option<String>,
    #[serde(rename = "filterValue")]
    pub filter_value: Option<String>,
    pub comparison: Option<ComparisonKind>,
    #[serde(rename = "splitColumn")]
    pub split_column: Option<String>,
    pub dumbbell: Option<DumbbellOptions>,
    #[serde(default)]
    pub explore: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataDirectory")]
    pub data_directory: String,
    #[serde(rename = "descriptionsDirectory")]
    pub descriptions_directory: Option<String>,
    #[serde(rename = "activeYear")]
    pub active_year: Option<String>,
    #[serde(rename = "compareYear")]
    pub compare_year: Option<String>,
    pub palette: Option<ChartPalette>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

impl DashboardConfig {
    /// A configuration with no chart, reading the exports of a directory.
    pub fn for_data_directory(data_directory: &str) -> DashboardConfig {
        DashboardConfig {
            output_settings: OutputSettings::default(),
            data_directory: data_directory.to_string(),
            descriptions_directory: None,
            active_year: None,
            compare_year: None,
            palette: None,
            charts: Vec::new(),
        }
    }

    pub fn chart(&self, graph_id: &str) -> Option<&ChartConfig> {
        self.charts.iter().find(|c| c.graph_id == graph_id)
    }
}

pub fn read_config(path: &Path) -> DashboardResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &Path) -> DashboardResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::comparison::DumbbellSort;

    #[test]
    fn minimal_config() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"dataDirectory": "surveys"}"#).unwrap();
        assert_eq!(config, DashboardConfig::for_data_directory("surveys"));
    }

    #[test]
    fn chart_options() {
        let config: DashboardConfig = serde_json::from_str(
            r##"{
                "outputSettings": {"title": "Test"},
                "dataDirectory": "surveys",
                "palette": {"berry": "#000000"},
                "charts": [{
                    "graphId": "role",
                    "kind": "valueCounts",
                    "column": "role",
                    "fallbackColumns": ["roleOther"],
                    "comparison": "dumbbell",
                    "dumbbell": {"sortBy": "value", "normalizeToPercentage": false},
                    "explore": ["roleByAge"]
                }]
            }"##,
        )
        .unwrap();
        let palette = config.palette.clone().unwrap();
        assert_eq!(palette.berry, "#000000");
        assert_eq!(palette.spring, ChartPalette::default().spring);

        let chart = config.chart("role").unwrap();
        assert_eq!(chart.kind, ChartKind::ValueCounts);
        assert_eq!(chart.comparison, Some(ComparisonKind::Dumbbell));
        let options = chart.dumbbell.clone().unwrap();
        assert_eq!(options.sort_by, DumbbellSort::Value);
        assert!(!options.normalize());
        assert_eq!(chart.explore, vec!["roleByAge"]);
        assert!(config.chart("age").is_none());
    }

    #[test]
    fn unknown_kind() {
        let res: Result<ChartConfig, _> =
            serde_json::from_str(r#"{"graphId": "a", "kind": "pie", "column": "role"}"#);
        assert!(res.is_err());
    }
}
