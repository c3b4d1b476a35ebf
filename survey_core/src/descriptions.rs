use log::{debug, info};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::config::*;

/// The texts shown around a chart.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct GraphDescription {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Finds the description of a chart for a given year.
pub trait DescriptionLookup {
    fn describe(&self, graph_id: &str, year: &str) -> Option<GraphDescription>;
}

/// No descriptions at all. Charts are then titled with their id.
pub struct NoDescriptions;

impl DescriptionLookup for NoDescriptions {
    fn describe(&self, _graph_id: &str, _year: &str) -> Option<GraphDescription> {
        None
    }
}

/// Descriptions for each year, as read from `<year>.json` files.
///
/// Each file maps chart ids to a [`GraphDescription`]. A chart described in a
/// single year is described for every year: the lookup tries the requested
/// year, then the other years from the newest to the oldest.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct GraphDescriptions {
    years: BTreeMap<String, HashMap<String, GraphDescription>>,
}

impl GraphDescriptions {
    pub fn new() -> GraphDescriptions {
        GraphDescriptions::default()
    }

    /// Parses and adds the descriptions of one year.
    pub fn add_json(&mut self, year: &str, text: &str) -> SurveyResult<()> {
        let parsed: HashMap<String, GraphDescription> =
            serde_json::from_str(text).context(ParsingDescriptionsSnafu { year })?;
        debug!("add_json: {} descriptions for {}", parsed.len(), year);
        self.years.insert(year.to_string(), parsed);
        Ok(())
    }

    /// Reads every `<year>.json` file of a directory.
    pub fn from_dir(dir: &Path) -> SurveyResult<GraphDescriptions> {
        let mut res = GraphDescriptions::new();
        let entries = fs::read_dir(dir).context(ReadingDirectorySnafu { path: dir })?;
        for entry in entries {
            let path = entry.context(ReadingDirectorySnafu { path: dir })?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let year = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if stem.len() == 4 && stem.chars().all(|c| c.is_ascii_digit()) => {
                    stem.to_string()
                }
                _ => {
                    debug!("from_dir: skipping {:?}", path);
                    continue;
                }
            };
            let text =
                fs::read_to_string(&path).context(ReadingDescriptionsSnafu { path: &path })?;
            res.add_json(&year, &text)?;
        }
        info!("from_dir: descriptions for years {:?}", res.years.keys().collect::<Vec<_>>());
        Ok(res)
    }

    pub fn years(&self) -> Vec<String> {
        self.years.keys().cloned().collect()
    }
}

impl DescriptionLookup for GraphDescriptions {
    fn describe(&self, graph_id: &str, year: &str) -> Option<GraphDescription> {
        let requested = self.years.get(year).and_then(|m| m.get(graph_id));
        requested
            .or_else(|| {
                self.years
                    .iter()
                    .rev()
                    .filter(|(y, _)| y.as_str() != year)
                    .find_map(|(_, m)| m.get(graph_id))
            })
            .cloned()
    }
}
