use log::{debug, info, warn};
use snafu::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::*;
use crate::record::SurveyTable;
use crate::response::SurveyResponse;

/// The responses of one year. Shared, never modified once built.
pub type Responses = Arc<Vec<SurveyResponse>>;

struct YearSource {
    text: String,
    // Held while parsing so that concurrent first accesses parse only once.
    parsed: Mutex<Option<Responses>>,
}

/// Holds the raw yearly exports and parses each of them on first access.
///
/// The sources are all loaded in memory when the repository is built. Parsing
/// happens lazily, at most once per year, and the result is shared by all the
/// subsequent calls: `get_responses` returns the same `Arc` every time.
///
/// The repository is `Sync`. Concurrent first accesses to the same year wait
/// for the first one to finish instead of parsing the source again. Parse
/// failures are not cached.
pub struct SurveyRepository {
    sources: BTreeMap<String, YearSource>,
    empty: Responses,
}

impl SurveyRepository {
    /// Builds a repository from in-memory (year, text) pairs.
    pub fn from_sources<Y, T>(sources: impl IntoIterator<Item = (Y, T)>) -> SurveyRepository
    where
        Y: Into<String>,
        T: Into<String>,
    {
        let sources: BTreeMap<String, YearSource> = sources
            .into_iter()
            .map(|(year, text)| {
                (
                    year.into(),
                    YearSource {
                        text: text.into(),
                        parsed: Mutex::new(None),
                    },
                )
            })
            .collect();
        info!("SurveyRepository: years {:?}", sources.keys().collect::<Vec<_>>());
        SurveyRepository {
            sources,
            empty: Arc::new(Vec::new()),
        }
    }

    /// Loads every `<year>.csv` file of a directory.
    ///
    /// Files whose stem is not a 4-digit year are ignored.
    pub fn from_dir(dir: &Path) -> SurveyResult<SurveyRepository> {
        let entries = fs::read_dir(dir).context(ReadingDirectorySnafu { path: dir })?;
        let mut sources: Vec<(String, String)> = Vec::new();
        for entry in entries {
            let path = entry.context(ReadingDirectorySnafu { path: dir })?.path();
            match year_from_path(&path) {
                Some(year) => {
                    debug!("from_dir: found survey {:?} for year {}", path, year);
                    let text =
                        fs::read_to_string(&path).context(ReadingSourceSnafu { path: &path })?;
                    sources.push((year, text));
                }
                None => {
                    debug!("from_dir: skipping {:?}", path);
                }
            }
        }
        if sources.is_empty() {
            warn!("from_dir: no survey found in {:?}", dir);
        }
        Ok(SurveyRepository::from_sources(sources))
    }

    /// The known years, in ascending order.
    pub fn available_years(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    pub fn has_year(&self, year: &str) -> bool {
        self.sources.contains_key(year)
    }

    /// The most recent known year.
    pub fn latest_year(&self) -> Option<String> {
        self.sources.keys().next_back().cloned()
    }

    /// The responses for a year, parsed on the first call.
    ///
    /// An unknown year is not an error and yields no responses. A source
    /// without a header row fails for every call, since nothing is cached.
    pub fn get_responses(&self, year: &str) -> SurveyResult<Responses> {
        let source = match self.sources.get(year) {
            Some(s) => s,
            None => {
                debug!("get_responses: no source for year {}", year);
                return Ok(self.empty.clone());
            }
        };

        let mut slot = source.parsed.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(responses) = slot.as_ref() {
            debug!("get_responses: cache hit for {}", year);
            return Ok(responses.clone());
        }

        debug!("get_responses: parsing year {}", year);
        let table = SurveyTable::from_csv(&source.text).context(LoadingYearSnafu { year })?;
        let responses: Responses = Arc::new(
            table
                .into_records()
                .into_iter()
                .map(|record| SurveyResponse::new(record, year))
                .collect(),
        );
        info!("get_responses: {} responses for {}", responses.len(), year);
        *slot = Some(responses.clone());
        Ok(responses)
    }
}

fn year_from_path(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("csv") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.len() == 4 && stem.chars().all(|c| c.is_ascii_digit()) {
        Some(stem.to_string())
    } else {
        None
    }
}
