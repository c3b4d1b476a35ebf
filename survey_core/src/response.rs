use crate::columns::{SurveyColumnKey, COUNTRY_OF_RESIDENCE_COLUMNS};
use crate::record::SurveyRecord;

/// A survey record together with the year it was collected in.
///
/// Responses are created once when a year is loaded and never change
/// afterwards: there is no mutable access to the underlying record.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyResponse {
    data: SurveyRecord,
    year: String,
}

impl SurveyResponse {
    pub fn new(data: SurveyRecord, year: &str) -> SurveyResponse {
        SurveyResponse {
            data,
            year: year.to_string(),
        }
    }

    pub fn raw(&self) -> &SurveyRecord {
        &self.data
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn get(&self, key: SurveyColumnKey) -> &str {
        self.data.get(key)
    }

    /// The value of the first candidate column that is not empty, or the
    /// empty string.
    ///
    /// This folds the historical variants of a question into one value.
    pub fn first_non_empty(&self, candidates: &[SurveyColumnKey]) -> &str {
        candidates
            .iter()
            .map(|key| self.data.get(*key))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    pub fn country_of_residence(&self) -> &str {
        self.first_non_empty(&COUNTRY_OF_RESIDENCE_COLUMNS)
    }
}
