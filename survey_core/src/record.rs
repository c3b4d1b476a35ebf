use log::{debug, info};
use snafu::prelude::*;

use crate::columns::{SurveyColumnKey, COLUMN_COUNT, COLUMN_DEFINITIONS};
use crate::config::*;
use crate::schema::{build_index_map, normalize_cell, ColumnIndexMap};
use crate::tokenizer;

/// One respondent's answers for one year, keyed by logical column.
///
/// Every logical key has a value: columns that were not found in the export
/// read as the empty string.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyRecord {
    values: Box<[String]>,
}

impl SurveyRecord {
    /// A record where every key is empty.
    pub fn empty() -> SurveyRecord {
        SurveyRecord {
            values: vec![String::new(); COLUMN_COUNT].into_boxed_slice(),
        }
    }

    /// Builds a record from (key, value) pairs. Keys not listed are empty.
    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (SurveyColumnKey, S)>,
    ) -> SurveyRecord {
        let mut values = vec![String::new(); COLUMN_COUNT];
        for (key, value) in pairs {
            values[key.index()] = value.into();
        }
        SurveyRecord {
            values: values.into_boxed_slice(),
        }
    }

    pub fn get(&self, key: SurveyColumnKey) -> &str {
        self.values[key.index()].as_str()
    }

    /// All the (key, value) pairs, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (SurveyColumnKey, &str)> {
        SurveyColumnKey::all().zip(self.values.iter().map(|s| s.as_str()))
    }
}

/// Turns data rows into records using the resolved header positions.
///
/// Rows where every cell is empty after normalization are dropped. Rows that
/// are shorter than the header read as empty for the missing cells.
pub fn materialize(
    data_rows: &[RawRow],
    index_map: &ColumnIndexMap<SurveyColumnKey>,
    definitions: &[ColumnDefinition<SurveyColumnKey>],
) -> Vec<SurveyRecord> {
    let mut res: Vec<SurveyRecord> = Vec::new();
    for (idx, row) in data_rows.iter().enumerate() {
        if row.iter().all(|cell| normalize_cell(cell).is_empty()) {
            debug!("materialize: skipping empty row {}", idx + 1);
            continue;
        }
        let mut record = SurveyRecord::empty();
        for definition in definitions.iter() {
            if let Some(cell) = index_map.get(definition.key).and_then(|col| row.get(col)) {
                record.values[definition.key.index()] = normalize_cell(cell);
            }
        }
        res.push(record);
    }
    res
}

/// The parsed content of one survey export.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyTable {
    records: Vec<SurveyRecord>,
}

impl SurveyTable {
    /// Tokenizes, maps and materializes an export against the full column
    /// table.
    pub fn from_csv(text: &str) -> SurveyResult<SurveyTable> {
        SurveyTable::from_csv_with(text, COLUMN_DEFINITIONS)
    }

    pub fn from_csv_with(
        text: &str,
        definitions: &[ColumnDefinition<SurveyColumnKey>],
    ) -> SurveyResult<SurveyTable> {
        let rows = tokenizer::parse(text);
        let (header_row, data_rows) = rows.split_first().context(MissingHeaderSnafu {})?;
        let index_map = build_index_map(header_row, definitions);
        info!(
            "from_csv: {} of {} columns mapped, {} data rows",
            index_map.mapped_count(),
            definitions.len(),
            data_rows.len()
        );
        let records = materialize(data_rows, &index_map, definitions);
        info!("from_csv: {} records", records.len());
        Ok(SurveyTable { records })
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SurveyRecord> {
        self.records
    }

    pub fn find_by_response_id(&self, response_id: &str) -> Option<&SurveyRecord> {
        self.records
            .iter()
            .find(|r| r.get(SurveyColumnKey::ResponseId) == response_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::quote_field;
    use SurveyColumnKey::*;

    fn csv_line(cells: &[&str]) -> String {
        cells
            .iter()
            .map(|c| quote_field(c))
            .collect::<Vec<String>>()
            .join(",")
    }

    fn sample_csv() -> String {
        let header = csv_line(&[
            ResponseId.header(),
            AgeGroup.header(),
            CountryOfResidence.header(),
            CountryOfResidenceAlt1.header(),
            "A column nobody asked for",
        ]);
        [
            header,
            "1,25-34,Germany,,x".to_string(),
            ",,,,".to_string(),
            "2,\u{a0}35-44 ".to_string(),
            " , \u{a0},,,".to_string(),
            "3,,,Switzerland,y".to_string(),
        ]
        .join("\n")
    }

    #[test]
    fn missing_header() {
        assert!(matches!(
            SurveyTable::from_csv(""),
            Err(SurveyError::MissingHeader {})
        ));
    }

    #[test]
    fn records_hold_every_key() {
        let table = SurveyTable::from_csv(&sample_csv()).unwrap();
        assert_eq!(table.records().len(), 3);
        for r in table.records() {
            assert_eq!(r.iter().count(), COLUMN_COUNT);
            // Never present in this export.
            assert_eq!(r.get(HindranceOther), "");
        }
    }

    #[test]
    fn values_are_mapped_and_normalized() {
        let table = SurveyTable::from_csv(&sample_csv()).unwrap();
        let r1 = table.find_by_response_id("1").unwrap();
        assert_eq!(r1.get(AgeGroup), "25-34");
        assert_eq!(r1.get(CountryOfResidence), "Germany");
        assert_eq!(r1.get(CountryOfResidenceAlt1), "");

        // Ragged row: trailing cells are missing.
        let r2 = table.find_by_response_id("2").unwrap();
        assert_eq!(r2.get(AgeGroup), "35-44");
        assert_eq!(r2.get(CountryOfResidence), "");

        let r3 = table.find_by_response_id("3").unwrap();
        assert_eq!(r3.get(CountryOfResidenceAlt1), "Switzerland");
        assert!(table.find_by_response_id("4").is_none());
    }

    #[test]
    fn blank_rows_are_dropped() {
        let text = format!("{}\n,,\n \u{a0}, ,\n", csv_line(&[ResponseId.header(), Seed.header()]));
        let table = SurveyTable::from_csv(&text).unwrap();
        assert!(table.records().is_empty());
    }

    #[test]
    fn header_only() {
        let table = SurveyTable::from_csv("Response ID,Seed\n").unwrap();
        assert!(table.records().is_empty());
    }

    #[test]
    fn restricted_definitions() {
        let defs = [ColumnDefinition {
            key: Seed,
            header: "Seed",
        }];
        let table = SurveyTable::from_csv_with("Response ID,Seed\n7,42", &defs).unwrap();
        let r = &table.records()[0];
        assert_eq!(r.get(Seed), "42");
        // Not part of the definitions, hence not read.
        assert_eq!(r.get(ResponseId), "");
    }

    #[test]
    fn from_pairs() {
        let r = SurveyRecord::from_pairs([(Seed, "1"), (Continent, "Europe")]);
        assert_eq!(r.get(Seed), "1");
        assert_eq!(r.get(Continent), "Europe");
        assert_eq!(r.get(ResponseId), "");
    }
}
