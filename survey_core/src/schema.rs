use log::debug;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::config::ColumnDefinition;

/// Cleans a cell before any comparison: non-breaking spaces become regular
/// spaces and the surrounding whitespace is trimmed.
pub fn normalize_cell(value: &str) -> String {
    value.replace('\u{a0}', " ").trim().to_string()
}

/// The resolved position of each logical key in the header of one export.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnIndexMap<K: Eq + Hash> {
    indexes: HashMap<K, usize>,
    /// Raw columns that no definition claimed.
    unclaimed: Vec<usize>,
}

impl<K: Eq + Hash + Copy> ColumnIndexMap<K> {
    pub fn get(&self, key: K) -> Option<usize> {
        self.indexes.get(&key).cloned()
    }

    /// The number of keys that were found in the header.
    pub fn mapped_count(&self) -> usize {
        self.indexes.len()
    }

    pub fn unclaimed_columns(&self) -> &[usize] {
        &self.unclaimed
    }
}

/// Aligns a raw header row with an ordered list of column definitions.
///
/// Definitions are processed in order. Each one takes the first matching
/// header cell that no earlier definition claimed, so that several columns
/// sharing the same header text end up on distinct keys, in definition order.
/// A definition without any unclaimed match stays unmapped.
pub fn build_index_map<K>(
    header_row: &[String],
    definitions: &[ColumnDefinition<K>],
) -> ColumnIndexMap<K>
where
    K: Eq + Hash + Copy + Debug,
{
    let normalized_headers: Vec<String> = header_row.iter().map(|h| normalize_cell(h)).collect();
    let mut indexes: HashMap<K, usize> = HashMap::new();
    let mut claimed: HashSet<usize> = HashSet::new();

    for definition in definitions.iter() {
        let expected = normalize_cell(definition.header);
        let found = normalized_headers
            .iter()
            .enumerate()
            .find(|(idx, h)| **h == expected && !claimed.contains(idx))
            .map(|(idx, _)| idx);
        match found {
            Some(idx) => {
                debug!("build_index_map: {:?} -> column {}", definition.key, idx);
                claimed.insert(idx);
                indexes.insert(definition.key, idx);
            }
            None => {
                debug!(
                    "build_index_map: no unclaimed column for {:?} ({:?})",
                    definition.key, expected
                );
            }
        }
    }

    let unclaimed: Vec<usize> = (0..normalized_headers.len())
        .filter(|idx| !claimed.contains(idx))
        .collect();
    if !unclaimed.is_empty() {
        debug!(
            "build_index_map: {} raw columns left unread: {:?}",
            unclaimed.len(),
            unclaimed
                .iter()
                .map(|idx| normalized_headers[*idx].as_str())
                .collect::<Vec<&str>>()
        );
    }

    ColumnIndexMap { indexes, unclaimed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn def(key: &'static str, header: &'static str) -> ColumnDefinition<&'static str> {
        ColumnDefinition { key, header }
    }

    #[test]
    fn duplicate_headers_are_claimed_in_order() {
        let defs = [def("a", "Country"), def("b", "Country")];
        let m = build_index_map(&header(&["Response ID", "Country", "Country"]), &defs);
        assert_eq!(m.get("a"), Some(1));
        assert_eq!(m.get("b"), Some(2));
        assert_eq!(m.unclaimed_columns(), &[0]);
    }

    #[test]
    fn more_definitions_than_columns() {
        let defs = [def("a", "Country"), def("b", "Country"), def("c", "Country")];
        let m = build_index_map(&header(&["Country", "Age", "Country"]), &defs);
        assert_eq!(m.get("a"), Some(0));
        assert_eq!(m.get("b"), Some(2));
        assert_eq!(m.get("c"), None);
        assert_eq!(m.mapped_count(), 2);
    }

    #[test]
    fn earlier_exact_claim_is_skipped() {
        // "b" is processed first and claims column 1; "a" must move on to 2.
        let defs = [def("b", "X"), def("a", "X"), def("c", "Y")];
        let m = build_index_map(&header(&["Y", "X", "X"]), &defs);
        assert_eq!(m.get("b"), Some(1));
        assert_eq!(m.get("a"), Some(2));
        assert_eq!(m.get("c"), Some(0));
        assert!(m.unclaimed_columns().is_empty());
    }

    #[test]
    fn headers_are_normalized() {
        let defs = [def("a", "Which continent do you live on? "), def("b", "Age")];
        let m = build_index_map(
            &header(&["\u{a0}Age", "Which continent do you live on?\u{a0}"]),
            &defs,
        );
        assert_eq!(m.get("a"), Some(1));
        assert_eq!(m.get("b"), Some(0));
    }

    #[test]
    fn distinct_indexes() {
        let defs = [def("a", "Q"), def("b", "Q"), def("c", "Q"), def("d", "R")];
        let m = build_index_map(&header(&["Q", "R", "Q", "Q", "Q"]), &defs);
        let mut seen: HashSet<usize> = HashSet::new();
        for k in ["a", "b", "c", "d"] {
            let idx = m.get(k).unwrap();
            assert!(seen.insert(idx), "column {} assigned twice", idx);
        }
        assert_eq!(m.unclaimed_columns(), &[4]);
    }

    #[test]
    fn normalize_cell_cases() {
        assert_eq!(normalize_cell("  a\u{a0}b \u{a0}"), "a b");
        assert_eq!(normalize_cell(""), "");
    }
}
