// Primitives for splitting delimited survey exports into rows of cells.

use log::debug;

use crate::config::RawRow;

const QUOTE: char = '"';
const SEPARATOR: char = ',';

/// Splits a comma-separated text into rows of raw cells.
///
/// The scan is a single pass with one piece of state: whether the cursor is
/// inside a quoted field.
/// - a doubled quote inside a quoted field is one literal quote
/// - separators and newlines inside a quoted field are content
/// - carriage returns are always dropped (CRLF and bare CR inputs)
///
/// The last cell and row are flushed at the end of the input. A final row that
/// only holds empty cells (trailing newline at the end of the file) is
/// discarded.
///
/// An unterminated quoted field is not an error: whatever was scanned is
/// flushed as the last cell.
pub fn parse(text: &str) -> Vec<RawRow> {
    let mut rows: Vec<RawRow> = Vec::new();
    let mut current_row: RawRow = Vec::new();
    let mut current_value = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes => {
                if chars.peek() == Some(&QUOTE) {
                    current_value.push(QUOTE);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            QUOTE => {
                in_quotes = true;
            }
            SEPARATOR if !in_quotes => {
                current_row.push(std::mem::take(&mut current_value));
            }
            '\n' if !in_quotes => {
                current_row.push(std::mem::take(&mut current_value));
                rows.push(std::mem::take(&mut current_row));
            }
            '\r' => {}
            _ => {
                current_value.push(c);
            }
        }
    }

    if in_quotes {
        debug!("parse: unterminated quoted field at the end of the input");
    }

    current_row.push(current_value);
    rows.push(current_row);

    if rows
        .last()
        .map(|row| row.iter().all(|cell| cell.is_empty()))
        .unwrap_or(false)
    {
        rows.pop();
    }

    debug!("parse: {} rows", rows.len());
    rows
}

/// Quotes a field so that `parse` reads it back unchanged.
pub fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn quoted_separators_and_escaped_quotes() {
        let rows = parse("id,val\n1,\"5,000\"\n2,\"\"\"quoted\"\"\"\n");
        assert_eq!(
            rows,
            vec![
                row(&["id", "val"]),
                row(&["1", "5,000"]),
                row(&["2", "\"quoted\""]),
            ]
        );
    }

    #[test]
    fn multiline_quoted_values() {
        let rows = parse("a,b\n\"first line\nsecond line\",x");
        assert_eq!(
            rows,
            vec![row(&["a", "b"]), row(&["first line\nsecond line", "x"])]
        );
    }

    #[test]
    fn carriage_returns_are_dropped() {
        let rows = parse("a,b\r\n1,2\r\n");
        assert_eq!(rows, vec![row(&["a", "b"]), row(&["1", "2"])]);
        let rows = parse("a\rb,c");
        assert_eq!(rows, vec![row(&["ab", "c"])]);
    }

    #[test]
    fn carriage_returns_inside_quotes_are_dropped() {
        let rows = parse("a,\"one\r\ntwo\"\r\n");
        assert_eq!(rows, vec![row(&["a", "one\ntwo"])]);
    }

    #[test]
    fn quote_opening_inside_a_cell() {
        assert_eq!(parse("a\"b,c\"d"), vec![row(&["ab,cd"])]);
    }

    #[test]
    fn trailing_blank_row_is_dropped() {
        assert_eq!(parse("a,b\n"), vec![row(&["a", "b"])]);
        assert_eq!(parse("a,b\n,"), vec![row(&["a", "b"])]);
        // Only the very last row is subject to this rule.
        assert_eq!(
            parse("a,b\n,\n1,2"),
            vec![row(&["a", "b"]), row(&["", ""]), row(&["1", "2"])]
        );
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
        assert_eq!(parse("\n"), vec![row(&[""])]);
    }

    #[test]
    fn empty_quoted_field() {
        assert_eq!(parse("\"\",x"), vec![row(&["", "x"])]);
    }

    #[test]
    fn unterminated_quote_flushes_content() {
        assert_eq!(parse("a,\"open\nstill"), vec![row(&["a", "open\nstill"])]);
    }

    #[test]
    fn quoted_fields_read_back() {
        let fields = [
            "plain",
            "with, comma",
            "with \"quotes\"",
            "\"",
            "multi\nline, \"mixed\"",
            "",
        ];
        for field in fields {
            let line = format!("{},{}", quote_field(field), quote_field("next"));
            assert_eq!(parse(&line), vec![row(&[field, "next"])], "field {:?}", field);
        }
    }
}
