//! Parser for `sqlite3` list-mode output.
//!
//! When no content URI returns rows, the SMS database can sometimes be read
//! directly with `sqlite3 <db> "SELECT address, body FROM sms;"`. The default
//! output mode prints one row per line with columns separated by `|`.
//!
//! Only the first `|` splits: message bodies may contain pipes, addresses do
//! not. Lines without a pipe are ignored.

use super::row::RawRow;

/// Parses two-column `a|b` output into rows keyed by `columns`.
///
/// Row indices count accepted rows from zero.
///
/// # Example
///
/// ```
/// use droidpack::parsing::parse_pipe_rows;
///
/// let rows = parse_pipe_rows("+15550100|see you | soon\nError: no such table\n", ["address", "body"]);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("body"), Some("see you | soon"));
/// ```
pub fn parse_pipe_rows(output: &str, columns: [&str; 2]) -> Vec<RawRow> {
    let mut rows = Vec::new();
    for line in output.lines() {
        let Some((first, second)) = line.split_once('|') else {
            continue;
        };
        let row = RawRow::new(rows.len() as u64)
            .with(columns[0], first.trim())
            .with(columns[1], second.trim());
        rows.push(row);
    }
    rows
}
