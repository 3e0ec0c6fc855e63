//! Tokenizer for `content query` row dumps.
//!
//! `adb shell content query` prints one line per row:
//!
//! ```text
//! Row: 0 _id=12, address=+15550100, body="Running late", date=1715700000000, type=1
//! ```
//!
//! # Rules
//!
//! 1. The trimmed line must start with `Row:`, then optional whitespace, a
//!    decimal row index and at least one whitespace character.
//! 2. The rest is split on `", "`. In each token the first `=` separates key
//!    from value; both are trimmed and surrounding `"` are stripped from the
//!    value.
//! 3. Tokens without `=` or with an empty key are ignored. A line with no
//!    usable token is not a row.
//! 4. Keys outside the parser's allow-list are dropped.
//!
//! A value that itself contains `", "` is cut at that point: the provider
//! output does not escape separators, so there is no reliable way to tell a
//! separator from text. The fragment after the cut is ignored unless it looks
//! like `key=value`.

use serde::{Deserialize, Serialize};

use crate::record::RowKind;

/// One parsed row: its index and the fields in the order they were emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    index: u64,
    fields: Vec<(String, String)>,
}

impl RawRow {
    /// Creates an empty row with the given index.
    pub fn new(index: u64) -> Self {
        Self {
            index,
            fields: Vec::new(),
        }
    }

    /// Sets a field, replacing an earlier value for the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(key, value)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Drops every field whose key is not in `allowed`.
    pub fn retain_keys(&mut self, allowed: &[&str]) {
        self.fields.retain(|(k, _)| allowed.contains(&k.as_str()));
    }
}

/// Parser for `Row: N k=v, ...` lines.
///
/// # Example
///
/// ```
/// use droidpack::parsing::RowParser;
/// use droidpack::record::RowKind;
///
/// let parser = RowParser::for_kind(RowKind::Message);
/// let row = parser
///     .parse(r#"Row: 3 _id=7, address=+15550100, body="hi", type=1"#)
///     .unwrap();
///
/// assert_eq!(row.index(), 3);
/// assert_eq!(row.get("body"), Some("hi"));
/// assert_eq!(row.get("_id"), None);
/// ```
#[derive(Debug, Clone)]
pub struct RowParser {
    allowed: Option<&'static [&'static str]>,
}

impl RowParser {
    /// Creates a parser keeping only the columns `kind` uses.
    pub fn for_kind(kind: RowKind) -> Self {
        Self {
            allowed: Some(kind.allowed_keys()),
        }
    }

    /// Creates a parser that keeps every column.
    pub fn unrestricted() -> Self {
        Self { allowed: None }
    }

    /// Parses one line; returns `None` if it is not a row.
    pub fn parse(&self, line: &str) -> Option<RawRow> {
        let (index, rest) = split_row_prefix(line.trim())?;
        let mut row = RawRow::new(index);

        for token in rest.split(", ") {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            row.insert(key, value.trim().trim_matches('"'));
        }

        if row.is_empty() {
            return None;
        }
        if let Some(allowed) = self.allowed {
            row.retain_keys(allowed);
        }
        Some(row)
    }

    /// Parses every row line of a command's output, skipping the rest.
    pub fn parse_rows(&self, output: &str) -> Vec<RawRow> {
        let rows: Vec<RawRow> = output.lines().filter_map(|line| self.parse(line)).collect();
        log::debug!(
            "parsed {} rows from {} lines",
            rows.len(),
            output.lines().count()
        );
        rows
    }
}

/// Splits `Row: <digits> <rest>` into the index and the field list.
fn split_row_prefix(line: &str) -> Option<(u64, &str)> {
    let after = line.strip_prefix("Row:")?.trim_start();
    let digits_end = after
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after.len());
    if digits_end == 0 {
        return None;
    }
    let index = after[..digits_end].parse().ok()?;
    let rest = &after[digits_end..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    Some((index, rest))
}
