//! Typed view over the row groups returned by the tenant API.
//!
//! The API answers with an array whose elements map a table name to one row.
//! Table names form a closed set; anything else is rejected.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKey {
    School,
    Identity,
    HeroMedia,
    Announcements,
    AcademicResults,
    Achievements,
    Personnel,
    Statistics,
    MediaLibrary,
    Events,
    AdmissionSteps,
    HomepageSections,
}

impl TableKey {
    pub const ALL: [TableKey; 12] = [
        TableKey::School,
        TableKey::Identity,
        TableKey::HeroMedia,
        TableKey::Announcements,
        TableKey::AcademicResults,
        TableKey::Achievements,
        TableKey::Personnel,
        TableKey::Statistics,
        TableKey::MediaLibrary,
        TableKey::Events,
        TableKey::AdmissionSteps,
        TableKey::HomepageSections,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableKey::School => "school",
            TableKey::Identity => "identity",
            TableKey::HeroMedia => "hero_media",
            TableKey::Announcements => "announcements",
            TableKey::AcademicResults => "academic_results",
            TableKey::Achievements => "achievements",
            TableKey::Personnel => "personnel",
            TableKey::Statistics => "statistics",
            TableKey::MediaLibrary => "media_library",
            TableKey::Events => "events",
            TableKey::AdmissionSteps => "admission_steps",
            TableKey::HomepageSections => "homepage_sections",
        }
    }

    /// Singleton tables keep only their first row.
    pub fn is_singleton(self) -> bool {
        matches!(self, TableKey::School | TableKey::Identity)
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKey {
    type Err = RowSetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TableKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| RowSetError::UnknownTable(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowSetError {
    #[error("unknown table key '{0}'")]
    UnknownTable(String),
    #[error("row for table '{table}' is not a JSON object")]
    MalformedRow { table: TableKey },
}

/// Rows tagged with their table, in payload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    rows: Vec<(TableKey, Row)>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens API row groups. Fails on the first unknown table or non-object row.
    pub fn from_groups<I>(groups: I) -> Result<Self, RowSetError>
    where
        I: IntoIterator<Item = Map<String, Value>>,
    {
        let mut set = Self::new();
        for group in groups {
            for (table, value) in group {
                let key = table.parse::<TableKey>()?;
                match value {
                    Value::Object(row) => set.push(key, row),
                    _ => return Err(RowSetError::MalformedRow { table: key }),
                }
            }
        }
        Ok(set)
    }

    pub fn push(&mut self, key: TableKey, row: Row) {
        self.rows.push((key, row));
    }

    pub fn rows(&self, key: TableKey) -> impl Iterator<Item = &Row> + '_ {
        self.rows
            .iter()
            .filter(move |(table, _)| *table == key)
            .map(|(_, row)| row)
    }

    pub fn first(&self, key: TableKey) -> Option<&Row> {
        self.rows(key).next()
    }

    pub fn count(&self, key: TableKey) -> usize {
        self.rows(key).count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// String field; anything that is not a JSON string becomes empty.
pub fn text(row: &Row, field: &str) -> String {
    match row.get(field) {
        Some(Value::String(value)) => value.clone(),
        _ => String::new(),
    }
}

/// Numeric field; numbers pass through, strings are parsed, everything else is 0.
pub fn number(row: &Row, field: &str) -> f64 {
    let parsed = match row.get(field) {
        Some(Value::Number(value)) => value.as_f64(),
        Some(Value::String(value)) => value.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|value| value.is_finite()).unwrap_or(0.0)
}

/// Integer field, truncating fractional input.
pub fn integer(row: &Row, field: &str) -> i64 {
    match row.get(field) {
        Some(Value::Number(value)) if value.is_i64() => value.as_i64().unwrap_or(0),
        _ => number(row, field).trunc() as i64,
    }
}

/// Boolean field; only literal `true` or the string `"true"` count.
pub fn flag(row: &Row, field: &str) -> bool {
    match row.get(field) {
        Some(Value::Bool(value)) => *value,
        Some(Value::String(value)) => value == "true",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn coercions_default_instead_of_failing() {
        let row = row(json!({
            "name": "Crescent",
            "phone": 9876543210u64,
            "grace": "15",
            "ratio": " 92.5 ",
            "garbage": "n/a",
            "active": "true",
            "pinned": "TRUE",
            "visible": true,
            "nothing": null
        }));

        assert_eq!(text(&row, "name"), "Crescent");
        assert_eq!(text(&row, "phone"), "");
        assert_eq!(text(&row, "missing"), "");
        assert_eq!(integer(&row, "grace"), 15);
        assert_eq!(number(&row, "ratio"), 92.5);
        assert_eq!(integer(&row, "ratio"), 92);
        assert_eq!(number(&row, "garbage"), 0.0);
        assert_eq!(integer(&row, "nothing"), 0);
        assert!(flag(&row, "active"));
        assert!(!flag(&row, "pinned"));
        assert!(flag(&row, "visible"));
        assert!(!flag(&row, "missing"));
    }

    #[test]
    fn groups_preserve_order_per_table() {
        let groups = vec![
            row(json!({"events": {"title": "Sports Day"}})),
            row(json!({"school": {"name": "First"}})),
            row(json!({"events": {"title": "Annual Day"}})),
        ];
        let set = RowSet::from_groups(groups).expect("known tables");

        let titles: Vec<String> = set
            .rows(TableKey::Events)
            .map(|row| text(row, "title"))
            .collect();
        assert_eq!(titles, vec!["Sports Day", "Annual Day"]);
        assert_eq!(set.count(TableKey::School), 1);
        assert_eq!(set.count(TableKey::Personnel), 0);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn unknown_tables_are_rejected() {
        let err = RowSet::from_groups(vec![row(json!({"alumni": {"name": "X"}}))])
            .expect_err("closed table set");
        assert_eq!(err, RowSetError::UnknownTable("alumni".to_string()));
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let err = RowSet::from_groups(vec![row(json!({"events": ["not", "a", "row"]}))])
            .expect_err("rows must be objects");
        assert_eq!(
            err,
            RowSetError::MalformedRow {
                table: TableKey::Events
            }
        );
    }

    #[test]
    fn table_keys_round_trip_through_names() {
        for key in TableKey::ALL {
            assert_eq!(key.as_str().parse::<TableKey>(), Ok(key));
        }
    }
}
