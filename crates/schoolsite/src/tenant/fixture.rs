//! Nested local fixture, the alternate input shape used for previews and demos.
//!
//! ```json
//! { "school": {..}, "identity": {..}, "events": [{..}, {..}] }
//! ```
//!
//! Singleton tables may be given as an object or an array; collections as an
//! array or a single object.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::rows::{RowSet, RowSetError, TableKey};
use super::view_model::{build_view_model, TenantViewModel};

const BUILTIN_FIXTURE: &str = include_str!("../../fixtures/demo_school.json");

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("unable to read fixture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("fixture is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("fixture root must be a JSON object")]
    NotAnObject,
    #[error(transparent)]
    Rows(#[from] RowSetError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TenantFixture {
    rows: RowSet,
}

impl TenantFixture {
    pub fn from_value(value: Value) -> Result<Self, FixtureError> {
        let Value::Object(tables) = value else {
            return Err(FixtureError::NotAnObject);
        };

        let mut rows = RowSet::new();
        for (table, entries) in tables {
            let key = table.parse::<TableKey>()?;
            let entries = match entries {
                Value::Array(items) => items,
                Value::Null => Vec::new(),
                single => vec![single],
            };
            for entry in entries {
                match entry {
                    Value::Object(row) => rows.push(key, row),
                    _ => return Err(RowSetError::MalformedRow { table: key }.into()),
                }
            }
        }
        Ok(Self { rows })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FixtureError> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Demo school shipped with the crate.
    pub fn builtin() -> Result<Self, FixtureError> {
        Self::from_json_str(BUILTIN_FIXTURE)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, FixtureError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }
}

/// Same mapping as [`build_view_model`], fed from the nested fixture shape.
pub fn build_from_fixture(fixture: &TenantFixture) -> TenantViewModel {
    build_view_model(&fixture.rows)
}
