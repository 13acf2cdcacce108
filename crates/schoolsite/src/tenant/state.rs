use serde::Serialize;

use super::fetcher::TenantFetchResult;
use super::view_model::{build_view_model, TenantViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Success,
    Empty,
    Error,
    Idle,
}

/// What the template layer receives for one request. Built once, read-only after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantState {
    pub status: TenantStatus,
    pub data: Option<TenantViewModel>,
    pub message: String,
}

impl TenantState {
    pub fn idle() -> Self {
        Self {
            status: TenantStatus::Idle,
            data: None,
            message: String::new(),
        }
    }

    pub fn loaded(view_model: TenantViewModel) -> Self {
        Self {
            status: TenantStatus::Success,
            data: Some(view_model),
            message: String::new(),
        }
    }

    pub fn from_fetch(result: TenantFetchResult) -> Self {
        match result {
            TenantFetchResult::Success { data } => Self::loaded(build_view_model(&data)),
            TenantFetchResult::Empty { message } => Self {
                status: TenantStatus::Empty,
                data: None,
                message,
            },
            TenantFetchResult::Error { error } => Self {
                status: TenantStatus::Error,
                data: None,
                message: error.to_string(),
            },
        }
    }
}

impl Default for TenantState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::fetcher::FetchError;
    use crate::tenant::rows::{RowSet, TableKey};
    use serde_json::json;

    #[test]
    fn success_builds_view_model() {
        let mut rows = RowSet::new();
        let row = json!({"name": "Crescent", "is_active": true});
        if let serde_json::Value::Object(row) = row {
            rows.push(TableKey::School, row);
        }

        let state = TenantState::from_fetch(TenantFetchResult::Success { data: rows });
        assert_eq!(state.status, TenantStatus::Success);
        assert_eq!(state.data.expect("view model").school.name, "Crescent");
    }

    #[test]
    fn empty_and_error_carry_messages_without_data() {
        let empty = TenantState::from_fetch(TenantFetchResult::Empty {
            message: "nothing yet".to_string(),
        });
        assert_eq!(empty.status, TenantStatus::Empty);
        assert!(empty.data.is_none());
        assert_eq!(empty.message, "nothing yet");

        let error = TenantState::from_fetch(TenantFetchResult::Error {
            error: FetchError::Status {
                code: 500,
                reason: "Internal Server Error".to_string(),
            },
        });
        assert_eq!(error.status, TenantStatus::Error);
        assert!(error.data.is_none());
        assert!(error.message.contains("500"));
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(TenantState::default().status, TenantStatus::Idle);
    }
}
