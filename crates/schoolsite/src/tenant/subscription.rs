use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use super::view_model::TenantViewModel;

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    GracePeriod,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubscriptionCheckResult {
    pub status: SubscriptionStatus,
    pub is_access_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl SubscriptionCheckResult {
    fn new(status: SubscriptionStatus, is_access_allowed: bool) -> Self {
        Self {
            status,
            is_access_allowed,
            days_remaining: None,
        }
    }
}

/// Access decision for a school at `now`.
///
/// An inactive school is denied outright. Past the expiration date, access
/// continues while the elapsed days (rounded up) stay within the grace period.
pub fn check_subscription(view_model: &TenantViewModel, now: DateTime<Utc>) -> SubscriptionCheckResult {
    let school = &view_model.school;
    if !school.is_active {
        return SubscriptionCheckResult::new(SubscriptionStatus::Inactive, false);
    }

    let Some(expires_at) = parse_expiration(&school.expiration_date) else {
        return SubscriptionCheckResult::new(SubscriptionStatus::Active, true);
    };

    if now <= expires_at {
        return SubscriptionCheckResult::new(SubscriptionStatus::Active, true);
    }

    let elapsed_days = elapsed_days_ceil(expires_at, now);
    if elapsed_days <= school.grace_period_days {
        SubscriptionCheckResult {
            status: SubscriptionStatus::GracePeriod,
            is_access_allowed: true,
            days_remaining: Some(school.grace_period_days - elapsed_days),
        }
    } else {
        SubscriptionCheckResult::new(SubscriptionStatus::Expired, false)
    }
}

pub fn check_subscription_now(view_model: &TenantViewModel) -> SubscriptionCheckResult {
    check_subscription(view_model, Utc::now())
}

fn elapsed_days_ceil(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - since).num_milliseconds();
    (millis + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY)
}

/// Accepts RFC 3339, a naive timestamp (read as UTC) or a bare date (midnight
/// UTC). Anything else counts as no expiration.
pub fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
