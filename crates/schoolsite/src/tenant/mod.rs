//! Tenant content: fetching, normalization, access gating, render state.

pub mod fetcher;
pub mod fixture;
pub mod rows;
pub mod state;
pub mod subscription;
pub mod view_model;

pub use fetcher::{FetchError, TenantFetchResult, TenantFetcher, DEFAULT_EMPTY_MESSAGE};
pub use fixture::{build_from_fixture, FixtureError, TenantFixture};
pub use rows::{RowSet, RowSetError, TableKey};
pub use state::{TenantState, TenantStatus};
pub use subscription::{
    check_subscription, check_subscription_now, SubscriptionCheckResult, SubscriptionStatus,
};
pub use view_model::{build_view_model, Listed, TenantViewModel};
