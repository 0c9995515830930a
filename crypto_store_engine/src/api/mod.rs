mod catalog_api;
mod dashboard_api;
mod order_flow_api;

pub use catalog_api::CatalogApi;
pub use dashboard_api::{DashboardApi, DashboardSummary};
pub use order_flow_api::{OrderFlowApi, INTENT_EXPIRY};
