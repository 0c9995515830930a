use std::fmt::Debug;

use css_common::helpers::round_dp;
use serde::Serialize;

use crate::{
    db_types::Order,
    traits::{CatalogManagement, OrderManagement, StorefrontError},
};

/// How many orders the dashboard's recent-orders list carries.
const RECENT_ORDER_COUNT: i64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub total_orders: i64,
    /// Sum of all orders' `amount_usd`, rounded to cents.
    pub total_revenue: f64,
    /// The five most recent orders, newest first.
    pub recent_orders: Vec<Order>,
}

/// `DashboardApi` computes the simple aggregates behind the summary dashboard.
pub struct DashboardApi<B> {
    db: B,
}

impl<B> Debug for DashboardApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DashboardApi")
    }
}

impl<B> DashboardApi<B>
where B: CatalogManagement + OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, StorefrontError> {
        let total_products = self.db.count_products().await?;
        let total_orders = self.db.count_orders().await?;
        let total_revenue = round_dp(self.db.total_revenue().await?, 2);
        let recent_orders = self.db.fetch_recent_orders(RECENT_ORDER_COUNT).await?;
        Ok(DashboardSummary { total_products, total_orders, total_revenue, recent_orders })
    }
}
