//! Vendor dashboard aggregates returned by `dashboard/`.

use serde::Deserialize;

use super::catalog::ProductSummary;
use super::orders::OrderLine;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_orders: u64,
    pub pending_orders: u64,
    pub completed_orders: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VendorDashboard {
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_products: Vec<ProductSummary>,
    #[serde(default)]
    pub recent_orders: Vec<OrderLine>,
    #[serde(default)]
    pub pending_orders: Vec<OrderLine>,
    #[serde(default)]
    pub completed_orders: Vec<OrderLine>,
}
