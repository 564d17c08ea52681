use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::subscription::Subscription;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_companies: u64,
    pub active_companies: u64,
    pub total_users: u64,
    pub total_plans: u64,
    pub active_subscriptions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCompany {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRevenue {
    #[serde(default, with = "rust_decimal::serde::float")]
    pub monthly_revenue: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub yearly_revenue: Decimal,
    #[serde(default)]
    pub active_subscriptions: u64,
}

/// `GET /superadmin/dashboard/overview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_companies: Vec<RecentCompany>,
    #[serde(default)]
    pub revenue: DashboardRevenue,
}
