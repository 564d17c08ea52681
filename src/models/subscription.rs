use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
    Lifetime,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "MONTHLY",
            BillingPeriod::Yearly => "YEARLY",
            BillingPeriod::Lifetime => "LIFETIME",
        }
    }
}

impl std::str::FromStr for BillingPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MONTHLY" => Ok(BillingPeriod::Monthly),
            "YEARLY" => Ok(BillingPeriod::Yearly),
            "LIFETIME" => Ok(BillingPeriod::Lifetime),
            other => Err(format!("unknown billing period '{}'", other)),
        }
    }
}

/// Plan as embedded in a subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub monthly_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub yearly_price: Option<Decimal>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub max_users: Option<u32>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub plan_id: String,
    pub billing_period: BillingPeriod,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trial_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default)]
    pub next_billing_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub plan: Option<SubscriptionPlan>,
}

/// Company summary returned alongside its subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedCompany {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
}

/// `GET /superadmin/subscriptions/company/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySubscription {
    pub company: SubscribedCompany,
    pub subscription: Option<Subscription>,
}

/// `POST /superadmin/subscriptions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscription {
    pub plan_id: String,
    pub company_id: String,
    pub billing_period: BillingPeriod,
    pub auto_renew: bool,
    pub start_date: NaiveDate,
}
