//! Plan and pricing configuration types.
//!
//! These are the static inputs of the catalog. They deserialize from the
//! `pricing:` section of the configuration file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Limit values keyed by limit name, in declaration order.
///
/// A value of [`UNLIMITED`] means no ceiling; any other value is a hard ceiling.
pub type Limits = IndexMap<String, i64>;

/// Sentinel limit value meaning "unbounded".
pub const UNLIMITED: i64 = -1;

/// A decoded limit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unlimited,
    Ceiling(u64),
}

impl Limit {
    /// Decode a raw configured value. Values below the sentinel decode to `None`.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw == UNLIMITED {
            Some(Limit::Unlimited)
        } else {
            u64::try_from(raw).ok().map(Limit::Ceiling)
        }
    }

    /// Whether one more unit may be used when `usage` units are already in use.
    pub fn admits(&self, usage: u64) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Ceiling(max) => usage < *max,
        }
    }
}

/// How the product is sold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    #[default]
    Freemium,
    FreeTrial,
    PaidOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Monthly price; zero marks a free plan.
    pub monthly: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly: Option<f64>,
}

/// One subscription tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Stable tier identifier stored on the tenant record.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Billing provider id of the monthly price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
    /// Billing provider id of the yearly price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_price_id: Option<String>,
    #[serde(default)]
    pub limits: Limits,
    /// Display-only feature bullets.
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub cta: String,
}

impl Plan {
    pub fn is_free(&self) -> bool {
        self.price.monthly == 0.0
    }

    pub fn is_paid(&self) -> bool {
        self.price.monthly > 0.0
    }

    /// Declared billing price ids, skipping empty strings.
    pub fn billing_price_ids(&self) -> impl Iterator<Item = &str> {
        [self.price_id.as_deref(), self.yearly_price_id.as_deref()]
            .into_iter()
            .flatten()
            .filter(|id| !id.is_empty())
    }
}

/// The full static pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub model: PricingModel,
    /// Trial length for the free-trial model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<u32>,
    /// Limits for tenants without a recognized tier.
    #[serde(default)]
    pub default_limits: Limits,
    pub plans: Vec<Plan>,
}
