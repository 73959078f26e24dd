//! Immutable tier index and entitlement decisions.
//!
//! Built once from a [`PricingConfig`]. Every lookup is total: unrecognized
//! tiers fall back rather than fail, and which fallback applies depends on the
//! question being asked.
//!
//! | Question             | Absent tier     | Unrecognized tier |
//! |----------------------|-----------------|-------------------|
//! | `resolve_plan`       | n/a             | first plan        |
//! | `limits_for`         | default limits  | default limits    |
//! | `is_paid_tier`       | false           | false             |
//! | `plan_price`         | 0               | 0                 |

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::error::{PlansError, Result};
use crate::types::{Limit, Limits, Plan, PricingConfig, PricingModel};

/// Validated plan set with id and billing price id indexes.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    model: PricingModel,
    trial_days: Option<u32>,
    default_limits: Limits,
    plans: Vec<Plan>,
    id_index: HashMap<String, usize>,
    price_index: HashMap<String, usize>,
}

fn check_limits(scope: &str, limits: &Limits) -> Result<()> {
    for (key, &value) in limits {
        if Limit::from_raw(value).is_none() {
            return Err(PlansError::InvalidLimit {
                scope: scope.to_string(),
                key: key.clone(),
                value,
            });
        }
    }
    Ok(())
}

fn check_price(plan: &str, period: &'static str, amount: f64) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(PlansError::InvalidPrice {
            plan: plan.to_string(),
            period,
            amount,
        })
    }
}

impl PlanCatalog {
    /// Validate the configuration and build the lookup indexes.
    pub fn new(config: PricingConfig) -> Result<Self> {
        let PricingConfig {
            model,
            trial_days,
            default_limits,
            plans,
        } = config;

        if plans.is_empty() {
            return Err(PlansError::NoPlans);
        }
        check_limits("default limits", &default_limits)?;

        let mut id_index = HashMap::with_capacity(plans.len());
        let mut price_index: HashMap<String, usize> = HashMap::new();

        for (idx, plan) in plans.iter().enumerate() {
            if id_index.insert(plan.id.clone(), idx).is_some() {
                return Err(PlansError::DuplicatePlanId {
                    id: plan.id.clone(),
                });
            }

            check_price(&plan.id, "monthly", plan.price.monthly)?;
            if let Some(yearly) = plan.price.yearly {
                check_price(&plan.id, "yearly", yearly)?;
            }
            check_limits(&format!("plan '{}'", plan.id), &plan.limits)?;

            if plan.price_id.as_deref() == Some("") || plan.yearly_price_id.as_deref() == Some("")
            {
                warn!(plan = %plan.id, "empty billing price id ignored");
            }

            for price_id in plan.billing_price_ids() {
                if let Some(&other) = price_index.get(price_id).filter(|&&other| other != idx) {
                    return Err(PlansError::DuplicatePriceId {
                        price_id: price_id.to_string(),
                        first: plans[other].id.clone(),
                        second: plan.id.clone(),
                    });
                }
                price_index.insert(price_id.to_string(), idx);
            }
        }

        debug!(
            plans = plans.len(),
            price_ids = price_index.len(),
            ?model,
            "plan catalog built"
        );

        Ok(Self {
            model,
            trial_days,
            default_limits,
            plans,
            id_index,
            price_index,
        })
    }

    // --- Plan lookups ---

    /// All plans, in declaration order.
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Get a plan by tier id, without fallback.
    pub fn get(&self, tier: &str) -> Option<&Plan> {
        self.id_index.get(tier).map(|&i| &self.plans[i])
    }

    /// The plan for `tier`, or the first declared plan when the tier is unknown.
    pub fn resolve_plan(&self, tier: &str) -> &Plan {
        match self.get(tier) {
            Some(plan) => plan,
            None => {
                trace!(tier, "unrecognized tier, resolving to first plan");
                &self.plans[0]
            }
        }
    }

    /// Translate a billing price id (monthly or yearly) to the owning tier id.
    pub fn resolve_plan_by_price_id(&self, price_id: &str) -> Option<&str> {
        self.price_index
            .get(price_id)
            .map(|&i| self.plans[i].id.as_str())
    }

    /// First plan with a zero monthly price.
    pub fn free_plan(&self) -> Option<&Plan> {
        self.plans.iter().find(|p| p.is_free())
    }

    /// Plans with a nonzero monthly price, in declaration order.
    pub fn paid_plans(&self) -> Vec<&Plan> {
        self.plans.iter().filter(|p| p.is_paid()).collect()
    }

    /// The plan flagged for emphasis on the pricing page.
    pub fn highlighted_plan(&self) -> Option<&Plan> {
        self.plans.iter().find(|p| p.highlighted)
    }

    /// Monthly price of a tier; zero when absent or unrecognized.
    pub fn plan_price(&self, tier: Option<&str>) -> f64 {
        tier.and_then(|t| self.get(t))
            .map(|p| p.price.monthly)
            .unwrap_or(0.0)
    }

    /// Whether the tier is a recognized plan with a nonzero monthly price.
    pub fn is_paid_tier(&self, tier: Option<&str>) -> bool {
        tier.and_then(|t| self.get(t)).is_some_and(Plan::is_paid)
    }

    // --- Entitlements ---

    /// Limits applying to a tier.
    ///
    /// Absent and unrecognized tiers both get the default limits, not the
    /// first plan's.
    pub fn limits_for(&self, tier: Option<&str>) -> &Limits {
        match tier {
            None => &self.default_limits,
            Some(t) => match self.get(t) {
                Some(plan) => &plan.limits,
                None => {
                    trace!(tier = t, "unrecognized tier, using default limits");
                    &self.default_limits
                }
            },
        }
    }

    /// The decoded limit for `key`, or `None` when the key is not declared.
    pub fn limit(&self, tier: Option<&str>, key: &str) -> Option<Limit> {
        self.limits_for(tier)
            .get(key)
            .and_then(|&raw| Limit::from_raw(raw))
    }

    /// Admission check: may a tenant at `usage` perform one more `key` action?
    ///
    /// Undeclared keys are denied.
    pub fn within_limit(&self, tier: Option<&str>, key: &str, usage: u64) -> bool {
        let allowed = self
            .limit(tier, key)
            .is_some_and(|limit| limit.admits(usage));
        trace!(tier, key, usage, allowed, "limit check");
        allowed
    }

    /// Headroom left under `key` at `usage`, or `None` when the key is not declared.
    pub fn remaining(&self, tier: Option<&str>, key: &str, usage: u64) -> Option<Limit> {
        self.limit(tier, key).map(|limit| match limit {
            Limit::Unlimited => Limit::Unlimited,
            Limit::Ceiling(max) => Limit::Ceiling(max.saturating_sub(usage)),
        })
    }

    // --- Configuration ---

    pub fn default_limits(&self) -> &Limits {
        &self.default_limits
    }

    pub fn model(&self) -> PricingModel {
        self.model
    }

    pub fn trial_days(&self) -> Option<u32> {
        self.trial_days
    }
}
