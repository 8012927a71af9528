//! Plan gate: decides whether a principal may pass a checkpoint guarding a
//! protected operation.
//!
//! Two policy shapes are supported:
//! - `AllowSet`: the principal's plan must be one of the listed tiers.
//! - `MinimumTier`: the principal's plan must rank at or above a threshold.
//!
//! In both cases a paid plan also needs an `active` subscription. The free
//! tier is exempt from the status check.
//!
//! Checks are pure. The HTTP adapter lives in the server crate.

use serde::Serialize;

use crate::error::GateError;
use crate::principal::Principal;
use crate::tier::{Plan, SubscriptionStatus, Tier};

// ── Policy ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Non-empty, in the order the route declared it.
    AllowSet(Vec<Tier>),
    MinimumTier(Tier),
}

impl AccessPolicy {
    pub fn allow(tiers: impl IntoIterator<Item = Tier>) -> Result<Self, GateError> {
        let tiers: Vec<Tier> = tiers.into_iter().collect();
        if tiers.is_empty() {
            return Err(GateError::EmptyAllowSet);
        }
        Ok(Self::AllowSet(tiers))
    }

    pub fn minimum(threshold: Tier) -> Self {
        Self::MinimumTier(threshold)
    }
}

// ── Decision ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialKind {
    Unauthenticated,
    PlanInsufficient,
    SubscriptionInactive,
}

impl DenialKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::PlanInsufficient => "PLAN_INSUFFICIENT",
            Self::SubscriptionInactive => "SUBSCRIPTION_INACTIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    Unauthenticated,
    PlanInsufficient {
        current_plan: Plan,
        /// The declared allow-set; empty for minimum-tier policies.
        required_plans: Vec<Tier>,
        upgrade_to: Tier,
    },
    SubscriptionInactive {
        current_plan: Plan,
        subscription_status: SubscriptionStatus,
    },
}

impl Denial {
    pub fn kind(&self) -> DenialKind {
        match self {
            Self::Unauthenticated => DenialKind::Unauthenticated,
            Self::PlanInsufficient { .. } => DenialKind::PlanInsufficient,
            Self::SubscriptionInactive { .. } => DenialKind::SubscriptionInactive,
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::PlanInsufficient { .. } | Self::SubscriptionInactive { .. } => 403,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Unauthenticated => "Authentication required".to_string(),
            Self::PlanInsufficient {
                required_plans,
                upgrade_to,
                ..
            } if required_plans.is_empty() => {
                format!("This feature requires the {upgrade_to} plan or higher")
            }
            Self::PlanInsufficient { required_plans, .. } => {
                let names: Vec<&str> = required_plans.iter().map(|t| t.as_str()).collect();
                format!("This feature requires one of: {}", names.join(", "))
            }
            Self::SubscriptionInactive {
                subscription_status,
                ..
            } => format!(
                "Your subscription is {subscription_status}; renew it to use this feature"
            ),
        }
    }

    /// True when the suggested target ranks above the current plan. An
    /// allow-set can exclude higher tiers, so a denied principal may need a
    /// plan change that is not an upgrade.
    pub fn upgrade_required(&self) -> bool {
        match self {
            Self::PlanInsufficient {
                current_plan,
                upgrade_to,
                ..
            } => current_plan.rank() < upgrade_to.rank(),
            _ => false,
        }
    }

    pub fn current_plan(&self) -> Option<&Plan> {
        match self {
            Self::Unauthenticated => None,
            Self::PlanInsufficient { current_plan, .. }
            | Self::SubscriptionInactive { current_plan, .. } => Some(current_plan),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Allow => None,
            Self::Deny(d) => Some(d),
        }
    }
}

// ── Checks ────────────────────────────────────────────────────

pub fn evaluate(principal: Option<&Principal>, policy: &AccessPolicy) -> Decision {
    match policy {
        AccessPolicy::AllowSet(tiers) => check_allow_set(principal, tiers),
        AccessPolicy::MinimumTier(threshold) => check_minimum_tier(principal, *threshold),
    }
}

pub fn check_allow_set(principal: Option<&Principal>, allowed: &[Tier]) -> Decision {
    let Some(principal) = principal else {
        return Decision::Deny(Denial::Unauthenticated);
    };

    let member = principal
        .plan
        .tier()
        .is_some_and(|t| allowed.contains(&t));

    if !member {
        // An empty allow-set is rejected by `AccessPolicy::allow`; callers
        // passing a raw slice get `free` as the target.
        let upgrade_to = suggested_upgrade(allowed).unwrap_or(Tier::DEFAULT);
        return Decision::Deny(Denial::PlanInsufficient {
            current_plan: principal.plan.clone(),
            required_plans: allowed.to_vec(),
            upgrade_to,
        });
    }

    subscription_check(principal)
}

pub fn check_minimum_tier(principal: Option<&Principal>, threshold: Tier) -> Decision {
    let Some(principal) = principal else {
        return Decision::Deny(Denial::Unauthenticated);
    };

    if principal.plan.rank() < threshold.rank() {
        return Decision::Deny(Denial::PlanInsufficient {
            current_plan: principal.plan.clone(),
            required_plans: Vec::new(),
            upgrade_to: threshold,
        });
    }

    subscription_check(principal)
}

/// Lowest allowed tier in canonical order, else the first declared one.
pub fn suggested_upgrade(allowed: &[Tier]) -> Option<Tier> {
    Tier::ORDERED
        .into_iter()
        .find(|t| allowed.contains(t))
        .or_else(|| allowed.first().copied())
}

fn subscription_check(principal: &Principal) -> Decision {
    if !principal.plan.is_free() && !principal.subscription_status.is_active() {
        return Decision::Deny(Denial::SubscriptionInactive {
            current_plan: principal.plan.clone(),
            subscription_status: principal.subscription_status,
        });
    }
    Decision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [SubscriptionStatus; 4] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Inactive,
        SubscriptionStatus::Cancelled,
        SubscriptionStatus::PastDue,
    ];

    fn principal(plan: impl Into<Plan>, status: SubscriptionStatus) -> Principal {
        Principal::new("reader@example.com", plan, status)
    }

    fn all_allow_sets() -> Vec<Vec<Tier>> {
        // Every non-empty subset of the tier set.
        (1u8..8)
            .map(|mask| {
                Tier::ORDERED
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, t)| t)
                    .collect()
            })
            .collect()
    }

    // ── check_allow_set ──────────────────────────────────────────

    #[test]
    fn allow_set_member_with_active_status_is_allowed() {
        for set in all_allow_sets() {
            for &t in &set {
                let p = principal(t, SubscriptionStatus::Active);
                assert_eq!(check_allow_set(Some(&p), &set), Decision::Allow, "{t} in {set:?}");
            }
        }
    }

    #[test]
    fn allow_set_non_member_is_plan_insufficient_for_any_status() {
        for set in all_allow_sets() {
            for t in Tier::ORDERED.into_iter().filter(|t| !set.contains(t)) {
                for status in ALL_STATUSES {
                    let d = check_allow_set(Some(&principal(t, status)), &set);
                    assert_eq!(
                        d.denial().map(Denial::kind),
                        Some(DenialKind::PlanInsufficient),
                        "{t} not in {set:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn allow_set_pro_inactive_is_subscription_inactive() {
        let p = principal(Tier::Pro, SubscriptionStatus::Inactive);
        let d = check_allow_set(Some(&p), &[Tier::Free, Tier::Pro]);
        assert_eq!(
            d,
            Decision::Deny(Denial::SubscriptionInactive {
                current_plan: Plan::Known(Tier::Pro),
                subscription_status: SubscriptionStatus::Inactive,
            })
        );
    }

    #[test]
    fn free_tier_is_exempt_from_status_check() {
        for status in ALL_STATUSES {
            let p = principal(Tier::Free, status);
            assert!(check_allow_set(Some(&p), &[Tier::Free]).is_allow());
            assert!(check_allow_set(Some(&p), &[Tier::Premium, Tier::Free]).is_allow());
            assert!(check_minimum_tier(Some(&p), Tier::Free).is_allow());
        }
    }

    #[test]
    fn allow_set_suggests_lowest_allowed_tier_in_canonical_order() {
        let p = principal(Tier::Free, SubscriptionStatus::Active);
        let d = check_allow_set(Some(&p), &[Tier::Premium, Tier::Pro]);
        match d {
            Decision::Deny(Denial::PlanInsufficient {
                upgrade_to,
                required_plans,
                current_plan,
            }) => {
                assert_eq!(upgrade_to, Tier::Pro);
                assert_eq!(required_plans, vec![Tier::Premium, Tier::Pro]);
                assert_eq!(current_plan, Plan::Known(Tier::Free));
            }
            other => panic!("expected PlanInsufficient, got {other:?}"),
        }
    }

    #[test]
    fn allow_set_excluding_higher_tier_names_the_set() {
        let p = principal(Tier::Premium, SubscriptionStatus::Active);
        let d = check_allow_set(Some(&p), &[Tier::Pro]);
        let denial = d.denial().expect("premium is outside [pro]");
        assert_eq!(denial.kind(), DenialKind::PlanInsufficient);
        assert_eq!(denial.message(), "This feature requires one of: pro");
        assert!(!denial.upgrade_required());
    }

    #[test]
    fn allow_set_denial_below_the_set_requires_upgrade() {
        let p = principal(Tier::Free, SubscriptionStatus::Inactive);
        let d = check_allow_set(Some(&p), &[Tier::Pro, Tier::Premium]);
        let denial = d.denial().unwrap();
        assert_eq!(denial.message(), "This feature requires one of: pro, premium");
        assert!(denial.upgrade_required());
    }

    #[test]
    fn minimum_tier_denial_says_or_higher() {
        let p = principal(Tier::Pro, SubscriptionStatus::Active);
        let d = check_minimum_tier(Some(&p), Tier::Premium);
        let denial = d.denial().unwrap();
        assert_eq!(
            denial.message(),
            "This feature requires the premium plan or higher"
        );
        assert!(denial.upgrade_required());
    }

    #[test]
    fn suggested_upgrade_empty_is_none() {
        assert_eq!(suggested_upgrade(&[]), None);
        assert_eq!(suggested_upgrade(&[Tier::Premium]), Some(Tier::Premium));
    }

    #[test]
    fn allow_set_unrecognized_plan_is_never_a_member() {
        let p = principal(Plan::Unrecognized("gold".into()), SubscriptionStatus::Active);
        let d = check_allow_set(Some(&p), &[Tier::Free, Tier::Pro, Tier::Premium]);
        assert_eq!(d.denial().map(Denial::kind), Some(DenialKind::PlanInsufficient));
    }

    // ── check_minimum_tier ───────────────────────────────────────

    #[test]
    fn minimum_pro_allows_active_premium() {
        let p = principal(Tier::Premium, SubscriptionStatus::Active);
        assert_eq!(check_minimum_tier(Some(&p), Tier::Pro), Decision::Allow);
    }

    #[test]
    fn minimum_pro_denies_free() {
        let p = principal(Tier::Free, SubscriptionStatus::Active);
        assert_eq!(
            check_minimum_tier(Some(&p), Tier::Pro),
            Decision::Deny(Denial::PlanInsufficient {
                current_plan: Plan::Known(Tier::Free),
                required_plans: vec![],
                upgrade_to: Tier::Pro,
            })
        );
    }

    #[test]
    fn minimum_tier_lapsed_premium_is_subscription_inactive() {
        let p = principal(Tier::Premium, SubscriptionStatus::PastDue);
        let d = check_minimum_tier(Some(&p), Tier::Pro);
        assert_eq!(
            d.denial().map(Denial::kind),
            Some(DenialKind::SubscriptionInactive)
        );
    }

    #[test]
    fn unrecognized_plan_ranks_as_free() {
        let p = principal(Plan::Unrecognized("legacy".into()), SubscriptionStatus::Active);
        for threshold in [Tier::Pro, Tier::Premium] {
            let d = check_minimum_tier(Some(&p), threshold);
            assert_eq!(d.denial().map(Denial::kind), Some(DenialKind::PlanInsufficient));
        }
        // Passes a free threshold but is not itself the free tier, so status applies.
        assert!(check_minimum_tier(Some(&p), Tier::Free).is_allow());
        let lapsed = principal(Plan::Unrecognized("legacy".into()), SubscriptionStatus::Inactive);
        assert_eq!(
            check_minimum_tier(Some(&lapsed), Tier::Free)
                .denial()
                .map(Denial::kind),
            Some(DenialKind::SubscriptionInactive)
        );
    }

    // ── shared ───────────────────────────────────────────────────

    #[test]
    fn no_principal_is_unauthenticated_for_every_policy() {
        for set in all_allow_sets() {
            assert_eq!(
                evaluate(None, &AccessPolicy::AllowSet(set)),
                Decision::Deny(Denial::Unauthenticated)
            );
        }
        for t in Tier::ORDERED {
            assert_eq!(
                evaluate(None, &AccessPolicy::minimum(t)),
                Decision::Deny(Denial::Unauthenticated)
            );
        }
    }

    #[test]
    fn checks_are_idempotent() {
        let p = principal(Tier::Pro, SubscriptionStatus::Cancelled);
        let policy = AccessPolicy::allow([Tier::Pro, Tier::Premium]).unwrap();
        let first = evaluate(Some(&p), &policy);
        let second = evaluate(Some(&p), &policy);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_allow_set_is_rejected() {
        assert_eq!(
            AccessPolicy::allow(std::iter::empty()),
            Err(GateError::EmptyAllowSet)
        );
    }

    #[test]
    fn denial_status_codes() {
        assert_eq!(Denial::Unauthenticated.http_status(), 401);
        let d = Denial::SubscriptionInactive {
            current_plan: Plan::Known(Tier::Pro),
            subscription_status: SubscriptionStatus::Cancelled,
        };
        assert_eq!(d.http_status(), 403);
        assert_eq!(
            d.message(),
            "Your subscription is cancelled; renew it to use this feature"
        );
        assert_eq!(d.kind().as_str(), "SUBSCRIPTION_INACTIVE");
    }
}
