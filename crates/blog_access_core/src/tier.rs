//! Subscription tiers and the plan/status values read off a user record.
//! Pure value types: no I/O, no framework types.

// `parse()` never fails: unknown plans and statuses have defined fallbacks.
#![allow(clippy::should_implement_trait)]

use serde::{Deserialize, Serialize, Serializer};

// ── Tier ──────────────────────────────────────────────────────

/// Subscription tier. Declaration order is the tier ordering (`free < pro < premium`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Pro,
    Premium,
}

impl Tier {
    /// Canonical ordering, lowest first.
    pub const ORDERED: [Tier; 3] = [Tier::Free, Tier::Pro, Tier::Premium];

    /// Tier assumed for a user record with no plan set.
    pub const DEFAULT: Tier = Tier::Free;

    pub fn rank(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Pro => 1,
            Self::Premium => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Premium => "premium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "pro" => Some(Self::Pro),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    pub fn is_paid(self) -> bool {
        self != Self::Free
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Plan ──────────────────────────────────────────────────────

/// The plan stored on a user record.
///
/// Records written by older clients can carry plan names outside the tier
/// set. Those are kept verbatim so denials can echo them back, rank as 0,
/// and never match an allow-set entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Plan {
    Known(Tier),
    Unrecognized(String),
}

impl Plan {
    /// Resolve a stored plan value. `None` means the field was never set.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Known(Tier::DEFAULT),
            Some(s) => Tier::from_str(s)
                .map(Self::Known)
                .unwrap_or_else(|| Self::Unrecognized(s.to_string())),
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::Known(t) => t.rank(),
            Self::Unrecognized(_) => 0,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::Known(t) => Some(*t),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Known(Tier::Free))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(t) => t.as_str(),
            Self::Unrecognized(s) => s,
        }
    }
}

impl From<Tier> for Plan {
    fn from(t: Tier) -> Self {
        Self::Known(t)
    }
}

impl Serialize for Plan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Plan {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::parse(raw.as_deref()))
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SubscriptionStatus ────────────────────────────────────────

/// Billing state of a paid subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Cancelled,
    PastDue,
}

impl SubscriptionStatus {
    pub const DEFAULT: SubscriptionStatus = SubscriptionStatus::Inactive;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Cancelled => "cancelled",
            Self::PastDue => "past_due",
        }
    }

    /// Unset and unknown values both resolve to `inactive`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("active") => Self::Active,
            Some("cancelled") => Self::Cancelled,
            Some("past_due") => Self::PastDue,
            _ => Self::DEFAULT,
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering_is_free_pro_premium() {
        assert!(Tier::Free < Tier::Pro);
        assert!(Tier::Pro < Tier::Premium);
        let ranks: Vec<u8> = Tier::ORDERED.iter().map(|t| t.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    fn tier_round_trips_through_as_str() {
        for t in Tier::ORDERED {
            assert_eq!(Tier::from_str(t.as_str()), Some(t));
        }
        assert_eq!(Tier::from_str("Pro"), None);
    }

    #[test]
    fn plan_unset_defaults_to_free() {
        assert_eq!(Plan::parse(None), Plan::Known(Tier::Free));
        assert!(Plan::parse(None).is_free());
    }

    #[test]
    fn plan_unrecognized_ranks_lowest_but_is_not_free() {
        let p = Plan::parse(Some("enterprise"));
        assert_eq!(p, Plan::Unrecognized("enterprise".into()));
        assert_eq!(p.rank(), 0);
        assert!(!p.is_free());
        assert_eq!(p.tier(), None);
        assert_eq!(p.as_str(), "enterprise");
    }

    #[test]
    fn plan_serializes_as_raw_string() {
        let json = serde_json::to_string(&Plan::Unrecognized("gold".into())).unwrap();
        assert_eq!(json, "\"gold\"");
        let json = serde_json::to_string(&Plan::Known(Tier::Premium)).unwrap();
        assert_eq!(json, "\"premium\"");
    }

    #[test]
    fn plan_deserializes_null_as_free() {
        let p: Plan = serde_json::from_str("null").unwrap();
        assert_eq!(p, Plan::Known(Tier::Free));
        let p: Plan = serde_json::from_str("\"pro\"").unwrap();
        assert_eq!(p, Plan::Known(Tier::Pro));
    }

    #[test]
    fn status_defaults_to_inactive() {
        assert_eq!(SubscriptionStatus::parse(None), SubscriptionStatus::Inactive);
        assert_eq!(
            SubscriptionStatus::parse(Some("trialing")),
            SubscriptionStatus::Inactive
        );
        assert_eq!(
            SubscriptionStatus::parse(Some("past_due")),
            SubscriptionStatus::PastDue
        );
        assert!(SubscriptionStatus::parse(Some("active")).is_active());
    }
}
