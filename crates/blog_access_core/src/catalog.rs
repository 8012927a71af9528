//! Static subscription plan and credit pack catalogs.

use serde::Serialize;

use crate::tier::Tier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub tier: Tier,
    pub name: &'static str,
    /// Monthly price in cents.
    pub price_cents: u32,
    /// `None` means unlimited.
    pub posts_per_month: Option<u32>,
    pub monthly_ai_credits: u32,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditPack {
    pub id: &'static str,
    pub name: &'static str,
    pub credits: u32,
    pub price_cents: u32,
}

impl CreditPack {
    /// Price per credit in hundredths of a cent, rounded down.
    pub fn price_per_credit_centicents(&self) -> u32 {
        self.price_cents * 100 / self.credits
    }
}

pub static SUBSCRIPTION_PLANS: [SubscriptionPlan; 3] = [
    SubscriptionPlan {
        tier: Tier::Free,
        name: "Free",
        price_cents: 0,
        posts_per_month: Some(3),
        monthly_ai_credits: 0,
        features: &["Public blog", "Basic editor", "Community support"],
    },
    SubscriptionPlan {
        tier: Tier::Pro,
        name: "Pro",
        price_cents: 999,
        posts_per_month: None,
        monthly_ai_credits: 100,
        features: &[
            "Unlimited posts",
            "AI writing assistant",
            "Custom domain",
            "Premium-only posts",
        ],
    },
    SubscriptionPlan {
        tier: Tier::Premium,
        name: "Premium",
        price_cents: 2499,
        posts_per_month: None,
        monthly_ai_credits: 500,
        features: &[
            "Everything in Pro",
            "Audience analytics",
            "Priority support",
        ],
    },
];

pub static CREDIT_PACKS: [CreditPack; 3] = [
    CreditPack {
        id: "starter",
        name: "Starter",
        credits: 50,
        price_cents: 499,
    },
    CreditPack {
        id: "creator",
        name: "Creator",
        credits: 200,
        price_cents: 1499,
    },
    CreditPack {
        id: "studio",
        name: "Studio",
        credits: 600,
        price_cents: 3999,
    },
];

pub fn subscription_plan(tier: Tier) -> &'static SubscriptionPlan {
    match tier {
        Tier::Free => &SUBSCRIPTION_PLANS[0],
        Tier::Pro => &SUBSCRIPTION_PLANS[1],
        Tier::Premium => &SUBSCRIPTION_PLANS[2],
    }
}

pub fn credit_pack(id: &str) -> Option<&'static CreditPack> {
    CREDIT_PACKS.iter().find(|p| p.id == id)
}
