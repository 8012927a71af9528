//! GET /api/plans and GET /api/credits/packs: static catalogs, no auth.

use axum::Json;
use blog_access_core::catalog::{CreditPack, SubscriptionPlan, CREDIT_PACKS, SUBSCRIPTION_PLANS};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub success: bool,
    pub plans: &'static [SubscriptionPlan],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditPackView {
    #[serde(flatten)]
    pub pack: &'static CreditPack,
    pub price_per_credit_centicents: u32,
}

#[derive(Debug, Serialize)]
pub struct CreditPacksResponse {
    pub success: bool,
    pub packs: Vec<CreditPackView>,
}

pub async fn list_plans() -> Json<PlansResponse> {
    Json(PlansResponse {
        success: true,
        plans: &SUBSCRIPTION_PLANS,
    })
}

pub async fn list_credit_packs() -> Json<CreditPacksResponse> {
    let packs = CREDIT_PACKS
        .iter()
        .map(|pack| CreditPackView {
            pack,
            price_per_credit_centicents: pack.price_per_credit_centicents(),
        })
        .collect();
    Json(CreditPacksResponse {
        success: true,
        packs,
    })
}
