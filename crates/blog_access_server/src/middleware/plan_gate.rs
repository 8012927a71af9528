//! HTTP adapter for the plan gate.
//!
//! Mount per route group with
//! `route_layer(from_fn_with_state(Arc::new(policy), plan_gate::enforce))`.
//! `Allow` forwards the request untouched; a denial short-circuits with
//! 401 (no principal) or 403 and a JSON body describing the shortfall.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use blog_access_core::gate::{evaluate, AccessPolicy, Decision, Denial};
use blog_access_core::principal::Principal;
use blog_access_core::tier::{Plan, SubscriptionStatus, Tier};
use serde::Serialize;

pub async fn enforce(
    State(policy): State<Arc<AccessPolicy>>,
    req: Request,
    next: Next,
) -> Response {
    let decision = evaluate(req.extensions().get::<Principal>(), &policy);
    match decision {
        Decision::Allow => next.run(req).await,
        Decision::Deny(denial) => {
            tracing::debug!(
                path = %req.uri().path(),
                code = denial.kind().as_str(),
                current_plan = denial.current_plan().map(Plan::as_str).unwrap_or("-"),
                "plan gate denied request"
            );
            denial_response(&denial)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenialBody {
    pub success: bool,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_plan: Option<Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_plans: Option<Vec<Tier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_plan: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_required: Option<bool>,
}

impl From<&Denial> for DenialBody {
    fn from(denial: &Denial) -> Self {
        let mut body = DenialBody {
            success: false,
            code: denial.kind().as_str(),
            message: denial.message(),
            current_plan: denial.current_plan().cloned(),
            required_plans: None,
            required_plan: None,
            subscription_status: None,
            upgrade_required: None,
        };
        match denial {
            Denial::Unauthenticated => {}
            Denial::PlanInsufficient {
                required_plans,
                upgrade_to,
                ..
            } => {
                if !required_plans.is_empty() {
                    body.required_plans = Some(required_plans.clone());
                }
                body.required_plan = Some(*upgrade_to);
                body.upgrade_required = Some(denial.upgrade_required());
            }
            Denial::SubscriptionInactive {
                subscription_status,
                ..
            } => {
                body.subscription_status = Some(*subscription_status);
            }
        }
        body
    }
}

pub fn denial_response(denial: &Denial) -> Response {
    let status = StatusCode::from_u16(denial.http_status()).unwrap_or(StatusCode::FORBIDDEN);
    (status, Json(DenialBody::from(denial))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_body_has_no_plan_fields() {
        let json = serde_json::to_value(DenialBody::from(&Denial::Unauthenticated)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "UNAUTHENTICATED");
        assert!(json.get("currentPlan").is_none());
        assert_eq!(denial_response(&Denial::Unauthenticated).status(), 401);
    }

    #[test]
    fn plan_insufficient_body_names_upgrade_target() {
        let denial = Denial::PlanInsufficient {
            current_plan: Plan::Known(Tier::Free),
            required_plans: vec![Tier::Premium, Tier::Pro],
            upgrade_to: Tier::Pro,
        };
        let json = serde_json::to_value(DenialBody::from(&denial)).unwrap();
        assert_eq!(json["currentPlan"], "free");
        assert_eq!(json["requiredPlans"], serde_json::json!(["premium", "pro"]));
        assert_eq!(json["requiredPlan"], "pro");
        assert_eq!(json["upgradeRequired"], true);
        assert_eq!(denial_response(&denial).status(), 403);
    }

    #[test]
    fn higher_plan_outside_allow_set_is_not_told_to_upgrade() {
        let denial = Denial::PlanInsufficient {
            current_plan: Plan::Known(Tier::Premium),
            required_plans: vec![Tier::Pro],
            upgrade_to: Tier::Pro,
        };
        let json = serde_json::to_value(DenialBody::from(&denial)).unwrap();
        assert_eq!(json["upgradeRequired"], false);
        assert_eq!(json["message"], "This feature requires one of: pro");
        assert_eq!(json["requiredPlans"], serde_json::json!(["pro"]));
    }

    #[test]
    fn minimum_tier_denial_omits_required_plans() {
        let denial = Denial::PlanInsufficient {
            current_plan: Plan::Unrecognized("gold".into()),
            required_plans: vec![],
            upgrade_to: Tier::Premium,
        };
        let json = serde_json::to_value(DenialBody::from(&denial)).unwrap();
        assert!(json.get("requiredPlans").is_none());
        assert_eq!(json["requiredPlan"], "premium");
        assert_eq!(json["currentPlan"], "gold");
    }

    #[test]
    fn subscription_inactive_body_carries_status() {
        let denial = Denial::SubscriptionInactive {
            current_plan: Plan::Known(Tier::Pro),
            subscription_status: SubscriptionStatus::PastDue,
        };
        let json = serde_json::to_value(DenialBody::from(&denial)).unwrap();
        assert_eq!(json["subscriptionStatus"], "past_due");
        assert_eq!(json["code"], "SUBSCRIPTION_INACTIVE");
        assert!(json.get("requiredPlan").is_none());
    }
}
