//! POST /api/auth/login and GET /api/me.

use axum::{extract::State, Extension, Json};
use blog_access_core::catalog::{subscription_plan, SubscriptionPlan};
use blog_access_core::credentials::verify_password;
use blog_access_core::error::BlogError;
use blog_access_core::principal::Principal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub expires_in_hours: i64,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Same error for unknown email and wrong password.
    let invalid = || BlogError::Unauthorized("invalid credentials".into());

    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;
    if !verify_password(&request.password, &user.password_hash) {
        tracing::debug!(email = %request.email, "login rejected");
        return Err(invalid().into());
    }

    let token = state.jwt.issue(&user, state.token_ttl_hours)?;
    tracing::info!(user_id = %user.id, "login succeeded");
    Ok(Json(LoginResponse {
        success: true,
        token,
        expires_in_hours: state.token_ttl_hours,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub success: bool,
    pub user: Principal,
    /// Catalog entry for the effective tier (free for unrecognized plans).
    pub plan_details: &'static SubscriptionPlan,
}

pub async fn me(Extension(principal): Extension<Principal>) -> Json<MeResponse> {
    let plan_details = subscription_plan(principal.effective_tier());
    Json(MeResponse {
        success: true,
        user: principal,
        plan_details,
    })
}
