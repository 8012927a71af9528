//! Admin-only endpoints.
//!
//! POST /api/admin/posts           create a post; invalidates the sitemap cache.
//! PUT  /api/admin/users/:id/plan  set a user's plan and subscription status.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use blog_access_core::ports::{NewPost, PostRecord};
use blog_access_core::principal::Principal;
use blog_access_core::tier::{SubscriptionStatus, Tier};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(new_post): ApiJson<NewPost>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    principal.require_admin()?;
    new_post.validate()?;

    let post = PostRecord {
        id: Uuid::new_v4(),
        slug: new_post.slug,
        title: new_post.title,
        body: new_post.body,
        author_id: principal.user_id,
        tags: new_post.tags,
        premium: new_post.premium,
        published: new_post.published,
        updated_at: Utc::now(),
    };
    let slug = post.slug.clone();
    state.posts.insert(post).await?;
    state.sitemap.invalidate().await;

    tracing::info!(%slug, author = %principal.user_id, "post created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "slug": slug })),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPlanRequest {
    pub plan: Tier,
    pub subscription_status: SubscriptionStatus,
}

pub async fn set_user_plan(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
    ApiJson(request): ApiJson<SetPlanRequest>,
) -> Result<Json<Value>, AppError> {
    principal.require_admin()?;

    let updated = state
        .users
        .set_plan(
            user_id,
            Some(request.plan.as_str().to_string()),
            Some(request.subscription_status.as_str().to_string()),
        )
        .await?;

    tracing::info!(%user_id, plan = %request.plan, status = %request.subscription_status, "plan updated");
    Ok(Json(json!({
        "success": true,
        "user": Principal::from_record(&updated),
    })))
}
