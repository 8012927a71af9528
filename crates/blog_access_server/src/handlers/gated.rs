//! Plan-gated features. Gating is done by the route layer; by the time a
//! handler runs the principal is known to satisfy the policy.

use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};
use blog_access_core::error::BlogError;
use blog_access_core::principal::Principal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OutlineRequest {
    pub topic: String,
    #[serde(default = "default_sections")]
    pub sections: usize,
}

fn default_sections() -> usize {
    4
}

#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub success: bool,
    pub topic: String,
    pub outline: Vec<String>,
}

/// Writing assistant: a deterministic section skeleton for a topic.
pub async fn ai_outline(
    Extension(principal): Extension<Principal>,
    ApiJson(request): ApiJson<OutlineRequest>,
) -> Result<Json<OutlineResponse>, AppError> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err(BlogError::InvalidInput("topic must not be empty".into()).into());
    }
    if !(1..=10).contains(&request.sections) {
        return Err(BlogError::InvalidInput("sections must be between 1 and 10".into()).into());
    }

    let mut outline = vec![format!("Introduction: why {topic} matters")];
    outline.extend((1..request.sections.saturating_sub(1)).map(|i| format!("{topic}: part {i}")));
    if request.sections > 1 {
        outline.push("Conclusion and next steps".to_string());
    }

    tracing::debug!(user_id = %principal.user_id, sections = outline.len(), "outline generated");
    Ok(Json(OutlineResponse {
        success: true,
        topic: topic.to_string(),
        outline,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub success: bool,
    pub published_posts: usize,
    pub premium_posts: usize,
    pub posts_by_tag: BTreeMap<String, usize>,
}

pub async fn analytics_overview(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsOverview>, AppError> {
    let posts = state.posts.list_published().await?;
    let mut posts_by_tag = BTreeMap::new();
    for tag in posts.iter().flat_map(|p| p.tags.iter()) {
        *posts_by_tag.entry(tag.clone()).or_insert(0) += 1;
    }
    Ok(Json(AnalyticsOverview {
        success: true,
        published_posts: posts.len(),
        premium_posts: posts.iter().filter(|p| p.premium).count(),
        posts_by_tag,
    }))
}
