//! Router construction for the blog API server.

use std::sync::Arc;

use axum::{
    middleware as axum_mw,
    routing::{get, post, put},
    Router,
};
use blog_access_core::error::GateError;
use blog_access_core::gate::AccessPolicy;
use blog_access_core::tier::Tier;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::middleware::jwt::{jwt_auth, require_auth};
use crate::middleware::plan_gate;
use crate::state::AppState;

/// Route group behind a plan gate.
fn gated(routes: Router<AppState>, policy: AccessPolicy) -> Router<AppState> {
    routes.route_layer(axum_mw::from_fn_with_state(
        Arc::new(policy),
        plan_gate::enforce,
    ))
}

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Result<Router, GateError> {
    // Public routes (anonymous allowed; premium posts gate inline)
    let public = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/sitemap.xml", get(handlers::sitemap::sitemap_xml))
        .route("/api/plans", get(handlers::catalog::list_plans))
        .route("/api/credits/packs", get(handlers::catalog::list_credit_packs))
        .route("/api/posts", get(handlers::posts::list_posts))
        .route("/api/posts/:slug", get(handlers::posts::get_post))
        .route("/api/auth/login", post(handlers::auth::login));

    // Any authenticated user
    let authenticated = Router::new()
        .route("/api/me", get(handlers::auth::me))
        .route("/api/admin/posts", post(handlers::admin::create_post))
        .route(
            "/api/admin/users/:id/plan",
            put(handlers::admin::set_user_plan),
        )
        .route_layer(axum_mw::from_fn(require_auth));

    // Plan-gated features
    let writing_assistant = gated(
        Router::new().route("/api/ai/outline", post(handlers::gated::ai_outline)),
        AccessPolicy::allow([Tier::Pro, Tier::Premium])?,
    );
    let analytics = gated(
        Router::new().route(
            "/api/analytics/overview",
            get(handlers::gated::analytics_overview),
        ),
        AccessPolicy::minimum(Tier::Premium),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(public
        .merge(authenticated)
        .merge(writing_assistant)
        .merge(analytics)
        .layer(axum_mw::from_fn_with_state(state.clone(), jwt_auth))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}
