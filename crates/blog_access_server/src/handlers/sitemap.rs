use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

pub async fn sitemap_xml(State(state): State<AppState>) -> Result<Response, AppError> {
    let xml = state.sitemap.get_or_build(state.posts.as_ref()).await?;
    Ok((
        [(CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
        .into_response())
}
