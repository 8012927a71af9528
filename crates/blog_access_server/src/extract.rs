//! Request extractors whose rejections use the `AppError` JSON shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections mapped to `{ "success": false, "message": .. }`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
