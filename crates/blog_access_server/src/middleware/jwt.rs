//! Bearer-token authentication.
//!
//! Requests without an `Authorization` header pass through anonymously;
//! the plan gate turns that into a 401 where a route needs a principal.
//! A header that is present but invalid is rejected here with 401.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use blog_access_core::error::BlogError;
use blog_access_core::ports::UserRecord;
use blog_access_core::principal::{JwtClaims, Principal};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Clone)]
pub struct JwtConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtConfig {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, user: &UserRecord, ttl_hours: i64) -> Result<String, BlogError> {
        let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp().max(0) as usize;
        let claims = JwtClaims {
            sub: user.id.to_string(),
            exp,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| BlogError::Internal(anyhow::anyhow!("token encoding failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<JwtClaims, BlogError> {
        decode::<JwtClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("rejected token: {e}");
                BlogError::Unauthorized("invalid or expired token".into())
            })
    }
}

pub async fn jwt_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(next.run(req).await);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| BlogError::Unauthorized("expected a Bearer token".into()))?;

    let claims = state.jwt.verify(token)?;
    let user_id = claims.user_id()?;

    // Plan and status come from the stored record so upgrades apply immediately.
    let record = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| BlogError::Unauthorized("account no longer exists".into()))?;

    let principal = Principal::from_record(&record);
    tracing::debug!(user_id = %principal.user_id, plan = %principal.plan, "authenticated");
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Rejects anonymous requests. Layer inside `jwt_auth`.
pub async fn require_auth(req: Request, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<Principal>().is_none() {
        return Err(BlogError::Unauthorized("authentication required".into()).into());
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: "w@example.com".into(),
            password_hash: String::new(),
            roles: vec!["author".into()],
            plan: Some("pro".into()),
            subscription_status: Some("active".into()),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let cfg = JwtConfig::from_secret(b"unit-secret");
        let u = user();
        let token = cfg.issue(&u, 1).unwrap();
        let claims = cfg.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), u.id);

        let payload: serde_json::Value = serde_json::to_value(&claims).unwrap();
        assert!(payload.get("roles").is_none(), "{payload}");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtConfig::from_secret(b"a").issue(&user(), 1).unwrap();
        let err = JwtConfig::from_secret(b"b").verify(&token).unwrap_err();
        assert!(matches!(err, BlogError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = JwtConfig::from_secret(b"unit-secret");
        let token = cfg.issue(&user(), -2).unwrap();
        assert!(cfg.verify(&token).is_err());
    }
}
