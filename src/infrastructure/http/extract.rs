//! 请求提取器
//!
//! `Authorization: Bearer <token>` → 已认证用户

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;

use crate::domain::AuthUser;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 已认证用户
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthUser);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::Unauthorized("No token".to_string()))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

        let user = state.token_service.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            ApiError::Unauthorized("Invalid token".to_string())
        })?;

        Ok(Authenticated(user))
    }
}
