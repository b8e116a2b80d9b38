use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::future::Future;
use std::sync::Arc;

use crate::{auth, models::User, AppError, AppResult, AppState};

/// Extracts the bearer token from the Authorization header
fn extract_bearer_token(parts: &Parts) -> Option<String> {
    let auth_header = parts.headers.get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = extract_bearer_token(parts);

        let state = state.clone();

        async move {
            let token = token.ok_or_else(|| {
                AppError::Unauthorized("Missing authentication: no bearer token".to_string())
            })?;

            let claims = auth::validate_jwt(&token, &state.jwt_keys)
                .map_err(AppError::Unauthorized)?;

            let user_id = claims.user_id().ok_or_else(|| {
                tracing::warn!(sub = %claims.sub, "Token subject is not a user id");
                AppError::Unauthorized("Invalid token subject".to_string())
            })?;

            resolve_user(&state, user_id).await
        }
    }
}

async fn resolve_user(state: &AppState, user_id: i64) -> AppResult<AuthenticatedUser> {
    if let Some(cached) = state.user_cache.get(&user_id).await {
        return Ok(cached);
    }

    let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id, "User lookup failed");
            e
        })?
        .ok_or_else(|| {
            tracing::warn!(user_id, "Token refers to an unknown user");
            AppError::Unauthorized("User not found".to_string())
        })?;

    let authenticated = AuthenticatedUser::from(user);
    state.user_cache.insert(user_id, authenticated.clone()).await;
    tracing::debug!(user_id, "User resolved and cached");

    Ok(authenticated)
}
