use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, Role, UserInfo,
};

use crate::shared::config;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, refresh_tokens};

/// Resolve the role for an email from the configured allow-lists.
/// There is no password check behind this: access is the allow-list itself.
fn resolve_role(email: &str) -> Option<Role> {
    let auth = &config::get().auth;
    if auth.admin_emails.iter().any(|e| e == email) {
        Some(Role::Admin)
    } else if auth.operator_emails.iter().any(|e| e == email) {
        Some(Role::Operator)
    } else {
        None
    }
}

/// Login handler
pub async fn login(
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let email = request.email.trim().to_lowercase();

    let role = match resolve_role(&email) {
        Some(role) => role,
        None => {
            tracing::warn!(email = %email, "Login rejected: not on the allow-list");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let access_token = jwt::generate_access_token(&email, role)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let refresh_token = jwt::generate_refresh_token();
    refresh_tokens::store(&email, &refresh_token)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        user: UserInfo { email, role },
    }))
}

/// Refresh token handler
pub async fn refresh(
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, StatusCode> {
    let email = refresh_tokens::validate(&request.refresh_token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // The allow-lists may have changed since the session started
    let role = resolve_role(&email).ok_or(StatusCode::UNAUTHORIZED)?;

    let access_token = jwt::generate_access_token(&email, role)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Logout handler
pub async fn logout(Json(request): Json<RefreshRequest>) -> Result<StatusCode, StatusCode> {
    refresh_tokens::revoke(&request.refresh_token)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(StatusCode::OK)
}

/// Get current session info (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> Json<UserInfo> {
    Json(UserInfo {
        email: claims.sub,
        role: claims.role,
    })
}
