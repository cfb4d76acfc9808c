use axum::{extract::Json, http::StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::system::auth::extractor::CurrentUser;
use crate::system::settings::service;

#[derive(Debug, Deserialize)]
pub struct UpdateSeasonRequest {
    pub season: String,
}

/// GET /api/system/settings/season
pub async fn get_season() -> Result<Json<serde_json::Value>, StatusCode> {
    match service::season().await {
        Ok(season) => Ok(Json(json!({ "season": season }))),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// PUT /api/system/settings/season (admin only; the route itself is open to
/// any authenticated session so operators can read the season)
pub async fn update_season(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<UpdateSeasonRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    if !claims.role.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin role required" })),
        ));
    }
    match service::set_season(&request.season).await {
        Ok(()) => Ok(Json(json!({ "season": request.season.trim() }))),
        Err(err) if err.code == "VALIDATION_ERROR" => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.message })),
        )),
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.message })),
        )),
    }
}
