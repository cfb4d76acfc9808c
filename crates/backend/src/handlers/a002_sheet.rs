use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_sheet::Sheet;
use contracts::usecases::UseCaseError;
use serde_json::json;

use super::error_response;
use crate::domain::a002_sheet::service;

/// GET /api/sheets
pub async fn list_all() -> Result<Json<Vec<Sheet>>, (StatusCode, Json<UseCaseError>)> {
    service::list_all().await.map(Json).map_err(error_response)
}

/// POST /api/sheets: register the next sheet and make it active
pub async fn create() -> Result<Json<Sheet>, (StatusCode, Json<UseCaseError>)> {
    service::create_and_activate()
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/sheets/active: display name for the entry screen header
pub async fn active() -> Result<Json<serde_json::Value>, (StatusCode, Json<UseCaseError>)> {
    service::active_name()
        .await
        .map(|name| Json(json!({ "name": name })))
        .map_err(error_response)
}
