use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_carton::{Carton, CartonStats, NewCartonEntry};
use contracts::usecases::UseCaseError;
use serde::Deserialize;

use super::error_response;
use crate::domain::a001_carton::service;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// GET /api/cartons?search=
pub async fn list_all(
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Carton>>, (StatusCode, Json<UseCaseError>)> {
    service::list(query.search.as_deref())
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/cartons
pub async fn commit(
    Json(entry): Json<NewCartonEntry>,
) -> Result<Json<Carton>, (StatusCode, Json<UseCaseError>)> {
    service::commit_entry(entry)
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/cartons/:id
pub async fn delete(
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<UseCaseError>)> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| {
        error_response(UseCaseError::validation(format!("Invalid carton id: {id}")))
    })?;
    service::delete(uuid)
        .await
        .map(|_| StatusCode::OK)
        .map_err(error_response)
}

/// GET /api/cartons/summary
pub async fn summary() -> Result<Json<CartonStats>, (StatusCode, Json<UseCaseError>)> {
    service::summary().await.map(Json).map_err(error_response)
}
