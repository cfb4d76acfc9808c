use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::usecases::UseCaseError;

use super::error_response;
use crate::usecases::u901_export_workbook;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/export: download the full carton collection as one workbook
pub async fn download() -> Result<Response, (StatusCode, Json<UseCaseError>)> {
    let artifact = u901_export_workbook::run().await.map_err(error_response)?;

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
    ];
    Ok((headers, artifact.bytes).into_response())
}
