pub mod a001_carton;
pub mod a002_sheet;
pub mod u901_export_workbook;

use axum::http::StatusCode;
use axum::Json;
use contracts::usecases::UseCaseError;

/// Map a use case error onto a status code, keeping the coded body so the
/// client can show the message as a transient notice.
pub(crate) fn error_response(err: UseCaseError) -> (StatusCode, Json<UseCaseError>) {
    let status = match err.code.as_str() {
        "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
        "NOT_FOUND" => StatusCode::NOT_FOUND,
        "EXPORT_ERROR" => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}
