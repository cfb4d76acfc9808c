use contracts::domain::a002_sheet::SheetId;
use contracts::domain::common::AggregateId;
use contracts::usecases::{UseCaseError, UseCaseResult};

use super::repository;
use crate::shared::config;

const KEY_SEASON: &str = "admin_season";
const KEY_ACTIVE_SHEET: &str = "active_sheet_id";

/// Current season code; falls back to the configured default when the
/// administrator has never set one.
pub async fn season() -> UseCaseResult<String> {
    let stored = repository::get(KEY_SEASON)
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;
    Ok(stored.unwrap_or_else(|| config::get().season.default.clone()))
}

/// Update the season code stamped on future carton commits.
pub async fn set_season(value: &str) -> UseCaseResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(UseCaseError::validation("Enter a season code"));
    }
    repository::set(KEY_SEASON, value, "Season code for new carton entries")
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;
    tracing::info!(season = value, "Season updated");
    Ok(())
}

/// Id of the sheet that new commits are tagged with. A stored id that no
/// longer parses is treated as unset rather than an error.
pub async fn active_sheet_id() -> UseCaseResult<Option<SheetId>> {
    let stored = repository::get(KEY_ACTIVE_SHEET)
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;
    Ok(stored.and_then(|raw| SheetId::from_string(&raw).ok()))
}

pub async fn set_active_sheet(id: SheetId) -> UseCaseResult<()> {
    repository::set(
        KEY_ACTIVE_SHEET,
        &id.as_string(),
        "Sheet that tags new carton entries",
    )
    .await
    .map_err(|e| UseCaseError::persistence(e.to_string()))
}
