use contracts::domain::a002_sheet::{active_sheet_name, Sheet};
use contracts::usecases::{UseCaseError, UseCaseResult};

use super::repository;
use crate::system::settings;

pub async fn list_all() -> UseCaseResult<Vec<Sheet>> {
    repository::list_all()
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))
}

/// Register the next sheet and make it active. Future carton commits are
/// tagged with it until another sheet takes over.
pub async fn create_and_activate() -> UseCaseResult<Sheet> {
    let existing = repository::list_all()
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;

    let sheet = Sheet::new_sequential(existing.len());
    repository::insert(&sheet)
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;
    settings::service::set_active_sheet(sheet.id).await?;

    tracing::info!(name = %sheet.name, "Sheet created and activated");
    Ok(sheet)
}

/// Display name of the active sheet, `"Default Sheet"` when none is active
/// or the stored id no longer matches a sheet (dangling ids are tolerated,
/// never repaired).
pub async fn active_name() -> UseCaseResult<String> {
    let sheets = repository::list_all()
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;
    let active_id = settings::service::active_sheet_id().await?;
    Ok(active_sheet_name(&sheets, active_id))
}
