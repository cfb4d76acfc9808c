use contracts::domain::a001_carton::{self, Carton, CartonStats, NewCartonEntry};
use contracts::usecases::{UseCaseError, UseCaseResult};
use uuid::Uuid;

use super::repository;
use crate::system::settings;

/// Commit one carton entry.
///
/// The active season and active sheet are read once, here, so the aggregate
/// is tagged with whatever was active at commit time; later sheet or season
/// switches never touch committed records.
pub async fn commit_entry(entry: NewCartonEntry) -> UseCaseResult<Carton> {
    let season = settings::service::season().await?;
    let sheet_id = settings::service::active_sheet_id().await?;

    let carton = Carton::commit(entry, season, sheet_id)?;

    repository::insert(&carton)
        .await
        .map_err(|e| UseCaseError::persistence(format!("Save failed: {e}")))?;

    tracing::info!(
        carton_no = %carton.carton_no,
        total_pieces = carton.total_pieces,
        "Carton committed"
    );
    Ok(carton)
}

/// All cartons, optionally narrowed by the dashboard search term.
pub async fn list(search: Option<&str>) -> UseCaseResult<Vec<Carton>> {
    let cartons = repository::list_all()
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;
    Ok(match search {
        Some(term) => a001_carton::filter(&cartons, term),
        None => cartons,
    })
}

/// Dashboard statistics, recomputed from the stored collection.
pub async fn summary() -> UseCaseResult<CartonStats> {
    let cartons = repository::list_all()
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;
    Ok(a001_carton::summarize(&cartons))
}

/// Delete a carton record. A missing id is surfaced as `NOT_FOUND`.
pub async fn delete(id: Uuid) -> UseCaseResult<()> {
    let removed = repository::delete_by_id(id)
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;
    if !removed {
        return Err(UseCaseError::not_found(format!("Carton {id} not found")));
    }
    Ok(())
}
