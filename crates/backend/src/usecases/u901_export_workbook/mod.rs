pub mod executor;
pub mod workbook;

pub use executor::{build_export, export_file_name, Cell, SheetGrid};
pub use workbook::{write_workbook, WorkbookError};

use contracts::usecases::{UseCaseError, UseCaseResult};

use crate::domain::a001_carton::repository;

/// Finished export artifact, ready to be offered as a download
pub struct ExportArtifact {
    pub file_name: String,
    pub sheet_count: usize,
    pub bytes: Vec<u8>,
}

/// Run the full export over the stored carton collection.
///
/// All-or-nothing: either a complete workbook comes back or an error does;
/// no partial artifact is ever offered.
pub async fn run() -> UseCaseResult<ExportArtifact> {
    let cartons = repository::list_all()
        .await
        .map_err(|e| UseCaseError::persistence(e.to_string()))?;

    let grids = executor::build_export(&cartons)?;
    let bytes = workbook::write_workbook(&grids)
        .map_err(|e| UseCaseError::export(format!("Workbook write failed: {e}")))?;

    let artifact = ExportArtifact {
        file_name: executor::export_file_name(chrono::Utc::now().date_naive()),
        sheet_count: grids.len(),
        bytes,
    };
    tracing::info!(
        file_name = %artifact.file_name,
        sheets = artifact.sheet_count,
        "Export workbook materialized"
    );
    Ok(artifact)
}
