use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::AggregateId;

/// Shown whenever no sheet is active or the active id matches nothing.
pub const DEFAULT_SHEET_NAME: &str = "Default Sheet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetId(pub Uuid);

impl SheetId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for SheetId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SheetId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// A named logical batch that new carton entries are tagged with.
///
/// Purely a bookkeeping facility: the carton side keeps the tag as an
/// opaque reference, and nothing revalidates it later. A sheet that
/// disappears leaves its cartons untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub id: SheetId,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Sheet {
    /// Next sheet in the registry, display-named after the current count.
    pub fn new_sequential(existing_count: usize) -> Self {
        Self {
            id: SheetId::new_v4(),
            name: format!("Sheet {}", existing_count + 1),
            created_at: Utc::now(),
        }
    }
}

/// Name of the active sheet, falling back to [`DEFAULT_SHEET_NAME`] when no
/// id is set or the id matches no registered sheet.
pub fn active_sheet_name(sheets: &[Sheet], active_id: Option<SheetId>) -> String {
    active_id
        .and_then(|id| sheets.iter().find(|s| s.id == id))
        .map(|s| s.name.clone())
        .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_display_names() {
        assert_eq!(Sheet::new_sequential(0).name, "Sheet 1");
        assert_eq!(Sheet::new_sequential(4).name, "Sheet 5");
    }

    #[test]
    fn test_active_sheet_name_fallback() {
        let sheets = vec![Sheet::new_sequential(0), Sheet::new_sequential(1)];

        assert_eq!(active_sheet_name(&sheets, None), DEFAULT_SHEET_NAME);
        assert_eq!(
            active_sheet_name(&sheets, Some(SheetId::new_v4())),
            DEFAULT_SHEET_NAME
        );
        assert_eq!(active_sheet_name(&sheets, Some(sheets[1].id)), "Sheet 2");
    }
}
