pub mod aggregate;

pub use aggregate::{active_sheet_name, Sheet, SheetId, DEFAULT_SHEET_NAME};
