use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a002_sheet::SheetId;
use crate::domain::common::AggregateId;
use crate::enums::Buyer;
use crate::shared::sizes;

// ============================================================================
// ID Types
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartonId(pub Uuid);

impl CartonId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CartonId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CartonId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(pub Uuid);

impl RowId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Commit-boundary validation failures. Exactly one surfaces per attempt;
/// the check order is part of the contract (it decides which message the
/// operator sees).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidQuantity,
    UnknownSize(String),
    MissingPrint,
    MissingStyle,
    ZeroQuantity,
    MissingBuyer,
    MissingStore,
    NoRows,
    MissingCartonNo,
    MissingNetWeight,
    MissingGrossWeight,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidQuantity => {
                write!(f, "Quantity must be a non-negative whole number")
            }
            ValidationError::UnknownSize(label) => write!(f, "Unknown size: {}", label),
            ValidationError::MissingPrint => write!(f, "Print is required"),
            ValidationError::MissingStyle => write!(f, "Style is required"),
            ValidationError::ZeroQuantity => write!(f, "Enter quantity for at least one size"),
            ValidationError::MissingBuyer => write!(f, "Select Buyer"),
            ValidationError::MissingStore => write!(f, "Enter Store Name"),
            ValidationError::NoRows => write!(f, "No rows to save"),
            ValidationError::MissingCartonNo => write!(f, "Enter Carton No"),
            ValidationError::MissingNetWeight => write!(f, "Enter Net Weight"),
            ValidationError::MissingGrossWeight => write!(f, "Enter Gross Weight"),
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// Carton Row
// ============================================================================

/// One style/print line item with a quantity per size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartonRow {
    pub id: RowId,
    pub print: String,
    pub style: String,
    /// Quantity per size label; an absent label means zero.
    #[serde(default)]
    pub quantities: BTreeMap<String, u32>,
}

impl CartonRow {
    pub fn new(print: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            id: RowId::new_v4(),
            print: print.into(),
            style: style.into(),
            quantities: BTreeMap::new(),
        }
    }

    /// Apply a raw quantity keystroke for one size cell.
    ///
    /// Accepts the empty string (clears the cell) or a plain digit run.
    /// Signs, decimals and separators are rejected without touching the
    /// row, mirroring the entry grid refusing the keystroke.
    pub fn set_quantity(&mut self, size: &str, raw: &str) -> Result<(), ValidationError> {
        if !sizes::is_size_label(size) {
            return Err(ValidationError::UnknownSize(size.to_string()));
        }
        if raw.is_empty() {
            self.quantities.remove(size);
            return Ok(());
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidQuantity);
        }
        let value: u32 = raw.parse().map_err(|_| ValidationError::InvalidQuantity)?;
        self.quantities.insert(size.to_string(), value);
        Ok(())
    }

    /// Sum of all quantities, treating absent sizes as zero.
    pub fn total(&self) -> i64 {
        self.quantities.values().map(|&q| q as i64).sum()
    }

    /// Gate for committing the row into a carton's row list. Order matters:
    /// print, then style, then the zero-total check.
    pub fn commit_precheck(&self) -> Result<(), ValidationError> {
        if self.print.trim().is_empty() {
            return Err(ValidationError::MissingPrint);
        }
        if self.style.trim().is_empty() {
            return Err(ValidationError::MissingStyle);
        }
        if self.total() == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        Ok(())
    }
}

/// Replace the row matching `row_id`, passing all other rows through
/// unchanged. An unknown id leaves the list as it was. Edits are applied
/// without re-validation: an edit can legally leave a row blank or with a
/// zero total, unlike the initial commit.
pub fn edit_row(
    rows: Vec<CartonRow>,
    row_id: RowId,
    print: String,
    style: String,
    quantities: BTreeMap<String, u32>,
) -> Vec<CartonRow> {
    rows.into_iter()
        .map(|row| {
            if row.id == row_id {
                CartonRow {
                    id: row.id,
                    print: print.clone(),
                    style: style.clone(),
                    quantities: quantities.clone(),
                }
            } else {
                row
            }
        })
        .collect()
}

/// Remove the row at `index`, preserving the order of the rest.
/// An out-of-range index leaves the list as it was.
pub fn delete_row(mut rows: Vec<CartonRow>, index: usize) -> Vec<CartonRow> {
    if index < rows.len() {
        rows.remove(index);
    }
    rows
}

// ============================================================================
// Carton Aggregate
// ============================================================================

/// Payload of a "commit entry" request, as assembled by the entry screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartonEntry {
    #[serde(default)]
    pub buyer: String,
    #[serde(rename = "storeName", default)]
    pub store_name: String,
    #[serde(default)]
    pub rows: Vec<CartonRow>,
    #[serde(rename = "cartonNo", default)]
    pub carton_no: String,
    #[serde(rename = "netWeight", default)]
    pub net_weight: String,
    #[serde(rename = "grossWeight", default)]
    pub gross_weight: String,
    #[serde(rename = "cartonDimension", default)]
    pub carton_dimension: String,
}

/// One physical shipping carton. Created only by a successful commit and
/// read-only afterwards; deletion removes the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carton {
    pub id: CartonId,
    #[serde(rename = "cartonNo")]
    pub carton_no: String,
    pub buyer: Buyer,
    #[serde(rename = "storeName")]
    pub store_name: String,
    pub season: String,
    pub rows: Vec<CartonRow>,
    /// Sum of row totals, fixed at commit time.
    #[serde(rename = "totalPieces")]
    pub total_pieces: i64,
    /// Weights and dimension are kept exactly as entered; the packing label
    /// reproduces the operator's formatting.
    #[serde(rename = "netWeight")]
    pub net_weight: String,
    #[serde(rename = "grossWeight")]
    pub gross_weight: String,
    #[serde(rename = "cartonDimension")]
    pub carton_dimension: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "uniquePrints")]
    pub unique_prints: Vec<String>,
    #[serde(rename = "uniqueStyles")]
    pub unique_styles: Vec<String>,
    #[serde(rename = "sheetId")]
    pub sheet_id: Option<SheetId>,
}

impl Carton {
    /// Validate and commit one entry. Checks run in a fixed order and the
    /// first failure wins: buyer, store, rows-present, carton number, net
    /// weight, gross weight. On success the derived fields (`total_pieces`,
    /// `unique_prints`, `unique_styles`) are snapshotted and never
    /// recomputed.
    pub fn commit(
        entry: NewCartonEntry,
        season: String,
        sheet_id: Option<SheetId>,
    ) -> Result<Carton, ValidationError> {
        let buyer =
            Buyer::from_name(entry.buyer.trim()).ok_or(ValidationError::MissingBuyer)?;
        let store_name = entry.store_name.trim().to_string();
        if store_name.is_empty() {
            return Err(ValidationError::MissingStore);
        }
        if entry.rows.is_empty() {
            return Err(ValidationError::NoRows);
        }
        let carton_no = entry.carton_no.trim().to_string();
        if carton_no.is_empty() {
            return Err(ValidationError::MissingCartonNo);
        }
        let net_weight = entry.net_weight.trim().to_string();
        if net_weight.is_empty() {
            return Err(ValidationError::MissingNetWeight);
        }
        let gross_weight = entry.gross_weight.trim().to_string();
        if gross_weight.is_empty() {
            return Err(ValidationError::MissingGrossWeight);
        }

        let total_pieces = entry.rows.iter().map(CartonRow::total).sum();
        let unique_prints = dedup_in_order(entry.rows.iter().map(|r| r.print.trim()));
        let unique_styles = dedup_in_order(entry.rows.iter().map(|r| r.style.trim()));

        Ok(Carton {
            id: CartonId::new_v4(),
            carton_no,
            buyer,
            store_name,
            season,
            rows: entry.rows,
            total_pieces,
            net_weight,
            gross_weight,
            carton_dimension: entry.carton_dimension.trim().to_string(),
            timestamp: Utc::now(),
            unique_prints,
            unique_styles,
            sheet_id,
        })
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }
}

fn dedup_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(print: &str, style: &str, quantities: &[(&str, u32)]) -> CartonRow {
        let mut r = CartonRow::new(print, style);
        for (size, qty) in quantities {
            r.quantities.insert(size.to_string(), *qty);
        }
        r
    }

    fn entry_with_rows(rows: Vec<CartonRow>) -> NewCartonEntry {
        NewCartonEntry {
            buyer: "DUNS".into(),
            store_name: "Chennai Central".into(),
            rows,
            carton_no: "12".into(),
            net_weight: "4.50".into(),
            gross_weight: "5.10".into(),
            carton_dimension: "60 x 40 x 40 (cm)".into(),
        }
    }

    #[test]
    fn test_set_quantity_accepts_digits_and_blank() {
        let mut r = CartonRow::new("FLORAL", "ST-01");
        r.set_quantity("92", "15").unwrap();
        assert_eq!(r.quantities.get("92"), Some(&15));

        r.set_quantity("92", "").unwrap();
        assert_eq!(r.quantities.get("92"), None);
        assert_eq!(r.total(), 0);
    }

    #[test]
    fn test_set_quantity_rejects_bad_input_without_mutating() {
        let mut r = CartonRow::new("FLORAL", "ST-01");
        r.set_quantity("M", "8").unwrap();

        for raw in ["-1", "+2", "1.5", "1,000", "abc", " 3", "3 "] {
            assert_eq!(
                r.set_quantity("M", raw),
                Err(ValidationError::InvalidQuantity),
                "raw input {:?} must be rejected",
                raw
            );
        }
        assert_eq!(
            r.set_quantity("44", "3"),
            Err(ValidationError::UnknownSize("44".into()))
        );
        assert_eq!(r.quantities.get("M"), Some(&8));
    }

    #[test]
    fn test_row_total_treats_absent_as_zero() {
        let r = row("FLORAL", "ST-01", &[("45", 3), ("M", 0), ("XL", 7)]);
        assert_eq!(r.total(), 10);
        assert_eq!(CartonRow::new("A", "B").total(), 0);
    }

    #[test]
    fn test_commit_precheck_order() {
        let blank = CartonRow::new("", "");
        assert_eq!(blank.commit_precheck(), Err(ValidationError::MissingPrint));

        let no_style = CartonRow::new("FLORAL", "  ");
        assert_eq!(
            no_style.commit_precheck(),
            Err(ValidationError::MissingStyle)
        );

        let zero = CartonRow::new("FLORAL", "ST-01");
        assert_eq!(zero.commit_precheck(), Err(ValidationError::ZeroQuantity));

        let ok = row("FLORAL", "ST-01", &[("S", 1)]);
        assert!(ok.commit_precheck().is_ok());
    }

    #[test]
    fn test_commit_validation_order_first_failure_wins() {
        let rows = vec![row("FLORAL", "ST-01", &[("S", 2)])];

        let mut entry = entry_with_rows(rows.clone());
        entry.buyer = "".into();
        entry.store_name = "".into();
        assert_eq!(
            Carton::commit(entry, "SS24".into(), None),
            Err(ValidationError::MissingBuyer)
        );

        let mut entry = entry_with_rows(rows.clone());
        entry.store_name = "   ".into();
        assert_eq!(
            Carton::commit(entry, "SS24".into(), None),
            Err(ValidationError::MissingStore)
        );

        let mut entry = entry_with_rows(vec![]);
        entry.carton_no = "".into();
        assert_eq!(
            Carton::commit(entry, "SS24".into(), None),
            Err(ValidationError::NoRows)
        );

        let mut entry = entry_with_rows(rows.clone());
        entry.carton_no = "".into();
        assert_eq!(
            Carton::commit(entry, "SS24".into(), None),
            Err(ValidationError::MissingCartonNo)
        );

        let mut entry = entry_with_rows(rows.clone());
        entry.net_weight = "".into();
        assert_eq!(
            Carton::commit(entry, "SS24".into(), None),
            Err(ValidationError::MissingNetWeight)
        );

        let mut entry = entry_with_rows(rows);
        entry.gross_weight = " ".into();
        assert_eq!(
            Carton::commit(entry, "SS24".into(), None),
            Err(ValidationError::MissingGrossWeight)
        );
    }

    #[test]
    fn test_commit_snapshots_derived_fields() {
        let rows = vec![
            row("FLORAL", "A", &[("45", 3), ("M", 5)]),
            row("FLORAL", "A", &[("L", 2)]),
            row("GEO", "B", &[("XL", 10)]),
        ];
        let carton = Carton::commit(entry_with_rows(rows), "SS24".into(), None).unwrap();

        assert_eq!(carton.total_pieces, 20);
        assert_eq!(carton.unique_prints, vec!["FLORAL", "GEO"]);
        assert_eq!(carton.unique_styles, vec!["A", "B"]);
        assert_eq!(carton.buyer, Buyer::Duns);
        assert_eq!(carton.store_name, "Chennai Central");
        assert_eq!(carton.season, "SS24");
    }

    #[test]
    fn test_edit_row_replaces_only_the_target() {
        let rows = vec![
            row("FLORAL", "A", &[("45", 3)]),
            row("GEO", "B", &[("M", 5)]),
        ];
        let target = rows[1].id;
        let first = rows[0].id;

        let edited = edit_row(
            rows.clone(),
            target,
            "STRIPE".into(),
            "".into(),
            BTreeMap::new(),
        );
        assert_eq!(edited.len(), 2);
        assert_eq!(edited[0].id, first);
        assert_eq!(edited[0].print, "FLORAL");
        assert_eq!(edited[1].id, target);
        assert_eq!(edited[1].print, "STRIPE");
        // Edits apply without re-validation: blank style and zero total pass.
        assert_eq!(edited[1].style, "");
        assert_eq!(edited[1].total(), 0);

        let untouched = edit_row(
            rows.clone(),
            RowId::new_v4(),
            "X".into(),
            "Y".into(),
            BTreeMap::new(),
        );
        assert_eq!(untouched.len(), 2);
        assert_eq!(untouched[0].print, "FLORAL");
        assert_eq!(untouched[1].print, "GEO");
    }

    #[test]
    fn test_delete_row_by_index() {
        let rows = vec![
            row("FLORAL", "A", &[("45", 3)]),
            row("GEO", "B", &[("M", 5)]),
        ];
        let after = delete_row(rows.clone(), 0);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].print, "GEO");

        let unchanged = delete_row(rows, 5);
        assert_eq!(unchanged.len(), 2);
    }

    #[test]
    fn test_wire_format_uses_collection_field_names() {
        let carton = Carton::commit(
            entry_with_rows(vec![row("FLORAL", "A", &[("S", 1)])]),
            "SS24".into(),
            None,
        )
        .unwrap();
        let json = serde_json::to_value(&carton).unwrap();

        assert!(json.get("cartonNo").is_some());
        assert!(json.get("storeName").is_some());
        assert!(json.get("totalPieces").is_some());
        assert!(json.get("uniquePrints").is_some());
        assert!(json.get("uniqueStyles").is_some());
        assert!(json.get("sheetId").is_some());
        assert_eq!(json.get("buyer").unwrap(), "DUNS");
    }
}
