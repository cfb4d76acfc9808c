use contracts::domain::a001_carton::{Carton, CartonRow};
use contracts::shared::sizes;
use contracts::usecases::{UseCaseError, UseCaseResult};

/// One cell of an export grid. `Empty` cells are skipped entirely when the
/// worksheet is serialized: absent quantities come out as blank cells, not
/// as zeros.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(i64),
    Empty,
}

/// One worksheet of the export workbook, laid out row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    /// Width hint per column, in character units
    pub column_widths: Vec<f64>,
    pub rows: Vec<Vec<Cell>>,
}

/// Transform the carton collection into per-carton sheet grids.
///
/// Cartons are sorted by numeric carton number ascending (non-numeric
/// parses as 0, ties keep their stored order); sheet names and the
/// `CARTON No.` label follow the *position* in the sorted sequence, not
/// the carton number itself.
pub fn build_export(cartons: &[Carton]) -> UseCaseResult<Vec<SheetGrid>> {
    if cartons.is_empty() {
        return Err(UseCaseError::export("No data to export"));
    }

    let mut sorted: Vec<&Carton> = cartons.iter().collect();
    sorted.sort_by_key(|c| c.carton_no.trim().parse::<i64>().unwrap_or(0));
    let total = sorted.len();

    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(index, carton)| build_sheet(carton, index + 1, total))
        .collect())
}

/// Export artifact filename for the given day
pub fn export_file_name(date: chrono::NaiveDate) -> String {
    format!("Carton_Export_{}.xlsx", date.format("%Y-%m-%d"))
}

fn build_sheet(carton: &Carton, position: usize, total: usize) -> SheetGrid {
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    // Label block, fixed order; this is the printable packing label.
    rows.push(label_row("CARTON No.", format!(": {} OF {}", position, total)));
    rows.push(label_row("SEASON", format!(": {}", carton.season)));
    rows.push(label_row("STORE NAME", format!(": {}", carton.store_name)));
    // Colour is not tracked per carton
    rows.push(label_row("COLOUR", ": ALL COLOURS".to_string()));
    rows.push(label_row("STYLE", style_label(&carton.unique_styles)));
    rows.push(label_row("TOTAL PCS", format!(": {}", carton.total_pieces)));
    rows.push(label_row("NET WEIGHT", format!(": {} KG", placeholder(&carton.net_weight))));
    rows.push(label_row(
        "GROSS WEIGHT",
        format!(": {} KG", placeholder(&carton.gross_weight)),
    ));
    rows.push(label_row(
        "CARTON DIMENSION",
        format!(": {}", placeholder(&carton.carton_dimension)),
    ));
    rows.push(vec![Cell::Text("MADE IN INDIA".to_string())]);
    rows.push(Vec::new());

    // Quantity table: header in schema order, then one row per carton row.
    let mut header = vec![Cell::Text("Print".into()), Cell::Text("Style".into())];
    header.extend(sizes::ordered_sizes().map(|s| Cell::Text(s.to_string())));
    header.push(Cell::Text("Total".into()));
    rows.push(header);

    for row in &carton.rows {
        rows.push(quantity_row(row));
    }

    let mut column_widths = vec![20.0, 25.0];
    column_widths.extend(sizes::ordered_sizes().map(|_| 4.0));
    column_widths.push(8.0);

    SheetGrid {
        name: format!("Carton_{}", position),
        column_widths,
        rows,
    }
}

fn label_row(label: &str, value: String) -> Vec<Cell> {
    vec![Cell::Text(label.to_string()), Cell::Text(value)]
}

/// Literal style name when the carton holds exactly one distinct style,
/// `ALL STYLES` otherwise.
fn style_label(unique_styles: &[String]) -> String {
    match unique_styles {
        [only] => format!(": {}", only),
        _ => ": ALL STYLES".to_string(),
    }
}

fn placeholder(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn quantity_row(row: &CartonRow) -> Vec<Cell> {
    let mut cells = vec![
        Cell::Text(row.print.clone()),
        Cell::Text(row.style.clone()),
    ];
    for size in sizes::ordered_sizes() {
        let qty = row.quantities.get(size).copied().unwrap_or(0);
        cells.push(if qty > 0 {
            Cell::Number(qty as i64)
        } else {
            Cell::Empty
        });
    }
    cells.push(Cell::Number(row.total()));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_carton::{CartonRow, NewCartonEntry};

    fn carton(carton_no: &str, styles: &[(&str, &str, u32)]) -> Carton {
        let rows = styles
            .iter()
            .map(|(print, style, qty)| {
                let mut row = CartonRow::new(*print, *style);
                row.quantities.insert("M".into(), *qty);
                row
            })
            .collect();
        Carton::commit(
            NewCartonEntry {
                buyer: "DUNS".into(),
                store_name: "Chennai Central".into(),
                rows,
                carton_no: carton_no.into(),
                net_weight: "4.5".into(),
                gross_weight: "5".into(),
                carton_dimension: "".into(),
            },
            "SS24".into(),
            None,
        )
        .unwrap()
    }

    fn label_value(grid: &SheetGrid, row: usize) -> &str {
        match &grid.rows[row][1] {
            Cell::Text(v) => v,
            other => panic!("expected text cell, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_collection_is_an_export_error() {
        let err = build_export(&[]).unwrap_err();
        assert_eq!(err.code, "EXPORT_ERROR");
        assert_eq!(err.message, "No data to export");
    }

    #[test]
    fn test_sheets_sorted_by_numeric_carton_no() {
        let cartons = vec![
            carton("12", &[("FLORAL", "A", 10)]),
            carton("2", &[("GEO", "B", 15)]),
        ];
        let grids = build_export(&cartons).unwrap();

        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].name, "Carton_1");
        assert_eq!(grids[1].name, "Carton_2");
        // Carton number 2 sorts before 12 despite input order
        assert_eq!(label_value(&grids[0], 5), ": 15");
        assert_eq!(label_value(&grids[0], 0), ": 1 OF 2");
        assert_eq!(label_value(&grids[1], 0), ": 2 OF 2");
    }

    #[test]
    fn test_non_numeric_carton_no_sorts_as_zero() {
        let cartons = vec![
            carton("5", &[("FLORAL", "A", 1)]),
            carton("BOX-A", &[("GEO", "B", 2)]),
        ];
        let grids = build_export(&cartons).unwrap();
        // "BOX-A" parses as 0 and leads the sequence
        assert_eq!(label_value(&grids[0], 5), ": 2");
    }

    #[test]
    fn test_style_label_single_vs_mixed() {
        let single = carton("1", &[("FLORAL", "A", 1), ("GEO", "A", 2)]);
        let mixed = carton("2", &[("FLORAL", "A", 1), ("GEO", "B", 2)]);
        let grids = build_export(&[single, mixed]).unwrap();

        assert_eq!(label_value(&grids[0], 4), ": A");
        assert_eq!(label_value(&grids[1], 4), ": ALL STYLES");
    }

    #[test]
    fn test_label_block_layout() {
        let grids = build_export(&[carton("7", &[("FLORAL", "A", 3)])]).unwrap();
        let grid = &grids[0];

        let labels: Vec<&str> = grid.rows[..10]
            .iter()
            .map(|r| match &r[0] {
                Cell::Text(v) => v.as_str(),
                other => panic!("expected text cell, got {:?}", other),
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                "CARTON No.",
                "SEASON",
                "STORE NAME",
                "COLOUR",
                "STYLE",
                "TOTAL PCS",
                "NET WEIGHT",
                "GROSS WEIGHT",
                "CARTON DIMENSION",
                "MADE IN INDIA"
            ]
        );
        assert_eq!(label_value(grid, 3), ": ALL COLOURS");
        assert_eq!(label_value(grid, 6), ": 4.5 KG");
        // Dimension was left blank: dash placeholder
        assert_eq!(label_value(grid, 8), ": -");
        // Spacer row between label block and table
        assert!(grid.rows[10].is_empty());
    }

    #[test]
    fn test_quantity_table_columns_follow_schema_order() {
        let grids = build_export(&[carton("1", &[("FLORAL", "A", 8)])]).unwrap();
        let grid = &grids[0];

        let header = &grid.rows[11];
        assert_eq!(header.len(), 2 + 22 + 1);
        assert_eq!(header[0], Cell::Text("Print".into()));
        assert_eq!(header[1], Cell::Text("Style".into()));
        assert_eq!(header[2], Cell::Text("45".into()));
        assert_eq!(header[23], Cell::Text("XXXXL".into()));
        assert_eq!(header[24], Cell::Text("Total".into()));

        let data = &grid.rows[12];
        assert_eq!(data[0], Cell::Text("FLORAL".into()));
        // "M" is schema position 16 -> grid column 18
        assert_eq!(data[18], Cell::Number(8));
        // Untouched sizes render blank, not zero
        assert_eq!(data[2], Cell::Empty);
        assert_eq!(data[24], Cell::Number(8));

        assert_eq!(grid.column_widths.len(), 25);
        assert_eq!(grid.column_widths[0], 20.0);
        assert_eq!(grid.column_widths[24], 8.0);
    }

    #[test]
    fn test_export_file_name() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "Carton_Export_2024-03-09.xlsx");
    }
}
