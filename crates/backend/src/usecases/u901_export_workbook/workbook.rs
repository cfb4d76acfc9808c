use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;

use super::executor::{Cell, SheetGrid};

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Materialize the sheet grids into an `.xlsx` byte buffer.
///
/// The workbook is a plain OOXML package: content types, package
/// relationships, the workbook part, a minimal stylesheet and one
/// worksheet part per grid. Text lands as inline strings so no shared
/// string table is needed.
pub fn write_workbook(grids: &[SheetGrid]) -> Result<Vec<u8>, WorkbookError> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types_xml(grids.len()).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(rels_xml().as_bytes())?;

        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(workbook_xml(grids).as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(workbook_rels_xml(grids.len()).as_bytes())?;

        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(styles_xml().as_bytes())?;

        for (index, grid) in grids.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;
            zip.write_all(worksheet_xml(grid).as_bytes())?;
        }

        zip.finish()?;
    }
    Ok(buffer.into_inner())
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    out.push('\n');
    out.push_str(r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    out.push('\n');
    out.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    out.push('\n');
    out.push_str(r#"  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
    out.push('\n');
    for i in 1..=sheet_count {
        out.push_str(&format!(
            r#"  <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i
        ));
        out.push('\n');
    }
    out.push_str(r#"  <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#);
    out.push('\n');
    out.push_str("</Types>\n");
    out
}

fn rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>
"#
    .to_owned()
}

fn workbook_xml(grids: &[SheetGrid]) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push('\n');
    out.push_str("  <sheets>\n");
    for (index, grid) in grids.iter().enumerate() {
        out.push_str(&format!(
            r#"    <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            xml_escape(&grid.name),
            index + 1,
            index + 1
        ));
        out.push('\n');
    }
    out.push_str("  </sheets>\n");
    out.push_str("</workbook>\n");
    out
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    out.push('\n');
    for i in 1..=sheet_count {
        out.push_str(&format!(
            r#"  <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i, i
        ));
        out.push('\n');
    }
    out.push_str(&format!(
        r#"  <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        sheet_count + 1
    ));
    out.push('\n');
    out.push_str("</Relationships>\n");
    out
}

fn styles_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
  <fills count="1"><fill><patternFill patternType="none"/></fill></fills>
  <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
  <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
  <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>
"#
    .to_owned()
}

fn worksheet_xml(grid: &SheetGrid) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    out.push('\n');

    if !grid.column_widths.is_empty() {
        out.push_str("  <cols>\n");
        for (index, width) in grid.column_widths.iter().enumerate() {
            out.push_str(&format!(
                r#"    <col min="{}" max="{}" width="{}" customWidth="1"/>"#,
                index + 1,
                index + 1,
                width
            ));
            out.push('\n');
        }
        out.push_str("  </cols>\n");
    }

    out.push_str("  <sheetData>\n");
    for (row_index, row) in grid.rows.iter().enumerate() {
        if row.is_empty() {
            // Spacer rows stay implicit; readers render them blank
            continue;
        }
        out.push_str(&format!(r#"    <row r="{}">"#, row_index + 1));
        out.push('\n');
        for (col_index, cell) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", column_letters(col_index), row_index + 1);
            match cell {
                Cell::Text(text) => {
                    out.push_str(&format!(
                        r#"      <c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                        cell_ref,
                        xml_escape(text)
                    ));
                    out.push('\n');
                }
                Cell::Number(value) => {
                    out.push_str(&format!(r#"      <c r="{}"><v>{}</v></c>"#, cell_ref, value));
                    out.push('\n');
                }
                Cell::Empty => {}
            }
        }
        out.push_str("    </row>\n");
    }
    out.push_str("  </sheetData>\n");
    out.push_str("</worksheet>\n");
    out
}

/// 0-based column index to its A1 letters (0 -> A, 25 -> Z, 26 -> AA)
fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn grid(name: &str) -> SheetGrid {
        SheetGrid {
            name: name.to_string(),
            column_widths: vec![20.0, 25.0],
            rows: vec![
                vec![
                    Cell::Text("CARTON No.".into()),
                    Cell::Text(": 1 OF 2".into()),
                ],
                Vec::new(),
                vec![Cell::Text("Print".into()), Cell::Number(42), Cell::Empty],
            ],
        }
    }

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_contains_one_part_per_sheet() {
        let bytes = write_workbook(&[grid("Carton_1"), grid("Carton_2")]).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let archive = zip::ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"xl/worksheets/sheet1.xml"));
        assert!(names.contains(&"xl/worksheets/sheet2.xml"));
        assert!(!names.contains(&"xl/worksheets/sheet3.xml"));

        let workbook = part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Carton_1" sheetId="1" r:id="rId1"/>"#));
        assert!(workbook.contains(r#"<sheet name="Carton_2" sheetId="2" r:id="rId2"/>"#));

        let content_types = part(&bytes, "[Content_Types].xml");
        assert!(content_types.contains("/xl/worksheets/sheet2.xml"));
    }

    #[test]
    fn test_worksheet_cells_and_spacer_rows() {
        let bytes = write_workbook(&[grid("Carton_1")]).unwrap();
        let sheet = part(&bytes, "xl/worksheets/sheet1.xml");

        assert!(sheet.contains(r#"<c r="A1" t="inlineStr"><is><t xml:space="preserve">CARTON No.</t></is></c>"#));
        assert!(sheet.contains(r#"<c r="B3"><v>42</v></c>"#));
        // Spacer row 2 is not written at all
        assert!(!sheet.contains(r#"<row r="2">"#));
        assert!(sheet.contains(r#"<row r="3">"#));
        // Empty cells are skipped, not zero-filled
        assert!(!sheet.contains(r#"r="C3""#));
        assert!(sheet.contains(r#"<col min="2" max="2" width="25" customWidth="1"/>"#));
    }

    #[test]
    fn test_text_is_xml_escaped() {
        let mut g = grid("Carton_1");
        g.rows[0][1] = Cell::Text("M&S <Store>".into());
        let bytes = write_workbook(&[g]).unwrap();
        let sheet = part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("M&amp;S &lt;Store&gt;"));
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(24), "Y");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(51), "AZ");
        assert_eq!(column_letters(52), "BA");
    }
}
