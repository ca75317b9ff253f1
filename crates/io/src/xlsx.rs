// Excel ingestion (calamine) and report export (rust_xlsxwriter)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use bookmatch_recon::bucket::{self, SHEET_COLUMNS};
use bookmatch_recon::model::ReconReport;
use bookmatch_recon::RawTable;

use crate::error::IoError;

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// Read the first worksheet of a workbook into a table. The first non-empty
/// row becomes the header; cells are stringified the way they display.
pub fn read_table(path: &Path) -> Result<RawTable, IoError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| IoError::Xlsx(format!("{}: {e}", path.display())))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| IoError::Empty(format!("{}: workbook has no sheets", path.display())))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| IoError::Xlsx(format!("sheet '{first}': {e}")))?;

    let mut rows = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>())
        .skip_while(|r| r.iter().all(String::is_empty));

    let headers = rows
        .next()
        .ok_or_else(|| IoError::Empty(format!("sheet '{first}' has no header row")))?;

    let mut table = RawTable::new(headers);
    for row in rows {
        if row.iter().all(String::is_empty) {
            continue;
        }
        table.rows.push(row);
    }

    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Excel stores most numbers as floats; keep integers free of ".0"
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

// ---------------------------------------------------------------------------
// Report export
// ---------------------------------------------------------------------------

/// Write a report as a multi-sheet workbook: `Full_Recon` plus one sheet per
/// non-empty bucket plus `Suggested`. Amount columns are numeric cells with a
/// two-decimal format; missing sides stay blank.
pub fn write_report(report: &ReconReport, path: &Path) -> Result<(), IoError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("0.00");

    for sheet in bucket::sheets(report) {
        let worksheet = workbook
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| IoError::Xlsx(format!("sheet '{}': {e}", sheet.name)))?;

        write_sheet(worksheet, &sheet.rows, &header_format, &amount_format)
            .map_err(|e| IoError::Xlsx(format!("sheet '{}': {e}", sheet.name)))?;
    }

    workbook
        .save(path)
        .map_err(|e| IoError::Xlsx(format!("{}: {e}", path.display())))?;
    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    rows: &[[String; 6]],
    header_format: &Format,
    amount_format: &Format,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    for (col, name) in SHEET_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row[0])?;

        // As-per-Vendor, As-per-Books, Variance
        for col in 1..=3u16 {
            let cell = &row[col as usize];
            if cell.is_empty() {
                continue;
            }
            match cell.parse::<f64>() {
                Ok(value) => {
                    worksheet.write_number_with_format(r, col, value, amount_format)?;
                }
                Err(_) => {
                    worksheet.write_string(r, col, cell)?;
                }
            }
        }

        worksheet.write_string(r, 4, &row[4])?;
        if !row[5].is_empty() {
            worksheet.write_string(r, 5, &row[5])?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmatch_recon::config::ReconConfig;
    use bookmatch_recon::engine::{run, ReconInput};
    use tempfile::tempdir;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn xlsx_ingestion_stringifies_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendor.xlsx");

        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, "Invoice #").unwrap();
        ws.write_string(0, 1, "Amount").unwrap();
        ws.write_string(1, 0, "INV-001").unwrap();
        ws.write_number(1, 1, 100.0).unwrap();
        ws.write_number(2, 0, 42.0).unwrap();
        ws.write_number(2, 1, 19.99).unwrap();
        workbook.save(&path).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["Invoice #", "Amount"]);
        // Integral floats come back without ".0"
        assert_eq!(table.rows[0], vec!["INV-001", "100"]);
        assert_eq!(table.rows[1], vec!["42", "19.99"]);
    }

    #[test]
    fn report_export_round_trips_sheet_names_and_cells() {
        let vendor = raw(
            &["Invoice", "Amount"],
            &[&["1", "100.00"], &["2", "50.00"]],
        );
        let internal = raw(&["Invoice", "Amount"], &[&["1", "100.00"]]);
        let report = run(&ReconConfig::default(), &ReconInput { vendor, internal }).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_report(&report, &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let names = workbook.sheet_names().to_vec();
        assert_eq!(names, vec!["Full_Recon", "Matched", "Missing_in_Books"]);

        let full = workbook.worksheet_range("Full_Recon").unwrap();
        let header: Vec<String> = full.rows().next().unwrap().iter().map(cell_to_string).collect();
        assert_eq!(header, SHEET_COLUMNS);

        // Row for key "2": vendor amount numeric, books cell blank
        let row2: Vec<String> = full
            .rows()
            .find(|r| cell_to_string(&r[0]) == "2")
            .unwrap()
            .iter()
            .map(cell_to_string)
            .collect();
        assert_eq!(row2[1], "50");
        assert_eq!(row2[2], "");
        assert_eq!(row2[4], "Missing in Books");
    }
}
