//! Workbook inspector tests against real .xlsx fixtures

use pretty_assertions::assert_eq;
use royalbit_inspect::cli::write_report;
use royalbit_inspect::excel::{WorkbookInspector, WorkbookPackage};
use royalbit_inspect::{InspectError, SheetReport};
use rust_xlsxwriter::{ExcelDateTime, Format, FormatBorder, Workbook, XlsxError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a workbook in `dir` and return its path
fn build_workbook<F>(dir: &TempDir, name: &str, build: F) -> PathBuf
where
    F: FnOnce(&mut Workbook) -> Result<(), XlsxError>,
{
    let path = dir.path().join(name);
    let mut workbook = Workbook::new();
    build(&mut workbook).expect("Failed to build fixture");
    workbook.save(&path).expect("Failed to save fixture");
    path
}

fn lines(report: &SheetReport) -> Vec<String> {
    report.cells.iter().map(|l| l.to_string()).collect()
}

fn render(report: &SheetReport) -> String {
    let mut buf = Vec::new();
    write_report(report, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn inspect(path: &Path) -> SheetReport {
    WorkbookInspector::new(path)
        .inspect()
        .expect("Inspect should succeed")
}

// ═══════════════════════════════════════════════════════════════════════════
// SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_flow_rate_sheet() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "flow.xlsx", |wb| {
        let ws = wb.add_worksheet();
        ws.set_name("Sheet1")?;
        ws.write_string(0, 0, "Flow Rate")?;
        ws.write_number(0, 1, 100)?;
        ws.write_formula(1, 2, "=A1*2")?;
        Ok(())
    });

    let report = inspect(&path);

    assert_eq!(report.title, "Sheet1");
    assert_eq!(report.dimensions, "A1:C2");
    assert_eq!(
        lines(&report),
        vec!["A1: Flow Rate", "B1: 100", "C2: FORMULA: =A1*2"]
    );
    assert_eq!(report.formula_count(), 1);
}

#[test]
fn test_missing_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.xlsx");

    match WorkbookInspector::new(&path).inspect() {
        Err(InspectError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_empty_sheet_prints_header_only() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "empty.xlsx", |wb| {
        wb.add_worksheet().set_name("Blank")?;
        Ok(())
    });

    let report = inspect(&path);

    assert!(report.cells.is_empty());
    assert_eq!(
        render(&report),
        "Sheet: Blank\nDimensions: A1:A1\n\n=== All cells with values ===\n\n"
    );
}

#[test]
fn test_malformed_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "this is not a spreadsheet").unwrap();

    assert!(matches!(
        WorkbookInspector::new(&path).inspect(),
        Err(InspectError::Open { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════════
// WINDOW, ORDERING AND CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cells_outside_window_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "window.xlsx", |wb| {
        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "top-left")?;
        ws.write_string(39, 14, "bottom-right")?;
        ws.write_string(0, 15, "column P")?;
        ws.write_string(40, 0, "row 41")?;
        ws.write_formula(45, 20, "=A1")?;
        Ok(())
    });

    let report = inspect(&path);

    assert_eq!(lines(&report), vec!["A1: top-left", "O40: bottom-right"]);
    // The used range still reports the full extent
    assert_eq!(report.dimensions, "A1:U46");
}

#[test]
fn test_row_major_order() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "order.xlsx", |wb| {
        let ws = wb.add_worksheet();
        ws.write_string(2, 0, "A3")?;
        ws.write_string(0, 5, "F1")?;
        ws.write_string(1, 3, "D2")?;
        ws.write_string(0, 1, "B1")?;
        ws.write_string(1, 0, "A2")?;
        Ok(())
    });

    let report = inspect(&path);

    let coords: Vec<String> = report.cells.iter().map(|l| l.cell.coordinate()).collect();
    assert_eq!(coords, vec!["B1", "F1", "A2", "D2", "A3"]);
}

#[test]
fn test_formula_text_not_cached_value() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "formulas.xlsx", |wb| {
        let ws = wb.add_worksheet();
        ws.write_number(0, 0, 12.5)?;
        ws.write_number(1, 0, 7.5)?;
        ws.write_formula(2, 0, "=SUM(A1:A2)")?;
        ws.write_formula(2, 1, "=IF(A3>10,\"High\",\"Low\")")?;
        Ok(())
    });

    let report = inspect(&path);

    assert_eq!(
        lines(&report),
        vec![
            "A1: 12.5",
            "A2: 7.5",
            "A3: FORMULA: =SUM(A1:A2)",
            "B3: FORMULA: =IF(A3>10,\"High\",\"Low\")",
        ]
    );
}

#[test]
fn test_literal_types() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "literals.xlsx", |wb| {
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let date = ExcelDateTime::from_ymd(2024, 1, 15)?;

        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "Supply Air")?;
        ws.write_number(0, 1, 55)?;
        ws.write_number(0, 2, 0.25)?;
        ws.write_boolean(0, 3, true)?;
        ws.write_boolean(0, 4, false)?;
        ws.write_datetime_with_format(0, 5, &date, &date_format)?;
        Ok(())
    });

    let report = inspect(&path);

    assert_eq!(
        lines(&report),
        vec![
            "A1: Supply Air",
            "B1: 55",
            "C1: 0.25",
            "D1: True",
            "E1: False",
            "F1: 2024-01-15 00:00:00",
        ]
    );
    assert_eq!(report.formula_count(), 0);
}

#[test]
fn test_time_and_duration_cells() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "times.xlsx", |wb| {
        let time_format = Format::new().set_num_format("hh:mm:ss");
        let duration_format = Format::new().set_num_format("[h]:mm:ss");
        let start = ExcelDateTime::from_hms(8, 30, 0)?;

        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "Fan start")?;
        ws.write_datetime_with_format(0, 1, &start, &time_format)?;
        ws.write_string(1, 0, "Run time")?;
        ws.write_number_with_format(1, 1, 26.0 / 24.0, &duration_format)?;
        Ok(())
    });

    let report = inspect(&path);

    assert_eq!(
        lines(&report),
        vec![
            "A1: Fan start",
            "B1: 08:30:00",
            "A2: Run time",
            "B2: 1 day, 2:00:00",
        ]
    );
}

#[test]
fn test_tiny_and_huge_numbers_use_exponents() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "exponents.xlsx", |wb| {
        let ws = wb.add_worksheet();
        ws.write_number(0, 0, 1e-7)?;
        ws.write_number(0, 1, 1e21)?;
        ws.write_number(0, 2, 0.0001)?;
        Ok(())
    });

    let report = inspect(&path);

    assert_eq!(lines(&report), vec!["A1: 1e-07", "B1: 1e+21", "C1: 0.0001"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// DIMENSIONS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_dimensions_include_formatted_blanks() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "styled.xlsx", |wb| {
        let bold = Format::new().set_bold();

        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "Zone")?;
        ws.write_string(0, 1, "CFM")?;
        ws.write_string(0, 2, "OA %")?;
        ws.write_string(0, 3, "Temp")?;
        ws.write_blank(5, 6, &bold)?;
        Ok(())
    });

    let report = inspect(&path);

    assert_eq!(report.dimensions, "A1:G6");
    assert_eq!(
        lines(&report),
        vec!["A1: Zone", "B1: CFM", "C1: OA %", "D1: Temp"]
    );
}

#[test]
fn test_flow_rate_sheet_with_formatted_row_three() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "flow_styled.xlsx", |wb| {
        let border = Format::new().set_border(FormatBorder::Thin);

        let ws = wb.add_worksheet();
        ws.set_name("Sheet1")?;
        ws.write_string(0, 0, "Flow Rate")?;
        ws.write_number(0, 1, 100)?;
        ws.write_formula(1, 2, "=A1*2")?;
        ws.write_blank(2, 2, &border)?;
        Ok(())
    });

    let report = inspect(&path);

    assert_eq!(report.dimensions, "A1:C3");
    assert_eq!(
        render(&report),
        "Sheet: Sheet1\n\
         Dimensions: A1:C3\n\
         \n\
         === All cells with values ===\n\
         \n\
         A1: Flow Rate\n\
         B1: 100\n\
         C2: FORMULA: =A1*2\n"
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// ACTIVE SHEET
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_active_sheet_is_selected() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "active.xlsx", |wb| {
        let inputs = wb.add_worksheet();
        inputs.set_name("Inputs")?;
        inputs.write_string(0, 0, "first sheet")?;

        let results = wb.add_worksheet();
        results.set_name("Mixed Air")?;
        results.write_string(0, 0, "Outside Air %")?;
        results.write_number(0, 1, 0.3)?;
        results.set_active(true);
        Ok(())
    });

    let mut package = WorkbookPackage::open(&path).unwrap();
    assert_eq!(package.active_tab().unwrap(), Some(1));

    let report = inspect(&path);
    assert_eq!(report.title, "Mixed Air");
    assert_eq!(report.dimensions, "A1:B1");
    assert_eq!(lines(&report), vec!["A1: Outside Air %", "B1: 0.3"]);
}

#[test]
fn test_first_sheet_when_none_marked() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "first.xlsx", |wb| {
        wb.add_worksheet().set_name("Inputs")?;
        wb.add_worksheet().set_name("Results")?;
        Ok(())
    });

    let report = inspect(&path);
    assert_eq!(report.title, "Inputs");
}

// ═══════════════════════════════════════════════════════════════════════════
// REPEATABILITY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_repeated_runs_identical() {
    let dir = TempDir::new().unwrap();
    let path = build_workbook(&dir, "repeat.xlsx", |wb| {
        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "Return Air Temp")?;
        ws.write_number(0, 1, 75)?;
        ws.write_formula(1, 1, "=B1*0.7")?;
        Ok(())
    });

    let first = render(&inspect(&path));
    let second = render(&inspect(&path));

    assert_eq!(first, second);
}
