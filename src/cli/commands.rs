use crate::error::InspectResult;
use crate::excel::WorkbookInspector;
use crate::types::SheetReport;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Workbook inspected when no path is given
pub const DEFAULT_WORKBOOK_PATH: &str =
    r"c:\Users\forst\repo\Ductolator\excel\Mixed Air Calculator 1.xlsx";

const SECTION_LABEL: &str = "=== All cells with values ===";

/// Write the sheet header followed by one line per populated cell
pub fn write_report<W: Write>(report: &SheetReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Sheet: {}", report.title)?;
    writeln!(out, "Dimensions: {}", report.dimensions)?;
    writeln!(out)?;
    writeln!(out, "{}", SECTION_LABEL)?;
    writeln!(out)?;

    for line in &report.cells {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}

/// Execute the inspect command
pub fn inspect(file: PathBuf, verbose: bool) -> InspectResult<()> {
    if verbose {
        eprintln!("{}", "📖 Reading workbook...".cyan());
        eprintln!("   File: {}", file.display());
    }

    let inspector = WorkbookInspector::new(&file);
    let report = inspector.inspect()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&report, &mut out)?;
    out.flush()?;

    if verbose {
        eprintln!(
            "{}",
            format!(
                "✅ {} cells ({} formulas)",
                report.cells.len(),
                report.formula_count()
            )
            .green()
        );
    }

    Ok(())
}
