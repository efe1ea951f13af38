//! Workbook inspector - Excel (.xlsx) → SheetReport

use crate::error::{InspectError, InspectResult};
use crate::excel::cell_text::{cell_text, formula_text};
use crate::excel::package::WorkbookPackage;
use crate::types::{CellContent, CellLine, CellRef, ScanWindow, SheetReport};
use calamine::{open_workbook_auto, CellType, Data, Range, Reader};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads the active sheet of a workbook with formula text preserved
pub struct WorkbookInspector {
    path: PathBuf,
    window: ScanWindow,
}

impl WorkbookInspector {
    /// Create an inspector scanning the default window
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            window: ScanWindow::DEFAULT,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn window(&self) -> ScanWindow {
        self.window
    }

    /// Load the workbook, select its active sheet and scan the window
    pub fn inspect(&self) -> InspectResult<SheetReport> {
        if !self.path.exists() {
            return Err(InspectError::NotFound(self.path.clone()));
        }

        // Only OOXML packages record an active tab and formatted blanks
        let mut package = match WorkbookPackage::open(&self.path) {
            Ok(package) => Some(package),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "not an OOXML package");
                None
            }
        };
        let active_tab = package.as_mut().and_then(|p| match p.active_tab() {
            Ok(tab) => tab,
            Err(e) => {
                debug!(error = %e, "no active tab available");
                None
            }
        });

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| InspectError::Open {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let sheet_names = workbook.sheet_names();
        debug!(sheets = ?sheet_names, active_tab = ?active_tab, "workbook opened");

        let title = select_sheet(&sheet_names, active_tab)?;

        let values = workbook
            .worksheet_range(&title)
            .map_err(|e| InspectError::Sheet {
                name: title.clone(),
                message: e.to_string(),
            })?;

        // Formula text is optional; some containers cannot provide it
        let formulas = match workbook.worksheet_formula(&title) {
            Ok(range) => Some(range),
            Err(e) => {
                debug!(sheet = %title, error = %e, "formulas unavailable");
                None
            }
        };

        let extent = package.as_mut().and_then(|p| sheet_extent(p, &title));
        let dimensions = used_range(&values, formulas.as_ref(), extent);
        let cells = self.scan(&values, formulas.as_ref());

        info!(
            sheet = %title,
            dimensions = %dimensions,
            cells = cells.len(),
            "sheet scanned"
        );

        Ok(SheetReport {
            title,
            dimensions,
            cells,
        })
    }

    /// Visit the window row-major, keeping populated cells
    fn scan(&self, values: &Range<Data>, formulas: Option<&Range<String>>) -> Vec<CellLine> {
        self.window
            .cells()
            .filter_map(|cell| {
                let pos = cell.zero_based();
                let text = formulas
                    .and_then(|f| f.get_value(pos))
                    .and_then(|f| formula_text(f))
                    .or_else(|| values.get_value(pos).and_then(cell_text))?;

                Some(CellLine {
                    cell,
                    content: CellContent::classify(text),
                })
            })
            .collect()
    }
}

fn sheet_extent(
    package: &mut WorkbookPackage<BufReader<File>>,
    title: &str,
) -> Option<(CellRef, CellRef)> {
    match package.sheet_extent(title) {
        Ok(extent) => extent,
        Err(e) => {
            debug!(sheet = %title, error = %e, "sheet extent unavailable");
            None
        }
    }
}

/// Pick the active sheet name, falling back to the first sheet
fn select_sheet(sheet_names: &[String], active_tab: Option<usize>) -> InspectResult<String> {
    if sheet_names.is_empty() {
        return Err(InspectError::NoSheets);
    }

    let index = active_tab.unwrap_or(0);
    sheet_names
        .get(index)
        .cloned()
        .ok_or(InspectError::ActiveSheet {
            index,
            count: sheet_names.len(),
        })
}

/// Recorded extent of the sheet, e.g. "A1:O40"
///
/// Every cell the file stores counts, formatted blanks included, so the
/// range can reach past the last populated cell.
fn used_range(
    values: &Range<Data>,
    formulas: Option<&Range<String>>,
    package_extent: Option<(CellRef, CellRef)>,
) -> String {
    let mut bounds = merge_bounds(range_bounds(values), package_extent);
    if let Some(f) = formulas {
        bounds = merge_bounds(bounds, range_bounds(f));
    }

    match bounds {
        Some((start, end)) => format!("{}:{}", start, end),
        None => "A1:A1".to_string(),
    }
}

fn range_bounds<T: CellType>(range: &Range<T>) -> Option<(CellRef, CellRef)> {
    let start = range.start()?;
    let end = range.end()?;
    Some((CellRef::from_zero_based(start), CellRef::from_zero_based(end)))
}

fn merge_bounds(
    a: Option<(CellRef, CellRef)>,
    b: Option<(CellRef, CellRef)>,
) -> Option<(CellRef, CellRef)> {
    match (a, b) {
        (None, other) | (other, None) => other,
        (Some(a), Some(b)) => Some(CellRef::span(a, b)),
    }
}
