//! Inspect - dump a workbook's active sheet to the terminal
//!
//! Debugging aid for calculator development: opens a spreadsheet with
//! formula text preserved, selects the active sheet, and prints every
//! populated cell in rows 1-40, columns A-O.
//!
//! # Example
//!
//! ```no_run
//! use royalbit_inspect::excel::WorkbookInspector;
//!
//! let report = WorkbookInspector::new("calculator.xlsx").inspect()?;
//!
//! println!("Sheet: {}", report.title);
//! for line in &report.cells {
//!     println!("{}", line);
//! }
//! # Ok::<(), royalbit_inspect::error::InspectError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{InspectError, InspectResult};
pub use types::{CellContent, CellLine, CellRef, ScanWindow, SheetReport};
