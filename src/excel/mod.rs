//! Excel reading module
//!
//! Opens a workbook through calamine with formula text preserved and
//! reports the active sheet:
//! - Active tab and recorded cell extent read from the OOXML package
//! - Cell value rendering (text, numbers, booleans, dates, errors)
//! - Fixed-window scan of populated cells

mod cell_text;
mod inspector;
mod package;

pub use cell_text::{cell_text, formula_text};
pub use inspector::WorkbookInspector;
pub use package::WorkbookPackage;
