//! Cell addressing and report types

use std::fmt;

/// Convert a 1-based column number to its letter form (1 → A, 27 → AA)
pub fn column_letter(col: u32) -> String {
    let mut result = String::new();
    let mut num = col.saturating_sub(1);

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

/// A 1-based cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Build from calamine's 0-based absolute position
    pub fn from_zero_based((row, col): (u32, u32)) -> Self {
        Self::new(row + 1, col + 1)
    }

    /// 0-based absolute position, as calamine indexes ranges
    pub fn zero_based(&self) -> (u32, u32) {
        (self.row - 1, self.col - 1)
    }

    /// Parse an A1-style reference such as "G6"
    pub fn parse(reference: &str) -> Option<Self> {
        let split = reference.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = reference.split_at(split);
        if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
            return None;
        }

        let col = letters
            .bytes()
            .try_fold(0u32, |acc, b| acc.checked_mul(26)?.checked_add((b - b'A' + 1) as u32))?;
        let row = digits.parse::<u32>().ok().filter(|r| *r > 0)?;

        Some(Self::new(row, col))
    }

    /// Smallest and largest row/column of two cells
    pub fn span(a: (CellRef, CellRef), b: (CellRef, CellRef)) -> (CellRef, CellRef) {
        (
            CellRef::new(a.0.row.min(b.0.row), a.0.col.min(b.0.col)),
            CellRef::new(a.1.row.max(b.1.row), a.1.col.max(b.1.col)),
        )
    }

    /// A1-style coordinate, e.g. "B7"
    pub fn coordinate(&self) -> String {
        format!("{}{}", column_letter(self.col), self.row)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinate())
    }
}

/// Inclusive rectangle of cells visited by a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl ScanWindow {
    /// Rows 1-40, columns A-O
    pub const DEFAULT: ScanWindow = ScanWindow {
        min_row: 1,
        max_row: 40,
        min_col: 1,
        max_col: 15,
    };

    pub fn contains(&self, cell: CellRef) -> bool {
        (self.min_row..=self.max_row).contains(&cell.row)
            && (self.min_col..=self.max_col).contains(&cell.col)
    }

    /// Every position in the window, row-major
    pub fn cells(&self) -> impl Iterator<Item = CellRef> {
        let (min_col, max_col) = (self.min_col, self.max_col);
        (self.min_row..=self.max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |col| CellRef::new(row, col)))
    }
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What a populated cell holds once rendered as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Formula(String),
    Literal(String),
}

impl CellContent {
    /// Text starting with '=' is a formula, anything else a literal
    pub fn classify(text: String) -> Self {
        if text.starts_with('=') {
            CellContent::Formula(text)
        } else {
            CellContent::Literal(text)
        }
    }

    pub fn text(&self) -> &str {
        match self {
            CellContent::Formula(s) | CellContent::Literal(s) => s,
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula(_))
    }
}

/// One output line of the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLine {
    pub cell: CellRef,
    pub content: CellContent,
}

impl fmt::Display for CellLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            CellContent::Formula(text) => write!(f, "{}: FORMULA: {}", self.cell, text),
            CellContent::Literal(text) => write!(f, "{}: {}", self.cell, text),
        }
    }
}

/// Result of inspecting the active sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub title: String,
    pub dimensions: String,
    pub cells: Vec<CellLine>,
}

impl SheetReport {
    pub fn formula_count(&self) -> usize {
        self.cells.iter().filter(|c| c.content.is_formula()).count()
    }
}
