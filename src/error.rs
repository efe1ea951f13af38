use std::path::PathBuf;
use thiserror::Error;

pub type InspectResult<T> = Result<T, InspectError>;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open workbook {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Active sheet index {index} is out of range ({count} sheets)")]
    ActiveSheet { index: usize, count: usize },

    #[error("Failed to read sheet '{name}': {message}")]
    Sheet { name: String, message: String },
}

pub type PackageResult<T> = Result<T, PackageError>;

/// Failures reading parts of an OOXML package directly
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Missing required part: {0}")]
    MissingPart(String),

    #[error("Invalid {attribute} value '{value}'")]
    InvalidAttribute { attribute: String, value: String },
}
