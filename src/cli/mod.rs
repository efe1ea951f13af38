//! CLI command handlers

pub mod commands;

pub use commands::{inspect, write_report, DEFAULT_WORKBOOK_PATH};
