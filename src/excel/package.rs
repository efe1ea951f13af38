//! Direct reads from an OOXML package (.xlsx, .xlsm)
//!
//! calamine exposes neither the tab that was selected when the file was
//! saved nor the cells that carry only formatting. Both live in the raw
//! parts: `<workbookView activeTab="N"/>` in `xl/workbook.xml`, and every
//! `<c r="..">` element of the sheet part.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{PackageError, PackageResult};
use crate::types::CellRef;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// An opened OOXML zip package
pub struct WorkbookPackage<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
}

impl WorkbookPackage<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> PackageResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> WorkbookPackage<R> {
    pub fn from_reader(reader: R) -> PackageResult<Self> {
        Ok(Self {
            archive: zip::ZipArchive::new(reader)?,
        })
    }

    /// Saved active tab index; None when the workbook records no view
    pub fn active_tab(&mut self) -> PackageResult<Option<usize>> {
        let xml = self.read_part(WORKBOOK_PART)?;
        active_tab_from_xml(xml.as_bytes())
    }

    /// Bounding box of every cell element in the named sheet, formatted
    /// blanks included. None when the sheet has no cells.
    pub fn sheet_extent(&mut self, sheet_name: &str) -> PackageResult<Option<(CellRef, CellRef)>> {
        let sheet_ids = sheet_ids_from_xml(self.read_part(WORKBOOK_PART)?.as_bytes())?;
        let targets = sheet_targets_from_xml(self.read_part(WORKBOOK_RELS_PART)?.as_bytes())?;

        let sheet_part = sheet_ids
            .iter()
            .find(|(name, _)| name == sheet_name)
            .and_then(|(_, id)| targets.get(id))
            .ok_or_else(|| PackageError::MissingPart(format!("sheet '{}'", sheet_name)))?
            .clone();

        cell_extent_from_xml(self.read_part(&sheet_part)?.as_bytes())
    }

    fn read_part(&mut self, name: &str) -> PackageResult<String> {
        let mut part = self
            .archive
            .by_name(name)
            .map_err(|_| PackageError::MissingPart(name.to_string()))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        Ok(xml)
    }
}

fn attribute(e: &BytesStart<'_>, local_name: &[u8]) -> PackageResult<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == local_name {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn active_tab_from_xml<R: BufRead>(reader: R) -> PackageResult<Option<usize>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"workbookView" => {
                // Only the first view counts; absent attribute means tab 0
                return match attribute(&e, b"activeTab")? {
                    Some(value) => value.trim().parse::<usize>().map(Some).map_err(|_| {
                        PackageError::InvalidAttribute {
                            attribute: "activeTab".to_string(),
                            value,
                        }
                    }),
                    None => Ok(Some(0)),
                };
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(None)
}

/// (sheet name, relationship id) in workbook order
fn sheet_ids_from_xml<R: BufRead>(reader: R) -> PackageResult<Vec<(String, String)>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                if let (Some(name), Some(id)) = (attribute(&e, b"name")?, attribute(&e, b"id")?) {
                    sheets.push((name, id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Relationship id → part path inside the package
fn sheet_targets_from_xml<R: BufRead>(reader: R) -> PackageResult<HashMap<String, String>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attribute(&e, b"Id")?, attribute(&e, b"Target")?)
                {
                    // Targets are relative to xl/ unless absolute
                    let path = match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("xl/{}", target),
                    };
                    targets.insert(id, path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

fn cell_extent_from_xml<R: BufRead>(reader: R) -> PackageResult<Option<(CellRef, CellRef)>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut extent: Option<(CellRef, CellRef)> = None;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"c" => {
                let reference = attribute(&e, b"r")?.unwrap_or_default();
                let cell = CellRef::parse(&reference).ok_or_else(|| {
                    PackageError::InvalidAttribute {
                        attribute: "r".to_string(),
                        value: reference.clone(),
                    }
                })?;
                extent = Some(match extent {
                    Some(current) => CellRef::span(current, (cell, cell)),
                    None => (cell, cell),
                });
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(extent)
}
