//! XML parsing utilities for extracting metadata from XLSX archives

use crate::reference::MergedRange;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum XmlPartError {
    #[error("part '{0}' not found in archive")]
    MissingPart(String),
    #[error("zip error: {0}")]
    Zip(#[from] ZipError),
    #[error("XML parsing error in '{part}': {message}")]
    Xml { part: String, message: String },
    #[error("invalid range reference '{0}'")]
    InvalidRef(String),
}

/// Resolve worksheet part paths, in workbook order, as (sheet name, part path)
///
/// Paths come from `xl/workbook.xml` and its relationships. A sheet whose
/// relationship cannot be resolved falls back to `xl/worksheets/sheet{N}.xml`.
pub fn resolve_sheet_paths(
    archive: &mut ZipArchive<impl Read + Seek>,
) -> Result<Vec<(String, String)>, XmlPartError> {
    let rels = read_workbook_relationships(archive)?;

    let part = "xl/workbook.xml";
    let workbook_xml = match archive.by_name(part) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(XmlPartError::MissingPart(part.to_string())),
        Err(e) => return Err(e.into()),
    };

    let mut reader = Reader::from_reader(BufReader::new(workbook_xml));
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let name = attr_value(&e, b"name", part)?.unwrap_or_default();
                    let rel_id = relationship_id(&e);
                    let index = sheets.len() + 1;

                    let path = rel_id
                        .and_then(|id| rels.get(&id))
                        .map(|target| normalize_target(target))
                        .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", index));

                    sheets.push((name, path));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(XmlPartError::Xml {
                    part: part.to_string(),
                    message: e.to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Map relationship ids to targets from `xl/_rels/workbook.xml.rels`
fn read_workbook_relationships(
    archive: &mut ZipArchive<impl Read + Seek>,
) -> Result<HashMap<String, String>, XmlPartError> {
    let part = "xl/_rels/workbook.xml.rels";
    let mut rels = HashMap::new();

    let rels_xml = match archive.by_name(part) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(rels),
        Err(e) => return Err(e.into()),
    };

    let mut reader = Reader::from_reader(BufReader::new(rels_xml));
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    if let (Some(id), Some(target)) =
                        (attr_value(&e, b"Id", part)?, attr_value(&e, b"Target", part)?)
                    {
                        rels.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(XmlPartError::Xml {
                    part: part.to_string(),
                    message: e.to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Extract merged cell ranges from a worksheet part, in document order
pub fn extract_merged_cells_from_xlsx(
    archive: &mut ZipArchive<impl Read + Seek>,
    sheet_path: &str,
) -> Result<Vec<MergedRange>, XmlPartError> {
    let sheet_xml = match archive.by_name(sheet_path) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(XmlPartError::MissingPart(sheet_path.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = Reader::from_reader(BufReader::new(sheet_xml));
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut merged_cells = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"mergeCell" {
                    if let Some(ref_str) = attr_value(&e, b"ref", sheet_path)? {
                        let range = MergedRange::parse(&ref_str)
                            .ok_or_else(|| XmlPartError::InvalidRef(ref_str.clone()))?;
                        merged_cells.push(range);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(XmlPartError::Xml {
                    part: sheet_path.to_string(),
                    message: e.to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(merged_cells)
}

fn attr_value(e: &BytesStart, key: &[u8], part: &str) -> Result<Option<String>, XmlPartError> {
    let Some(attr) = e.attributes().flatten().find(|attr| attr.key.as_ref() == key) else {
        return Ok(None);
    };
    let value = attr.unescape_value().map_err(|err| XmlPartError::Xml {
        part: part.to_string(),
        message: err.to_string(),
    })?;
    Ok(Some(value.into_owned()))
}

/// `r:id` on a `<sheet>` element, whatever the namespace prefix
fn relationship_id(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id")
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Relationship targets are relative to `xl/` unless absolute
fn normalize_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if target.starts_with("xl/") {
        target.to_string()
    } else {
        format!("xl/{}", target.trim_start_matches("./"))
    }
}
