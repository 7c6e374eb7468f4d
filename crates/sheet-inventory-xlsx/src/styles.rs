//! `xl/styles.xml` parsing
//!
//! Only number formats are kept: the cell style index (`s` attribute) is
//! resolved to the `numFmtId` of the matching `cellXfs` entry.

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::number_format::NumberFormat;

/// Number formats indexed by cell style (`cellXfs`) index
#[derive(Debug, Clone)]
pub(crate) struct CellFormats {
    formats: Vec<NumberFormat>,
}

impl CellFormats {
    /// Formats for a workbook without `styles.xml`
    pub(crate) fn general() -> Self {
        Self {
            formats: vec![NumberFormat::General],
        }
    }

    /// Format for a style index, General when the index is unknown
    pub(crate) fn get(&self, style_index: Option<u32>) -> &NumberFormat {
        static GENERAL: NumberFormat = NumberFormat::General;
        style_index
            .and_then(|s| self.formats.get(s as usize))
            .unwrap_or(&GENERAL)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.formats.len()
    }
}

pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<CellFormats> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();

    let mut numfmts: HashMap<u32, String> = HashMap::new();
    let mut xf_numfmt_ids: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"numFmt" => {
                    let mut id = None;
                    let mut code = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.local_name().as_ref() {
                            b"numFmtId" => {
                                id = attr.unescape_value().ok().and_then(|s| s.parse().ok())
                            }
                            b"formatCode" => {
                                code = attr.unescape_value().ok().map(|s| s.to_string())
                            }
                            _ => {}
                        }
                    }
                    if let (Some(id), Some(code)) = (id, code) {
                        numfmts.insert(id, code);
                    }
                }
                b"cellXfs" => {
                    in_cell_xfs = true;
                }
                b"xf" if in_cell_xfs => {
                    xf_numfmt_ids.push(numfmt_id_attr(&e));
                }
                _ => {}
            },
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"cellXfs" {
                    in_cell_xfs = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }

        buf.clear();
    }

    if xf_numfmt_ids.is_empty() {
        return Ok(CellFormats::general());
    }

    let formats = xf_numfmt_ids
        .into_iter()
        .map(|id| NumberFormat::from_id(id, numfmts.get(&id).map(String::as_str)))
        .collect();

    Ok(CellFormats { formats })
}

fn numfmt_id_attr(e: &BytesStart<'_>) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"numFmtId")
        .and_then(|attr| attr.unescape_value().ok().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}
