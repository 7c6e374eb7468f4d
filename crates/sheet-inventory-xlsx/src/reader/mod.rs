//! XLSX reader implementation

mod shared_formula;
mod values;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use sheet_inventory_core::{Cell, CellAddress, SharedString, Workbook, Worksheet};

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_styles_xml, CellFormats};

use self::shared_formula::SharedFormula;
use self::values::{decode_cell, decode_excel_escapes, RawCell};

const DEFAULT_WORKBOOK_PART: &str = "xl/workbook.xml";

/// Sheet list and workbook-wide settings from `workbook.xml`
#[derive(Debug, Default)]
struct WorkbookInfo {
    /// (sheet name, relationship id) in workbook order
    sheets: Vec<(String, String)>,
    /// Serial dates count from 1904-01-01
    date1904: bool,
}

/// Workbook-wide lookups needed to decode cells
struct SheetContext<'a> {
    shared_strings: &'a [SharedString],
    formats: &'a CellFormats,
    date1904: bool,
}

/// XLSX file reader
///
/// Reads every worksheet of an `.xlsx`/`.xlsm` package into a read-only
/// [`Workbook`]. Formula cells keep their source text; cached results are
/// ignored.
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    ///
    /// The file is closed when this returns, on success and on error.
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => XlsxError::FileNotFound(path.to_path_buf()),
            _ => XlsxError::Io(e),
        })?;
        log::debug!("Reading workbook {}", path.display());
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an OOXML package
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let workbook_part = Self::read_package_rels(&mut archive)?;

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let formats = Self::read_styles(&mut archive)?;
        let info = Self::read_workbook_xml(&mut archive, &workbook_part)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive, &workbook_part)?;

        let ctx = SheetContext {
            shared_strings: &shared_strings,
            formats: &formats,
            date1904: info.date1904,
        };

        let mut workbook = Workbook::new();
        for (name, r_id) in &info.sheets {
            let Some(path) = sheet_paths.get(r_id) else {
                log::warn!("Sheet '{}' has no worksheet part ({}), skipped", name, r_id);
                continue;
            };
            let mut worksheet = Worksheet::new(name.as_str());
            Self::read_worksheet(&mut archive, path, &mut worksheet, &ctx)?;
            let records = worksheet.record_count();
            match workbook.add_loaded_worksheet(worksheet) {
                Ok(_) => log::debug!("Loaded sheet '{}': {} cell records", name, records),
                Err(e) => log::warn!("Sheet '{}' skipped: {}", name, e),
            }
        }

        if workbook.is_empty() {
            log::warn!("Workbook contains no worksheets");
        }

        Ok(workbook)
    }

    /// Find the workbook part through the package relationships
    fn read_package_rels<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<String> {
        let file = match archive.by_name("_rels/.rels") {
            Ok(f) => f,
            Err(_) => return Ok(DEFAULT_WORKBOOK_PART.to_string()),
        };

        let rels = read_relationships(file)?;
        let part = rels
            .into_iter()
            .find(|rel| rel.rel_type.ends_with("/officeDocument"))
            .map(|rel| resolve_part("", &rel.target))
            .unwrap_or_else(|| DEFAULT_WORKBOOK_PART.to_string());

        Ok(part)
    }

    /// Read the shared strings table
    ///
    /// Rich-text runs are concatenated; phonetic runs (`rPh`) are not part
    /// of the string.
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<SharedString>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_rph = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_rph = true,
                    b"t" if in_si && !in_rph => in_t = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(SharedString::new(decode_excel_escapes(&current_string)));
                        in_si = false;
                    }
                    b"rPh" => in_rph = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(SharedString::new(""));
                }
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        log::debug!("Read {} shared strings", strings.len());
        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<CellFormats> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file),
            Err(_) => Ok(CellFormats::general()),
        }
    }

    /// Read workbook.xml to get sheet names, rIds and the date system
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        workbook_part: &str,
    ) -> XlsxResult<WorkbookInfo> {
        let file = archive
            .by_name(workbook_part)
            .map_err(|_| XlsxError::MissingPart(workbook_part.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut info = WorkbookInfo::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"sheet" => {
                        let name = attr_value(&e, b"name");
                        // r:id, whatever the prefix is bound to
                        let r_id = attr_value(&e, b"id");
                        match (name, r_id) {
                            (Some(name), Some(r_id)) => info.sheets.push((name, r_id)),
                            _ => log::warn!("Sheet entry without name or r:id, skipped"),
                        }
                    }
                    b"workbookPr" => {
                        info.date1904 = attr_value(&e, b"date1904")
                            .map_or(false, |v| v == "1" || v.eq_ignore_ascii_case("true"));
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(info)
    }

    /// Read the workbook relationships to get worksheet part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        workbook_part: &str,
    ) -> XlsxResult<HashMap<String, String>> {
        let (dir, file_name) = match workbook_part.rsplit_once('/') {
            Some((dir, file_name)) => (dir, file_name),
            None => ("", workbook_part),
        };
        let rels_part = if dir.is_empty() {
            format!("_rels/{}.rels", file_name)
        } else {
            format!("{}/_rels/{}.rels", dir, file_name)
        };

        let file = archive
            .by_name(&rels_part)
            .map_err(|_| XlsxError::MissingPart(rels_part.clone()))?;

        let rels = read_relationships(file)?
            .into_iter()
            .filter(|rel| rel.rel_type.ends_with("/worksheet"))
            .map(|rel| (rel.id, resolve_part(dir, &rel.target)))
            .collect();

        Ok(rels)
    }

    /// Read a worksheet from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        ctx: &SheetContext<'_>,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();

        // Position tracking for rows/cells that omit their `r` attribute
        let mut current_row: u32 = 0;
        let mut next_col: u16 = 1;

        let mut shared_formulas: HashMap<u32, SharedFormula> = HashMap::new();

        // Current cell state
        let mut cell = PendingCell::default();
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_formula = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;
        let mut in_rph = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"row" => {
                        current_row = attr_value(&e, b"r")
                            .and_then(|r| r.parse().ok())
                            .unwrap_or(current_row + 1);
                        next_col = 1;
                    }
                    b"c" => {
                        in_cell = true;
                        cell = PendingCell::start(&e, current_row, next_col);
                        next_col = cell.col.saturating_add(1);
                    }
                    b"v" if in_cell => in_value = true,
                    b"f" if in_cell => {
                        in_formula = true;
                        cell.read_formula_attrs(&e);
                    }
                    b"is" if in_cell => in_inline_str = true,
                    b"rPh" if in_inline_str => in_rph = true,
                    b"t" if in_inline_str && !in_rph => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"c" => {
                        // Styled but blank cell: still a cell record
                        let blank = PendingCell::start(&e, current_row, next_col);
                        next_col = blank.col.saturating_add(1);
                        Self::store_cell(worksheet, blank, &mut shared_formulas, ctx);
                    }
                    b"f" if in_cell => cell.read_formula_attrs(&e),
                    b"row" => {
                        current_row = attr_value(&e, b"r")
                            .and_then(|r| r.parse().ok())
                            .unwrap_or(current_row + 1);
                        next_col = 1;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_value || in_inline_text || in_formula {
                        let text = e.unescape().map_err(XlsxError::Xml)?;
                        if in_formula {
                            cell.formula.get_or_insert_with(String::new).push_str(&text);
                        } else {
                            cell.value.get_or_insert_with(String::new).push_str(&text);
                        }
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"c" => {
                        in_cell = false;
                        let finished = std::mem::take(&mut cell);
                        Self::store_cell(worksheet, finished, &mut shared_formulas, ctx);
                    }
                    b"v" => in_value = false,
                    b"f" => in_formula = false,
                    b"is" => in_inline_str = false,
                    b"rPh" => in_rph = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Turn a finished `<c>` element into a cell record
    ///
    /// Per-cell problems are logged and the cell is dropped; they never fail
    /// the read.
    fn store_cell(
        worksheet: &mut Worksheet,
        pending: PendingCell,
        shared_formulas: &mut HashMap<u32, SharedFormula>,
        ctx: &SheetContext<'_>,
    ) {
        let PendingCell {
            row,
            col,
            cell_type,
            style,
            value,
            formula,
            shared_index,
        } = pending;

        if row == 0 {
            log::warn!("Cell outside of any row in sheet '{}', skipped", worksheet.name());
            return;
        }

        let formula_text = match (formula.filter(|f| !f.is_empty()), shared_index) {
            (Some(text), Some(si)) => {
                shared_formulas.insert(
                    si,
                    SharedFormula {
                        row,
                        col,
                        text: text.clone(),
                    },
                );
                Some(text)
            }
            (Some(text), None) => Some(text),
            (None, Some(si)) => match shared_formulas.get(&si) {
                Some(master) => Some(master.text_at(row, col)),
                None => {
                    log::warn!(
                        "Shared formula {} referenced at {} before its master",
                        si,
                        CellAddress::new(row, col)
                    );
                    None
                }
            },
            (None, None) => None,
        };

        let record = match formula_text {
            Some(text) => Cell::formula(text),
            None => {
                let raw = RawCell {
                    cell_type: cell_type.as_deref(),
                    value: value.as_deref(),
                };
                let number_format = ctx.formats.get(style);
                let decoded = decode_cell(&raw, number_format, ctx.shared_strings, ctx.date1904);
                if decoded.is_empty() {
                    Cell::blank()
                } else {
                    Cell::literal(decoded).with_number_format(number_format.format_string())
                }
            }
        };

        if let Err(e) = worksheet.set_cell(row, col, record) {
            log::warn!("Cell at row {} column {} skipped: {}", row, col, e);
        }
    }
}

/// Accumulated state of the `<c>` element being read
#[derive(Debug, Default)]
struct PendingCell {
    row: u32,
    col: u16,
    cell_type: Option<String>,
    style: Option<u32>,
    value: Option<String>,
    formula: Option<String>,
    /// `si` of a shared formula (master or dependent)
    shared_index: Option<u32>,
}

impl PendingCell {
    /// Read the attributes of `<c>`, falling back to the running position
    /// when `r` is absent
    fn start(e: &BytesStart<'_>, current_row: u32, next_col: u16) -> Self {
        let mut cell = PendingCell {
            row: current_row,
            col: next_col,
            ..Default::default()
        };

        for attr in e.attributes().flatten() {
            match attr.key.local_name().as_ref() {
                b"r" => {
                    let Ok(r) = attr.unescape_value() else { continue };
                    match CellAddress::parse(&r) {
                        Ok(addr) => {
                            cell.row = addr.row;
                            cell.col = addr.col;
                        }
                        Err(err) => log::warn!("Invalid cell reference '{}': {}", r, err),
                    }
                }
                b"t" => {
                    cell.cell_type = attr.unescape_value().ok().map(|s| s.to_string());
                }
                b"s" => {
                    cell.style = attr.unescape_value().ok().and_then(|s| s.parse().ok());
                }
                _ => {}
            }
        }

        cell
    }

    fn read_formula_attrs(&mut self, e: &BytesStart<'_>) {
        let is_shared = attr_value(e, b"t").map_or(false, |t| t == "shared");
        if is_shared {
            self.shared_index = attr_value(e, b"si").and_then(|si| si.parse().ok());
        }
    }
}

/// One `<Relationship>` entry
#[derive(Debug)]
struct Relationship {
    id: String,
    target: String,
    rel_type: String,
}

fn read_relationships<R: Read>(reader: R) -> XlsxResult<Vec<Relationship>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attr_value(&e, b"Id");
                let target = attr_value(&e, b"Target");
                let rel_type = attr_value(&e, b"Type");
                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    rels.push(Relationship {
                        id,
                        target,
                        rel_type,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Value of the attribute with the given local name
fn attr_value(e: &BytesStart<'_>, local_name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local_name)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}

/// Resolve a relationship target against the directory of its source part
///
/// Absolute targets (`/xl/...`) are package-rooted; `..` segments are
/// collapsed.
fn resolve_part(base_dir: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None if base_dir.is_empty() => target.to_string(),
        None => format!("{}/{}", base_dir, target),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}
