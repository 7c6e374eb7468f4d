//! Mapping of XLSX cell payloads into [`CellValue`]
//!
//! This is the one place where the file format's native types (the `t`
//! attribute of `<c>`, the raw `<v>` text and the cell's number format) are
//! turned into the closed set of values the rest of the workspace uses.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use sheet_inventory_core::{CellValue, SharedString};

use crate::number_format::NumberFormat;

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Parse the text of a numeric `<v>` element
///
/// Integral text (no decimal point or exponent) becomes an integer, anything
/// else a float. Text that is not a number at all is kept as text.
pub(crate) fn parse_number(raw: &str) -> CellValue {
    let raw = raw.trim();
    let looks_float = raw.contains(['.', 'e', 'E']);
    if !looks_float {
        if let Ok(n) = raw.parse::<i64>() {
            return CellValue::Integer(n);
        }
    }
    match raw.parse::<f64>() {
        Ok(n) => CellValue::Float(n),
        Err(_) => {
            log::warn!("Unparsable numeric cell value '{}', keeping it as text", raw);
            CellValue::text(raw)
        }
    }
}

/// First serial past 9999-12-31, the last date Excel can display
const MAX_DATE_SERIAL: f64 = 2_958_466.0;

/// Convert an Excel serial date to a date/time
///
/// The 1900 system counts 1900-02-29 (serial 60), a day that never existed,
/// so serials before it are anchored one day later.
pub(crate) fn serial_to_datetime(serial: f64, date1904: bool) -> Option<NaiveDateTime> {
    if !(0.0..MAX_DATE_SERIAL).contains(&serial) {
        return None;
    }

    let epoch = if date1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)?
    } else if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    let days = serial.trunc() as i64;
    let millis = ((serial - serial.trunc()) * 86_400_000.0).round() as i64;

    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::try_days(days)?)?
        .checked_add_signed(Duration::try_milliseconds(millis)?)
}

/// Parse an ISO 8601 value from a `t="d"` cell
fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Raw payload of a `<c>` element
#[derive(Debug, Default)]
pub(crate) struct RawCell<'a> {
    /// The `t` attribute
    pub cell_type: Option<&'a str>,
    /// Text of `<v>`, or of `<is><t>` for inline strings
    pub value: Option<&'a str>,
}

/// Map a literal cell's payload into a [`CellValue`]
///
/// Anomalies (bad shared-string index, unknown type code) never abort the
/// read: they are logged and mapped to the closest sensible value.
pub(crate) fn decode_cell(
    raw: &RawCell<'_>,
    number_format: &NumberFormat,
    shared_strings: &[SharedString],
    date1904: bool,
) -> CellValue {
    let Some(value) = raw.value else {
        return CellValue::Empty;
    };

    match raw.cell_type {
        // Shared string
        Some("s") => match value.trim().parse::<usize>() {
            Ok(idx) => match shared_strings.get(idx) {
                Some(s) => CellValue::Text(s.clone()),
                None => {
                    log::warn!("Shared string index {} out of bounds, cell skipped", idx);
                    CellValue::Empty
                }
            },
            Err(_) => {
                log::warn!("Invalid shared string index '{}', cell skipped", value);
                CellValue::Empty
            }
        },

        Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),

        // Errors (#N/A, #REF!, ...) are surfaced as their display text
        Some("e") => CellValue::text(value),

        Some("inlineStr") | Some("str") => CellValue::text(decode_excel_escapes(value)),

        Some("d") => match parse_iso_datetime(value) {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::text(value),
        },

        None | Some("n") => {
            let number = parse_number(value);
            if number_format.is_date_format() {
                if let Some(dt) = number
                    .as_number()
                    .and_then(|serial| serial_to_datetime(serial, date1904))
                {
                    return CellValue::DateTime(dt);
                }
            }
            number
        }

        Some(other) => {
            log::warn!("Unknown cell type '{}', keeping value as text", other);
            CellValue::text(value)
        }
    }
}
