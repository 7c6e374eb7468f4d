//! Shared formula expansion
//!
//! A shared formula is stored once on its master cell (`<f t="shared" si="0"
//! ref="C2:C9">B2*2</f>`); dependent cells only carry `<f t="shared" si="0"/>`.
//! Each dependent gets the master text with its relative references moved by
//! the distance between the two cells.

use lazy_regex::regex;
use sheet_inventory_core::CellAddress;

/// Master of one shared formula group
#[derive(Debug, Clone)]
pub(crate) struct SharedFormula {
    pub row: u32,
    pub col: u16,
    pub text: String,
}

impl SharedFormula {
    /// Formula text for the dependent cell at `(row, col)`
    pub(crate) fn text_at(&self, row: u32, col: u16) -> String {
        let rows = row as i64 - self.row as i64;
        let cols = col as i64 - self.col as i64;
        if rows == 0 && cols == 0 {
            return self.text.clone();
        }
        shift_references(&self.text, rows, cols)
    }
}

/// Move every relative A1 reference in `formula` by `(rows, cols)`
///
/// Text inside string literals is left alone, as are function names that look
/// like references (`LOG10(`). A reference pushed off the sheet becomes
/// `#REF!`.
pub(crate) fn shift_references(formula: &str, rows: i64, cols: i64) -> String {
    let mut out = String::with_capacity(formula.len());

    // Split on '"': odd segments are inside string literals ("" escapes
    // produce an empty literal segment and keep the parity right)
    for (i, segment) in formula.split('"').enumerate() {
        if i > 0 {
            out.push('"');
        }
        if i % 2 == 1 {
            out.push_str(segment);
        } else {
            shift_segment(segment, rows, cols, &mut out);
        }
    }

    out
}

fn shift_segment(segment: &str, rows: i64, cols: i64, out: &mut String) {
    let pattern = regex!(r"\$?[A-Z]{1,3}\$?[0-9]+");
    let bytes = segment.as_bytes();
    let mut last = 0;

    for m in pattern.find_iter(segment) {
        let before = m.start().checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(m.end()).copied();

        let glued_before = before.map_or(false, |b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.');
        let glued_after = after.map_or(false, |b| b.is_ascii_alphanumeric() || b == b'_' || b == b'(');
        if glued_before || glued_after {
            continue;
        }

        let Ok(addr) = CellAddress::parse(m.as_str()) else {
            continue;
        };

        out.push_str(&segment[last..m.start()]);
        match addr.offset(rows, cols) {
            Some(moved) => out.push_str(&moved.to_a1_string()),
            None => {
                log::warn!("Shared formula reference {} moved off the sheet", m.as_str());
                out.push_str("#REF!");
            }
        }
        last = m.end();
    }

    out.push_str(&segment[last..]);
}
