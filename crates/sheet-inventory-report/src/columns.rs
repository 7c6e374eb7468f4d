//! Column type classification

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use sheet_inventory_core::{ValueKind, Worksheet};

/// Kinds listed per column when rendering
///
/// When a column holds more kinds than this, which ones are listed is not
/// part of the contract: the set is walked in its own iteration order, which
/// carries no meaning.
pub const MAX_KINDS_SHOWN: usize = 3;

/// Per-column statistics over one row range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub formula_count: usize,
    pub literal_count: usize,
    /// Distinct kinds of the non-empty values seen
    pub kinds: BTreeSet<ValueKind>,
}

impl ColumnProfile {
    /// Number of non-empty cells that went into the profile
    pub fn cell_count(&self) -> usize {
        self.formula_count + self.literal_count
    }

    /// At most [`MAX_KINDS_SHOWN`] kinds, for display
    pub fn shown_kinds(&self) -> impl Iterator<Item = ValueKind> + '_ {
        self.kinds.iter().copied().take(MAX_KINDS_SHOWN)
    }
}

/// Profile every column with at least one non-empty cell in
/// `first_row..=min(last_row, max_row)`
///
/// Cells without a value never create or touch a profile, so columns with
/// only blank records in range are absent from the map.
pub fn classify_columns(
    sheet: &Worksheet,
    first_row: u32,
    last_row: u32,
) -> BTreeMap<u16, ColumnProfile> {
    let last_row = last_row.min(sheet.max_row());
    let mut profiles: BTreeMap<u16, ColumnProfile> = BTreeMap::new();

    for (_, col, cell) in sheet.iter_rows(first_row.max(1), last_row) {
        let Some(kind) = cell.value.kind() else {
            continue;
        };

        let profile = profiles.entry(col).or_default();
        if cell.is_formula() {
            profile.formula_count += 1;
        } else {
            profile.literal_count += 1;
        }
        profile.kinds.insert(kind);
    }

    profiles
}
