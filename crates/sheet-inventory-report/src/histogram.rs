//! Value-kind histogram

use serde::Serialize;
use sheet_inventory_core::{ValueKind, Worksheet};

/// Occurrences of one value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: ValueKind,
    pub count: usize,
}

/// Count non-empty cells per value kind in `first_row..=min(last_row, max_row)`
///
/// Sorted by count, highest first; equal counts keep the kinds' declaration
/// order. Kinds that never occur are left out.
pub fn kind_histogram(sheet: &Worksheet, first_row: u32, last_row: u32) -> Vec<KindCount> {
    let last_row = last_row.min(sheet.max_row());
    let mut counts = [0usize; ValueKind::ALL.len()];

    for (_, _, cell) in sheet.iter_rows(first_row.max(1), last_row) {
        if let Some(kind) = cell.value.kind() {
            counts[kind as usize] += 1;
        }
    }

    let mut histogram: Vec<KindCount> = ValueKind::ALL
        .into_iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(kind, count)| KindCount { kind, count })
        .collect();
    // Stable: ties stay in declaration order
    histogram.sort_by(|a, b| b.count.cmp(&a.count));
    histogram
}
