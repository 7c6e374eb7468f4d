//! Cell references used by formulas
//!
//! Matching is lexical: `A1:B5` yields its two endpoints, and text inside
//! string literals that happens to look like a reference is reported too.

use std::collections::BTreeSet;

use lazy_regex::regex;

/// Every substring of `formula` that looks like an A1 reference
pub fn extract_references(formula: &str) -> BTreeSet<String> {
    regex!(r"\$?[A-Z]+\$?\d+")
        .find_iter(formula)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Union of the references of `formulas`, in order
///
/// Each formula is added whole; collection stops as soon as the set holds
/// more than `bound` references.
pub fn collect_references<'a, I>(formulas: I, bound: usize) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut references = BTreeSet::new();
    for formula in formulas {
        references.extend(extract_references(formula));
        if references.len() > bound {
            tracing::debug!(count = references.len(), bound, "Reference collection stopped");
            break;
        }
    }
    references
}
