//! Line diff engine.

use crate::diff::model::{DiffEntry, DiffKind};

/// Compare expected and actual output line by line.
///
/// Returns one entry per index where the lines differ, in index order. The
/// result is empty iff the two sequences are equal.
pub fn compute_line_diff(expected: &[String], actual: &[String]) -> Vec<DiffEntry> {
    let len = expected.len().max(actual.len());
    (0..len)
        .filter_map(|i| {
            let exp = expected.get(i);
            let act = actual.get(i);
            let kind = match (exp, act) {
                (Some(e), Some(a)) if e == a => return None,
                (Some(_), Some(_)) => DiffKind::Mismatch,
                (Some(_), None) => DiffKind::MissingLine,
                (None, Some(_)) => DiffKind::UnexpectedLine,
                (None, None) => return None,
            };
            Some(DiffEntry {
                line_index: i,
                kind,
                expected: exp.cloned(),
                actual: act.cloned(),
            })
        })
        .collect()
}
