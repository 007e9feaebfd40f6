// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Ordering and filtering of loaded records. Inputs are never modified.

use crate::model::TheoremRecord;

/// Records ordered by wikidata identifier, compared as strings.
/// The sort is stable: records sharing an identifier keep their input order.
pub fn sort_records(records: &[TheoremRecord]) -> Vec<&TheoremRecord> {
    let mut sorted: Vec<&TheoremRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.wikidata.cmp(&b.wikidata));
    sorted
}

/// Records with at least one formalization entry, order preserved.
pub fn filter_has_formalization<'a>(records: &[&'a TheoremRecord]) -> Vec<&'a TheoremRecord> {
    records
        .iter()
        .copied()
        .filter(|record| record.has_formalization())
        .collect()
}
