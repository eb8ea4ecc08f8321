//! Probability table validation

use std::cmp::Ordering;
use std::fmt;

use pf_core::PrizeSelectionRow;

/// One well-formedness violation found in a probability table
#[derive(Debug, Clone, PartialEq)]
pub enum TableIssue {
    /// Index is not the expected next value in 1, 2, 3, ...
    IndexGap { position: usize, expected: usize, found: usize },
    /// Lower bound outside [0, 1)
    BoundOutOfRange { prize_index: usize, lower_bound: f64 },
    /// Lower bound not strictly below the row above it (or 1.0 for the first row)
    NotDecreasing { prize_index: usize, lower_bound: f64, previous: f64 },
}

impl fmt::Display for TableIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableIssue::IndexGap { position, expected, found } => write!(
                f,
                "row {} has prize index {}, expected {}",
                position, found, expected
            ),
            TableIssue::BoundOutOfRange { prize_index, lower_bound } => write!(
                f,
                "prize {} lower bound {} is outside [0, 1)",
                prize_index, lower_bound
            ),
            TableIssue::NotDecreasing { prize_index, lower_bound, previous } => write!(
                f,
                "prize {} lower bound {} is not below {}",
                prize_index, lower_bound, previous
            ),
        }
    }
}

/// Collect every violation, scanning top to bottom without stopping early
pub fn validate_table(table: &[PrizeSelectionRow]) -> Vec<TableIssue> {
    let mut issues = Vec::new();
    let mut previous = 1.0;

    for (position, row) in table.iter().enumerate() {
        let expected = position + 1;
        if row.prize_index != expected {
            issues.push(TableIssue::IndexGap {
                position: expected,
                expected,
                found: row.prize_index,
            });
        }

        // NaN fails both checks
        if !(0.0..1.0).contains(&row.lower_bound) {
            issues.push(TableIssue::BoundOutOfRange {
                prize_index: row.prize_index,
                lower_bound: row.lower_bound,
            });
        }

        if row.lower_bound.partial_cmp(&previous) != Some(Ordering::Less) {
            issues.push(TableIssue::NotDecreasing {
                prize_index: row.prize_index,
                lower_bound: row.lower_bound,
                previous,
            });
        }

        previous = row.lower_bound;
    }

    issues
}

/// Check that a table is well-formed: contiguous 1-based indices, bounds in
/// [0, 1), strictly decreasing bounds
pub fn is_valid(table: &[PrizeSelectionRow]) -> bool {
    validate_table(table).is_empty()
}
