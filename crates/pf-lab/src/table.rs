//! Category table builder
//!
//! Turns prize category specs into a flat cumulative-probability table.
//! Rows are laid out top-down from 1.0: the first prize of the first
//! category owns the highest sub-range, and each category consumes a
//! contiguous slice of width `probability_share` split into equal
//! increments.

use pf_core::{
    PfError, PfResult, PrizeCategorySpec, PrizeSelectionRow, ProbabilityTable, prize_count_for,
};

/// Final lower bounds closer to zero than this are snapped to exactly 0
pub const ZERO_SNAP_EPSILON: f64 = 1e-10;

/// How a category's prizes are supplied
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryPrizes {
    /// Only a count; names are generated
    Count(u32),
    /// Explicit names; the count is derived
    Names(Vec<String>),
}

impl From<u32> for CategoryPrizes {
    fn from(count: u32) -> Self {
        CategoryPrizes::Count(count)
    }
}

impl From<Vec<String>> for CategoryPrizes {
    fn from(names: Vec<String>) -> Self {
        CategoryPrizes::Names(names)
    }
}

/// Build one category spec, generating names when only a count is given
pub fn create_category_spec(
    category_name: &str,
    probability_share: f64,
    prizes: impl Into<CategoryPrizes>,
) -> PfResult<PrizeCategorySpec> {
    if category_name.trim().is_empty() {
        return Err(PfError::BlankCategoryName);
    }

    match prizes.into() {
        CategoryPrizes::Count(0) => Err(PfError::InvalidPrizeCount {
            category: category_name.to_string(),
        }),
        CategoryPrizes::Count(count) => Ok(PrizeCategorySpec::with_count(
            category_name,
            probability_share,
            count,
        )),
        CategoryPrizes::Names(names) if names.is_empty() => {
            Err(PfError::EmptyPrizeNames(category_name.to_string()))
        }
        CategoryPrizes::Names(names) => {
            prize_count_for(category_name, names.len())?;
            Ok(PrizeCategorySpec::with_names(
                category_name,
                probability_share,
                names,
            ))
        }
    }
}

fn check_spec(spec: &PrizeCategorySpec) -> PfResult<()> {
    if !(0.0..=1.0).contains(&spec.probability_share) {
        return Err(PfError::ShareOutOfRange {
            category: spec.category_name.clone(),
            share: spec.probability_share,
        });
    }
    if spec.prize_count == 0 {
        return Err(PfError::InvalidPrizeCount {
            category: spec.category_name.clone(),
        });
    }
    if spec.prize_names.len() != spec.prize_count as usize {
        return Err(PfError::PrizeNameCountMismatch {
            category: spec.category_name.clone(),
            declared: spec.prize_count,
            named: spec.prize_names.len(),
        });
    }
    Ok(())
}

/// Build the cumulative probability table for a list of categories.
///
/// Shares are not required to sum to 1.0; mass left below the final row
/// selects nothing when drawn.
pub fn build_selection_table(specs: &[PrizeCategorySpec]) -> PfResult<ProbabilityTable> {
    if specs.is_empty() {
        return Err(PfError::EmptySpecs);
    }
    for spec in specs {
        check_spec(spec)?;
    }

    let total_rows: usize = specs.iter().map(|s| s.prize_count as usize).sum();
    let mut table = Vec::with_capacity(total_rows);
    let mut current_lower_bound = 1.0;
    let mut max_index = 0;

    for spec in specs {
        let increment = spec.increment();

        for (k, prize_name) in spec.prize_names.iter().enumerate() {
            table.push(PrizeSelectionRow {
                prize_index: max_index + k + 1,
                lower_bound: current_lower_bound - increment * (k + 1) as f64,
                category_name: spec.category_name.clone(),
                prize_name: prize_name.clone(),
            });
        }

        if let Some(last) = table.last() {
            current_lower_bound = last.lower_bound;
            max_index = last.prize_index;
        }
    }

    if let Some(last) = table.last_mut() {
        if last.lower_bound.abs() < ZERO_SNAP_EPSILON {
            last.lower_bound = 0.0;
        }
    }

    Ok(table)
}
