//! Prize categories, probability tables and selection domains

use serde::{Deserialize, Serialize};

use crate::error::{PfError, PfResult};

/// Ordered cumulative-probability table (one row per prize)
pub type ProbabilityTable = Vec<PrizeSelectionRow>;

/// One probability-weighted group of prizes
///
/// The whole category owns `probability_share` of the unit interval, split
/// evenly among its prizes. `prize_count` always equals `prize_names.len()`
/// once the spec has been built through [`PrizeCategorySpec::with_count`] or
/// [`PrizeCategorySpec::with_names`].
///
/// JSON input may carry `prizeCount`, `prizeNames` or both; the missing one
/// is derived, and both together must agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCategorySpec")]
pub struct PrizeCategorySpec {
    /// Category name (e.g. "5/6*")
    pub category_name: String,
    /// Fraction of [0, 1) allotted to the whole category
    pub probability_share: f64,
    /// Number of prizes in the category
    pub prize_count: u32,
    /// Prize names, one per prize
    pub prize_names: Vec<String>,
}

impl PrizeCategorySpec {
    /// Spec with generated names `"Unnamed <category> - <k>"`
    pub fn with_count(category_name: impl Into<String>, probability_share: f64, prize_count: u32) -> Self {
        let category_name = category_name.into();
        let prize_names = generate_prize_names(prize_count, &category_name);
        Self {
            category_name,
            probability_share,
            prize_count,
            prize_names,
        }
    }

    /// Spec with caller-supplied names; the count is derived.
    ///
    /// A name list longer than `u32::MAX` leaves the count at `u32::MAX`,
    /// which table building rejects as a count mismatch.
    pub fn with_names(category_name: impl Into<String>, probability_share: f64, prize_names: Vec<String>) -> Self {
        Self {
            category_name: category_name.into(),
            probability_share,
            prize_count: u32::try_from(prize_names.len()).unwrap_or(u32::MAX),
            prize_names,
        }
    }

    /// Width of one prize's slot in the table
    pub fn increment(&self) -> f64 {
        if self.prize_count == 0 {
            return 0.0;
        }
        self.probability_share / self.prize_count as f64
    }
}

/// Prize count for a name list, failing when it does not fit in `u32`
pub fn prize_count_for(category_name: &str, name_count: usize) -> PfResult<u32> {
    u32::try_from(name_count).map_err(|_| PfError::TooManyPrizes {
        category: category_name.to_string(),
        count: name_count,
    })
}

/// Wire form of [`PrizeCategorySpec`] with count and names both optional
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategorySpec {
    category_name: String,
    probability_share: f64,
    #[serde(default)]
    prize_count: Option<u32>,
    #[serde(default)]
    prize_names: Option<Vec<String>>,
}

impl TryFrom<RawCategorySpec> for PrizeCategorySpec {
    type Error = PfError;

    fn try_from(raw: RawCategorySpec) -> PfResult<Self> {
        let RawCategorySpec {
            category_name,
            probability_share,
            prize_count,
            prize_names,
        } = raw;

        match (prize_count, prize_names) {
            (None, None) => Err(PfError::MissingPrizes {
                category: category_name,
            }),
            (Some(count), None) => Ok(Self::with_count(category_name, probability_share, count)),
            (declared, Some(names)) => {
                let named = prize_count_for(&category_name, names.len())?;
                if let Some(declared) = declared.filter(|&declared| declared != named) {
                    return Err(PfError::PrizeNameCountMismatch {
                        category: category_name,
                        declared,
                        named: names.len(),
                    });
                }
                Ok(Self::with_names(category_name, probability_share, names))
            }
        }
    }
}

/// Generate placeholder prize names for a category
///
/// Names are 1-based: `"Unnamed Rare - 1"`, `"Unnamed Rare - 2"`, ...
/// A blank category name falls back to `"Unnamed - <k>"`.
pub fn generate_prize_names(count: u32, category_name: &str) -> Vec<String> {
    (1..=count)
        .map(|k| {
            if category_name.trim().is_empty() {
                format!("Unnamed - {}", k)
            } else {
                format!("Unnamed {} - {}", category_name, k)
            }
        })
        .collect()
}

/// One resolved prize's slot in a probability table
///
/// The prize occupies `[lower_bound, previous row's lower_bound)`, with an
/// implicit upper edge of 1.0 above the first row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizeSelectionRow {
    /// 1-based, contiguous across the table
    pub prize_index: usize,
    /// Lower edge of this prize's probability interval
    pub lower_bound: f64,
    pub category_name: String,
    pub prize_name: String,
}

/// One stage of a compound selection operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDomain {
    /// Domain name (used in error messages)
    pub name: String,
    /// Independent draws per invocation
    pub draw_count: u32,
    /// Probability table drawn against
    pub table: ProbabilityTable,
}

impl SelectionDomain {
    /// Create a new selection domain
    pub fn new(name: impl Into<String>, draw_count: u32, table: ProbabilityTable) -> Self {
        Self {
            name: name.into(),
            draw_count,
            table,
        }
    }
}
