//! Result tables, success criteria and Monte Carlo summaries

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered result table (one row per distinct prize identity)
pub type ResultTable = Vec<PrizeResultRow>;

/// Category assigned to a prize name seen under several categories
pub const MULTI_CATEGORY: &str = "Multi-Category";

/// How many times a prize was drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizeResultRow {
    /// 1-based, assigned fresh per result table
    pub prize_index: usize,
    pub category_name: String,
    pub prize_name: String,
    pub selected_count: u32,
}

impl PrizeResultRow {
    /// Same `(prize_index, category_name, prize_name)` identity
    pub fn same_identity(&self, other: &PrizeResultRow) -> bool {
        self.prize_index == other.prize_index
            && self.category_name == other.category_name
            && self.prize_name == other.prize_name
    }
}

impl fmt::Display for PrizeResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8}{:<8}{:<15}{:<50}",
            self.prize_index, self.selected_count, self.category_name, self.prize_name
        )
    }
}

/// Render a result table as fixed-width text
pub fn format_result_table(table: &[PrizeResultRow]) -> String {
    let mut out = format!("{:<8}{:<8}{:<15}{:<50}\n", "Index", "Count", "Category", "Prize");
    for row in table {
        out.push_str(row.to_string().trim_end());
        out.push('\n');
    }
    out
}

/// Required minimum selection count per 1-based result-table index
///
/// A requirement of 0 means "don't care". Serialized as a plain JSON object
/// keyed by index, e.g. `{"1": 1, "2": 1, "3": 0}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuccessCriteria(BTreeMap<usize, u32>);

impl SuccessCriteria {
    /// Empty criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria for `len` prizes, all requirements 0
    pub fn zeroed(len: usize) -> Self {
        Self((1..=len).map(|index| (index, 0)).collect())
    }

    /// Set the requirement for one prize index
    pub fn require(&mut self, prize_index: usize, count: u32) -> &mut Self {
        self.0.insert(prize_index, count);
        self
    }

    /// Builder form of [`SuccessCriteria::require`]
    pub fn with(mut self, prize_index: usize, count: u32) -> Self {
        self.require(prize_index, count);
        self
    }

    /// Requirement for a prize index, if present
    pub fn required(&self, prize_index: usize) -> Option<u32> {
        self.0.get(&prize_index).copied()
    }

    /// Number of entries (including zero requirements)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of prizes with a positive requirement
    pub fn nonzero_count(&self) -> usize {
        self.0.values().filter(|&&count| count > 0).count()
    }

    /// Iterate `(prize_index, required_count)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0.iter().map(|(&index, &count)| (index, count))
    }
}

impl FromIterator<(usize, u32)> for SuccessCriteria {
    fn from_iter<I: IntoIterator<Item = (usize, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Summary of attempts-until-success across Monte Carlo trials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessInfo {
    pub trials_conducted: u32,
    pub min_pulls_required: u32,
    pub max_pulls_required: u32,
    pub median_pulls_required: f64,
    pub mode_pulls_required: u32,
    pub mean_pulls_required: f64,
}

impl fmt::Display for SuccessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TrialsConducted: {}", self.trials_conducted)?;
        writeln!(f, "MinPullsRequired: {}", self.min_pulls_required)?;
        writeln!(f, "MaxPullsRequired: {}", self.max_pulls_required)?;
        writeln!(f, "MedianPullsRequired: {}", self.median_pulls_required)?;
        writeln!(f, "ModePullsRequired: {}", self.mode_pulls_required)?;
        writeln!(f, "MeanPullsRequired: {}", self.mean_pulls_required)
    }
}
