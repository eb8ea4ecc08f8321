//! Selection Engine: weighted draws across selection domains
//!
//! A selection operation draws `draw_count` times from every domain's
//! table and tallies the hits into one result table. Domains keep their
//! own local index spaces, so tallies are first kept per domain and then
//! mapped onto the merged prize identities by name.
//!
//! ```text
//! SelectionDomain[] ──plan──> SelectionPlan (merged identities, local→merged slots)
//!                                  │
//!                          draw(rng) per invocation
//!                                  v
//!                            ResultTable
//! ```

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use rand::Rng;

use pf_core::{
    MULTI_CATEGORY, PfError, PfResult, PrizeResultRow, PrizeSelectionRow, ResultTable,
    SelectionDomain,
};

use crate::config::{DEFAULT_MAX_REPETITIONS, LabConfig};
use crate::results::{combine_into, empty_results_summary};
use crate::validator::validate_table;

/// Merged `(prize_name, category_name)` identity of a result row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrizeIdentity {
    pub prize_name: String,
    pub category_name: String,
}

/// Distinct prize identities across all domains, in first-seen order.
///
/// A prize name seen under more than one distinct category collapses to a
/// single identity in [`MULTI_CATEGORY`].
pub fn merge_identities(domains: &[SelectionDomain]) -> Vec<PrizeIdentity> {
    let rows = || domains.iter().flat_map(|d| d.table.iter());

    let mut categories_by_name: HashMap<&str, HashSet<&str>> = HashMap::new();
    for row in rows() {
        categories_by_name
            .entry(row.prize_name.as_str())
            .or_default()
            .insert(row.category_name.as_str());
    }

    let mut seen = HashSet::new();
    let mut identities = Vec::new();
    for row in rows() {
        let multi = categories_by_name
            .get(row.prize_name.as_str())
            .is_some_and(|categories| categories.len() > 1);
        let identity = PrizeIdentity {
            prize_name: row.prize_name.clone(),
            category_name: if multi {
                MULTI_CATEGORY.to_string()
            } else {
                row.category_name.clone()
            },
        };
        if seen.insert(identity.clone()) {
            identities.push(identity);
        }
    }

    identities
}

/// First row whose lower bound is at or below `roll`, scanning top-down.
///
/// `None` when the roll lands in mass left uncovered by an under-summed
/// table.
pub fn select_row(table: &[PrizeSelectionRow], roll: f64) -> Option<&PrizeSelectionRow> {
    table.iter().find(|row| row.lower_bound <= roll)
}

/// Validated domains plus the mapping from each domain's rows to merged rows
#[derive(Debug, Clone)]
pub struct SelectionPlan<'a> {
    domains: &'a [SelectionDomain],
    identities: Vec<PrizeIdentity>,
    /// Per domain: local row position -> merged row position
    slots: Vec<Vec<usize>>,
}

impl<'a> SelectionPlan<'a> {
    fn new(domains: &'a [SelectionDomain]) -> Self {
        let identities = merge_identities(domains);
        let position_by_name: HashMap<&str, usize> = identities
            .iter()
            .enumerate()
            .map(|(position, identity)| (identity.prize_name.as_str(), position))
            .collect();

        let slots = domains
            .iter()
            .map(|domain| {
                domain
                    .table
                    .iter()
                    .map(|row| position_by_name[row.prize_name.as_str()])
                    .collect()
            })
            .collect();

        Self {
            domains,
            identities,
            slots,
        }
    }

    /// Domains covered by this plan
    pub fn domains(&self) -> &'a [SelectionDomain] {
        self.domains
    }

    /// Merged identities in result-table order
    pub fn identities(&self) -> &[PrizeIdentity] {
        &self.identities
    }

    /// Number of rows in every result table this plan produces
    pub fn row_count(&self) -> usize {
        self.identities.len()
    }

    /// Result table with fresh 1-based indices and all counts 0
    pub fn empty_results(&self) -> ResultTable {
        self.identities
            .iter()
            .enumerate()
            .map(|(position, identity)| PrizeResultRow {
                prize_index: position + 1,
                category_name: identity.category_name.clone(),
                prize_name: identity.prize_name.clone(),
                selected_count: 0,
            })
            .collect()
    }

    /// Run one selection operation
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> ResultTable {
        let mut results = self.empty_results();
        self.tally_into(&mut results, rng);
        results
    }

    /// Run one selection operation, adding its hits onto `results`.
    ///
    /// `results` must have this plan's layout (from
    /// [`SelectionPlan::empty_results`] or a previous draw). Counts saturate
    /// at `u32::MAX`.
    pub fn draw_into<R: Rng + ?Sized>(&self, results: &mut [PrizeResultRow], rng: &mut R) -> PfResult<()> {
        if results.len() != self.row_count() {
            return Err(PfError::SchemaMismatch(format!(
                "plan has {} rows but the result table has {}",
                self.row_count(),
                results.len()
            )));
        }
        self.tally_into(results, rng);
        Ok(())
    }

    fn tally_into<R: Rng + ?Sized>(&self, results: &mut [PrizeResultRow], rng: &mut R) {
        for (domain, slots) in self.domains.iter().zip(&self.slots) {
            let mut tally = empty_results_summary(domain.table.len());

            for _ in 0..domain.draw_count {
                if let Some(row) = select_row(&domain.table, rng.random::<f64>()) {
                    tally[row.prize_index - 1] += 1;
                }
            }

            for (position, &count) in tally.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                if let Some(row) = results.get_mut(slots[position]) {
                    row.selected_count = row.selected_count.saturating_add(count);
                }
            }
        }
    }
}

/// Selection engine
///
/// Stateless apart from the repetition ceiling; every call takes the
/// caller's generator so one seed serves a whole top-level operation.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    max_repetitions: u32,
}

impl SelectionEngine {
    /// Engine with the default repetition ceiling
    pub fn new() -> Self {
        Self {
            max_repetitions: DEFAULT_MAX_REPETITIONS,
        }
    }

    /// Engine configured from a [`LabConfig`]
    pub fn from_config(config: &LabConfig) -> Self {
        Self {
            max_repetitions: config.max_repetitions,
        }
    }

    /// Repetition ceiling
    pub fn max_repetitions(&self) -> u32 {
        self.max_repetitions
    }

    /// Validate domains and compute the merged result layout
    pub fn plan<'a>(&self, domains: &'a [SelectionDomain]) -> PfResult<SelectionPlan<'a>> {
        if domains.is_empty() {
            return Err(PfError::NoDomains);
        }

        for domain in domains {
            if domain.draw_count == 0 {
                return Err(PfError::invalid_domain(
                    &domain.name,
                    "draw count must be greater than 0",
                ));
            }
            if let Some(issue) = validate_table(&domain.table).first() {
                return Err(PfError::invalid_domain(
                    &domain.name,
                    format!("probability table is invalid: {}", issue),
                ));
            }
        }

        Ok(SelectionPlan::new(domains))
    }

    /// Reject repetition counts of 0 or above the ceiling
    pub fn check_repetitions(&self, repetitions: u32) -> PfResult<()> {
        if repetitions == 0 || repetitions > self.max_repetitions {
            log::warn!(
                "Rejected repetition count {} (allowed 1..={})",
                repetitions,
                self.max_repetitions
            );
            return Err(PfError::RepetitionsOutOfRange {
                requested: repetitions,
                max: self.max_repetitions,
            });
        }
        Ok(())
    }

    /// Perform one selection operation over all domains
    pub fn select_prizes<R: Rng + ?Sized>(
        &self,
        domains: &[SelectionDomain],
        rng: &mut R,
    ) -> PfResult<ResultTable> {
        let start = Instant::now();
        let plan = self.plan(domains)?;
        let results = plan.draw(rng);
        log::debug!(
            "Finished a selection operation in {} ms",
            start.elapsed().as_millis()
        );
        Ok(results)
    }

    /// Perform `repetitions` selection operations and sum their counts
    pub fn select_prizes_repeated<R: Rng + ?Sized>(
        &self,
        domains: &[SelectionDomain],
        repetitions: u32,
        rng: &mut R,
    ) -> PfResult<ResultTable> {
        self.check_repetitions(repetitions)?;
        let plan = self.plan(domains)?;

        log::debug!("Performing {} selection operations", repetitions);
        let mut combined = plan.draw(rng);
        for _ in 1..repetitions {
            let next = plan.draw(rng);
            combine_into(&mut combined, &next)?;
        }

        Ok(combined)
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}
