//! Success Evaluator: Monte Carlo estimation over repeated selections
//!
//! Every estimate runs [`SUCCESS_TRIALS`] independent trials. A trial
//! repeats selection operations, adding each one into a running result
//! table, and checks the success rule after every repetition:
//!
//! - **Fixed repetitions**: success if the rule is met within
//!   `repetitions`; the estimate is `successes / trials`.
//! - **Until success**: repeat until the rule is met and record how many
//!   repetitions it took; the trials are summarized as [`SuccessInfo`].
//!
//! The rule is either "every positive requirement met" or "at least `k`
//! of the positive requirements met".

use rand::Rng;

use pf_core::{PfError, PfResult, PrizeResultRow, SelectionDomain, SuccessCriteria, SuccessInfo};

use crate::engine::{SelectionEngine, SelectionPlan};
use crate::results::combine_into;
use crate::stats;

/// Trials per estimate; fixed to bound the cost of a single request
pub const SUCCESS_TRIALS: u32 = 10_000;

/// When a result table counts as a success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessRule {
    /// Every prize with a positive requirement reaches it
    All,
    /// At least this many of the positive requirements are reached
    AtLeast(usize),
}

impl SuccessRule {
    /// Check preconditions on the criteria for this rule
    pub fn validate(&self, criteria: &SuccessCriteria) -> PfResult<()> {
        if let SuccessRule::AtLeast(subset_size) = *self {
            let required = criteria.nonzero_count();
            if subset_size >= required {
                return Err(PfError::SubsetTooLarge {
                    subset_size,
                    required,
                });
            }
        }
        Ok(())
    }

    /// Evaluate the rule; the criteria must already match the table's shape
    fn is_met(&self, table: &[PrizeResultRow], criteria: &SuccessCriteria) -> bool {
        let mut met = 0;
        for (prize_index, required) in criteria.iter().filter(|&(_, r)| r > 0) {
            let reached = table
                .get(prize_index - 1)
                .is_some_and(|row| row.selected_count >= required);
            if reached {
                met += 1;
            } else if *self == SuccessRule::All {
                return false;
            }
        }

        match *self {
            SuccessRule::All => true,
            SuccessRule::AtLeast(subset_size) => met >= subset_size,
        }
    }

    /// Check a result table against the criteria under this rule
    pub fn check(&self, table: &[PrizeResultRow], criteria: &SuccessCriteria) -> PfResult<bool> {
        check_shape(table.len(), criteria)?;
        self.validate(criteria)?;
        Ok(self.is_met(table, criteria))
    }
}

/// Criteria must hold exactly the indices 1..=table_len
fn check_shape(table_len: usize, criteria: &SuccessCriteria) -> PfResult<()> {
    if criteria.len() != table_len {
        return Err(PfError::CriteriaSizeMismatch {
            criteria: criteria.len(),
            table: table_len,
        });
    }
    if let Some(missing) = (1..=table_len).find(|&index| criteria.required(index).is_none()) {
        return Err(PfError::MissingCriteriaIndex(missing));
    }
    Ok(())
}

/// Every positive requirement in `criteria` is met by `table`
pub fn meets_criteria(table: &[PrizeResultRow], criteria: &SuccessCriteria) -> PfResult<bool> {
    SuccessRule::All.check(table, criteria)
}

/// At least `subset_size` of the positive requirements are met by `table`
pub fn meets_criteria_subset(
    table: &[PrizeResultRow],
    criteria: &SuccessCriteria,
    subset_size: usize,
) -> PfResult<bool> {
    SuccessRule::AtLeast(subset_size).check(table, criteria)
}

/// Monte Carlo success estimator
#[derive(Debug, Clone)]
pub struct SuccessEvaluator {
    engine: SelectionEngine,
    trials: u32,
}

impl SuccessEvaluator {
    /// Create an evaluator on top of a selection engine
    pub fn new(engine: SelectionEngine) -> Self {
        Self {
            engine,
            trials: SUCCESS_TRIALS,
        }
    }

    /// Trials per estimate
    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Underlying engine
    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    /// Chance that all criteria are met within `repetitions` selections
    pub fn chance_of_success<R: Rng + ?Sized>(
        &self,
        criteria: &SuccessCriteria,
        domains: &[SelectionDomain],
        repetitions: u32,
        rng: &mut R,
    ) -> PfResult<f64> {
        self.chance_with_rule(SuccessRule::All, criteria, domains, repetitions, rng)
    }

    /// Chance that at least `subset_size` criteria are met within
    /// `repetitions` selections
    pub fn chance_of_success_subset<R: Rng + ?Sized>(
        &self,
        criteria: &SuccessCriteria,
        domains: &[SelectionDomain],
        repetitions: u32,
        subset_size: usize,
        rng: &mut R,
    ) -> PfResult<f64> {
        self.chance_with_rule(
            SuccessRule::AtLeast(subset_size),
            criteria,
            domains,
            repetitions,
            rng,
        )
    }

    /// Distribution of selections needed until all criteria are met
    pub fn repetitions_until_success<R: Rng + ?Sized>(
        &self,
        criteria: &SuccessCriteria,
        domains: &[SelectionDomain],
        rng: &mut R,
    ) -> PfResult<SuccessInfo> {
        self.until_success_with_rule(SuccessRule::All, criteria, domains, rng)
    }

    /// Distribution of selections needed until at least `subset_size`
    /// criteria are met
    pub fn repetitions_until_success_subset<R: Rng + ?Sized>(
        &self,
        criteria: &SuccessCriteria,
        domains: &[SelectionDomain],
        subset_size: usize,
        rng: &mut R,
    ) -> PfResult<SuccessInfo> {
        self.until_success_with_rule(SuccessRule::AtLeast(subset_size), criteria, domains, rng)
    }

    /// Fixed-repetition estimate under any rule
    pub fn chance_with_rule<R: Rng + ?Sized>(
        &self,
        rule: SuccessRule,
        criteria: &SuccessCriteria,
        domains: &[SelectionDomain],
        repetitions: u32,
        rng: &mut R,
    ) -> PfResult<f64> {
        self.engine.check_repetitions(repetitions)?;
        let plan = self.prepare(rule, criteria, domains)?;
        let mut trial = TrialTables::new(&plan);
        let mut successes = 0u32;

        for _ in 0..self.trials {
            trial.reset();
            for _ in 0..repetitions {
                trial.add_selection(&plan, rng)?;
                if rule.is_met(&trial.combined, criteria) {
                    successes += 1;
                    break;
                }
            }
        }

        let chance = successes as f64 / self.trials as f64;
        log::info!(
            "Success chance {:.4} ({:?}, {} repetitions, {} trials)",
            chance,
            rule,
            repetitions,
            self.trials
        );
        Ok(chance)
    }

    /// Until-success distribution under any rule.
    ///
    /// Attempts per trial are unbounded; the criteria have to be reachable.
    pub fn until_success_with_rule<R: Rng + ?Sized>(
        &self,
        rule: SuccessRule,
        criteria: &SuccessCriteria,
        domains: &[SelectionDomain],
        rng: &mut R,
    ) -> PfResult<SuccessInfo> {
        let plan = self.prepare(rule, criteria, domains)?;
        let mut trial = TrialTables::new(&plan);
        let mut attempts_per_trial = Vec::with_capacity(self.trials as usize);

        for _ in 0..self.trials {
            trial.reset();
            let mut attempts = 0u32;
            loop {
                attempts += 1;
                trial.add_selection(&plan, rng)?;
                if rule.is_met(&trial.combined, criteria) {
                    break;
                }
            }
            attempts_per_trial.push(attempts);
        }

        let info = stats::summarize(&attempts_per_trial).unwrap_or_default();
        log::info!(
            "Selections until success ({:?}): mean {:.2}, median {}, range {}..={}",
            rule,
            info.mean_pulls_required,
            info.median_pulls_required,
            info.min_pulls_required,
            info.max_pulls_required
        );
        Ok(info)
    }

    fn prepare<'a>(
        &self,
        rule: SuccessRule,
        criteria: &SuccessCriteria,
        domains: &'a [SelectionDomain],
    ) -> PfResult<SelectionPlan<'a>> {
        let plan = self.engine.plan(domains)?;
        check_shape(plan.row_count(), criteria)?;
        rule.validate(criteria)?;
        Ok(plan)
    }
}

impl Default for SuccessEvaluator {
    fn default() -> Self {
        Self::new(SelectionEngine::new())
    }
}

/// Running total for one trial plus a scratch table for each selection
struct TrialTables {
    combined: Vec<PrizeResultRow>,
    scratch: Vec<PrizeResultRow>,
}

impl TrialTables {
    fn new(plan: &SelectionPlan<'_>) -> Self {
        Self {
            combined: plan.empty_results(),
            scratch: plan.empty_results(),
        }
    }

    fn reset(&mut self) {
        clear_counts(&mut self.combined);
    }

    fn add_selection<R: Rng + ?Sized>(&mut self, plan: &SelectionPlan<'_>, rng: &mut R) -> PfResult<()> {
        clear_counts(&mut self.scratch);
        plan.draw_into(&mut self.scratch, rng)?;
        combine_into(&mut self.combined, &self.scratch)
    }
}

fn clear_counts(table: &mut [PrizeResultRow]) {
    for row in table.iter_mut() {
        row.selected_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build_selection_table;
    use approx::assert_relative_eq;
    use pf_core::PrizeCategorySpec;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn result_row(index: usize, count: u32) -> PrizeResultRow {
        PrizeResultRow {
            prize_index: index,
            category_name: "Cat".into(),
            prize_name: format!("Prize {}", index),
            selected_count: count,
        }
    }

    fn domain(draws: u32, specs: Vec<PrizeCategorySpec>) -> Vec<SelectionDomain> {
        vec![SelectionDomain::new(
            "Domain",
            draws,
            build_selection_table(&specs).unwrap(),
        )]
    }

    fn sure_thing(draws: u32) -> Vec<SelectionDomain> {
        domain(draws, vec![PrizeCategorySpec::with_names("Only", 1.0, vec!["Prize".into()])])
    }

    /// One single-prize domain per name: every selection yields one of each
    fn one_of_each(names: &[&str]) -> Vec<SelectionDomain> {
        names
            .iter()
            .map(|&name| {
                let spec = PrizeCategorySpec::with_names("Fixed", 1.0, vec![name.to_string()]);
                SelectionDomain::new(name, 1, build_selection_table(&[spec]).unwrap())
            })
            .collect()
    }

    fn coin(draws: u32) -> Vec<SelectionDomain> {
        domain(
            draws,
            vec![PrizeCategorySpec::with_names(
                "Coin",
                1.0,
                vec!["Heads".into(), "Tails".into()],
            )],
        )
    }

    #[test]
    fn test_meets_criteria() {
        let table = vec![result_row(1, 2), result_row(2, 0), result_row(3, 1)];
        let criteria = SuccessCriteria::zeroed(3).with(1, 2).with(3, 1);
        assert!(meets_criteria(&table, &criteria).unwrap());

        let criteria = criteria.with(2, 1);
        assert!(!meets_criteria(&table, &criteria).unwrap());
    }

    #[test]
    fn test_meets_criteria_size_mismatch() {
        let table = vec![result_row(1, 2)];
        let criteria = SuccessCriteria::zeroed(2);
        assert!(matches!(
            meets_criteria(&table, &criteria),
            Err(PfError::CriteriaSizeMismatch { criteria: 2, table: 1 })
        ));
    }

    #[test]
    fn test_meets_criteria_missing_index() {
        let table = vec![result_row(1, 2), result_row(2, 2)];
        let criteria: SuccessCriteria = [(1, 1), (3, 1)].into_iter().collect();
        assert!(matches!(
            meets_criteria(&table, &criteria),
            Err(PfError::MissingCriteriaIndex(2))
        ));
    }

    #[test]
    fn test_meets_criteria_subset() {
        let table = vec![result_row(1, 1), result_row(2, 0), result_row(3, 1)];
        let criteria = SuccessCriteria::zeroed(3).with(1, 1).with(2, 1).with(3, 1);

        assert!(meets_criteria_subset(&table, &criteria, 2).unwrap());
        assert!(!meets_criteria(&table, &criteria).unwrap());
        assert!(matches!(
            meets_criteria_subset(&table, &criteria, 3),
            Err(PfError::SubsetTooLarge { subset_size: 3, required: 3 })
        ));
    }

    #[test]
    fn test_all_zero_criteria_always_succeed() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let criteria = SuccessCriteria::zeroed(2);

        let chance = evaluator.chance_of_success(&criteria, &coin(1), 1, &mut rng).unwrap();
        assert_eq!(chance, 1.0);

        let info = evaluator
            .repetitions_until_success(&criteria, &coin(1), &mut rng)
            .unwrap();
        assert_eq!(info.max_pulls_required, 1);
    }

    #[test]
    fn test_guaranteed_prize_is_exact() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let criteria = SuccessCriteria::zeroed(1).with(1, 3);

        let enough = evaluator
            .chance_of_success(&criteria, &sure_thing(1), 3, &mut rng)
            .unwrap();
        let too_few = evaluator
            .chance_of_success(&criteria, &sure_thing(1), 2, &mut rng)
            .unwrap();
        assert_eq!(enough, 1.0);
        assert_eq!(too_few, 0.0);

        let info = evaluator
            .repetitions_until_success(&criteria, &sure_thing(1), &mut rng)
            .unwrap();
        assert_eq!(info.trials_conducted, SUCCESS_TRIALS);
        assert_eq!(info.min_pulls_required, 3);
        assert_eq!(info.max_pulls_required, 3);
        assert_eq!(info.mode_pulls_required, 3);
        assert_relative_eq!(info.mean_pulls_required, 3.0);
    }

    #[test]
    fn test_coin_flip_chances() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let criteria = SuccessCriteria::zeroed(2).with(1, 1);

        let one = evaluator.chance_of_success(&criteria, &coin(1), 1, &mut rng).unwrap();
        let two = evaluator.chance_of_success(&criteria, &coin(1), 2, &mut rng).unwrap();
        assert!((one - 0.5).abs() < 0.03, "one flip: {}", one);
        assert!((two - 0.75).abs() < 0.03, "two flips: {}", two);
    }

    #[test]
    fn test_coin_flip_until_heads() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let criteria = SuccessCriteria::zeroed(2).with(1, 1);

        let info = evaluator
            .repetitions_until_success(&criteria, &coin(1), &mut rng)
            .unwrap();
        assert_eq!(info.min_pulls_required, 1);
        assert_eq!(info.mode_pulls_required, 1);
        assert!((info.mean_pulls_required - 2.0).abs() < 0.1);
        assert!(info.max_pulls_required > 5);
    }

    #[test]
    fn test_subset_chance_between_extremes() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let domains = domain(1, vec![PrizeCategorySpec::with_count("Tri", 1.0, 3)]);
        let criteria = SuccessCriteria::zeroed(3).with(1, 1).with(2, 1).with(3, 1);

        let all = evaluator.chance_of_success(&criteria, &domains, 3, &mut rng).unwrap();
        let any_two = evaluator
            .chance_of_success_subset(&criteria, &domains, 3, 2, &mut rng)
            .unwrap();
        // all three in three draws: 6/27
        assert!((all - 6.0 / 27.0).abs() < 0.03, "all: {}", all);
        assert!(any_two > all);
        assert!((0.0..=1.0).contains(&any_two));
    }

    #[test]
    fn test_subset_precondition_checked_up_front() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let criteria = SuccessCriteria::zeroed(2).with(1, 1).with(2, 1);

        assert!(matches!(
            evaluator.chance_of_success_subset(&criteria, &coin(1), 2, 2, &mut rng),
            Err(PfError::SubsetTooLarge { .. })
        ));
        assert!(matches!(
            evaluator.repetitions_until_success_subset(&criteria, &coin(1), 5, &mut rng),
            Err(PfError::SubsetTooLarge { .. })
        ));
    }

    #[test]
    fn test_criteria_must_match_merged_table() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let criteria = SuccessCriteria::zeroed(3).with(1, 1);

        assert!(matches!(
            evaluator.chance_of_success(&criteria, &coin(1), 1, &mut rng),
            Err(PfError::CriteriaSizeMismatch { criteria: 3, table: 2 })
        ));
    }

    #[test]
    fn test_repetitions_range() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let criteria = SuccessCriteria::zeroed(2).with(1, 1);

        assert!(evaluator.chance_of_success(&criteria, &coin(1), 0, &mut rng).is_err());
        assert!(evaluator.chance_of_success(&criteria, &coin(1), 101, &mut rng).is_err());
    }

    #[test]
    fn test_subset_until_success_is_exact_when_forced() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(18);
        let domains = one_of_each(&["A", "B", "C"]);
        let criteria = SuccessCriteria::zeroed(3).with(1, 2).with(2, 2).with(3, 5);

        let two_of_three = evaluator
            .repetitions_until_success_subset(&criteria, &domains, 2, &mut rng)
            .unwrap();
        assert_eq!(two_of_three.trials_conducted, SUCCESS_TRIALS);
        assert_eq!(two_of_three.min_pulls_required, 2);
        assert_eq!(two_of_three.max_pulls_required, 2);
        assert_eq!(two_of_three.mode_pulls_required, 2);

        let all = evaluator
            .repetitions_until_success(&criteria, &domains, &mut rng)
            .unwrap();
        assert_eq!(all.min_pulls_required, 5);
        assert_eq!(all.max_pulls_required, 5);
    }

    #[test]
    fn test_subset_until_success_beats_full_criteria() {
        let evaluator = SuccessEvaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        let domains = domain(1, vec![PrizeCategorySpec::with_count("Tri", 1.0, 3)]);
        let criteria = SuccessCriteria::zeroed(3).with(1, 1).with(2, 1).with(3, 1);

        let any_two = evaluator
            .repetitions_until_success_subset(&criteria, &domains, 2, &mut rng)
            .unwrap();
        let all = evaluator
            .repetitions_until_success(&criteria, &domains, &mut rng)
            .unwrap();

        assert_eq!(any_two.trials_conducted, SUCCESS_TRIALS);
        // one draw per selection: two distinct prizes need at least two
        assert_eq!(any_two.min_pulls_required, 2);
        assert_eq!(all.min_pulls_required, 3);
        assert!(any_two.mean_pulls_required < all.mean_pulls_required);
        // expected 1 + 3/2 = 2.5 selections for two distinct of three
        assert!((any_two.mean_pulls_required - 2.5).abs() < 0.1);
    }
}
