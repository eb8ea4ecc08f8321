//! Test data generators for benchmarks

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use pf_core::{PrizeCategorySpec, SelectionDomain, SuccessCriteria};
use pf_lab::build_selection_table;

/// Generate reproducible category specs whose shares sum to 1
pub fn generate_specs(categories: usize, prizes_per_category: u32, seed: u64) -> Vec<PrizeCategorySpec> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let weights: Vec<f64> = (0..categories).map(|_| rng.random::<f64>() + 0.1).collect();
    let total: f64 = weights.iter().sum();

    weights
        .iter()
        .enumerate()
        .map(|(i, weight)| {
            PrizeCategorySpec::with_count(format!("Cat{}", i), weight / total, prizes_per_category)
        })
        .collect()
}

/// Generate domains that share prize names, `draw_count` draws each
pub fn generate_domains(
    domain_count: usize,
    categories: usize,
    prizes_per_category: u32,
    draw_count: u32,
    seed: u64,
) -> Vec<SelectionDomain> {
    (0..domain_count)
        .filter_map(|i| {
            let specs = generate_specs(categories, prizes_per_category, seed + i as u64);
            build_selection_table(&specs)
                .ok()
                .map(|table| SelectionDomain::new(format!("Domain {}", i), draw_count, table))
        })
        .collect()
}

/// Criteria requiring one each of the first `required` prizes
pub fn first_prizes_criteria(rows: usize, required: usize) -> SuccessCriteria {
    (1..=rows)
        .map(|index| (index, u32::from(index <= required)))
        .collect()
}

/// Category counts for table benchmarks (prizes = categories × 8)
pub const CATEGORY_COUNTS: &[usize] = &[2, 8, 32, 128];
