//! Result table helpers

use pf_core::{PfError, PfResult, PrizeResultRow, ResultTable};

/// Zero tally for local prize indices 1..=n (slot 0 is index 1)
pub fn empty_results_summary(prize_row_count: usize) -> Vec<u32> {
    vec![0; prize_row_count]
}

fn check_same_schema(a: &[PrizeResultRow], b: &[PrizeResultRow]) -> PfResult<()> {
    if a.len() != b.len() {
        return Err(PfError::SchemaMismatch(format!(
            "tables have {} and {} rows",
            a.len(),
            b.len()
        )));
    }

    if let Some((left, right)) = a.iter().zip(b).find(|(l, r)| !l.same_identity(r)) {
        return Err(PfError::SchemaMismatch(format!(
            "row {} is ({}, {}, {}) in one table and ({}, {}, {}) in the other",
            left.prize_index,
            left.prize_index,
            left.category_name,
            left.prize_name,
            right.prize_index,
            right.category_name,
            right.prize_name
        )));
    }

    Ok(())
}

/// Add `other`'s counts into `acc`, row by row.
///
/// Fails without touching `acc` unless both tables have the same length and
/// the same `(prize_index, category_name, prize_name)` at every position.
/// Counts saturate at `u32::MAX`.
pub fn combine_into(acc: &mut [PrizeResultRow], other: &[PrizeResultRow]) -> PfResult<()> {
    check_same_schema(acc, other)?;
    for (row, add) in acc.iter_mut().zip(other) {
        row.selected_count = row.selected_count.saturating_add(add.selected_count);
    }
    Ok(())
}

/// Element-wise sum of two result tables with the same schema
pub fn combine_result_tables(a: &[PrizeResultRow], b: &[PrizeResultRow]) -> PfResult<ResultTable> {
    let mut combined = a.to_vec();
    combine_into(&mut combined, b)?;
    Ok(combined)
}

/// Copy of a table with every count reset to 0
pub fn zeroed(table: &[PrizeResultRow]) -> ResultTable {
    table
        .iter()
        .map(|row| PrizeResultRow {
            selected_count: 0,
            ..row.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(counts: &[u32]) -> ResultTable {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| PrizeResultRow {
                prize_index: i + 1,
                category_name: "Cat".into(),
                prize_name: format!("Prize {}", i + 1),
                selected_count: count,
            })
            .collect()
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(empty_results_summary(3), vec![0, 0, 0]);
    }

    #[test]
    fn test_combine_sums_counts() {
        let combined = combine_result_tables(&table(&[1, 0, 2]), &table(&[3, 1, 0])).unwrap();
        let counts: Vec<u32> = combined.iter().map(|r| r.selected_count).collect();
        assert_eq!(counts, vec![4, 1, 2]);
        assert_eq!(combined[2].prize_name, "Prize 3");
    }

    #[test]
    fn test_combine_with_zeroed_is_identity() {
        let a = table(&[5, 0, 7]);
        assert_eq!(combine_result_tables(&a, &zeroed(&a)).unwrap(), a);
    }

    #[test]
    fn test_combine_rejects_length_mismatch() {
        let err = combine_result_tables(&table(&[1, 2]), &table(&[1, 2, 3])).unwrap_err();
        assert!(matches!(err, PfError::SchemaMismatch(_)));
    }

    #[test]
    fn test_combine_rejects_identity_mismatch() {
        let a = table(&[1, 2]);
        let mut b = table(&[1, 2]);
        b[1].category_name = "Other".into();

        let mut acc = a.clone();
        assert!(combine_into(&mut acc, &b).is_err());
        assert_eq!(acc, a);
    }

    #[test]
    fn test_combine_saturates() {
        let mut acc = table(&[u32::MAX - 2, 5]);
        combine_into(&mut acc, &table(&[10, 5])).unwrap();
        assert_eq!(acc[0].selected_count, u32::MAX);
        assert_eq!(acc[1].selected_count, 10);
    }
}
