//! Attempt-count statistics for success runs

use std::collections::HashMap;

use pf_core::SuccessInfo;

/// Arithmetic mean
pub fn mean(samples: &[u32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: u64 = samples.iter().map(|&s| s as u64).sum();
    Some(total as f64 / samples.len() as f64)
}

/// Median; the average of the two middle values for an even count
pub fn median(samples: &[u32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let half = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[half - 1] as f64 + sorted[half] as f64) / 2.0)
    } else {
        Some(sorted[half] as f64)
    }
}

/// Most frequent value.
///
/// Ties go to the value whose first occurrence comes earliest in `samples`.
pub fn mode(samples: &[u32]) -> Option<u32> {
    // value -> (count, first position)
    let mut groups: HashMap<u32, (usize, usize)> = HashMap::new();
    for (position, &value) in samples.iter().enumerate() {
        groups.entry(value).or_insert((0, position)).0 += 1;
    }

    groups
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

/// Summarize attempts-until-success, one sample per trial
pub fn summarize(samples: &[u32]) -> Option<SuccessInfo> {
    Some(SuccessInfo {
        trials_conducted: samples.len() as u32,
        min_pulls_required: samples.iter().copied().min()?,
        max_pulls_required: samples.iter().copied().max()?,
        median_pulls_required: median(samples)?,
        mode_pulls_required: mode(samples)?,
        mean_pulls_required: mean(samples)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[5, 1, 3]), Some(3.0));
        assert_eq!(median(&[4, 1, 3, 2]), Some(2.5));
        assert_eq!(median(&[7]), Some(7.0));
    }

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1, 2, 3, 4]).unwrap(), 2.5);
    }

    #[test]
    fn test_mode_prefers_most_frequent() {
        assert_eq!(mode(&[1, 2, 2, 3, 2, 1]), Some(2));
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        assert_eq!(mode(&[3, 1, 1, 3]), Some(3));
        assert_eq!(mode(&[1, 3, 3, 1]), Some(1));
    }

    #[test]
    fn test_empty_samples() {
        assert!(mean(&[]).is_none());
        assert!(median(&[]).is_none());
        assert!(mode(&[]).is_none());
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_summarize() {
        let info = summarize(&[2, 1, 4, 2, 6]).unwrap();
        assert_eq!(info.trials_conducted, 5);
        assert_eq!(info.min_pulls_required, 1);
        assert_eq!(info.max_pulls_required, 6);
        assert_eq!(info.median_pulls_required, 2.0);
        assert_eq!(info.mode_pulls_required, 2);
        assert_relative_eq!(info.mean_pulls_required, 3.0);
    }
}
