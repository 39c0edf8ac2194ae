//! Entropy-driven grouping of distinct values.
//!
//! Given the distinct values of a feature (ascending) and how often each one
//! occurs, [`entropy_groups`] cuts the sequence into contiguous groups by
//! greedy top-down splitting. Each step performs the single split, over all
//! current groups and positions, with the largest information gain
//!
//! ```text
//! gain = N·H(parent) − N_L·H(left) − N_R·H(right)
//! N·H  = N ln N − Σ c_i ln c_i
//! ```
//!
//! where `c_i` are the counts inside a group and `N` their sum. The
//! `Σ c_i ln c_i` terms of the parent and its two children cancel, so the
//! gain reduces to `N ln N − N_L ln N_L − N_R ln N_R`: each step picks the
//! split that divides a group's mass most evenly, and prefers heavy groups
//! since their gain is larger.

use log::trace;

/// Gains closer than this are treated as ties; the leftmost candidate wins.
const GAIN_TOLERANCE: f64 = 1e-9;

/// Prefix sums of `c` and `c ln c`, so the weighted entropy of any
/// contiguous range is O(1).
struct Prefix {
    mass: Vec<f64>,
    c_ln_c: Vec<f64>,
}

impl Prefix {
    fn new(counts: &[f64]) -> Self {
        let mut mass = Vec::with_capacity(counts.len() + 1);
        let mut c_ln_c = Vec::with_capacity(counts.len() + 1);
        mass.push(0.0);
        c_ln_c.push(0.0);
        for &c in counts {
            let term = if c > 0.0 { c * c.ln() } else { 0.0 };
            mass.push(mass[mass.len() - 1] + c);
            c_ln_c.push(c_ln_c[c_ln_c.len() - 1] + term);
        }
        Self { mass, c_ln_c }
    }

    /// `N·H` of `values[start..end]`.
    fn weighted_entropy(&self, start: usize, end: usize) -> f64 {
        let n = self.mass[end] - self.mass[start];
        if n <= 0.0 {
            return 0.0;
        }
        let h = n * n.ln() - (self.c_ln_c[end] - self.c_ln_c[start]);
        // float cancellation can leave tiny negatives
        h.max(0.0)
    }

    /// Best split position `k` of `[start, end)` into `[start, k)` and
    /// `[k, end)`, with its gain.
    fn best_split(&self, start: usize, end: usize) -> Option<(usize, f64)> {
        if end - start < 2 {
            return None;
        }
        let parent = self.weighted_entropy(start, end);
        let mut best: Option<(usize, f64)> = None;
        for k in start + 1..end {
            let gain = parent - self.weighted_entropy(start, k) - self.weighted_entropy(k, end);
            match best {
                Some((_, g)) if gain <= g + GAIN_TOLERANCE => {}
                _ => best = Some((k, gain)),
            }
        }
        best
    }
}

/// Group `values` into `n_bins` contiguous runs chosen by entropy.
///
/// `values` must be distinct and ascending, `counts` the matching positive
/// occurrence counts, and `1 <= n_bins <= values.len()`; under those
/// conditions the result has exactly `n_bins` non-empty groups that together
/// cover `values` in order. If `n_bins` exceeds `values.len()`, one group per
/// value is returned.
///
/// # Panics
/// If `values` and `counts` differ in length.
///
/// # Example
/// ```
/// use featurebin::preprocessing::binning::entropy::entropy_groups;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// let counts = [1.0, 1.0, 1.0, 1.0];
/// let groups = entropy_groups(&values, &counts, 2);
/// assert_eq!(groups, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
/// ```
pub fn entropy_groups(values: &[f64], counts: &[f64], n_bins: usize) -> Vec<Vec<f64>> {
    assert_eq!(
        values.len(),
        counts.len(),
        "values and counts must have the same length"
    );
    if values.is_empty() {
        return Vec::new();
    }

    let prefix = Prefix::new(counts);
    let target = n_bins.clamp(1, values.len());

    // half-open index ranges, kept in ascending order
    let mut segments: Vec<(usize, usize)> = vec![(0, values.len())];

    while segments.len() < target {
        let mut choice: Option<(usize, usize, f64)> = None;
        for (idx, &(start, end)) in segments.iter().enumerate() {
            if let Some((k, gain)) = prefix.best_split(start, end) {
                match choice {
                    Some((_, _, g)) if gain <= g + GAIN_TOLERANCE => {}
                    _ => choice = Some((idx, k, gain)),
                }
            }
        }

        // target <= values.len() guarantees a splittable segment exists
        let Some((idx, k, gain)) = choice else { break };
        let (start, end) = segments[idx];
        trace!(
            "entropy split at value {} (gain {:.6}, segment {}..{})",
            values[k],
            gain,
            start,
            end
        );
        segments[idx] = (start, k);
        segments.insert(idx + 1, (k, end));
    }

    segments
        .into_iter()
        .map(|(start, end)| values[start..end].to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(groups: &[Vec<f64>]) -> Vec<usize> {
        groups.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_uniform_counts_split_balanced() {
        let values: Vec<f64> = (0..8).map(f64::from).collect();
        let counts = vec![1.0; 8];
        let groups = entropy_groups(&values, &counts, 2);
        assert_eq!(sizes(&groups), vec![4, 4]);
    }

    #[test]
    fn test_uniform_counts_four_bins() {
        let values: Vec<f64> = (0..8).map(f64::from).collect();
        let counts = vec![1.0; 8];
        let groups = entropy_groups(&values, &counts, 4);
        assert_eq!(sizes(&groups), vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_splits_balance_mass() {
        // one value dominates; the first cut balances mass around it
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let counts = [1.0, 1.0, 100.0, 1.0, 1.0];
        let groups = entropy_groups(&values, &counts, 2);
        assert_eq!(groups, vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_heavy_group_split_next() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let counts = [1.0, 1.0, 100.0, 1.0, 1.0];
        let groups = entropy_groups(&values, &counts, 3);
        assert_eq!(
            groups,
            vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0]]
        );
    }

    #[test]
    fn test_groups_cover_values_in_order() {
        let values = [0.5, 1.5, 2.0, 7.0, 9.0, 11.0, 12.5];
        let counts = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        for n in 1..=values.len() {
            let groups = entropy_groups(&values, &counts, n);
            assert_eq!(groups.len(), n);
            assert!(groups.iter().all(|g| !g.is_empty()));
            let flat: Vec<f64> = groups.into_iter().flatten().collect();
            assert_eq!(flat, values.to_vec());
        }
    }

    #[test]
    fn test_one_group_per_value_when_n_equals_len() {
        let values = [1.0, 2.0, 3.0];
        let groups = entropy_groups(&values, &[2.0, 2.0, 2.0], 3);
        assert_eq!(groups, vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    fn test_n_bins_above_len_is_capped() {
        let groups = entropy_groups(&[1.0, 2.0], &[1.0, 1.0], 5);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(entropy_groups(&[], &[], 3).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let counts = [2.0, 2.0, 2.0, 2.0, 2.0, 2.0];
        let a = entropy_groups(&values, &counts, 4);
        let b = entropy_groups(&values, &counts, 4);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        entropy_groups(&[1.0, 2.0], &[1.0], 2);
    }
}
