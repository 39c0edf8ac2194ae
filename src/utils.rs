//! Small sequence helpers shared by the binning strategies.

/// Split `items` into `n` contiguous groups of as-equal-as-possible size.
///
/// When `items.len()` is not divisible by `n`, the first `items.len() % n`
/// groups receive one extra element. Groups are never empty as long as
/// `n <= items.len()`; with `n > items.len()` the trailing groups are empty.
///
/// ```
/// use featurebin::utils::chunk;
///
/// let values: Vec<i32> = (0..10).collect();
/// let groups = chunk(&values, 4);
/// assert_eq!(groups, [&[0, 1, 2][..], &[3, 4, 5][..], &[6, 7][..], &[8, 9][..]]);
/// ```
///
/// # Panics
/// If `n == 0`.
pub fn chunk<T>(items: &[T], n: usize) -> Vec<&[T]> {
    assert!(n > 0, "cannot chunk into zero groups");
    let base = items.len() / n;
    let extra = items.len() % n;

    let mut groups = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let size = base + usize::from(i < extra);
        groups.push(&items[start..start + size]);
        start += size;
    }
    groups
}

/// Sorted distinct values of `values` and how many times each occurs.
///
/// Values are compared with `f64::total_cmp`, so the input is expected to be
/// finite (NaN would sort as its own value).
pub fn unique_with_counts(values: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut unique: Vec<f64> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for v in sorted {
        match unique.last() {
            // -0.0 and 0.0 collapse into one value
            Some(&last) if last == v => {
                if let Some(c) = counts.last_mut() {
                    *c += 1;
                }
            }
            _ => {
                unique.push(v);
                counts.push(1);
            }
        }
    }
    (unique, counts)
}
