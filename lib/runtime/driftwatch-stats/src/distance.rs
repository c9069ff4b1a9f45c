use std::collections::BTreeMap;

use ndarray::Array1;

/// Normalised histogram of `values` over `[lower, upper]`. Values on the
/// upper edge land in the last bin; a zero-width range puts everything in
/// the first bin.
pub fn histogram(values: &[f64], lower: f64, upper: f64, bins: usize) -> Array1<f64> {
    let bins = bins.max(1);
    let mut counts = Array1::<f64>::zeros(bins);
    if values.is_empty() {
        return counts;
    }
    let width = (upper - lower) / bins as f64;
    for value in values {
        let index = if width > 0.0 {
            (((value - lower) / width).max(0.0) as usize).min(bins - 1)
        } else {
            0
        };
        counts[index] += 1.0;
    }
    let total = counts.sum();
    counts / total
}

/// Hellinger distance between two probability vectors, in [0, 1].
pub fn hellinger_distance(p: &Array1<f64>, q: &Array1<f64>) -> f64 {
    let coefficient = (p * q).mapv(f64::sqrt).sum();
    (1.0 - coefficient.min(1.0)).max(0.0).sqrt()
}

/// Distance between two samples binned over their pooled range. `None`
/// when either side is empty.
pub fn numeric_distance(reference: &[f64], current: &[f64], bins: usize) -> Option<f64> {
    if reference.is_empty() || current.is_empty() {
        return None;
    }
    let (lower, upper) = reference
        .iter()
        .chain(current)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(*value), hi.max(*value))
        });
    let p = histogram(reference, lower, upper, bins);
    let q = histogram(current, lower, upper, bins);
    Some(hellinger_distance(&p, &q))
}

/// Distance between category frequency tables. Missing cells are ignored.
pub fn categorical_distance(
    reference: &[Option<String>],
    current: &[Option<String>],
) -> Option<f64> {
    let mut table: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for value in reference.iter().flatten() {
        table.entry(value.as_str()).or_default().0 += 1.0;
    }
    for value in current.iter().flatten() {
        table.entry(value.as_str()).or_default().1 += 1.0;
    }

    let p: Array1<f64> = table.values().map(|(lhs, _)| *lhs).collect();
    let q: Array1<f64> = table.values().map(|(_, rhs)| *rhs).collect();
    let (p_total, q_total) = (p.sum(), q.sum());
    if p_total == 0.0 || q_total == 0.0 {
        return None;
    }
    Some(hellinger_distance(&(p / p_total), &(q / q_total)))
}
