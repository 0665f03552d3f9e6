use rand::Rng;

/// Draw an index from integer weights using a cumulative scan
///
/// The draw is uniform in `[0, total)` and the first index whose cumulative
/// weight exceeds it wins, so zero-weight entries are never chosen while any
/// weight is positive. When every weight is zero the draw falls back to a
/// uniform choice. Returns `None` only for an empty slice.
pub fn weighted_index<R: Rng + ?Sized>(weights: &[u64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: u64 = weights.iter().sum();
    if total == 0 {
        return Some(rng.random_range(0..weights.len()));
    }

    let draw = rng.random_range(0..total);
    let mut cumulative = 0;
    for (i, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative > draw {
            return Some(i);
        }
    }

    // Unreachable while the draw stays below the total
    Some(weights.len() - 1)
}

/// Shannon entropy (in nats) of the distribution implied by integer weights
///
/// Zero-weight entries carry no probability mass. An all-zero distribution is
/// treated as uniform over its entries, matching the draw fallback above.
pub fn shannon_entropy(weights: &[u64]) -> f64 {
    if weights.is_empty() {
        return 0.0;
    }

    let total: u64 = weights.iter().sum();
    if total == 0 {
        return (weights.len() as f64).ln();
    }

    let total = total as f64;
    weights
        .iter()
        .filter(|&&w| w > 0)
        .map(|&w| {
            let p = w as f64 / total;
            -p * p.ln()
        })
        .sum()
}
