//! Tests for the cumulative weighted draw and Shannon entropy

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use wavetile::math::probability::{shannon_entropy, weighted_index};

    // Empty weight lists have nothing to draw
    #[test]
    fn test_weighted_index_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(weighted_index(&[], &mut rng), None);
    }

    // Zero-weight entries are never chosen while any weight is positive
    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let index = weighted_index(&[0, 3, 0, 1], &mut rng);
            assert!(matches!(index, Some(1 | 3)), "drew {index:?}");
        }
    }

    // All-zero weights fall back to a uniform draw that reaches every entry
    #[test]
    fn test_weighted_index_uniform_fallback() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let index = weighted_index(&[0, 0, 0], &mut rng).expect("non-empty weights");
            if let Some(flag) = seen.get_mut(index) {
                *flag = true;
            }
        }
        assert!(seen.iter().all(|&flag| flag));
    }

    // Draw frequencies follow the weights
    #[test]
    fn test_weighted_index_respects_proportions() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0usize; 2];
        for _ in 0..4000 {
            let index = weighted_index(&[1, 3], &mut rng).expect("non-empty weights");
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
        }
        let ratio = counts[1] as f64 / counts[0] as f64;
        assert!((2.5..3.5).contains(&ratio), "ratio {ratio}");
    }

    // Shannon entropy of uniform and degenerate distributions
    #[test]
    fn test_shannon_entropy_values() {
        assert!(shannon_entropy(&[]).abs() < f64::EPSILON);
        assert!(shannon_entropy(&[5]).abs() < f64::EPSILON);
        assert!((shannon_entropy(&[2, 2]) - 2f64.ln()).abs() < 1e-12);
        assert!((shannon_entropy(&[0, 0, 0, 0]) - 4f64.ln()).abs() < 1e-12);
        assert!(shannon_entropy(&[9, 1]) < shannon_entropy(&[5, 5]));
    }
}
