use crate::catalog::Catalog;
use rand::Rng;

/// Pick a slice for the next spin.
///
/// Uniform catalogs draw an integer in `[0, n)`. Weighted catalogs draw a real
/// in `[0, total)` and walk the cumulative sum, returning the first index whose
/// running total reaches or exceeds the draw. The last slice absorbs any
/// floating-point residue.
pub fn select_index<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> usize {
    let n = catalog.len();

    if catalog.is_uniform() {
        return rng.gen_range(0..n);
    }

    let total = catalog.total_weight();
    let draw = rng.gen_range(0.0..total);
    pick_cumulative(catalog, draw)
}

fn pick_cumulative(catalog: &Catalog, draw: f64) -> usize {
    let last = catalog.len() - 1;
    let mut cumulative = 0.0;

    for index in 0..last {
        cumulative += catalog.effective_weight(index);
        if cumulative >= draw {
            return index;
        }
    }

    last
}

/// Theoretical chance of each slice being selected.
pub fn probabilities(catalog: &Catalog) -> Vec<f64> {
    let total = catalog.total_weight();
    (0..catalog.len())
        .map(|i| catalog.effective_weight(i) / total)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Prize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TRIALS: usize = 60_000;

    fn frequencies(catalog: &Catalog, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = vec![0usize; catalog.len()];
        for _ in 0..TRIALS {
            counts[select_index(catalog, &mut rng)] += 1;
        }
        counts
            .into_iter()
            .map(|c| c as f64 / TRIALS as f64)
            .collect()
    }

    #[test]
    fn test_uniform_frequencies() {
        for n in [1usize, 2, 5, 6] {
            let prizes = (0..n).map(|i| Prize::new(format!("p{}", i))).collect();
            let catalog = Catalog::new(prizes).unwrap();
            let freqs = frequencies(&catalog, 7 + n as u64);
            for f in freqs {
                assert!((f - 1.0 / n as f64).abs() < 0.015, "n={} freq={}", n, f);
            }
        }
    }

    #[test]
    fn test_weighted_frequencies() {
        let catalog = Catalog::new(vec![
            Prize::weighted("rare", 1.0),
            Prize::weighted("common", 6.0),
            Prize::weighted("medium", 3.0),
        ])
        .unwrap();

        let freqs = frequencies(&catalog, 42);
        let expected = probabilities(&catalog);
        assert_eq!(expected, vec![0.1, 0.6, 0.3]);

        for (f, e) in freqs.iter().zip(expected.iter()) {
            assert!((f - e).abs() < 0.015, "freq={} expected={}", f, e);
        }
    }

    #[test]
    fn test_zero_weight_slice_not_drawn() {
        let catalog = Catalog::new(vec![
            Prize::weighted("a", 1.0),
            Prize::weighted("never", 0.0),
            Prize::weighted("b", 1.0),
        ])
        .unwrap();

        let freqs = frequencies(&catalog, 3);
        assert_eq!(freqs[1], 0.0);
    }

    #[test]
    fn test_boundary_draw_goes_to_earlier_index() {
        let catalog = Catalog::new(vec![
            Prize::weighted("a", 2.0),
            Prize::weighted("b", 2.0),
            Prize::weighted("c", 1.0),
        ])
        .unwrap();

        assert_eq!(pick_cumulative(&catalog, 0.0), 0);
        assert_eq!(pick_cumulative(&catalog, 2.0), 0);
        assert_eq!(pick_cumulative(&catalog, 2.0000001), 1);
        assert_eq!(pick_cumulative(&catalog, 4.0), 1);
        assert_eq!(pick_cumulative(&catalog, 4.5), 2);
        // residue past the total lands on the last slice
        assert_eq!(pick_cumulative(&catalog, 5.5), 2);
    }

    #[test]
    fn test_equal_weights_use_uniform_path() {
        let catalog =
            Catalog::new(vec![Prize::weighted("a", 5.0), Prize::weighted("b", 5.0)]).unwrap();
        assert!(catalog.is_uniform());
        assert_eq!(probabilities(&catalog), vec![0.5, 0.5]);
    }
}
