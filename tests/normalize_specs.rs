extern crate strata;
extern crate ndarray;
extern crate rand;

#[cfg(test)]
mod normalize_spec {
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use strata::normalize::*;

    fn random_table(rows: usize, cols: usize, seed: u64) -> Array2<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        Array2::from_shape_fn((rows, cols), |_| f32::from(rng.gen::<u8>()))
    }

    #[test]
    fn shape_is_unchanged() {
        for &(rows, cols) in &[(1, 1), (5, 3), (3, 5), (10, 784)] {
            let mut table = random_table(rows, cols, rows as u64);
            normalize_in_place(&mut table);
            assert_eq!(table.dim(), (rows, cols));
        }
    }

    #[test]
    fn zero_variance_column_is_centered_and_left_alone() {
        // rows == cols, so a constant column centers to exactly zero
        let mut table = Array2::from_shape_vec((3, 3), vec![7f32, 1f32, 0f32,
                                                            7f32, 2f32, 0f32,
                                                            7f32, 6f32, 0f32]).unwrap();
        normalize_in_place(&mut table);
        assert_eq!(table.column(0).to_vec(), vec![0f32; 3]);
        assert_eq!(table.column(2).to_vec(), vec![0f32; 3]);

        let once = table.clone();
        normalize_in_place(&mut table);
        assert_eq!(table.column(0), once.column(0));
        assert_eq!(table.column(2), once.column(2));
    }

    #[test]
    fn blank_border_pixels_stay_zero() {
        let mut table = random_table(8, 6, 3);
        table.column_mut(0).fill(0f32);
        table.column_mut(5).fill(0f32);
        normalize_in_place(&mut table);
        assert!(table.column(0).iter().all(|&x| x == 0f32));
        assert!(table.column(5).iter().all(|&x| x == 0f32));
        assert!(table.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn normalized_matches_in_place() {
        let table = random_table(6, 4, 5);
        let mut in_place = table.clone();
        normalize_in_place(&mut in_place);
        assert_eq!(normalized(table), in_place);
    }

    #[test]
    fn default_divisor_is_feature_count() {
        assert_eq!(NormalizerConfig::default().divisor, Divisor::FeatureCount);
        let mut table = random_table(4, 3, 9);
        let mut explicit = table.clone();
        normalize_in_place(&mut table);
        Normalizer::from_config(&NormalizerConfig { divisor: Divisor::FeatureCount }).normalize(&mut explicit);
        assert_eq!(table, explicit);
    }
}
