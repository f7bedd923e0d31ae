//! Rescales the feature columns of an image table.
//!
//! Every column is centered on its mean and then divided by its variance term. The
//! mean and the variance term are both taken over the table's *column* count unless
//! configured otherwise, and the variance term is the mean square squared:
//!
//! ```text
//! mean     = sum(column) / n
//! column   = column - mean
//! variance = (sum(column * column) / n) ^ 2
//! column   = column / variance            (skipped if variance == 0)
//! ```
//!
//! Layers trained on the output of this routine depend on exactly this scaling, so
//! `n` defaults to the number of columns ([Divisor::FeatureCount][divisor]).
//!
//! [divisor]: ./enum.Divisor.html
use ndarray::{Array2, Axis};
use num::{Float, NumCast};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which count the per-column sums are divided by.
pub enum Divisor {
    /// The number of columns of the table.
    FeatureCount,
    /// The number of rows of the table, giving the per-column sample mean.
    SampleCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Specifies configuration parameters for a Normalizer.
pub struct NormalizerConfig {
    /// Default: `Divisor::FeatureCount`
    pub divisor: Divisor,
}

impl Default for NormalizerConfig {
    fn default() -> NormalizerConfig {
        NormalizerConfig { divisor: Divisor::FeatureCount }
    }
}

#[derive(Debug, Clone, Copy)]
/// Normalizes tables column by column.
pub struct Normalizer {
    divisor: Divisor,
}

impl Normalizer {
    /// Create a Normalizer from a NormalizerConfig.
    pub fn from_config(config: &NormalizerConfig) -> Normalizer {
        Normalizer { divisor: config.divisor }
    }

    /// Normalizes every column of `table` in place.
    pub fn normalize<F: Float>(&self, table: &mut Array2<F>) {
        let count = match self.divisor {
            Divisor::FeatureCount => table.ncols(),
            Divisor::SampleCount => table.nrows(),
        };
        let n: F = match <F as NumCast>::from(count) {
            Some(n) if count > 0 => n,
            _ => return,
        };

        let mut skipped = 0;
        for mut column in table.axis_iter_mut(Axis(1)) {
            let mean = column.iter().fold(F::zero(), |sum, &x| sum + x) / n;
            column.map_inplace(|x| *x = *x - mean);

            let mean_square = column.iter().fold(F::zero(), |sum, &x| sum + x * x) / n;
            let variance = mean_square * mean_square;
            if variance == F::zero() {
                skipped += 1;
                continue;
            }
            column.map_inplace(|x| *x = *x / variance);
        }
        debug!("Normalized {} columns over {} rows ({} without variance)", table.ncols(), table.nrows(), skipped);
    }
}

impl Default for Normalizer {
    fn default() -> Normalizer {
        Normalizer::from_config(&NormalizerConfig::default())
    }
}

/// Normalizes every column of `table` in place with the default configuration.
pub fn normalize_in_place<F: Float>(table: &mut Array2<F>) {
    Normalizer::default().normalize(table)
}

/// Returns a normalized copy of `table`, using the default configuration.
pub fn normalized<F: Float>(mut table: Array2<F>) -> Array2<F> {
    normalize_in_place(&mut table);
    table
}
