//! Provides loading of labeled image datasets.
//!
//! The decoding of the individual files happens in [idx][idx]; a [Dataset][dataset]
//! pairs the decoded image and label tables and checks that they describe the same
//! samples.
//!
//! [idx]: ./idx/index.html
//! [dataset]: ./struct.Dataset.html
pub mod idx;

pub use self::idx::{decode_images, decode_labels, read_images, read_labels, write_images, write_labels,
                    IdxHeader, ImageTable, LabelTable, IMAGE_MAGIC, LABEL_MAGIC};

use std::path::PathBuf;
use crate::error::{FormatError, Result};
use crate::normalize::{Normalizer, NormalizerConfig};

#[derive(Debug, Clone)]
/// Specifies where a dataset is read from and how it is prepared.
pub struct DatasetConfig {
    /// The IDX label file.
    ///
    /// Default: `t10k-labels-idx1-ubyte`
    pub label_path: PathBuf,
    /// The IDX image file.
    ///
    /// Default: `t10k-images-idx3-ubyte`
    pub image_path: PathBuf,
    /// Normalize the image features after decoding.
    ///
    /// Default: true
    pub normalize: bool,
    /// How the image features are normalized.
    pub normalizer: NormalizerConfig,
}

impl Default for DatasetConfig {
    fn default() -> DatasetConfig {
        DatasetConfig {
            label_path: PathBuf::from("t10k-labels-idx1-ubyte"),
            image_path: PathBuf::from("t10k-images-idx3-ubyte"),
            normalize: true,
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl DatasetConfig {
    /// Creates a config for the given label and image files.
    pub fn new<L: Into<PathBuf>, I: Into<PathBuf>>(label_path: L, image_path: I) -> DatasetConfig {
        DatasetConfig {
            label_path: label_path.into(),
            image_path: image_path.into(),
            ..DatasetConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Decoded images and their one-hot labels.
pub struct Dataset {
    /// One row per sample.
    pub images: ImageTable,
    /// One row per sample, in the same order as `images`.
    pub labels: LabelTable,
}

impl Dataset {
    /// Pairs image and label tables.
    ///
    /// Fails if they have a different number of rows.
    pub fn new(images: ImageTable, labels: LabelTable) -> Result<Dataset> {
        if images.nrows() != labels.nrows() {
            return Err(FormatError::RowMismatch { images: images.nrows(), labels: labels.nrows() }.into());
        }
        Ok(Dataset { images, labels })
    }

    /// Decodes both files of `config` and normalizes the images if requested.
    pub fn load(config: &DatasetConfig) -> Result<Dataset> {
        let labels = decode_labels(&config.label_path)?;
        let mut images = decode_images(&config.image_path)?;
        if config.normalize {
            Normalizer::from_config(&config.normalizer).normalize(&mut images);
        }
        Dataset::new(images, labels)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.images.nrows()
    }

    /// Returns if the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of features per sample.
    pub fn feature_count(&self) -> usize {
        self.images.ncols()
    }

    /// Number of classes of the one-hot labels.
    pub fn class_count(&self) -> usize {
        self.labels.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_paths() {
        let cfg = DatasetConfig::default();
        assert_eq!(cfg.label_path, PathBuf::from("t10k-labels-idx1-ubyte"));
        assert_eq!(cfg.image_path, PathBuf::from("t10k-images-idx3-ubyte"));
        assert!(cfg.normalize);
    }

    #[test]
    fn row_mismatch_is_rejected() {
        let images = ImageTable::zeros((3, 4));
        let labels = LabelTable::zeros((2, 2));
        match Dataset::new(images, labels) {
            Err(Error::Format(FormatError::RowMismatch { images, labels })) => {
                assert_eq!((images, labels), (3, 2));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn accessors() {
        let dataset = Dataset::new(ImageTable::zeros((3, 4)), LabelTable::zeros((3, 10))).unwrap();
        assert_eq!(dataset.len(), 3);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.feature_count(), 4);
        assert_eq!(dataset.class_count(), 10);
    }
}
