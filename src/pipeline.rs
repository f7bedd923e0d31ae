//! Runs a complete training pass: decode, normalize, train.
use crate::dataset::{Dataset, DatasetConfig};
use crate::error::Result;
use crate::stack::{LayerStack, TrainReport};

#[derive(Debug, Clone, Default)]
/// Specifies configuration parameters for a training pass.
pub struct PipelineConfig {
    /// Where the dataset is read from and how its images are normalized.
    pub dataset: DatasetConfig,
}

/// Loads the dataset described by `config` and trains `stack` on it.
///
/// The stack has to be populated by the caller; its first layer must accept the
/// dataset's feature count and its last layer must output the dataset's class count.
pub fn run(config: &PipelineConfig, stack: &mut LayerStack) -> Result<TrainReport> {
    let dataset = Dataset::load(&config.dataset)?;
    info!("Loaded {} samples with {} features and {} classes",
          dataset.len(), dataset.feature_count(), dataset.class_count());
    train(&dataset, stack)
}

/// Trains `stack` on an already loaded dataset.
pub fn train(dataset: &Dataset, stack: &mut LayerStack) -> Result<TrainReport> {
    let report = stack.train(&dataset.images, &dataset.labels)?;
    for stage in &report.stages {
        debug!("{}", stage);
    }
    Ok(report)
}
