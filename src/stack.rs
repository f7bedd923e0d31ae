//! Sequences a stack of layers through a training run.
//!
//! A [LayerStack][stack] holds an ordered list of [layers][layer]. Training feeds the
//! input table to the first layer and every following layer receives the output of
//! the layer before it:
//!
//! ```text
//! images -> [pretrain + forward] -> ... -> [pretrain + forward] -> [supervised, labels]
//! ```
//!
//! All layers but the last one are trained in the [Pretrain][pretrain] stage and then
//! asked for their representation of the input. The last layer is trained in the
//! [Supervised][supervised] stage against the label table.
//!
//! A stack is trained once. Layers are shared with the caller, who keeps them after
//! the stack is dropped.
//!
//! [stack]: ./struct.LayerStack.html
//! [layer]: ../layer/trait.Layer.html
//! [pretrain]: ../layer/enum.Stage.html#variant.Pretrain
//! [supervised]: ../layer/enum.Stage.html#variant.Supervised
use std::cell::{Ref, RefMut};
use std::fmt;
use std::time::{Duration, Instant};
use ndarray::{Array2, ArrayView2};

use crate::dataset::{ImageTable, LabelTable};
use crate::error::{Error, Result, StackError};
use crate::layer::{Layer, SharedLayer, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Lifecycle of a [LayerStack](./struct.LayerStack.html).
pub enum TrainState {
    /// Layers can still be added.
    Untrained,
    /// `train` is running.
    Training,
    /// `train` finished successfully.
    Trained,
    /// `train` was aborted by an error.
    Failed,
}

#[derive(Debug)]
/// An ordered stack of layers that is trained layer by layer.
pub struct LayerStack {
    layers: Vec<SharedLayer>,
    state: TrainState,
}

impl Default for LayerStack {
    fn default() -> LayerStack {
        LayerStack::new()
    }
}

impl LayerStack {
    /// Create an empty LayerStack.
    pub fn new() -> LayerStack {
        LayerStack {
            layers: vec![],
            state: TrainState::Untrained,
        }
    }

    /// Appends a layer on top of the stack.
    ///
    /// The same handle may be added more than once; it is then trained once per
    /// occurrence.
    pub fn add(&mut self, layer: SharedLayer) -> Result<()> {
        if self.state != TrainState::Untrained {
            return Err(StackError::Sealed.into());
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Number of layers in the stack.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns if no layer was added.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the lifecycle state of the stack.
    pub fn state(&self) -> TrainState {
        self.state
    }

    /// Returns the layers in execution order.
    pub fn layers(&self) -> &[SharedLayer] {
        &self.layers
    }

    /// Trains every layer in insertion order.
    ///
    /// The configuration of the stack is checked against the tables before any layer
    /// runs; a stack that fails this check can still be fixed and trained. Once layers
    /// have run the stack can not be trained again, whether the run succeeded or not.
    pub fn train(&mut self, images: &ImageTable, labels: &LabelTable) -> Result<TrainReport> {
        if self.state != TrainState::Untrained {
            return Err(StackError::AlreadyTrained.into());
        }
        self.check(images.view(), labels.view())?;

        self.state = TrainState::Training;
        let result = self.run(images.view(), labels.view());
        self.state = match result {
            Ok(_) => TrainState::Trained,
            Err(_) => TrainState::Failed,
        };
        result
    }

    fn check(&self, images: ArrayView2<f32>, labels: ArrayView2<f32>) -> Result<()> {
        if self.layers.is_empty() {
            return Err(StackError::Empty.into());
        }
        if images.nrows() != labels.nrows() {
            return Err(StackError::RowMismatch { images: images.nrows(), labels: labels.nrows() }.into());
        }

        let mut width = images.ncols();
        for index in 0..self.layers.len() {
            let layer = self.borrow(index)?;
            let config = layer.config();
            config.validate()
                  .map_err(|reason| StackError::InvalidConfig { layer: config.name.clone(), reason })?;
            if config.input_size != width {
                return Err(StackError::ShapeMismatch {
                    layer: config.name.clone(),
                    what: "input",
                    expected: config.input_size,
                    found: width,
                }.into());
            }
            width = config.output_size;
        }

        let last = self.borrow(self.layers.len() - 1)?;
        let config = last.config();
        if config.output_size != labels.ncols() {
            return Err(StackError::ShapeMismatch {
                layer: config.name.clone(),
                what: "output",
                expected: config.output_size,
                found: labels.ncols(),
            }.into());
        }
        if !config.layer_type.supports_supervision() {
            warn!("Terminal layer {} is a {:?} layer, which does not learn from labels", config.name, config.layer_type);
        }

        Ok(())
    }

    fn run(&self, images: ArrayView2<f32>, labels: ArrayView2<f32>) -> Result<TrainReport> {
        let mut report = TrainReport::default();
        let total = self.layers.len();
        let mut features: Option<Array2<f32>> = None;

        for index in 0..total {
            let input = match features {
                Some(ref table) => table.view(),
                None => images.view(),
            };
            let mut layer = self.borrow_mut(index)?;
            let name = layer.name().to_owned();
            let timer = Instant::now();

            if index + 1 == total {
                info!("Training layer {} ({}/{}) against {} labels", name, index + 1, total, labels.ncols());
                layer.train(input, Stage::Supervised { labels })
                     .map_err(|source| Error::Layer { name: name.clone(), source })?;
                report.stages.push(StageReport { name, supervised: true, elapsed: timer.elapsed() });
            } else {
                info!("Pretraining layer {} ({}/{}) on {} features", name, index + 1, total, input.ncols());
                let rows = input.nrows();
                layer.train(input, Stage::Pretrain)
                     .map_err(|source| Error::Layer { name: name.clone(), source })?;
                let output = layer.forward(input)
                                  .map_err(|source| Error::Layer { name: name.clone(), source })?;
                let expected = (rows, layer.config().output_size);
                if output.dim() != expected {
                    return Err(StackError::OutputShape { layer: name, expected, found: output.dim() }.into());
                }
                report.stages.push(StageReport { name, supervised: false, elapsed: timer.elapsed() });
                features = Some(output);
            }
        }

        info!("Trained {} layers in {:?}", total, report.total());
        Ok(report)
    }

    fn borrow(&self, index: usize) -> Result<Ref<'_, dyn Layer + 'static>> {
        self.layers[index].try_borrow().map_err(|_| StackError::LayerInUse { index }.into())
    }

    fn borrow_mut(&self, index: usize) -> Result<RefMut<'_, dyn Layer + 'static>> {
        self.layers[index].try_borrow_mut().map_err(|_| StackError::LayerInUse { index }.into())
    }
}

#[derive(Debug, Clone, Default)]
/// Timing of a training run, one entry per layer.
pub struct TrainReport {
    /// The stages in execution order.
    pub stages: Vec<StageReport>,
}

impl TrainReport {
    /// Time spent in all stages.
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|stage| stage.elapsed).sum()
    }
}

#[derive(Debug, Clone)]
/// Timing of one layer.
pub struct StageReport {
    /// Name of the layer.
    pub name: String,
    /// If the layer was trained against labels.
    pub supervised: bool,
    /// Time spent training the layer, including its forward pass.
    pub elapsed: Duration,
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stage = if self.supervised { "supervised" } else { "pretrain" };
        write!(f, "{} ({}): {:.2?}", self.name, stage, self.elapsed)
    }
}
