//! Provides the capability interface every trainable layer implements.
//!
//! strata does not implement the mathematics of any layer. Restricted Boltzmann
//! machines, autoencoders, logistic regression and fully-connected layers are
//! supplied by the caller as implementations of [Layer][layer]; the
//! [LayerStack][stack] only sequences them.
//!
//! A layer takes part in a training run in one of two roles, described by [Stage][stage]:
//!
//! * __Pretraining__</br>
//! The layer learns a representation of its input without labels. Afterwards the
//! stack calls [forward][forward] on it and hands the output to the next layer.
//!
//! * __Supervised__</br>
//! The terminal layer of a stack learns against the label table. Its output is not
//! consumed by anything.
//!
//! [layer]: ./trait.Layer.html
//! [stack]: ../stack/struct.LayerStack.html
//! [stage]: ./enum.Stage.html
//! [forward]: ./trait.Layer.html#tymethod.forward
use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;
use ndarray::{Array2, ArrayView2};

/// A layer handle shared between the caller and a [LayerStack](../stack/struct.LayerStack.html).
pub type SharedLayer = Rc<RefCell<dyn Layer>>;

/// Wraps a layer into a handle that can be added to a stack while the caller keeps a clone.
pub fn shared<L: Layer + 'static>(layer: L) -> Rc<RefCell<L>> {
    Rc::new(RefCell::new(layer))
}

/// The capability set the [LayerStack](../stack/struct.LayerStack.html) drives.
pub trait Layer: fmt::Debug {
    /// The configuration the layer was created with.
    ///
    /// The stack reads the name and the declared widths to check that adjacent layers fit.
    fn config(&self) -> &LayerConfig;

    /// Computes the layer's representation of `input`.
    ///
    /// Must return a table with one row per input row and
    /// [output_size](./struct.LayerConfig.html#structfield.output_size) columns.
    fn forward(&self, input: ArrayView2<f32>) -> Result<Array2<f32>, LayerError>;

    /// Runs one training step over `input` in the given role.
    fn train(&mut self, input: ArrayView2<f32>, stage: Stage) -> Result<(), LayerError>;

    /// The name of the layer.
    fn name(&self) -> &str {
        &self.config().name
    }
}

#[derive(Debug, Clone, Copy)]
/// The role a layer plays in a training run.
pub enum Stage<'a> {
    /// Unsupervised representation learning on the current features.
    Pretrain,
    /// Discriminative training against the one-hot label table.
    Supervised {
        /// One row per input row.
        labels: ArrayView2<'a, f32>,
    },
}

impl<'a> Stage<'a> {
    /// Returns the label table if this is the supervised stage.
    pub fn labels(&self) -> Option<ArrayView2<'a, f32>> {
        match *self {
            Stage::Pretrain => None,
            Stage::Supervised { labels } => Some(labels),
        }
    }

    /// Returns if this is the supervised stage.
    pub fn is_supervised(&self) -> bool {
        self.labels().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Specifies configuration parameters for a Layer.
pub struct LayerConfig {
    /// The name of the Layer, used in logs and errors.
    pub name: String,
    /// The kind of layer.
    pub layer_type: LayerType,
    /// The activation the layer applies.
    ///
    /// Default: [LayerType::default_activation](./enum.LayerType.html#method.default_activation)
    pub activation: Activation,
    /// Number of input columns the layer accepts.
    ///
    /// Default: 0 (must be set before training)
    pub input_size: usize,
    /// Number of columns the layer outputs.
    ///
    /// Default: 0 (must be set before training)
    pub output_size: usize,
}

impl LayerConfig {
    /// Creates a new LayerConfig
    pub fn new<L: Into<LayerType>>(name: &str, layer_type: L) -> LayerConfig {
        let layer_type = layer_type.into();
        LayerConfig {
            name: name.to_owned(),
            activation: layer_type.default_activation(),
            layer_type,
            input_size: 0,
            output_size: 0,
        }
    }

    /// Sets the input and output widths.
    pub fn with_sizes(mut self, input_size: usize, output_size: usize) -> LayerConfig {
        self.input_size = input_size;
        self.output_size = output_size;
        self
    }

    /// Overrides the default activation of the layer type.
    pub fn with_activation(mut self, activation: Activation) -> LayerConfig {
        self.activation = activation;
        self
    }

    /// Checks if the configuration can be used for training.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("layer name is empty".to_owned());
        }
        if self.input_size == 0 {
            return Err(format!("input_size of `{}` is not set", self.name));
        }
        if self.output_size == 0 {
            return Err(format!("output_size of `{}` is not set", self.name));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The kinds of layers a stack is built from.
pub enum LayerType {
    /// Restricted Boltzmann Machine, used for pretraining.
    Rbm,
    /// Autoencoder, used for pretraining.
    Autoencoder {
        /// Corrupt the input before reconstruction.
        denoising: bool,
    },
    /// Logistic regression output layer.
    LogisticRegression,
    /// Fully-connected layer.
    FullyConnected,
}

impl LayerType {
    /// Returns the activation a layer of this type uses unless configured otherwise.
    pub fn default_activation(&self) -> Activation {
        match *self {
            LayerType::LogisticRegression => Activation::Softmax,
            _ => Activation::Sigmoid,
        }
    }

    /// Returns if layers of this type can learn against labels.
    pub fn supports_supervision(&self) -> bool {
        match *self {
            LayerType::Rbm | LayerType::Autoencoder { .. } => false,
            LayerType::LogisticRegression | LayerType::FullyConnected => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Activation functions a layer can be configured with.
pub enum Activation {
    /// Logistic sigmoid.
    Sigmoid,
    /// Softmax over the output columns.
    Softmax,
    /// Hyperbolic tangent.
    Tanh,
    /// No activation.
    Identity,
}

/// A failure reported by a [Layer](./trait.Layer.html) implementation.
///
/// The stack does not inspect it; it is wrapped with the layer's name and propagated.
pub struct LayerError {
    inner: Box<dyn StdError + Send + Sync>,
}

impl LayerError {
    /// Creates a LayerError from any error or message.
    pub fn new<E: Into<Box<dyn StdError + Send + Sync>>>(error: E) -> LayerError {
        LayerError { inner: error.into() }
    }

    /// Returns the wrapped error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.inner
    }
}

impl fmt::Debug for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for LayerError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}
