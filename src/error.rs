//! Provides the error types of strata.
//!
//! Every fallible operation returns the crate wide [Error][error]. Failures are not
//! retried anywhere in the crate; they abort the current decode or training run and
//! are handed to the caller unchanged.
//!
//! [error]: ./enum.Error.html
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::layer::LayerError;

/// Result alias used throughout strata.
pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug, Error)]
/// The errors raised by decoding, normalization and training.
pub enum Error {
    /// A dataset file could not be opened or read.
    ///
    /// Also raised when the payload ends before the header's declared item count.
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A dataset file is structurally invalid.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A layer stack was misused or misconfigured.
    #[error(transparent)]
    Stack(#[from] StackError),
    /// A layer failed while training or forwarding.
    #[error("layer `{name}` failed: {source}")]
    Layer {
        /// Name of the failing layer, taken from its [LayerConfig](../layer/struct.LayerConfig.html).
        name: String,
        /// The failure reported by the layer.
        #[source]
        source: LayerError,
    },
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Error {
        Error::Io { path: path.into(), source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Structural validation failures of IDX files and decoded datasets.
pub enum FormatError {
    /// The header carries the wrong magic number.
    #[error("IDX format error: expected magic {expected:#010x}, found {found:#010x}")]
    BadMagic {
        /// The magic number for the expected file kind.
        expected: i32,
        /// The magic number read from the file.
        found: i32,
    },
    /// An item count or dimension in the header is zero or negative.
    #[error("IDX format error: `{field}` must be positive, found {value}")]
    NonPositive {
        /// The header field.
        field: &'static str,
        /// The value read from the file.
        value: i32,
    },
    /// The header declares more values than fit in memory addresses.
    #[error("IDX format error: dimensions {dimensions:?} overflow the addressable size")]
    TooLarge {
        /// The dimensions read from the file.
        dimensions: [i32; 3],
    },
    /// Image and label files describe a different number of samples.
    #[error("dataset format error: {images} images but {labels} labels")]
    RowMismatch {
        /// Rows of the image table.
        images: usize,
        /// Rows of the label table.
        labels: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Misuse or misconfiguration of a [LayerStack](../stack/struct.LayerStack.html).
pub enum StackError {
    /// `train` was called on a stack without layers.
    #[error("layer stack is empty")]
    Empty,
    /// A layer was added after training started.
    #[error("layer stack is sealed once training has started")]
    Sealed,
    /// `train` was called a second time.
    #[error("layer stack has already been trained")]
    AlreadyTrained,
    /// The input and label tables have different row counts.
    #[error("{images} input rows but {labels} label rows")]
    RowMismatch {
        /// Rows of the feature table.
        images: usize,
        /// Rows of the label table.
        labels: usize,
    },
    /// A layer handle was borrowed elsewhere while the stack needed it.
    #[error("layer at position {index} is borrowed elsewhere")]
    LayerInUse {
        /// Position of the layer in the stack.
        index: usize,
    },
    /// A layer's configuration is not usable.
    #[error("layer `{layer}` is misconfigured: {reason}")]
    InvalidConfig {
        /// Name of the layer.
        layer: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Adjacent widths of the stack do not line up.
    #[error("layer `{layer}` expects {expected} {what} columns, found {found}")]
    ShapeMismatch {
        /// Name of the layer whose configuration does not fit.
        layer: String,
        /// `input` or `output`.
        what: &'static str,
        /// Width declared by the layer.
        expected: usize,
        /// Width it would actually be given.
        found: usize,
    },
    /// A layer produced an output table of the wrong shape.
    #[error("layer `{layer}` produced a {found:?} table, expected {expected:?}")]
    OutputShape {
        /// Name of the layer.
        layer: String,
        /// `(rows, columns)` the layer should have produced.
        expected: (usize, usize),
        /// `(rows, columns)` it did produce.
        found: (usize, usize),
    },
}
