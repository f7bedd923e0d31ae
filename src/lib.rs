//! strata reads labeled image datasets in the IDX format, normalizes their features
//! and trains a stack of layers on them, layer by layer.
//!
//! ## Architecture
//!
//! A training pass flows through three parts:
//!
//! * __[Dataset][dataset]__</br>
//! Decodes an IDX label file into a one-hot table and an IDX image file into a table
//! with one row per image and one column per pixel.
//!
//! * __[Normalization][normalize]__</br>
//! Centers and rescales every pixel column of the image table in place.
//!
//! * __[LayerStack][stack]__</br>
//! Holds the layers of the model in order. Training runs the unsupervised pretraining
//! layers one after the other, each on the output of the one below, and finally trains
//! the top layer against the labels.
//!
//! The layers themselves (restricted Boltzmann machines, autoencoders, logistic
//! regression, ...) are not part of strata. Anything implementing the
//! [Layer][layer] trait can be stacked.
//!
//! [pipeline::run][run] ties the three together.
//!
//! ## Examples
//!
//! ```
//! # extern crate strata;
//! # use strata::dataset::{Dataset, ImageTable, LabelTable};
//! # use strata::stack::LayerStack;
//! # fn main() {
//! let dataset = Dataset::new(ImageTable::zeros((2, 4)), LabelTable::eye(2)).unwrap();
//! let mut stack = LayerStack::new();
//! // stack.add(...) the layers, then:
//! assert!(stack.train(&dataset.images, &dataset.labels).is_err()); // nothing to train yet
//! # }
//! ```
//!
//! [dataset]: ./dataset/index.html
//! [normalize]: ./normalize/index.html
//! [stack]: ./stack/index.html
//! [layer]: ./layer/trait.Layer.html
//! [run]: ./pipeline/fn.run.html
#![deny(missing_docs,
        missing_debug_implementations, missing_copy_implementations,
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unused_import_braces, unused_qualifications)]

#[macro_use]
extern crate log;

pub mod error;
pub mod dataset;
pub mod normalize;
pub mod layer;
pub mod stack;
pub mod pipeline;

pub use crate::error::{Error, FormatError, Result, StackError};
