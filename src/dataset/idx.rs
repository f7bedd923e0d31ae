//! Decodes and encodes the IDX files labeled image corpora like MNIST ship in.
//!
//! An IDX file starts with a big-endian header: a magic number followed by one
//! 32 bit dimension per axis. Label files have a single axis (the item count), image
//! files have three (items, rows, columns). The payload is one unsigned byte per
//! value.
//!
//! Decoded images become an [ImageTable][image] with one row per image and one column
//! per pixel. Decoded labels become a one-hot [LabelTable][label] that is as wide as the
//! largest label in the file plus one.
//!
//! [image]: ./type.ImageTable.html
//! [label]: ./type.LabelTable.html
use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use ndarray::Array2;

use crate::error::{Error, FormatError, Result};

/// Magic number of IDX label files.
pub const LABEL_MAGIC: i32 = 0x0000_0801;
/// Magic number of IDX image files.
pub const IMAGE_MAGIC: i32 = 0x0000_0803;

/// Samples as rows, flattened pixels as columns.
pub type ImageTable = Array2<f32>;
/// Samples as rows, one-hot class indicators as columns.
pub type LabelTable = Array2<f32>;

const DIMENSION_NAMES: [&str; 3] = ["num_items", "num_rows", "num_cols"];

#[derive(Debug, Clone, PartialEq, Eq)]
/// The header of an IDX file, converted to host byte order.
pub struct IdxHeader {
    /// The magic number identifying the file kind.
    pub magic: i32,
    /// One entry per axis, the item count first.
    pub dimensions: Vec<i32>,
}

impl IdxHeader {
    /// Reads the magic number and `dimension_count` big-endian dimensions.
    pub fn read<R: Read>(reader: &mut R, dimension_count: usize) -> io::Result<IdxHeader> {
        let magic = reader.read_i32::<BigEndian>()?;
        let mut dimensions = Vec::with_capacity(dimension_count);
        for _ in 0..dimension_count {
            dimensions.push(reader.read_i32::<BigEndian>()?);
        }
        Ok(IdxHeader { magic, dimensions })
    }

    /// Checks the magic number and that every dimension is positive.
    pub fn validate(&self, expected_magic: i32) -> ::std::result::Result<(), FormatError> {
        if self.magic != expected_magic {
            return Err(FormatError::BadMagic { expected: expected_magic, found: self.magic });
        }
        for (&field, &value) in DIMENSION_NAMES.iter().zip(self.dimensions.iter()) {
            if value <= 0 {
                return Err(FormatError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// Number of items in the file.
    pub fn item_count(&self) -> usize {
        self.dimensions.first().map_or(0, |&n| n.max(0) as usize)
    }

    /// Number of values per item, the product of all dimensions but the first.
    ///
    /// Saturates at `usize::MAX`; use `value_count` to detect overflow.
    pub fn feature_count(&self) -> usize {
        self.dimensions.iter().skip(1).fold(1, |prod: usize, &dim| prod.saturating_mul(dim.max(0) as usize))
    }

    /// Total number of payload values, `None` if the product overflows `usize`.
    pub fn value_count(&self) -> Option<usize> {
        self.dimensions.iter().try_fold(1, |prod: usize, &dim| prod.checked_mul(dim.max(0) as usize))
    }
}

/// Decodes an IDX label file into a one-hot [LabelTable](./type.LabelTable.html).
pub fn decode_labels<P: AsRef<Path>>(path: P) -> Result<LabelTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_labels_from(BufReader::new(file), path)
}

/// Decodes an IDX image file into an [ImageTable](./type.ImageTable.html).
pub fn decode_images<P: AsRef<Path>>(path: P) -> Result<ImageTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_images_from(BufReader::new(file), path)
}

/// Decodes IDX labels from any byte source.
///
/// I/O errors are reported with the placeholder path `<reader>`.
pub fn read_labels<R: Read>(reader: R) -> Result<LabelTable> {
    read_labels_from(reader, Path::new("<reader>"))
}

/// Decodes IDX images from any byte source.
///
/// I/O errors are reported with the placeholder path `<reader>`.
pub fn read_images<R: Read>(reader: R) -> Result<ImageTable> {
    read_images_from(reader, Path::new("<reader>"))
}

fn read_labels_from<R: Read>(mut reader: R, origin: &Path) -> Result<LabelTable> {
    let header = IdxHeader::read(&mut reader, 1).map_err(|e| Error::io(origin, e))?;
    debug!("{}: label header {:?}", origin.display(), header);
    header.validate(LABEL_MAGIC)?;

    let num_items = header.item_count();
    let codes = read_payload(&mut reader, num_items).map_err(|e| Error::io(origin, e))?;
    let max_label = codes.iter().cloned().max().unwrap_or(0) as usize;

    let mut labels = LabelTable::zeros((num_items, max_label + 1));
    for (i, &code) in codes.iter().enumerate() {
        labels[[i, code as usize]] = 1f32;
    }
    info!("Decoded {} labels in {} classes from {}", num_items, max_label + 1, origin.display());

    Ok(labels)
}

fn read_images_from<R: Read>(mut reader: R, origin: &Path) -> Result<ImageTable> {
    let header = IdxHeader::read(&mut reader, 3).map_err(|e| Error::io(origin, e))?;
    debug!("{}: image header {:?}", origin.display(), header);
    header.validate(IMAGE_MAGIC)?;

    let value_count = header.value_count().ok_or_else(|| {
        let mut dimensions = [0; 3];
        for (slot, &dim) in dimensions.iter_mut().zip(header.dimensions.iter()) {
            *slot = dim;
        }
        FormatError::TooLarge { dimensions }
    })?;
    let num_items = header.item_count();
    let feature_count = header.feature_count();
    let pixels = read_payload(&mut reader, value_count).map_err(|e| Error::io(origin, e))?;
    let images = Array2::from_shape_vec((num_items, feature_count), pixels)
        .map_err(|e| Error::io(origin, io::Error::new(io::ErrorKind::InvalidData, e)))?
        .mapv(f32::from);
    info!("Decoded {} images of {} pixels from {}", num_items, feature_count, origin.display());

    Ok(images)
}

// Reads exactly `len` bytes without allocating for a length the stream cannot back.
fn read_payload<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut payload = Vec::new();
    reader.take(len as u64).read_to_end(&mut payload)?;
    if payload.len() < len {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof,
                                  format!("expected {} payload bytes, found {}", len, payload.len())));
    }
    Ok(payload)
}

/// Writes `labels` as an IDX label file.
pub fn write_labels<W: Write>(writer: &mut W, labels: &[u8]) -> io::Result<()> {
    writer.write_i32::<BigEndian>(LABEL_MAGIC)?;
    writer.write_i32::<BigEndian>(to_dimension(labels.len())?)?;
    writer.write_all(labels)
}

/// Writes `pixels` as an IDX image file of `num_rows` x `num_cols` images.
///
/// `pixels` holds the images back to back, each one row-major.
pub fn write_images<W: Write>(writer: &mut W, num_rows: usize, num_cols: usize, pixels: &[u8]) -> io::Result<()> {
    let feature_count = num_rows * num_cols;
    if feature_count == 0 || pixels.len() % feature_count != 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput,
                                  format!("{} pixels do not fill {}x{} images", pixels.len(), num_rows, num_cols)));
    }
    writer.write_i32::<BigEndian>(IMAGE_MAGIC)?;
    writer.write_i32::<BigEndian>(to_dimension(pixels.len() / feature_count)?)?;
    writer.write_i32::<BigEndian>(to_dimension(num_rows)?)?;
    writer.write_i32::<BigEndian>(to_dimension(num_cols)?)?;
    writer.write_all(pixels)
}

fn to_dimension(value: usize) -> io::Result<i32> {
    i32::try_from(value).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput,
                                                     format!("dimension {} does not fit an IDX header", value)))
}
