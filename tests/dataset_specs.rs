extern crate strata;
extern crate rand;
extern crate tempfile;
extern crate byteorder;

#[cfg(test)]
mod dataset_spec {
    use std::fs::File;
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};
    use byteorder::{BigEndian, WriteBytesExt};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use strata::dataset::*;
    use strata::{Error, FormatError};

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().write_all(bytes).unwrap();
        path
    }

    fn label_file(dir: &Path, labels: &[u8]) -> PathBuf {
        let mut bytes = vec![];
        write_labels(&mut bytes, labels).unwrap();
        write_file(dir, "labels-idx1-ubyte", &bytes)
    }

    fn image_file(dir: &Path, rows: usize, cols: usize, pixels: &[u8]) -> PathBuf {
        let mut bytes = vec![];
        write_images(&mut bytes, rows, cols, pixels).unwrap();
        write_file(dir, "images-idx3-ubyte", &bytes)
    }

    #[test]
    fn labels_are_one_hot() {
        let mut rng = StdRng::seed_from_u64(7);
        let dir = tempfile::tempdir().unwrap();
        for _ in 0..5 {
            let n = rng.gen_range(1..50);
            let codes: Vec<u8> = (0..n).map(|_| rng.gen_range(0..10)).collect();
            let max = *codes.iter().max().unwrap() as usize;

            let labels = decode_labels(label_file(dir.path(), &codes)).unwrap();
            assert_eq!(labels.dim(), (n, max + 1));
            for (row, &code) in labels.outer_iter().zip(codes.iter()) {
                assert_eq!(row.iter().filter(|&&x| x == 1f32).count(), 1);
                assert_eq!(row.iter().filter(|&&x| x == 0f32).count(), max);
                assert_eq!(row[code as usize], 1f32);
            }
        }
    }

    #[test]
    fn label_bytes_above_127_are_unsigned() {
        let dir = tempfile::tempdir().unwrap();
        let labels = decode_labels(label_file(dir.path(), &[200, 3])).unwrap();
        assert_eq!(labels.dim(), (2, 201));
        assert_eq!(labels[[0, 200]], 1f32);
        assert_eq!(labels[[1, 3]], 1f32);
    }

    #[test]
    fn altered_label_magic_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = vec![];
        write_labels(&mut bytes, &[0, 1, 2]).unwrap();
        bytes[3] = 0x03;
        let path = write_file(dir.path(), "labels", &bytes);
        match decode_labels(&path) {
            Err(Error::Format(FormatError::BadMagic { expected, found })) => {
                assert_eq!(expected, LABEL_MAGIC);
                assert_eq!(found, IMAGE_MAGIC);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn zero_label_count_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = label_file(dir.path(), &[]);
        match decode_labels(&path) {
            Err(Error::Format(FormatError::NonPositive { field: "num_items", value: 0 })) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_io_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t10k-labels-idx1-ubyte");
        match decode_labels(&path) {
            Err(Error::Io { path: failed, source }) => {
                assert_eq!(failed, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result {:?}", other),
        }
        let path = dir.path().join("t10k-images-idx3-ubyte");
        match decode_images(&path) {
            Err(Error::Io { path: failed, source }) => {
                assert_eq!(failed, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn images_keep_raw_byte_values() {
        let mut rng = StdRng::seed_from_u64(11);
        let dir = tempfile::tempdir().unwrap();
        let (n, rows, cols) = (3, 4, 5);
        let pixels: Vec<u8> = (0..n * rows * cols).map(|_| rng.gen()).collect();

        let images = decode_images(image_file(dir.path(), rows, cols, &pixels)).unwrap();
        assert_eq!(images.dim(), (n, rows * cols));
        for (value, &pixel) in images.iter().zip(pixels.iter()) {
            assert_eq!(*value, f32::from(pixel));
        }
    }

    #[test]
    fn image_header_is_validated() {
        let dir = tempfile::tempdir().unwrap();

        let mut bytes = vec![];
        bytes.write_i32::<BigEndian>(LABEL_MAGIC).unwrap();
        for &dim in &[1, 2, 2] {
            bytes.write_i32::<BigEndian>(dim).unwrap();
        }
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        let path = write_file(dir.path(), "bad-magic", &bytes);
        match decode_images(&path) {
            Err(Error::Format(FormatError::BadMagic { expected: IMAGE_MAGIC, found: LABEL_MAGIC })) => {}
            other => panic!("unexpected result {:?}", other),
        }

        let mut bytes = vec![];
        bytes.write_i32::<BigEndian>(IMAGE_MAGIC).unwrap();
        for &dim in &[1, 2, -2] {
            bytes.write_i32::<BigEndian>(dim).unwrap();
        }
        let path = write_file(dir.path(), "bad-cols", &bytes);
        match decode_images(&path) {
            Err(Error::Format(FormatError::NonPositive { field: "num_cols", value: -2 })) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn truncated_images_are_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = vec![];
        write_images(&mut bytes, 2, 2, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        bytes.truncate(bytes.len() - 3);
        let path = write_file(dir.path(), "short", &bytes);
        match decode_images(&path) {
            Err(Error::Io { source, .. }) => assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn huge_image_header_without_payload_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = vec![];
        bytes.write_i32::<BigEndian>(0x0000_0803).unwrap();
        for &dim in &[0x0100_0000, 2, 2] {
            bytes.write_i32::<BigEndian>(dim).unwrap();
        }
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        let path = write_file(dir.path(), "huge", &bytes);
        match decode_images(&path) {
            Err(Error::Io { path: failed, source }) => {
                assert_eq!(failed, path);
                assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
            }
            other => panic!("unexpected result {:?}", other),
        }

        bytes.truncate(4);
        for &dim in &[i32::MAX; 3] {
            bytes.write_i32::<BigEndian>(dim).unwrap();
        }
        let path = write_file(dir.path(), "overflow", &bytes);
        match decode_images(&path) {
            Err(Error::Format(FormatError::TooLarge { .. })) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn two_images_and_labels_decode() {
        let dir = tempfile::tempdir().unwrap();
        let labels = decode_labels(label_file(dir.path(), &[0, 1])).unwrap();
        let images = decode_images(image_file(dir.path(), 2, 2, &[0, 1, 2, 3, 4, 5, 6, 7])).unwrap();

        assert_eq!(images.dim(), (2, 4));
        assert_eq!(images.row(1).to_vec(), vec![4f32, 5f32, 6f32, 7f32]);
        assert_eq!(labels, LabelTable::eye(2));
    }

    #[test]
    fn load_pairs_and_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatasetConfig::new(label_file(dir.path(), &[0, 1]),
                                        image_file(dir.path(), 1, 2, &[1, 0, 3, 4]));
        let dataset = Dataset::load(&config).unwrap();
        assert_eq!(dataset.images.row(0).to_vec(), vec![-1f32, -0.125f32]);
        assert_eq!(dataset.images.row(1).to_vec(), vec![1f32, 0.125f32]);

        let raw = Dataset::load(&DatasetConfig { normalize: false, ..config }).unwrap();
        assert_eq!(raw.images.row(1).to_vec(), vec![3f32, 4f32]);
    }

    #[test]
    fn load_rejects_unpaired_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatasetConfig::new(label_file(dir.path(), &[0, 1, 1]),
                                        image_file(dir.path(), 2, 2, &[0; 8]));
        match Dataset::load(&config) {
            Err(Error::Format(FormatError::RowMismatch { images: 2, labels: 3 })) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
