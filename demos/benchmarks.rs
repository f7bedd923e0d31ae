#[macro_use]
extern crate timeit;
extern crate env_logger;
extern crate rand;
extern crate tempfile;
extern crate strata;

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strata::dataset::*;
use strata::normalize::normalize_in_place;

fn main() {
    env_logger::init();

    let num_items = match env::args().nth(1).map(|arg| arg.parse::<usize>()) {
        Some(Ok(num_items)) => num_items,
        Some(Err(_)) => {
            println!("Sorry, the sample count must be a positive number.");
            return
        }
        None => {
            println!("No sample count specified. Default: 10000 (the size of the MNIST test set)");
            10_000
        }
    };

    let dir = tempfile::tempdir().expect("failed to create a scratch directory");
    let label_path = dir.path().join("t10k-labels-idx1-ubyte");
    let image_path = dir.path().join("t10k-images-idx3-ubyte");
    write_synthetic_mnist(&label_path, &image_path, num_items);

    bench_profile("decode_labels", || {
        decode_labels(&label_path).unwrap();
    }, 10, num_items);
    bench_profile("decode_images", || {
        decode_images(&image_path).unwrap();
    }, 10, num_items);

    let images = decode_images(&image_path).unwrap();
    bench_profile("normalize_in_place", || {
        let mut table = images.clone();
        normalize_in_place(&mut table);
    }, 10, num_items);
}

// MNIST shaped data: 28x28 pixels and labels 0-9.
fn write_synthetic_mnist(label_path: &Path, image_path: &Path, num_items: usize) {
    let mut rng = StdRng::seed_from_u64(42);
    let labels: Vec<u8> = (0..num_items).map(|_| rng.gen_range(0..10)).collect();
    let pixels: Vec<u8> = (0..num_items * 28 * 28).map(|_| rng.gen()).collect();

    write_labels(&mut BufWriter::new(File::create(label_path).unwrap()), &labels).unwrap();
    write_images(&mut BufWriter::new(File::create(image_path).unwrap()), 28, 28, &pixels).unwrap();
}

// Warms up twice, then prints the average over `times` runs and the items per second.
#[inline(never)]
fn bench_profile<F: FnMut()>(name: &str, mut bench_func: F, times: usize, num_items: usize) {
    println!("Running benchmark {} on {} items", name, num_items);
    bench_func();
    bench_func();
    let seconds = timeit_loops!(times, {
        bench_func();
    });
    println!("{:<20} {:>12} {:>14.0} items/s", name, format_seconds(seconds), num_items as f64 / seconds);
}

fn format_seconds(seconds: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1.0, "s"), (1e-3, "ms"), (1e-6, "µs"), (1e-9, "ns")];
    let &(scale, unit) = UNITS.iter().find(|&&(scale, _)| seconds >= scale).unwrap_or(&UNITS[3]);
    format!("{:.3} {}", seconds / scale, unit)
}
