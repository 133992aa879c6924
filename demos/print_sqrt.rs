//! Print the square root of an integer with many digits.
//!  RUST_LOG=debug cargo run --example print_sqrt -- 2 10000

use mpfloat::BigFloat;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let val: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(2);
    let bits: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10000);

    let root = BigFloat::sqrt_u32_with_prec(val, bits);
    tracing::info!(val, bits, precision = root.precision(), "computed");
    println!("sqrt({}) = {}", val, root);

    // Squaring the root must give back the input, up to rounding.
    let square = BigFloat::mul_with_prec(&root, &root, bits);
    let err = BigFloat::sub_u32_with_prec(&square, val, bits).abs();
    println!("|root^2 - {}| = {:e}", val, err.as_f64());
}
