//! Calculate the value of PI using the Chudnovsky algorithm.
//!  cargo run --example calc_pi --release

use mpfloat::{set_default_precision, BigFloat};

fn main() {
    set_default_precision(256);

    // https://en.wikipedia.org/wiki/Chudnovsky_algorithm
    let iterations = 5u32;

    // Constants:
    let c1 = BigFloat::sqrt_u32(10005);
    let c2 = BigFloat::from(545140134u32);
    let c3 = BigFloat::parse("-262537412640768000").unwrap();
    let c16 = BigFloat::from(16u32);
    let c12 = BigFloat::from(12u32);

    // Initial state.
    let mut kc = BigFloat::from(6u32);
    let mut m = BigFloat::from(1u32);
    let mut l = BigFloat::from(13591409u32);
    let mut x = BigFloat::from(1u32);
    let mut s = BigFloat::from(13591409u32);

    for q in 1..iterations + 1 {
        let q3 = BigFloat::from(q).pow(3);
        let k3 = &kc * &(&kc * &kc);
        m = (k3 - (&kc * &c16)) * m / q3;
        l = &l + &c2;
        x = &x * &c3;
        s = s + (&(&m * &l) / &x);
        kc = &kc + &c12;
    }
    let pi = 426880u32 * (c1 / s);
    println!("pi = {}", pi);
    assert_eq!(pi.as_f64(), std::f64::consts::PI);
}
