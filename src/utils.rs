//! Test helpers: deterministic pseudo-random inputs and interesting values.

/// Serializes the tests that change the process-wide default precision.
pub static DEFAULT_PRECISION_LOCK: std::sync::Mutex<()> =
    std::sync::Mutex::new(());

/// Returns finite doubles that various tests use to catch edge cases. The
/// engine has no representation for NaN and infinity.
pub fn get_special_test_values() -> [f64; 16] {
    [
        f64::EPSILON,
        -f64::EPSILON,
        0.000000000000000000000000000000000000001,
        f64::MIN,
        f64::MAX,
        f64::MIN_POSITIVE,
        std::f64::consts::PI,
        std::f64::consts::LN_2,
        std::f64::consts::SQRT_2,
        0.0,
        -0.0,
        10.,
        -10.,
        -0.00001,
        0.1,
        355. / 113.,
    ]
}

/// A Galois linear-feedback shift register, used as a reproducible random
/// number generator in tests.
pub struct Lfsr {
    state: u64,
}

impl Lfsr {
    // Taps for x^64 + x^63 + x^61 + x^60 + 1.
    const TAPS: u64 = 0xd800_0000_0000_0000;

    pub fn new() -> Lfsr {
        Self::new_with_seed(0)
    }

    pub fn new_with_seed(seed: u64) -> Lfsr {
        // The all-zeros state is a fixed point.
        Lfsr {
            state: 0x1337_1337_1337_1337 ^ seed | 1,
        }
    }

    fn step(&mut self) -> u64 {
        let out = self.state & 1;
        self.state >>= 1;
        if out == 1 {
            self.state ^= Self::TAPS;
        }
        out
    }

    pub fn get64(&mut self) -> u64 {
        (0..64).fold(0, |acc, _| (acc << 1) | self.step())
    }
}

#[test]
fn test_lfsr_balance() {
    let mut lfsr = Lfsr::new();
    let ones: u32 = (0..2000).map(|_| lfsr.get64().count_ones()).sum();
    let items = 2000. * 64.;
    assert!((ones as f64) < 0.55 * items);
    assert!((ones as f64) > 0.45 * items);
}

#[test]
fn test_lfsr_seeds_differ() {
    let a = Lfsr::new().get64();
    let b = Lfsr::new_with_seed(42).get64();
    assert_ne!(a, b);
    assert_eq!(a, Lfsr::new().get64());
}

#[test]
fn test_special_values_round_trip() {
    use crate::BigFloat;

    // Doubles have 53 bits, so any precision above that holds them exactly.
    for val in get_special_test_values() {
        let mut x = BigFloat::new(64);
        crate::Assign::assign(&mut x, val);
        assert_eq!(x.as_f64(), val);
        assert_eq!(x, val);
    }
}

#[test]
fn test_random_doubles_round_trip() {
    use crate::BigFloat;

    let mut lfsr = Lfsr::new();
    for _ in 0..1000 {
        let val = f64::from_bits(lfsr.get64());
        if !val.is_finite() {
            continue;
        }
        let x = BigFloat::from(val);
        assert_eq!(x.as_f64(), val);
        let neg = -&x;
        assert_eq!(neg.as_f64(), -val);
    }
}
