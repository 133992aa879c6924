use super::error::{Error, Result};
use super::float::BigFloat;
use az::SaturatingCast;
use core::cmp::Ordering;
use gmp_mpfr_sys::gmp;

/// A value in the form `value * 2^exp`, where `0.5 <= |value| < 1` (or both
/// fields are zero). This is a cheap way to look at the magnitude of numbers
/// that don't fit in a double.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpDouble {
    pub exp: i64,
    pub value: f64,
}

impl ExpDouble {
    /// Returns `value * 2^exp` as a double. Large magnitudes overflow to
    /// infinity and tiny ones flush to zero.
    pub fn as_f64(&self) -> f64 {
        let exp: i32 = self.exp.saturating_cast();
        // Split the scaling so intermediate results don't overflow early.
        let half = exp / 2;
        self.value * 2f64.powi(half) * 2f64.powi(exp - half)
    }
}

/// Replace the content of a value, keeping its precision.
pub trait Assign<Src = Self> {
    fn assign(&mut self, src: Src);
}

impl Assign<&BigFloat> for BigFloat {
    fn assign(&mut self, src: &BigFloat) {
        unsafe { gmp::mpf_set(self.as_raw_mut(), src.as_raw()) }
    }
}

impl Assign for BigFloat {
    fn assign(&mut self, src: BigFloat) {
        self.assign(&src);
    }
}

impl Assign<i32> for BigFloat {
    fn assign(&mut self, src: i32) {
        unsafe { gmp::mpf_set_si(self.as_raw_mut(), src.into()) }
    }
}

impl Assign<u32> for BigFloat {
    fn assign(&mut self, src: u32) {
        unsafe { gmp::mpf_set_ui(self.as_raw_mut(), src.into()) }
    }
}

/// The engine traps on NaN and infinity.
impl Assign<f64> for BigFloat {
    fn assign(&mut self, src: f64) {
        unsafe { gmp::mpf_set_d(self.as_raw_mut(), src) }
    }
}

macro_rules! declare_from_primitive {
    ($prim:ty) => {
        impl From<$prim> for BigFloat {
            /// Create a value with the default precision.
            fn from(val: $prim) -> Self {
                let mut res = BigFloat::new(0);
                res.assign(val);
                res
            }
        }
    };
}

declare_from_primitive!(i32);
declare_from_primitive!(u32);
declare_from_primitive!(f64);

impl BigFloat {
    /// Assignment from an arbitrary-precision integer. Not implemented.
    pub fn assign_integer(&mut self, _src: &gmp::mpz_t) -> Result<()> {
        tracing::warn!("assignment from an integer is not implemented");
        Err(Error::UnsupportedConversion("integer"))
    }

    /// Assignment from an arbitrary-precision rational. Not implemented.
    pub fn assign_rational(&mut self, _src: &gmp::mpq_t) -> Result<()> {
        tracing::warn!("assignment from a rational is not implemented");
        Err(Error::UnsupportedConversion("rational"))
    }

    /// Returns the value as a double, truncating extra bits.
    pub fn as_f64(&self) -> f64 {
        unsafe { gmp::mpf_get_d(self.as_raw()) }
    }

    /// Returns the integral part of the value, saturated to the range of i32.
    pub fn to_i32(&self) -> i32 {
        if self.partial_cmp(&i32::MAX) == Some(Ordering::Greater) {
            return i32::MAX;
        }
        if self.partial_cmp(&i32::MIN) == Some(Ordering::Less) {
            return i32::MIN;
        }
        unsafe { gmp::mpf_get_si(self.as_raw()) }.saturating_cast()
    }

    /// Returns the integral part of the value, saturated to the range of u32.
    /// Negative values return zero.
    pub fn to_u32(&self) -> u32 {
        if self.is_negative() {
            return 0;
        }
        if self.partial_cmp(&u32::MAX) == Some(Ordering::Greater) {
            return u32::MAX;
        }
        unsafe { gmp::mpf_get_ui(self.as_raw()) }.saturating_cast()
    }

    /// Returns the value in the form `value * 2^exp`. See [`ExpDouble`].
    pub fn to_exp_double(&self) -> ExpDouble {
        let mut exp: core::ffi::c_long = 0;
        let value = unsafe { gmp::mpf_get_d_2exp(&mut exp, self.as_raw()) };
        ExpDouble {
            exp: exp.into(),
            value,
        }
    }
}

impl From<&BigFloat> for f64 {
    fn from(val: &BigFloat) -> Self {
        val.as_f64()
    }
}

impl From<&BigFloat> for i32 {
    fn from(val: &BigFloat) -> Self {
        val.to_i32()
    }
}

impl From<&BigFloat> for u32 {
    fn from(val: &BigFloat) -> Self {
        val.to_u32()
    }
}

#[test]
fn test_from_primitives() {
    assert_eq!(BigFloat::from(-17i32).to_i32(), -17);
    assert_eq!(BigFloat::from(i32::MIN).to_i32(), i32::MIN);
    assert_eq!(BigFloat::from(u32::MAX).to_u32(), u32::MAX);
    assert_eq!(BigFloat::from(0.0048828125).as_f64(), 0.0048828125);
    assert_eq!(BigFloat::from(-1e300).as_f64(), -1e300);
    assert_eq!(f64::from(&BigFloat::from(5.5)), 5.5);
    assert_eq!(i32::from(&BigFloat::from(-5.5)), -5);
    assert_eq!(u32::from(&BigFloat::from(5.5)), 5);
}

#[test]
fn test_truncation_toward_zero() {
    assert_eq!(BigFloat::from(2.99).to_i32(), 2);
    assert_eq!(BigFloat::from(-2.99).to_i32(), -2);
    assert_eq!(BigFloat::from(0.75).to_u32(), 0);
}

#[test]
fn test_integer_saturation() {
    let big = BigFloat::from(1e30);
    assert_eq!(big.to_i32(), i32::MAX);
    assert_eq!(big.to_u32(), u32::MAX);

    let small = BigFloat::from(-1e30);
    assert_eq!(small.to_i32(), i32::MIN);
    assert_eq!(small.to_u32(), 0);

    assert_eq!(BigFloat::from(-0.5).to_u32(), 0);
    assert_eq!(BigFloat::from(4294967296.0).to_u32(), u32::MAX);
    assert_eq!(BigFloat::from(2147483648.0).to_i32(), i32::MAX);
}

#[test]
fn test_assign_keeps_precision() {
    let mut x = BigFloat::new(300);
    let prec = x.precision();
    x.assign(1.25);
    assert_eq!(x.as_f64(), 1.25);
    x.assign(-9i32);
    assert_eq!(x.to_i32(), -9);
    x.assign(9u32);
    assert_eq!(x.to_u32(), 9);

    let y = BigFloat::from(0.5);
    x.assign(&y);
    assert_eq!(x, y);
    x.assign(BigFloat::from(3u32));
    assert_eq!(x, 3u32);
    assert_eq!(x.precision(), prec);
}

#[test]
fn test_exp_double() {
    let x = BigFloat::from(1024u32);
    let e = x.to_exp_double();
    assert_eq!(e, ExpDouble { exp: 11, value: 0.5 });
    assert_eq!(e.as_f64(), 1024.);

    let y = BigFloat::from(-0.375);
    let e = y.to_exp_double();
    assert_eq!(e, ExpDouble { exp: -1, value: -0.75 });

    let z = BigFloat::new(64);
    assert_eq!(z.to_exp_double(), ExpDouble { exp: 0, value: 0.0 });

    // Magnitudes beyond the range of a double are still reported.
    let huge = BigFloat::from(2u32).mul_2exp(5000);
    let e = huge.to_exp_double();
    assert_eq!(e.exp, 5002);
    assert_eq!(e.value, 0.5);
    assert_eq!(e.as_f64(), f64::INFINITY);
}

#[test]
fn test_unsupported_conversions() {
    use core::mem::MaybeUninit;

    let start = super::float::live_values();
    let mut x = BigFloat::from(1.5);
    unsafe {
        let mut z = MaybeUninit::uninit();
        gmp::mpz_init(z.as_mut_ptr());
        let mut z = z.assume_init();
        let res = x.assign_integer(&z);
        assert_eq!(res, Err(Error::UnsupportedConversion("integer")));
        gmp::mpz_clear(&mut z);

        let mut q = MaybeUninit::uninit();
        gmp::mpq_init(q.as_mut_ptr());
        let mut q = q.assume_init();
        let res = x.assign_rational(&q);
        assert_eq!(res, Err(Error::UnsupportedConversion("rational")));
        gmp::mpq_clear(&mut q);
    }
    // The destination is untouched.
    assert_eq!(x.as_f64(), 1.5);
    drop(x);
    assert_eq!(super::float::live_values(), start);
}
