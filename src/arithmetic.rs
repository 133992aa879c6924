use super::float::BigFloat;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg};
use core::ops::{Sub, SubAssign};
use gmp_mpfr_sys::gmp;

// In-place operations. The result is computed by the engine and rounded to
// the precision of `self`, whatever the precision of the operands.
impl BigFloat {
    /// Stores `a + b` in `self`.
    pub fn set_add(&mut self, a: &Self, b: &Self) {
        unsafe { gmp::mpf_add(self.as_raw_mut(), a.as_raw(), b.as_raw()) }
    }

    /// Stores `a + b` in `self`.
    pub fn set_add_u32(&mut self, a: &Self, b: u32) {
        unsafe { gmp::mpf_add_ui(self.as_raw_mut(), a.as_raw(), b.into()) }
    }

    /// Stores `a - b` in `self`.
    pub fn set_sub(&mut self, a: &Self, b: &Self) {
        unsafe { gmp::mpf_sub(self.as_raw_mut(), a.as_raw(), b.as_raw()) }
    }

    /// Stores `a - b` in `self`.
    pub fn set_sub_u32(&mut self, a: &Self, b: u32) {
        unsafe { gmp::mpf_sub_ui(self.as_raw_mut(), a.as_raw(), b.into()) }
    }

    /// Stores `a - b` in `self`.
    pub fn set_u32_sub(&mut self, a: u32, b: &Self) {
        unsafe { gmp::mpf_ui_sub(self.as_raw_mut(), a.into(), b.as_raw()) }
    }

    /// Stores `a * b` in `self`.
    pub fn set_mul(&mut self, a: &Self, b: &Self) {
        unsafe { gmp::mpf_mul(self.as_raw_mut(), a.as_raw(), b.as_raw()) }
    }

    /// Stores `a * b` in `self`.
    pub fn set_mul_u32(&mut self, a: &Self, b: u32) {
        unsafe { gmp::mpf_mul_ui(self.as_raw_mut(), a.as_raw(), b.into()) }
    }

    /// Stores `a / b` in `self`. Division by zero is trapped by the engine.
    pub fn set_div(&mut self, a: &Self, b: &Self) {
        unsafe { gmp::mpf_div(self.as_raw_mut(), a.as_raw(), b.as_raw()) }
    }

    /// Stores `a / b` in `self`. Division by zero is trapped by the engine.
    pub fn set_div_u32(&mut self, a: &Self, b: u32) {
        unsafe { gmp::mpf_div_ui(self.as_raw_mut(), a.as_raw(), b.into()) }
    }

    /// Stores `a / b` in `self`. Division by zero is trapped by the engine.
    pub fn set_u32_div(&mut self, a: u32, b: &Self) {
        unsafe { gmp::mpf_ui_div(self.as_raw_mut(), a.into(), b.as_raw()) }
    }

    /// Stores `a ^ n` in `self`.
    pub fn set_pow_u32(&mut self, a: &Self, n: u32) {
        unsafe { gmp::mpf_pow_ui(self.as_raw_mut(), a.as_raw(), n.into()) }
    }

    /// Stores `-a` in `self`.
    pub fn set_neg(&mut self, a: &Self) {
        unsafe { gmp::mpf_neg(self.as_raw_mut(), a.as_raw()) }
    }

    /// Stores `|a|` in `self`.
    pub fn set_abs(&mut self, a: &Self) {
        unsafe { gmp::mpf_abs(self.as_raw_mut(), a.as_raw()) }
    }

    /// Stores the square root of `a` in `self`. The square root of a negative
    /// number is trapped by the engine.
    pub fn set_sqrt(&mut self, a: &Self) {
        unsafe { gmp::mpf_sqrt(self.as_raw_mut(), a.as_raw()) }
    }

    /// Stores the square root of `a` in `self`.
    pub fn set_sqrt_u32(&mut self, a: u32) {
        unsafe { gmp::mpf_sqrt_ui(self.as_raw_mut(), a.into()) }
    }

    /// Stores `a * 2^n` in `self`.
    pub fn set_mul_2exp(&mut self, a: &Self, n: u32) {
        unsafe { gmp::mpf_mul_2exp(self.as_raw_mut(), a.as_raw(), n.into()) }
    }

    /// Stores `a / 2^n` in `self`.
    pub fn set_div_2exp(&mut self, a: &Self, n: u32) {
        unsafe { gmp::mpf_div_2exp(self.as_raw_mut(), a.as_raw(), n.into()) }
    }
}

// Operations where `self` is both the destination and an operand. The engine
// allows the output to alias its inputs.
impl BigFloat {
    /// Computes `self = self + self`.
    pub fn double_assign(&mut self) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_add(p, p, p) }
    }

    /// Computes `self = -self`.
    pub fn neg_assign(&mut self) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_neg(p, p) }
    }

    /// Computes `self = |self|`.
    pub fn abs_assign(&mut self) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_abs(p, p) }
    }

    /// Computes `self = sqrt(self)`.
    pub fn sqrt_assign(&mut self) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_sqrt(p, p) }
    }

    /// Computes `self = self ^ n`.
    pub fn pow_assign(&mut self, n: u32) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_pow_ui(p, p, n.into()) }
    }

    /// Computes `self = self * 2^n`.
    pub fn mul_2exp_assign(&mut self, n: u32) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_mul_2exp(p, p, n.into()) }
    }

    /// Computes `self = self / 2^n`.
    pub fn div_2exp_assign(&mut self, n: u32) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_div_2exp(p, p, n.into()) }
    }

    fn inplace_add(&mut self, rhs: &Self) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_add(p, p, rhs.as_raw()) }
    }
    fn inplace_sub(&mut self, rhs: &Self) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_sub(p, p, rhs.as_raw()) }
    }
    fn inplace_mul(&mut self, rhs: &Self) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_mul(p, p, rhs.as_raw()) }
    }
    fn inplace_div(&mut self, rhs: &Self) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_div(p, p, rhs.as_raw()) }
    }
    fn inplace_add_u32(&mut self, rhs: u32) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_add_ui(p, p, rhs.into()) }
    }
    fn inplace_sub_u32(&mut self, rhs: u32) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_sub_ui(p, p, rhs.into()) }
    }
    fn inplace_mul_u32(&mut self, rhs: u32) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_mul_ui(p, p, rhs.into()) }
    }
    fn inplace_div_u32(&mut self, rhs: u32) {
        let p = self.as_raw_mut();
        unsafe { gmp::mpf_div_ui(p, p, rhs.into()) }
    }
}

// Allocating operations. Each one creates the result with `prec` bits of
// precision (zero selects the default precision) and hands the ownership to
// the caller.
impl BigFloat {
    /// Computes `a + b`.
    pub fn add_with_prec(a: &Self, b: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_add(a, b);
        rop
    }

    /// Computes `a + b`.
    pub fn add_u32_with_prec(a: &Self, b: u32, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_add_u32(a, b);
        rop
    }

    /// Computes `a - b`.
    pub fn sub_with_prec(a: &Self, b: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_sub(a, b);
        rop
    }

    /// Computes `a - b`.
    pub fn sub_u32_with_prec(a: &Self, b: u32, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_sub_u32(a, b);
        rop
    }

    /// Computes `a - b`.
    pub fn u32_sub_with_prec(a: u32, b: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_u32_sub(a, b);
        rop
    }

    /// Computes `a * b`.
    pub fn mul_with_prec(a: &Self, b: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_mul(a, b);
        rop
    }

    /// Computes `a * b`.
    pub fn mul_u32_with_prec(a: &Self, b: u32, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_mul_u32(a, b);
        rop
    }

    /// Computes `a / b`.
    pub fn div_with_prec(a: &Self, b: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_div(a, b);
        rop
    }

    /// Computes `a / b`.
    pub fn div_u32_with_prec(a: &Self, b: u32, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_div_u32(a, b);
        rop
    }

    /// Computes `a / b`.
    pub fn u32_div_with_prec(a: u32, b: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_u32_div(a, b);
        rop
    }

    /// Computes `a ^ n`.
    pub fn pow_with_prec(a: &Self, n: u32, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_pow_u32(a, n);
        rop
    }

    /// Computes `-a`.
    pub fn neg_with_prec(a: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_neg(a);
        rop
    }

    /// Computes `|a|`.
    pub fn abs_with_prec(a: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_abs(a);
        rop
    }

    /// Computes the square root of `a`.
    pub fn sqrt_with_prec(a: &Self, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_sqrt(a);
        rop
    }

    /// Computes the square root of `a`.
    pub fn sqrt_u32_with_prec(a: u32, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_sqrt_u32(a);
        rop
    }

    /// Computes `a * 2^n`.
    pub fn mul_2exp_with_prec(a: &Self, n: u32, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_mul_2exp(a, n);
        rop
    }

    /// Computes `a / 2^n`.
    pub fn div_2exp_with_prec(a: &Self, n: u32, prec: u32) -> Self {
        let mut rop = Self::new(prec);
        rop.set_div_2exp(a, n);
        rop
    }

    /// Returns the number raised to the power of `n`, with the default
    /// precision.
    pub fn pow(&self, n: u32) -> Self {
        Self::pow_with_prec(self, n, 0)
    }

    /// Returns the absolute value, with the default precision.
    pub fn abs(&self) -> Self {
        Self::abs_with_prec(self, 0)
    }

    /// Returns the square root, with the default precision.
    pub fn sqrt(&self) -> Self {
        Self::sqrt_with_prec(self, 0)
    }

    /// Returns the square root of `a`, with the default precision.
    pub fn sqrt_u32(a: u32) -> Self {
        Self::sqrt_u32_with_prec(a, 0)
    }

    /// Returns `self * 2^n`, with the default precision.
    pub fn mul_2exp(&self, n: u32) -> Self {
        Self::mul_2exp_with_prec(self, n, 0)
    }

    /// Returns `self / 2^n`, with the default precision.
    pub fn div_2exp(&self, n: u32) -> Self {
        Self::div_2exp_with_prec(self, n, 0)
    }
}

macro_rules! declare_operator {
    ($trait_name:ident,
     $func_name:ident,
     $alloc_name:ident) => {
        // &Self + &Self -> Self
        impl $trait_name<&BigFloat> for &BigFloat {
            type Output = BigFloat;
            fn $func_name(self, rhs: &BigFloat) -> BigFloat {
                BigFloat::$alloc_name(self, rhs, 0)
            }
        }

        // Self + &Self -> Self
        impl $trait_name<&BigFloat> for BigFloat {
            type Output = BigFloat;
            fn $func_name(self, rhs: &BigFloat) -> BigFloat {
                BigFloat::$alloc_name(&self, rhs, 0)
            }
        }

        // &Self + Self -> Self
        impl $trait_name<BigFloat> for &BigFloat {
            type Output = BigFloat;
            fn $func_name(self, rhs: BigFloat) -> BigFloat {
                BigFloat::$alloc_name(self, &rhs, 0)
            }
        }

        // Self + Self -> Self
        impl $trait_name for BigFloat {
            type Output = BigFloat;
            fn $func_name(self, rhs: BigFloat) -> BigFloat {
                BigFloat::$alloc_name(&self, &rhs, 0)
            }
        }
    };
}

declare_operator!(Add, add, add_with_prec);
declare_operator!(Sub, sub, sub_with_prec);
declare_operator!(Mul, mul, mul_with_prec);
declare_operator!(Div, div, div_with_prec);

macro_rules! declare_u32_operator {
    ($trait_name:ident,
     $func_name:ident,
     $alloc_name:ident,
     $rev_alloc_name:ident) => {
        // &Self + u32 -> Self
        impl $trait_name<u32> for &BigFloat {
            type Output = BigFloat;
            fn $func_name(self, rhs: u32) -> BigFloat {
                BigFloat::$alloc_name(self, rhs, 0)
            }
        }

        // Self + u32 -> Self
        impl $trait_name<u32> for BigFloat {
            type Output = BigFloat;
            fn $func_name(self, rhs: u32) -> BigFloat {
                BigFloat::$alloc_name(&self, rhs, 0)
            }
        }

        // u32 + &Self -> Self
        impl $trait_name<&BigFloat> for u32 {
            type Output = BigFloat;
            fn $func_name(self, rhs: &BigFloat) -> BigFloat {
                BigFloat::$rev_alloc_name(self, rhs)
            }
        }

        // u32 + Self -> Self
        impl $trait_name<BigFloat> for u32 {
            type Output = BigFloat;
            fn $func_name(self, rhs: BigFloat) -> BigFloat {
                BigFloat::$rev_alloc_name(self, &rhs)
            }
        }
    };
}

// Adapters that put the u32 operand first, for the operator macro.
impl BigFloat {
    fn u32_add(a: u32, b: &Self) -> Self {
        Self::add_u32_with_prec(b, a, 0)
    }
    fn u32_sub(a: u32, b: &Self) -> Self {
        Self::u32_sub_with_prec(a, b, 0)
    }
    fn u32_mul(a: u32, b: &Self) -> Self {
        Self::mul_u32_with_prec(b, a, 0)
    }
    fn u32_div(a: u32, b: &Self) -> Self {
        Self::u32_div_with_prec(a, b, 0)
    }
}

declare_u32_operator!(Add, add, add_u32_with_prec, u32_add);
declare_u32_operator!(Sub, sub, sub_u32_with_prec, u32_sub);
declare_u32_operator!(Mul, mul, mul_u32_with_prec, u32_mul);
declare_u32_operator!(Div, div, div_u32_with_prec, u32_div);

impl Neg for &BigFloat {
    type Output = BigFloat;
    fn neg(self) -> BigFloat {
        BigFloat::neg_with_prec(self, 0)
    }
}

impl Neg for BigFloat {
    type Output = BigFloat;
    fn neg(self) -> BigFloat {
        BigFloat::neg_with_prec(&self, 0)
    }
}

macro_rules! declare_assign_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident,
     $func_u32_impl_name:ident) => {
        impl $trait_name for BigFloat {
            fn $func_name(&mut self, rhs: Self) {
                self.$func_impl_name(&rhs);
            }
        }

        impl $trait_name<&BigFloat> for BigFloat {
            fn $func_name(&mut self, rhs: &Self) {
                self.$func_impl_name(rhs);
            }
        }

        impl $trait_name<u32> for BigFloat {
            fn $func_name(&mut self, rhs: u32) {
                self.$func_u32_impl_name(rhs);
            }
        }
    };
}

declare_assign_operator!(AddAssign, add_assign, inplace_add, inplace_add_u32);
declare_assign_operator!(SubAssign, sub_assign, inplace_sub, inplace_sub_u32);
declare_assign_operator!(MulAssign, mul_assign, inplace_mul, inplace_mul_u32);
declare_assign_operator!(DivAssign, div_assign, inplace_div, inplace_div_u32);

#[test]
fn test_add() {
    let r = BigFloat::parse("1.5").unwrap() + BigFloat::parse("3.25").unwrap();
    assert_eq!(r.as_f64(), 4.75);

    let r = BigFloat::parse("1.5").unwrap() + 100u32;
    assert_eq!(r.as_f64(), 101.5);
    let r = 100u32 + &BigFloat::from(1.5);
    assert_eq!(r.as_f64(), 101.5);
}

#[test]
fn test_subtract() {
    let r = BigFloat::from(7.25) - BigFloat::from(3.125);
    assert_eq!(r.as_f64(), 4.125);

    let r = BigFloat::from(7.25) - 10u32;
    assert_eq!(r.as_f64(), -2.75);

    let r = 10u32 - BigFloat::from(7.25);
    assert_eq!(r.as_f64(), 2.75);
}

#[test]
fn test_multiply() {
    let r = BigFloat::from(2.5) * BigFloat::from(2.5);
    assert_eq!(r.as_f64(), 6.25);

    let r = BigFloat::from(2.5) * 2147483647u32;
    assert_eq!(r.as_f64(), 5368709117.5);
    let r = 4u32 * &BigFloat::from(2.5);
    assert_eq!(r.as_f64(), 10.);
}

#[test]
fn test_divide() {
    let a = BigFloat::parse(&i64::MIN.to_string()).unwrap();
    let r = a / BigFloat::from(i32::MIN);
    assert_eq!(r.as_f64(), (1u64 << 32) as f64);

    let a = BigFloat::parse(&(1u64 << 57).to_string()).unwrap();
    let r = a / (1u32 << 31);
    assert_eq!(r.as_f64(), (1 << 26) as f64);

    let r = 5u32 / BigFloat::from(1u32 << 10);
    assert_eq!(r.as_f64(), 0.0048828125);
}

#[test]
fn test_power() {
    let r = BigFloat::from(2.5).pow(10);
    assert_eq!(r.as_f64(), 9536.7431640625);
    assert_eq!(r.to_string(), "9536.7431640625");
    assert_eq!(BigFloat::from(7u32).pow(0), 1u32);
}

#[test]
fn test_negate() {
    let r = -BigFloat::from(2.5);
    assert_eq!(r.as_f64(), -2.5);
    let r = -&r;
    assert_eq!(r.as_f64(), 2.5);

    let mut x = BigFloat::from(-2.5);
    x.neg_assign();
    assert_eq!(x.as_f64(), 2.5);
    x.neg_assign();
    assert_eq!(x.as_f64(), -2.5);
}

#[test]
fn test_sqrt_and_abs() {
    assert_eq!(BigFloat::from(6.25).sqrt().as_f64(), 2.5);
    assert_eq!(BigFloat::sqrt_u32(144).to_u32(), 12);
    assert_eq!(BigFloat::from(-6.25).abs().as_f64(), 6.25);

    let mut x = BigFloat::from(-16i32);
    x.abs_assign();
    x.sqrt_assign();
    assert_eq!(x.to_i32(), 4);

    // sqrt(2)^2 is 2 up to the last bits of the precision.
    let root = BigFloat::sqrt_u32_with_prec(2, 1000);
    let square = BigFloat::mul_with_prec(&root, &root, 1000);
    let diff = (&square - 2u32).abs();
    assert!(diff < BigFloat::from(1u32).div_2exp(900));
    assert!(root.to_string().starts_with("1.41421356237309504880168872420969807856"));
}

#[test]
fn test_scale_by_powers_of_two() {
    let x = BigFloat::from(3u32);
    assert_eq!(x.mul_2exp(10).to_u32(), 3072);
    assert_eq!(x.div_2exp(3).as_f64(), 0.375);

    let mut y = x.clone();
    y.mul_2exp_assign(4);
    assert_eq!(y.to_u32(), 48);
    y.div_2exp_assign(6);
    assert_eq!(y.as_f64(), 0.75);
    y.pow_assign(2);
    assert_eq!(y.as_f64(), 0.5625);
}

#[test]
fn test_result_precision() {
    let a = BigFloat::new(2000);
    let b = BigFloat::new(2000);
    // The result precision is the requested one, not the operands' one.
    let r = BigFloat::add_with_prec(&a, &b, 100);
    assert!(r.precision() >= 100 && r.precision() < 2000);
    let r = BigFloat::div_u32_with_prec(&a, 3, 3000);
    assert!(r.precision() >= 3000);

    // In-place operations keep the destination's precision.
    let mut dest = BigFloat::new(64);
    let prec = dest.precision();
    let third = BigFloat::u32_div_with_prec(1, &BigFloat::from(3u32), 4000);
    dest.set_mul_u32(&third, 3);
    assert_eq!(dest.precision(), prec);
}

#[test]
fn test_in_place_rounds_to_destination() {
    // 1 + 2^-300 needs 301 bits. A narrow destination loses the tail.
    let one = BigFloat::from(1u32);
    let tiny = BigFloat::div_2exp_with_prec(&one, 300, 256);

    let mut narrow = BigFloat::new(32);
    narrow.set_add(&one, &tiny);
    assert_eq!(narrow, one);

    let mut wide = BigFloat::new(384);
    wide.set_add(&one, &tiny);
    assert!(wide > one);
    wide.set_sub(&wide.clone(), &one);
    assert_eq!(wide, tiny);
}

#[test]
fn test_all_in_place_forms() {
    let a = BigFloat::from(10.5);
    let b = BigFloat::from(2u32);
    let mut r = BigFloat::new(128);

    r.set_add(&a, &b);
    assert_eq!(r.as_f64(), 12.5);
    r.set_add_u32(&a, 3);
    assert_eq!(r.as_f64(), 13.5);
    r.set_sub(&a, &b);
    assert_eq!(r.as_f64(), 8.5);
    r.set_sub_u32(&a, 11);
    assert_eq!(r.as_f64(), -0.5);
    r.set_u32_sub(11, &a);
    assert_eq!(r.as_f64(), 0.5);
    r.set_mul(&a, &b);
    assert_eq!(r.as_f64(), 21.);
    r.set_mul_u32(&a, 4);
    assert_eq!(r.as_f64(), 42.);
    r.set_div(&a, &b);
    assert_eq!(r.as_f64(), 5.25);
    r.set_div_u32(&a, 4);
    assert_eq!(r.as_f64(), 2.625);
    r.set_u32_div(21, &a);
    assert_eq!(r.as_f64(), 2.);
    r.set_pow_u32(&b, 20);
    assert_eq!(r.to_u32(), 1 << 20);
    r.set_neg(&a);
    assert_eq!(r.as_f64(), -10.5);
    r.set_abs(&r.clone());
    assert_eq!(r.as_f64(), 10.5);
    r.set_sqrt(&BigFloat::from(0.25));
    assert_eq!(r.as_f64(), 0.5);
    r.set_sqrt_u32(81);
    assert_eq!(r.to_u32(), 9);
    r.set_mul_2exp(&a, 1);
    assert_eq!(r.as_f64(), 21.);
    r.set_div_2exp(&a, 1);
    assert_eq!(r.as_f64(), 5.25);
}

#[test]
fn test_all_allocating_forms() {
    type BF = BigFloat;
    let a = BF::from(10.5);
    let b = BF::from(2u32);

    assert_eq!(BF::add_with_prec(&a, &b, 0).as_f64(), 12.5);
    assert_eq!(BF::add_u32_with_prec(&a, 3, 0).as_f64(), 13.5);
    assert_eq!(BF::sub_with_prec(&a, &b, 0).as_f64(), 8.5);
    assert_eq!(BF::sub_u32_with_prec(&a, 11, 0).as_f64(), -0.5);
    assert_eq!(BF::u32_sub_with_prec(11, &a, 0).as_f64(), 0.5);
    assert_eq!(BF::mul_with_prec(&a, &b, 0).as_f64(), 21.);
    assert_eq!(BF::mul_u32_with_prec(&a, 4, 0).as_f64(), 42.);
    assert_eq!(BF::div_with_prec(&a, &b, 0).as_f64(), 5.25);
    assert_eq!(BF::div_u32_with_prec(&a, 4, 0).as_f64(), 2.625);
    assert_eq!(BF::u32_div_with_prec(21, &a, 0).as_f64(), 2.);
    assert_eq!(BF::pow_with_prec(&b, 20, 0).to_u32(), 1 << 20);
    assert_eq!(BF::neg_with_prec(&a, 0).as_f64(), -10.5);
    assert_eq!(BF::abs_with_prec(&-&a, 0).as_f64(), 10.5);
    assert_eq!(BF::sqrt_with_prec(&BF::from(0.25), 0).as_f64(), 0.5);
    assert_eq!(BF::sqrt_u32_with_prec(81, 0).to_u32(), 9);
    assert_eq!(BF::mul_2exp_with_prec(&a, 1, 0).as_f64(), 21.);
    assert_eq!(BF::div_2exp_with_prec(&a, 1, 0).as_f64(), 5.25);
}

#[test]
fn test_operator_combinations() {
    let x = BigFloat::from(10u32);
    let y = BigFloat::from(4u32);

    assert_eq!((&x + &y).to_u32(), 14);
    assert_eq!((x.clone() - &y).to_u32(), 6);
    assert_eq!((&x * y.clone()).to_u32(), 40);
    assert_eq!((x.clone() / y.clone()).as_f64(), 2.5);
    assert_eq!((&x - 3u32).to_u32(), 7);
    assert_eq!((x.clone() + 3u32).to_u32(), 13);
    assert_eq!((3u32 - &x).to_i32(), -7);
    assert_eq!((3u32 + x.clone()).to_u32(), 13);
    assert_eq!((5u32 * &x).to_u32(), 50);
    assert_eq!((x.clone() * 5u32).to_u32(), 50);
    assert_eq!((20u32 / x.clone()).to_u32(), 2);
    assert_eq!((&x / 4u32).as_f64(), 2.5);

    // Newton-Raphson for the square root of 5.
    let n = BigFloat::from(5u32);
    let mut r = n.clone();
    for _ in 0..10 {
        r = (&r + &n / &r) / 2u32;
    }
    assert!(r.to_string().starts_with("2.236067977499789696"));
}

#[test]
fn test_compound_assignment() {
    let mut x = BigFloat::from(1.5);
    let y = BigFloat::from(0.25);
    x += &y;
    assert_eq!(x.as_f64(), 1.75);
    x -= y.clone();
    assert_eq!(x.as_f64(), 1.5);
    x *= &y;
    assert_eq!(x.as_f64(), 0.375);
    x /= &y;
    assert_eq!(x.as_f64(), 1.5);
    x += 2u32;
    assert_eq!(x.as_f64(), 3.5);
    x -= 1u32;
    assert_eq!(x.as_f64(), 2.5);
    x *= 4u32;
    assert_eq!(x.as_f64(), 10.);
    x /= 8u32;
    assert_eq!(x.as_f64(), 1.25);
}

#[test]
fn test_aliasing() {
    // x := x + x, with the destination passed as both operands.
    let mut x = BigFloat::parse("1.375").unwrap();
    let fresh = &x + &x;
    x.double_assign();
    assert_eq!(x, fresh);
    assert_eq!(x.as_f64(), 2.75);

    // The destination as the left operand.
    let y = BigFloat::from(0.25);
    let fresh = &x + &y;
    x += &y;
    assert_eq!(x, fresh);
}

#[test]
fn test_operators_release_temporaries() {
    use super::float::live_values;

    let start = live_values();
    {
        let a = BigFloat::from(3u32);
        let b = BigFloat::from(4u32);
        let c = (&a * &a + &b * &b).sqrt();
        assert_eq!(c.to_u32(), 5);
        let d = -(a + b) * 2u32 - 1u32;
        assert_eq!(d.to_i32(), -15);
    }
    assert_eq!(live_values(), start);
}

#[test]
fn test_random_integer_products() {
    use super::utils::Lfsr;

    let mut lfsr = Lfsr::new();
    for _ in 0..500 {
        let a = lfsr.get64() as u32;
        let b = lfsr.get64() as u32;
        let expected = a as u64 * b as u64;

        let prod = BigFloat::from(a) * b;
        assert_eq!(prod.to_string(), expected.to_string());

        let mut sum = BigFloat::new(128);
        sum.set_add_u32(&BigFloat::from(a), b);
        assert_eq!(sum.to_string(), (a as u64 + b as u64).to_string());

        if b != 0 {
            let back = &prod / b;
            assert_eq!(back.to_u32(), a);
        }
    }
}
