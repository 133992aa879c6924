//! This module contains the implementation of string conversion.

extern crate alloc;

use super::engine::{check_format_base, check_parse_base, EngineStr};
use super::error::{Error, Result};
use super::float::BigFloat;
use alloc::ffi::CString;
use alloc::string::{String, ToString};
use core::fmt::Display;
use core::ptr;
use core::str::FromStr;
use gmp_mpfr_sys::gmp;

/// Render the engine's digit string `raw` (an optional '-' followed by the
/// significant digits) with a radix point, where `exp` is the position of the
/// point relative to the first digit. The engine strips trailing zeros, so
/// they are restored here when the point is past the last digit.
fn place_point(raw: &[u8], exp: i64) -> String {
    let (sign, digits) = match raw.split_first() {
        Some((b'-', rest)) => ("-", rest),
        _ => ("", raw),
    };

    // The engine returns no digits for zero.
    if digits.is_empty() {
        return "0".to_string();
    }

    let len = digits.len() as i64;
    let push_digits = |out: &mut String, digits: &[u8]| {
        out.extend(digits.iter().map(|d| char::from(*d)));
    };
    let push_zeros = |out: &mut String, n: i64| {
        out.extend((0..n).map(|_| '0'));
    };

    let mut out = String::with_capacity(digits.len() + 3);
    out.push_str(sign);
    if exp <= 0 {
        // 0.000ddd
        out.push_str("0.");
        push_zeros(&mut out, -exp);
        push_digits(&mut out, digits);
    } else if exp < len {
        // ddd.ddd
        let (int, frac) = digits.split_at(exp as usize);
        push_digits(&mut out, int);
        out.push('.');
        push_digits(&mut out, frac);
    } else {
        // ddd000
        push_digits(&mut out, digits);
        push_zeros(&mut out, exp - len);
    }
    out
}

impl BigFloat {
    /// Parse a base-10 numeral into a new value with the default precision.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_radix(text, 10)
    }

    /// Parse a numeral in `base` into a new value with the default precision.
    /// The base can be 2 to 62, or -62 to -2 to read the exponent in decimal.
    /// The grammar is the one of GMP's `mpf_set_str`: an optional '-', digits
    /// with an optional radix point, and an optional exponent marked with 'e'
    /// (bases up to 10) or '@'.
    pub fn parse_radix(text: &str, base: i32) -> Result<Self> {
        let base = check_parse_base(base)?;
        let mut res = BigFloat::new(0);
        // On failure `res` is dropped here, which releases it.
        res.set_str(text, base)?;
        Ok(res)
    }

    /// Like [`BigFloat::parse`], but reports failures as None.
    pub fn try_parse(text: &str) -> Option<Self> {
        Self::parse(text).ok()
    }

    /// Like [`BigFloat::parse_radix`], but reports failures as None.
    pub fn try_parse_radix(text: &str, base: i32) -> Option<Self> {
        Self::parse_radix(text, base).ok()
    }

    /// Parse `text` into this value, keeping its precision. If parsing fails
    /// the value is left unmodified.
    pub fn assign_str(&mut self, text: &str, base: i32) -> Result<()> {
        let base = check_parse_base(base)?;
        let mut scratch = BigFloat::new(self.precision());
        scratch.set_str(text, base)?;
        self.swap(&mut scratch);
        Ok(())
    }

    fn set_str(&mut self, text: &str, base: i32) -> Result<()> {
        let rejected = || {
            tracing::debug!(text, base, "rejected numeral");
            Error::Format {
                text: text.to_string(),
                base,
            }
        };

        if text.is_empty() {
            return Err(rejected());
        }
        let c_text = CString::new(text).map_err(|_| rejected())?;
        let ret = unsafe {
            gmp::mpf_set_str(self.as_raw_mut(), c_text.as_ptr(), base)
        };
        if ret != 0 {
            return Err(rejected());
        }
        Ok(())
    }

    /// Render the value in `base` (2 to 62, or -2 to -36 for upper-case
    /// digits). All the significant digits are printed, and the result never
    /// uses scientific notation.
    pub fn to_string_radix(&self, base: i32) -> Result<String> {
        let base = check_format_base(base)?;
        let mut exp: gmp::exp_t = 0;
        let digits = unsafe {
            let raw = gmp::mpf_get_str(
                ptr::null_mut(),
                &mut exp,
                base,
                0,
                self.as_raw(),
            );
            EngineStr::from_raw(raw)
        }
        .ok_or(Error::Engine("mpf_get_str"))?;
        Ok(place_point(digits.as_bytes(), exp.into()))
    }
}

impl Display for BigFloat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = self.to_string_radix(10).map_err(|_| core::fmt::Error)?;
        write!(f, "{}", text)
    }
}

impl FromStr for BigFloat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for BigFloat {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

#[test]
fn test_place_point() {
    assert_eq!(place_point(b"", 0), "0");
    assert_eq!(place_point(b"15", 1), "1.5");
    assert_eq!(place_point(b"-275", 1), "-2.75");
    assert_eq!(place_point(b"123", 3), "123");
    assert_eq!(place_point(b"-1", 3), "-100");
    assert_eq!(place_point(b"125", 0), "0.125");
    assert_eq!(place_point(b"-5", -2), "-0.005");
    assert_eq!(place_point(b"ff8", 2), "ff.8");
}

#[test]
fn test_round_trip() {
    let cases = [
        "1",
        "-1",
        "1.5",
        "-2.75",
        "3.25",
        "100",
        "1000000",
        "-4294967296",
        "18446744073709551616",
        "0.5",
        "-0.125",
        "0.0048828125",
        "9536.7431640625",
        "5368709117.5",
    ];
    for text in cases {
        let val = BigFloat::parse(text).unwrap();
        assert_eq!(val.to_string(), text);
    }
}

#[test]
fn test_round_trip_normalizes_padding() {
    let norm = |s: &str| BigFloat::parse(s).unwrap().to_string();
    assert_eq!(norm("1.50"), "1.5");
    assert_eq!(norm("007"), "7");
    assert_eq!(norm("-3.000"), "-3");
    assert_eq!(norm("0"), "0");
    assert_eq!(norm("-0"), "0");
    assert_eq!(norm("0.000"), "0");
    assert_eq!(norm(".25"), "0.25");
    assert_eq!(norm("3.2e1"), "32");
    assert_eq!(norm("-54.85e-1"), "-5.485");
    assert_eq!(norm("1e50"), "100000000000000000000000000000000000000000000000000");
}

#[test]
fn test_parse_failures() {
    use super::float::live_values;

    let start = live_values();
    let err = BigFloat::parse("not-a-number").unwrap_err();
    assert_eq!(
        err,
        Error::Format {
            text: "not-a-number".to_string(),
            base: 10
        }
    );
    assert!(BigFloat::try_parse("not-a-number").is_none());
    assert!(BigFloat::parse("").is_err());
    assert!(BigFloat::parse("1.2.3").is_err());
    assert!(BigFloat::parse("12a").is_err());
    assert!(BigFloat::parse("1\u{0}5").is_err());
    assert!(BigFloat::parse_radix("2", 2).is_err());
    assert!(BigFloat::try_parse_radix("g", 16).is_none());
    // Nothing leaked from the failed attempts.
    assert_eq!(live_values(), start);

    assert_eq!(
        BigFloat::parse_radix("1", 1).unwrap_err(),
        Error::InvalidBase(1)
    );
    assert_eq!(
        BigFloat::parse_radix("1", 63).unwrap_err(),
        Error::InvalidBase(63)
    );
    assert_eq!(live_values(), start);
}

#[test]
fn test_other_bases() {
    let x = BigFloat::parse_radix("101.1", 2).unwrap();
    assert_eq!(x.as_f64(), 5.5);
    assert_eq!(x.to_string_radix(2).unwrap(), "101.1");

    let y = BigFloat::from(255.5);
    assert_eq!(y.to_string_radix(16).unwrap(), "ff.8");
    assert_eq!(y.to_string_radix(-16).unwrap(), "FF.8");
    assert_eq!(BigFloat::parse_radix("ff.8", 16).unwrap(), y);
    assert_eq!(BigFloat::parse_radix("ff", -16).unwrap().to_u32(), 255);

    assert_eq!(BigFloat::parse_radix("z", 36).unwrap().to_u32(), 35);
    assert_eq!(BigFloat::parse_radix("10", 62).unwrap().to_u32(), 62);

    assert_eq!(y.to_string_radix(63), Err(Error::InvalidBase(63)));
    assert_eq!(y.to_string_radix(-37), Err(Error::InvalidBase(-37)));
    assert_eq!(y.to_string_radix(0), Err(Error::InvalidBase(0)));
}

#[test]
fn test_assign_str() {
    use super::float::live_values;

    let start = live_values();
    let mut x = BigFloat::new(200);
    let prec = x.precision();
    x.assign_str("2.5", 10).unwrap();
    assert_eq!(x.as_f64(), 2.5);
    assert_eq!(x.precision(), prec);

    // A failed parse keeps the previous value.
    assert!(x.assign_str("2.5x", 10).is_err());
    assert_eq!(x.as_f64(), 2.5);
    assert_eq!(x.precision(), prec);
    assert_eq!(x.assign_str("1", 99), Err(Error::InvalidBase(99)));
    assert_eq!(x.as_f64(), 2.5);

    x.assign_str("-11", 2).unwrap();
    assert_eq!(x.to_i32(), -3);
    drop(x);
    assert_eq!(live_values(), start);
}

#[test]
fn test_std_traits() {
    let x: BigFloat = "2.5".parse().unwrap();
    assert_eq!(x.as_f64(), 2.5);
    let y = BigFloat::try_from("-0.75").unwrap();
    assert_eq!(std::format!("{}", y), "-0.75");
    assert!("abc".parse::<BigFloat>().is_err());
}

#[test]
fn test_long_expansions() {
    let mut third = BigFloat::new(256);
    third.set_u32_div(1, &BigFloat::from(3u32));
    let text = third.to_string();
    assert!(text.starts_with("0.33333333333333333333333333333333333333"));

    let mut big = BigFloat::new(128);
    big.set_pow_u32(&BigFloat::from(2u32), 100);
    assert_eq!(big.to_string(), "1267650600228229401496703205376");
}
