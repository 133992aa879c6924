//! Arbitrary-precision binary floating point numbers, backed by the `mpf`
//! layer of GMP.
//!
//! ```no_run
//! use mpfloat::BigFloat;
//!
//! let a = BigFloat::parse("1.5").unwrap();
//! let b = BigFloat::from(3.25);
//! assert_eq!((&a + &b).to_string(), "4.75");
//!
//! // Ten thousand bits of the square root of two.
//! let root = BigFloat::sqrt_u32_with_prec(2, 10_000);
//! println!("{}", root);
//! ```

mod arithmetic;
mod cast;
mod engine;
mod error;
mod float;
#[cfg(feature = "python")]
mod py;
mod string;
#[cfg(test)]
mod utils;

pub use self::cast::{Assign, ExpDouble};
pub use self::error::{Error, Result};
pub use self::float::{default_precision, set_default_precision, BigFloat};
