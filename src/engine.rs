//! Small helpers around the GMP engine that don't belong to the value type:
//! ownership of engine-allocated strings and validation of radix arguments.

use super::error::{Error, Result};
use core::ffi::{c_char, CStr};
use core::ptr::{self, NonNull};
use gmp_mpfr_sys::gmp;

/// A NUL-terminated buffer allocated by the engine (for example by
/// `mpf_get_str`). The buffer is handed back to the engine's free function
/// when this is dropped, on every path out of the scope that owns it.
pub(crate) struct EngineStr {
    ptr: NonNull<c_char>,
}

impl EngineStr {
    /// Take ownership of `ptr`. Returns None if the engine returned null.
    ///
    /// # Safety
    /// `ptr` must be null, or a NUL-terminated buffer allocated with the
    /// engine's current allocation function and not owned by anyone else.
    pub(crate) unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| EngineStr { ptr })
    }

    /// Returns the content of the buffer, without the NUL terminator.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }.to_bytes()
    }
}

impl Drop for EngineStr {
    fn drop(&mut self) {
        // GMP's free function wants the size of the original allocation.
        let size = self.as_bytes().len() + 1;
        let mut free: gmp::free_function = None;
        unsafe {
            gmp::get_memory_functions(
                ptr::null_mut(),
                ptr::null_mut(),
                &mut free,
            );
            if let Some(free) = free {
                free(self.ptr.as_ptr().cast(), size);
            }
        }
    }
}

/// Validate a base for parsing. Negative bases mean that the exponent is
/// written in decimal.
pub(crate) fn check_parse_base(base: i32) -> Result<i32> {
    if (2..=62).contains(&base.unsigned_abs()) {
        return Ok(base);
    }
    Err(Error::InvalidBase(base))
}

/// Validate a base for printing. Negative bases select upper-case digits,
/// which only exist up to base 36.
pub(crate) fn check_format_base(base: i32) -> Result<i32> {
    if (2..=62).contains(&base) || (-36..=-2).contains(&base) {
        return Ok(base);
    }
    Err(Error::InvalidBase(base))
}

#[test]
fn test_base_ranges() {
    assert_eq!(check_parse_base(10), Ok(10));
    assert_eq!(check_parse_base(62), Ok(62));
    assert_eq!(check_parse_base(-62), Ok(-62));
    assert_eq!(check_parse_base(1), Err(Error::InvalidBase(1)));
    assert_eq!(check_parse_base(0), Err(Error::InvalidBase(0)));
    assert_eq!(check_parse_base(63), Err(Error::InvalidBase(63)));

    assert_eq!(check_format_base(2), Ok(2));
    assert_eq!(check_format_base(-36), Ok(-36));
    assert_eq!(check_format_base(-37), Err(Error::InvalidBase(-37)));
    assert_eq!(check_format_base(-1), Err(Error::InvalidBase(-1)));
    assert_eq!(check_format_base(i32::MIN), Err(Error::InvalidBase(i32::MIN)));
}

#[test]
fn test_engine_str_release() {
    use crate::BigFloat;

    let x = BigFloat::from(255.5);
    let mut exp: gmp::exp_t = 0;
    let digits = unsafe {
        let raw =
            gmp::mpf_get_str(ptr::null_mut(), &mut exp, 16, 0, x.as_raw());
        EngineStr::from_raw(raw)
    }
    .unwrap();
    assert_eq!(digits.as_bytes(), b"ff8");
    assert_eq!(exp, 2);
    // Handed back to the engine's free function.
    drop(digits);

    assert!(unsafe { EngineStr::from_raw(ptr::null_mut()) }.is_none());
}
