use az::SaturatingCast;
use core::cmp::Ordering;
use core::fmt;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ptr;
use core::sync::atomic::{self, AtomicU32};
use gmp_mpfr_sys::gmp::{self, mpf_t};

/// The default precision that was requested by the user, or zero if the
/// engine's built-in default is in effect.
static DEFAULT_PRECISION: AtomicU32 = AtomicU32::new(0);

/// Returns the precision, in bits, of values that are constructed without an
/// explicit precision.
pub fn default_precision() -> u32 {
    match DEFAULT_PRECISION.load(atomic::Ordering::Relaxed) {
        0 => unsafe { gmp::mpf_get_default_prec() }.saturating_cast(),
        bits => bits,
    }
}

/// Change the precision of values that are constructed without an explicit
/// precision. Values that are already alive keep their precision. Passing zero
/// restores the engine's built-in default.
///
/// The setting is process-wide. Code that constructs values concurrently
/// should prefer explicit precisions over changing this value.
pub fn set_default_precision(bits: u32) {
    DEFAULT_PRECISION.store(bits, atomic::Ordering::Relaxed);
    tracing::debug!(bits, "default precision changed");
}

#[cfg(test)]
std::thread_local! {
    static LIVE_VALUES: core::cell::Cell<isize> = const { core::cell::Cell::new(0) };
}

/// Returns the number of values that were constructed and not yet released
/// on the current thread.
#[cfg(test)]
pub(crate) fn live_values() -> isize {
    LIVE_VALUES.with(|c| c.get())
}

#[inline]
fn track_live(_delta: isize) {
    #[cfg(test)]
    LIVE_VALUES.with(|c| c.set(c.get() + _delta));
}

/// An arbitrary-precision binary floating-point number.
///
/// Each value owns a limb buffer that is allocated by GMP when the value is
/// constructed and released exactly once when the value is dropped. Copies
/// are explicit (`clone`) and allocate a new buffer.
///
/// The precision is a property of each value. Operations that write into an
/// existing value round the result to the precision of that value; operations
/// that return a new value accept a precision, where zero means the default
/// precision (see [`default_precision`]).
pub struct BigFloat {
    inner: mpf_t,
}

// The limb buffer is owned exclusively by the value, and the engine keeps no
// thread-local state for it. Shared references only read through the engine.
unsafe impl Send for BigFloat {}
unsafe impl Sync for BigFloat {}

impl BigFloat {
    /// Create a new value that holds zero, with at least `prec` bits of
    /// precision. If `prec` is zero the default precision is used.
    pub fn new(prec: u32) -> Self {
        let prec = if prec == 0 { default_precision() } else { prec };
        let mut raw = MaybeUninit::<mpf_t>::uninit();
        unsafe {
            gmp::mpf_init2(raw.as_mut_ptr(), prec.into());
            Self::from_raw(raw.assume_init())
        }
    }

    /// Wrap an initialized engine value. The returned value owns `raw` and
    /// releases it when dropped.
    ///
    /// # Safety
    /// `raw` must be initialized by the engine and must not be owned, used or
    /// cleared by anyone else afterwards.
    pub unsafe fn from_raw(raw: mpf_t) -> Self {
        track_live(1);
        BigFloat { inner: raw }
    }

    /// Release the ownership of the engine value. The caller becomes
    /// responsible for clearing it.
    pub fn into_raw(self) -> mpf_t {
        let this = ManuallyDrop::new(self);
        track_live(-1);
        unsafe { ptr::read(&this.inner) }
    }

    /// Returns a pointer to the engine value, for read-only engine calls.
    pub fn as_raw(&self) -> *const mpf_t {
        &self.inner
    }

    /// Returns a pointer to the engine value, for engine calls that modify
    /// it.
    pub fn as_raw_mut(&mut self) -> *mut mpf_t {
        &mut self.inner
    }

    /// Returns the precision of the value in bits. This may be larger than the
    /// precision that was requested, because the engine rounds it up to whole
    /// limbs.
    pub fn precision(&self) -> u32 {
        unsafe { gmp::mpf_get_prec(self.as_raw()) }.saturating_cast()
    }

    /// Change the precision of the value to at least `prec` bits, rounding
    /// the value if it shrinks. Zero selects the default precision.
    pub fn set_precision(&mut self, prec: u32) {
        let prec = if prec == 0 { default_precision() } else { prec };
        tracing::trace!(from = self.precision(), to = prec, "set precision");
        unsafe { gmp::mpf_set_prec(self.as_raw_mut(), prec.into()) }
    }

    /// Exchange the contents (including the precision) of two values without
    /// reallocating.
    pub fn swap(&mut self, other: &mut Self) {
        unsafe { gmp::mpf_swap(self.as_raw_mut(), other.as_raw_mut()) }
    }

    /// Returns the sign of the number as an ordering against zero.
    pub fn sign(&self) -> Ordering {
        self.inner.size.cmp(&0)
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.inner.size == 0
    }

    /// Returns true if the value is smaller than zero.
    pub fn is_negative(&self) -> bool {
        self.inner.size < 0
    }

    /// Returns the number of limbs that hold the significand.
    pub fn limb_count(&self) -> usize {
        self.inner.size.unsigned_abs() as usize
    }

    /// Returns the exponent of the value, in limbs. The value is
    /// `0.ddddd * B^exp` where `B` is the limb base.
    pub fn raw_exponent(&self) -> i64 {
        self.inner.exp.into()
    }
}

impl Default for BigFloat {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for BigFloat {
    fn clone(&self) -> Self {
        let mut copy = Self::new(self.precision());
        unsafe { gmp::mpf_set(copy.as_raw_mut(), self.as_raw()) };
        copy
    }
}

impl Drop for BigFloat {
    fn drop(&mut self) {
        track_live(-1);
        unsafe { gmp::mpf_clear(self.as_raw_mut()) }
    }
}

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigFloat")
            .field("value", &format_args!("{}", self))
            .field("precision", &self.precision())
            .finish()
    }
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigFloat {}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The engine has no NaN or infinity, so all values are ordered.
impl Ord for BigFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        unsafe { gmp::mpf_cmp(self.as_raw(), other.as_raw()) }.cmp(&0)
    }
}

impl BigFloat {
    fn cmp_i32(&self, other: i32) -> Option<Ordering> {
        Some(unsafe { gmp::mpf_cmp_si(self.as_raw(), other.into()) }.cmp(&0))
    }
    fn cmp_u32(&self, other: u32) -> Option<Ordering> {
        Some(unsafe { gmp::mpf_cmp_ui(self.as_raw(), other.into()) }.cmp(&0))
    }
    fn cmp_f64(&self, other: f64) -> Option<Ordering> {
        // The engine traps on NaN.
        if other.is_nan() {
            return None;
        }
        Some(unsafe { gmp::mpf_cmp_d(self.as_raw(), other) }.cmp(&0))
    }
}

macro_rules! declare_primitive_cmp {
    ($prim:ty, $cmp:ident) => {
        impl PartialEq<$prim> for BigFloat {
            fn eq(&self, other: &$prim) -> bool {
                self.partial_cmp(other) == Some(Ordering::Equal)
            }
        }

        impl PartialOrd<$prim> for BigFloat {
            fn partial_cmp(&self, other: &$prim) -> Option<Ordering> {
                self.$cmp(*other)
            }
        }

        impl PartialEq<BigFloat> for $prim {
            fn eq(&self, other: &BigFloat) -> bool {
                other.eq(self)
            }
        }

        impl PartialOrd<BigFloat> for $prim {
            fn partial_cmp(&self, other: &BigFloat) -> Option<Ordering> {
                other.partial_cmp(self).map(Ordering::reverse)
            }
        }
    };
}

declare_primitive_cmp!(i32, cmp_i32);
declare_primitive_cmp!(u32, cmp_u32);
declare_primitive_cmp!(f64, cmp_f64);

#[test]
fn test_new_is_zero() {
    let x = BigFloat::new(128);
    assert!(x.is_zero());
    assert_eq!(x.sign(), Ordering::Equal);
    assert_eq!(x.limb_count(), 0);
    assert!(!x.is_negative());
}

#[test]
fn test_requested_precision_is_a_lower_bound() {
    for prec in [1, 2, 31, 32, 33, 53, 64, 65, 100, 128, 1000, 4099] {
        let x = BigFloat::new(prec);
        assert!(x.precision() >= prec, "{} < {}", x.precision(), prec);
    }
}

#[test]
fn test_set_precision() {
    let mut x = BigFloat::new(64);
    x.set_precision(2048);
    assert!(x.precision() >= 2048);

    // Growing the precision keeps the value.
    let mut y = BigFloat::from(12.375);
    y.set_precision(512);
    assert_eq!(y.as_f64(), 12.375);
    assert!(y.precision() >= 512);
}

#[test]
fn test_default_precision_isolation() {
    let _guard = crate::utils::DEFAULT_PRECISION_LOCK.lock();

    let before = default_precision();
    let x = BigFloat::new(0);
    let observed = x.precision();
    assert!(observed >= before);

    set_default_precision(4096);
    assert_eq!(default_precision(), 4096);
    // Existing values keep their precision.
    assert_eq!(x.precision(), observed);
    // New values use the new default.
    let y = BigFloat::default();
    assert!(y.precision() >= 4096);
    let z = BigFloat::from(3u32);
    assert!(z.precision() >= 4096);

    set_default_precision(0);
    assert_eq!(default_precision(), before);
}

#[test]
fn test_lifecycle_accounting() {
    let start = live_values();
    {
        let a = BigFloat::new(100);
        let b = a.clone();
        let c = BigFloat::from(1.5);
        assert_eq!(live_values(), start + 3);
        drop((a, b, c));
    }
    assert_eq!(live_values(), start);

    // Ownership can leave and come back through the raw handle.
    let raw = BigFloat::from(7u32).into_raw();
    assert_eq!(live_values(), start);
    let back = unsafe { BigFloat::from_raw(raw) };
    assert_eq!(live_values(), start + 1);
    assert_eq!(back.to_u32(), 7);
    drop(back);
    assert_eq!(live_values(), start);
}

#[test]
fn test_clone_is_deep() {
    let a = BigFloat::from(2.5);
    let mut b = a.clone();
    assert_eq!(a, b);
    assert_eq!(a.precision(), b.precision());
    b.set_add_u32(&a, 1);
    assert_eq!(a.as_f64(), 2.5);
    assert_eq!(b.as_f64(), 3.5);
}

#[test]
fn test_swap() {
    let mut a = BigFloat::from(1.25);
    a.set_precision(256);
    let mut b = BigFloat::from(-8i32);
    let (pa, pb) = (a.precision(), b.precision());
    a.swap(&mut b);
    assert_eq!(a.to_i32(), -8);
    assert_eq!(b.as_f64(), 1.25);
    assert_eq!(a.precision(), pb);
    assert_eq!(b.precision(), pa);
}

#[test]
fn test_sign_and_raw_fields() {
    let a = BigFloat::from(-3i32);
    assert!(a.is_negative());
    assert_eq!(a.sign(), Ordering::Less);
    assert_eq!(a.limb_count(), 1);
    assert_eq!(a.raw_exponent(), 1);

    let b = BigFloat::from(0.25);
    assert_eq!(b.sign(), Ordering::Greater);
    // 0.25 is below one limb unit, so the exponent is zero.
    assert_eq!(b.raw_exponent(), 0);
}

#[test]
fn test_comparisons() {
    let a = BigFloat::from(1.5);
    let b = BigFloat::from(2.5);
    assert!(a < b);
    assert!(b > a);
    assert!(a == a.clone());
    assert_eq!(a.cmp(&b), Ordering::Less);
    assert_eq!(a.clone().max(b.clone()), b);

    assert!(a > 1u32);
    assert!(a < 2u32);
    assert!(a > -7i32);
    assert!(BigFloat::from(-7i32) == -7i32);
    assert!(a == 1.5);
    assert!(2.0 > a);
    assert!(3u32 > a);
    assert_eq!(a.partial_cmp(&f64::NAN), None);
    assert!(a < f64::INFINITY);
    assert!(a > f64::NEG_INFINITY);
}

#[test]
fn test_debug_output() {
    let a = BigFloat::new(64);
    let mut text = std::format!("{:?}", BigFloat::from(-2.5));
    assert!(text.starts_with("BigFloat { value: -2.5, precision: "));
    text = std::format!("{:?}", a);
    assert!(text.starts_with("BigFloat { value: 0, precision: "));
}
