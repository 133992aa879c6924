use crate::{BigFloat, Error};
use core::cmp::Ordering;
use pyo3::basic::CompareOp;
use pyo3::exceptions::{PyValueError, PyZeroDivisionError};
use pyo3::prelude::*;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// An arbitrary-precision binary floating-point number.
///
/// Every value carries its own precision (in bits). Arithmetic operators
/// return values with the module's default precision.
#[pyclass(name = "BigFloat")]
struct PyBigFloat {
    inner: BigFloat,
}

impl PyBigFloat {
    fn wrap(inner: BigFloat) -> Self {
        PyBigFloat { inner }
    }
}

#[pymethods]
impl PyBigFloat {
    /// Parse a new number.
    ///
    /// Args:
    ///     value: The numeral, for example "-12.5e3"
    ///     base: The base of the numeral (2 to 62)
    ///     precision: The precision in bits, or 0 for the default precision
    #[new]
    #[pyo3(signature = (value, base = 10, precision = 0))]
    fn new(value: &str, base: i32, precision: u32) -> PyResult<Self> {
        let mut inner = BigFloat::new(precision);
        inner.assign_str(value, base)?;
        Ok(Self::wrap(inner))
    }

    /// Create a number from a finite python float.
    #[staticmethod]
    fn from_float(val: f64) -> PyResult<Self> {
        // The engine would abort the interpreter.
        if !val.is_finite() {
            return Err(PyValueError::new_err("value must be finite"));
        }
        Ok(Self::wrap(BigFloat::from(val)))
    }

    /// Create a number from a 32-bit integer.
    #[staticmethod]
    fn from_int(val: i32) -> Self {
        Self::wrap(BigFloat::from(val))
    }

    /// The precision of the number in bits.
    #[getter]
    fn get_precision(&self) -> u32 {
        self.inner.precision()
    }
    #[setter]
    fn set_precision(&mut self, bits: u32) {
        self.inner.set_precision(bits)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
    fn __repr__(&self) -> String {
        format!("BigFloat('{}')", self.inner)
    }
    /// Render the number in another base (2 to 62).
    fn to_string_radix(&self, base: i32) -> PyResult<String> {
        Ok(self.inner.to_string_radix(base)?)
    }

    fn __add__(&self, other: &PyBigFloat) -> PyBigFloat {
        Self::wrap(&self.inner + &other.inner)
    }
    fn __sub__(&self, other: &PyBigFloat) -> PyBigFloat {
        Self::wrap(&self.inner - &other.inner)
    }
    fn __mul__(&self, other: &PyBigFloat) -> PyBigFloat {
        Self::wrap(&self.inner * &other.inner)
    }
    fn __truediv__(&self, other: &PyBigFloat) -> PyResult<PyBigFloat> {
        if other.inner.is_zero() {
            return Err(PyZeroDivisionError::new_err("division by zero"));
        }
        Ok(Self::wrap(&self.inner / &other.inner))
    }
    fn __neg__(&self) -> PyBigFloat {
        Self::wrap(-&self.inner)
    }
    fn __abs__(&self) -> PyBigFloat {
        self.abs()
    }
    fn __richcmp__(&self, other: &PyBigFloat, op: CompareOp) -> bool {
        op.matches(self.inner.cmp(&other.inner))
    }

    /// Returns the number raised to the power of `exp` which is an integer.
    fn pow(&self, exp: u32) -> PyBigFloat {
        Self::wrap(self.inner.pow(exp))
    }
    /// Returns the absolute value of the number.
    fn abs(&self) -> PyBigFloat {
        Self::wrap(self.inner.abs())
    }
    /// Returns the square root of the number.
    fn sqrt(&self) -> PyResult<PyBigFloat> {
        if self.inner.sign() == Ordering::Less {
            return Err(PyValueError::new_err("math domain error"));
        }
        Ok(Self::wrap(self.inner.sqrt()))
    }
    /// Returns the number times 2^exp.
    fn mul_2exp(&self, exp: u32) -> PyBigFloat {
        Self::wrap(self.inner.mul_2exp(exp))
    }
    /// Returns the number divided by 2^exp.
    fn div_2exp(&self, exp: u32) -> PyBigFloat {
        Self::wrap(self.inner.div_2exp(exp))
    }

    /// Convert to a python float.
    fn to_float(&self) -> f64 {
        self.inner.as_f64()
    }
    /// Convert to an integer, truncating and saturating to 32 bits.
    fn to_int(&self) -> i32 {
        self.inner.to_i32()
    }
    /// Returns (exp, value) such that the number is value * 2**exp.
    fn to_exp_double(&self) -> (i64, f64) {
        let e = self.inner.to_exp_double();
        (e.exp, e.value)
    }
}

/// Returns the precision of numbers that don't ask for one.
#[pyfunction]
fn get_default_precision() -> u32 {
    crate::default_precision()
}

/// Change the precision of numbers that are created from now on.
///
/// Args:
///     bits: The precision in bits, or 0 to restore the built-in default
#[pyfunction]
fn set_default_precision(bits: u32) {
    crate::set_default_precision(bits)
}

/// Returns the square root of an integer.
///
/// Args:
///     val: The integer
///     precision: The precision of the result, or 0 for the default
#[pyfunction]
#[pyo3(signature = (val, precision = 0))]
fn sqrt_int(val: u32, precision: u32) -> PyBigFloat {
    PyBigFloat::wrap(BigFloat::sqrt_u32_with_prec(val, precision))
}

#[pymodule]
fn _mpfloat(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBigFloat>()?;

    m.add_function(wrap_pyfunction!(get_default_precision, m)?)?;
    m.add_function(wrap_pyfunction!(set_default_precision, m)?)?;
    m.add_function(wrap_pyfunction!(sqrt_int, m)?)?;
    Ok(())
}
