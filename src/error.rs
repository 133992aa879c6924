//! Error types returned by the fallible conversions.

extern crate alloc;

use alloc::string::String;

/// The errors reported by this crate. Conditions owned by the engine (such as
/// division by zero) are not represented here; GMP raises them itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text is not a valid numeral in the requested base.
    #[error("failed to parse {text:?} as a float in base {base}")]
    Format { text: String, base: i32 },

    /// The base is outside of the range that the engine accepts.
    #[error("base {0} is not supported")]
    InvalidBase(i32),

    /// An engine call returned no result. GMP aborts on allocation failure,
    /// so this is not expected in practice.
    #[error("engine call {0} returned no result")]
    Engine(&'static str),

    /// The conversion from a richer numeric type is not implemented.
    #[error("conversion from {0} is not implemented")]
    UnsupportedConversion(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;

#[test]
fn test_error_messages() {
    use alloc::string::ToString;

    let err = Error::Format {
        text: "1.2.3".to_string(),
        base: 10,
    };
    assert_eq!(
        err.to_string(),
        "failed to parse \"1.2.3\" as a float in base 10"
    );
    assert_eq!(
        Error::InvalidBase(99).to_string(),
        "base 99 is not supported"
    );
    assert_eq!(
        Error::UnsupportedConversion("integer").to_string(),
        "conversion from integer is not implemented"
    );
    assert_eq!(
        Error::Engine("mpf_get_str").to_string(),
        "engine call mpf_get_str returned no result"
    );
}
