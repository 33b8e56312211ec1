use core::fmt;
use core::num::NonZeroU32;

/// Input validation failures. Keystream generation itself cannot fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A key or sequence number buffer holds fewer than 8 bytes.
    InvalidInputLength { expected: usize, actual: usize },
    /// The output buffer is shorter than the requested keystream length.
    InsufficientBuffer { required: usize, available: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidInputLength { expected, actual } => {
                write!(f, "invalid input length: expected {} bytes, got {}", expected, actual)
            }
            Error::InsufficientBuffer { required, available } => {
                write!(f, "insufficient buffer: {} bytes required, {} available", required, available)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

const fn custom_code(offset: u32) -> NonZeroU32 {
    match NonZeroU32::new(rand_core::Error::CUSTOM_START + offset) {
        Some(code) => code,
        None => panic!("custom error codes are non-zero"),
    }
}

impl Error {
    /// Error code used when converting into `rand_core::Error`.
    pub const fn code(&self) -> NonZeroU32 {
        match self {
            Error::InvalidInputLength { .. } => custom_code(1),
            Error::InsufficientBuffer { .. } => custom_code(2),
        }
    }
}

impl From<Error> for rand_core::Error {
    fn from(error: Error) -> Self {
        rand_core::Error::from(error.code())
    }
}
