use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all possible errors that can occur while reading or patching tracks
#[derive(Debug)]
pub enum Mp4FlagsError {
    Mp4(Mp4Error),
    InvalidArgument(ArgumentError),
    Patch(PatchError),
    Other(io::Error),
}

/// MP4 format specific errors
#[derive(Debug)]
pub enum Mp4Error {
    /// Generic MP4 error with a descriptive message
    Error { message: String },
    /// Fewer than 8 bytes remain where a box header is expected
    Truncated { offset: u64, end: u64 },
}

/// Caller supplied a selector that does not match anything in the file
#[derive(Debug)]
pub struct ArgumentError {
    pub message: String,
}

impl ArgumentError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while applying an in-place patch
#[derive(Debug)]
pub enum PatchError {
    /// Bytes on disk no longer match what the patch was planned against
    Stale { offset: u64 },
    /// Write would reach past the end of the source
    OutOfBounds { offset: u64, len: u64, length: u64 },
    /// The original sample entry format is not recorded anywhere
    Unrestorable { offset: u64 },
    /// The sample description has no entry whose format could carry the forced marker
    NoSampleEntry { offset: u64 },
}

impl fmt::Display for Mp4FlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4FlagsError::Other(err) => write!(f, "I/O error: {}", err),
            Mp4FlagsError::Mp4(err) => write!(f, "MP4 error: {}", err),
            Mp4FlagsError::InvalidArgument(err) => write!(f, "Invalid argument: {}", err),
            Mp4FlagsError::Patch(err) => write!(f, "Patch error: {}", err),
        }
    }
}

impl fmt::Display for Mp4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4Error::Error { message } => write!(f, "{}", message),
            Mp4Error::Truncated { offset, end } => write!(
                f,
                "box header at {} does not fit before scope end {}",
                offset, end
            ),
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::Stale { offset } => {
                write!(f, "bytes at offset {} changed since the patch was planned", offset)
            }
            PatchError::OutOfBounds {
                offset,
                len,
                length,
            } => write!(
                f,
                "writing {} bytes at offset {} exceeds source length {}",
                len, offset, length
            ),
            PatchError::Unrestorable { offset } => write!(
                f,
                "sample entry at offset {} is marked forced and its original format is unknown",
                offset
            ),
            PatchError::NoSampleEntry { offset } => write!(
                f,
                "sample description at offset {} has no sample entries",
                offset
            ),
        }
    }
}

impl Error for Mp4FlagsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Mp4FlagsError::Other(err) => Some(err),
            _ => None,
        }
    }
}
impl Error for Mp4Error {}
impl Error for ArgumentError {}
impl Error for PatchError {}

// Conversion implementations
impl From<io::Error> for Mp4FlagsError {
    fn from(err: io::Error) -> Self {
        Mp4FlagsError::Other(err)
    }
}

impl From<Mp4Error> for Mp4FlagsError {
    fn from(err: Mp4Error) -> Self {
        Mp4FlagsError::Mp4(err)
    }
}

impl From<ArgumentError> for Mp4FlagsError {
    fn from(err: ArgumentError) -> Self {
        Mp4FlagsError::InvalidArgument(err)
    }
}

impl From<PatchError> for Mp4FlagsError {
    fn from(err: PatchError) -> Self {
        Mp4FlagsError::Patch(err)
    }
}

// Conversion to io::Error for callers working in plain std::io
impl From<Mp4FlagsError> for io::Error {
    fn from(err: Mp4FlagsError) -> Self {
        match err {
            Mp4FlagsError::Other(inner) => inner,
            other @ Mp4FlagsError::InvalidArgument(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, other)
            }
            other => io::Error::other(other),
        }
    }
}

// Type alias for Result with Mp4FlagsError
pub type Mp4FlagsResult<T> = Result<T, Mp4FlagsError>;
