/// An error that occurs when a pattern is syntactically invalid.
///
/// Errors are only reported by [`validate`](crate::validate). The search
/// routines never report errors: a pattern that fails to scan simply never
/// matches anything.
///
/// The message describes what went wrong in general terms and the offset
/// points at the byte in the pattern where the problem was detected. For
/// constructs that span multiple bytes, like an unclosed group, the offset
/// points at the start of the construct.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    msg: &'static str,
    offset: usize,
}

impl Error {
    pub(crate) fn new(msg: &'static str, offset: usize) -> Error {
        Error { msg, offset }
    }

    /// Returns the byte offset into the pattern at which this error was
    /// detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns a short description of this error, without its offset.
    pub fn message(&self) -> &str {
        self.msg
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} (at offset {})", self.msg, self.offset)
    }
}
