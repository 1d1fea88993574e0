use std::fmt;

/// Generic error type of *spliceforest*
///
/// `ForestError` carries only a message. It is used for failures
/// that the caller cannot recover from programmatically anyway,
/// e.g. handing an incomplete forest to a diagram writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForestError {
    message: String,
}

impl ForestError {
    /// Creates a new `ForestError`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spliceforest::utils::errors::ForestError;
    ///
    /// let err = ForestError::new("unable to write diagram");
    /// assert_eq!(err.to_string(), "unable to write diagram".to_string());
    /// ```
    pub fn new<S: fmt::Display>(message: S) -> Self {
        ForestError {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ForestError {}

impl From<String> for ForestError {
    fn from(message: String) -> Self {
        ForestError { message }
    }
}

impl From<std::io::Error> for ForestError {
    fn from(err: std::io::Error) -> Self {
        ForestError {
            message: err.to_string(),
        }
    }
}

/// Error type for reading and writing annotation data
///
/// It wraps I/O failures as well as parse errors of malformed
/// input records.
#[derive(Debug)]
pub struct ReadWriteError {
    message: String,
}

impl ReadWriteError {
    pub fn new<E: fmt::Display>(err: E) -> Self {
        ReadWriteError {
            message: err.to_string(),
        }
    }

    /// Creates an error from a message and the offending input line
    pub fn from_line<S: fmt::Display>(message: S, line: &str) -> Self {
        ReadWriteError {
            message: format!("{}: {}", message, line),
        }
    }
}

impl fmt::Display for ReadWriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ReadWriteError {}

impl From<std::io::Error> for ReadWriteError {
    fn from(err: std::io::Error) -> Self {
        ReadWriteError::new(err)
    }
}

impl From<std::num::ParseIntError> for ReadWriteError {
    fn from(err: std::num::ParseIntError) -> Self {
        ReadWriteError::new(err)
    }
}

impl From<ForestError> for ReadWriteError {
    fn from(err: ForestError) -> Self {
        ReadWriteError::new(err)
    }
}
