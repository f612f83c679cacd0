//! Low-level causes and chain traversal
//!
//! [`Message`] and [`Wrapped`] are the developer-facing errors a
//! [`RichError`](super::RichError) decorates. Both record the source
//! location they were built at.

use std::error::Error;
use std::fmt;
use std::panic::Location;

/// Boxed error type accepted as a cause
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Plain error built from a message
#[derive(Debug, Clone)]
pub struct Message {
    text: String,
    location: &'static Location<'static>,
}

impl Message {
    #[track_caller]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: Location::caller(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the error was created
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Error for Message {}

/// An existing error annotated with a message.
///
/// Renders as `"<message>: <source>"`. The separator is written even when
/// the message is empty, so wrapping with `""` yields `": <source>"`.
#[derive(Debug)]
pub struct Wrapped {
    message: String,
    location: &'static Location<'static>,
    source: BoxError,
}

impl Wrapped {
    #[track_caller]
    pub fn new(source: impl Into<BoxError>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
            source: source.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the error was wrapped
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.source)
    }
}

impl Error for Wrapped {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Follow `source()` links to the innermost error.
///
/// An error without a source is returned as-is. Cyclic chains never
/// terminate.
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// [`root_cause`] for an error that may be absent
pub fn try_root_cause<'a>(
    err: Option<&'a (dyn Error + 'static)>,
) -> Option<&'a (dyn Error + 'static)> {
    err.map(root_cause)
}
