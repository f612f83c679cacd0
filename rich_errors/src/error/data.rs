//! Contextual data values carried by a rich error

use std::fmt;
use std::sync::Arc;

/// A value that caused an error, kept as given and rendered through its
/// `Display` implementation.
#[derive(Clone)]
pub struct Datum(Arc<dyn fmt::Display + Send + Sync>);

impl Datum {
    pub fn new<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self(Arc::new(value))
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Datum").field(&self.0.to_string()).finish()
    }
}

/// Build the data list for a rich error constructor.
///
/// ```
/// use rich_errors::{data, Code, RichError};
///
/// let err = RichError::new_friendly(
///     Code::NOT_FOUND,
///     "lookup failed",
///     "no such ids:",
///     data![1, "two"],
/// );
/// assert_eq!(err.friendly(), "missing: no such ids: 1, two.");
/// ```
#[macro_export]
macro_rules! data {
    () => {
        ::std::vec::Vec::<$crate::error::Datum>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::error::Datum::new($value)),+]
    };
}
