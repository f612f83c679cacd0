//! Classification codes and their presentation details

use std::fmt;

/// Numeric classification of an error.
///
/// Not a closed set: applications define their own codes with
/// [`Code::new`] and give them presentation details through
/// [`crate::registry::register_code`]. Codes that were never registered
/// still render, falling back to status 500 and label `"error"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(i32);

impl Code {
    /// Unspecified default; should never be constructed deliberately
    pub const UNKNOWN: Code = Code(0);
    /// Nonspecific error, for when no better code applies
    pub const GENERIC: Code = Code(1);
    /// Provided values cannot be deserialized
    pub const INVALID_SYNTAX: Code = Code(2);
    /// Provided arguments are invalid
    pub const INVALID_ARGS: Code = Code(3);
    /// Problem with the client's credentials
    pub const UNAUTHORIZED: Code = Code(4);
    /// Access isn't permitted, regardless of authorization state
    pub const FORBIDDEN: Code = Code(5);
    /// A requested value couldn't be retrieved
    pub const NOT_FOUND: Code = Code(6);
    /// Something that needs to be available cannot be reached
    pub const UNAVAILABLE: Code = Code(7);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Label from the default registry
    pub fn label(&self) -> String {
        super::code_label(*self)
    }

    /// HTTP status from the default registry
    pub fn http_status(&self) -> i32 {
        super::code_http_status(*self)
    }
}

impl From<i32> for Code {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation details registered for a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDetails {
    http_status: i32,
    label: String,
}

impl CodeDetails {
    pub fn new(http_status: i32, label: impl Into<String>) -> Self {
        Self {
            http_status,
            label: label.into(),
        }
    }

    pub fn http_status(&self) -> i32 {
        self.http_status
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Details every registry is seeded with
pub const BUILTIN_CODES: [(Code, i32, &str); 8] = [
    (Code::UNKNOWN, 500, "error"),
    (Code::GENERIC, 500, "error"),
    (Code::INVALID_SYNTAX, 400, "syntax"),
    (Code::INVALID_ARGS, 400, "arguments"),
    (Code::UNAUTHORIZED, 401, "auth"),
    (Code::FORBIDDEN, 403, "auth"),
    (Code::NOT_FOUND, 404, "missing"),
    (Code::UNAVAILABLE, 503, "unavailable"),
];
