//! Rich error value
//!
//! [`RichError`] decorates a developer-facing cause with a classification
//! [`Code`], an optional end-user message, an optional fix hint and the
//! data values involved. Build one where there is enough context to
//! classify the problem, then propagate it unchanged.
//!
//! `Display` gives the log-facing text (`"<label>: <cause>"`);
//! [`RichError::friendly`] gives the end-user text, or an empty string when
//! none was provided.

pub mod cause;
pub mod data;

use std::error::Error;
use std::fmt;
use std::panic::Location;

use crate::registry::{self, Code, CodeRegistry};

pub use cause::{root_cause, try_root_cause, BoxError, Message, Wrapped};
pub use data::Datum;

/// An error decorated with a code, friendly text, a fix hint and data.
///
/// Immutable once constructed. Always owns a cause: the `new*`
/// constructors synthesize a [`Message`] from the given text, the `wrap*`
/// constructors annotate the given error with a [`Wrapped`].
#[derive(Debug)]
pub struct RichError {
    code: Code,
    friendly: String,
    fix: String,
    data: Vec<Datum>,
    cause: BoxError,
}

impl RichError {
    fn from_cause(code: Code, cause: BoxError, data: Vec<Datum>) -> Self {
        Self {
            code,
            friendly: String::new(),
            fix: String::new(),
            data,
            cause,
        }
    }

    // ------------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------------

    /// Error with a fresh cause built from `message`
    #[track_caller]
    pub fn new(code: Code, message: impl Into<String>, data: Vec<Datum>) -> Self {
        Self::from_cause(code, Box::new(Message::new(message)), data)
    }

    /// [`RichError::new`] plus a user-facing message
    #[track_caller]
    pub fn new_friendly(
        code: Code,
        message: impl Into<String>,
        friendly: impl Into<String>,
        data: Vec<Datum>,
    ) -> Self {
        let mut err = Self::new(code, message, data);
        err.friendly = friendly.into();
        err
    }

    /// [`RichError::new_friendly`] plus a fix hint
    #[track_caller]
    pub fn new_friendly_fix(
        code: Code,
        message: impl Into<String>,
        friendly: impl Into<String>,
        fix: impl Into<String>,
        data: Vec<Datum>,
    ) -> Self {
        let mut err = Self::new_friendly(code, message, friendly, data);
        err.fix = fix.into();
        err
    }

    /// Error whose cause is `err` annotated with `message`.
    ///
    /// `err` stays reachable through [`Error::source`], so
    /// [`root_cause`] still finds it. The cause renders as
    /// `"<message>: <err>"`, including when `message` is empty.
    #[track_caller]
    pub fn wrap(
        code: Code,
        err: impl Into<BoxError>,
        message: impl Into<String>,
        data: Vec<Datum>,
    ) -> Self {
        Self::from_cause(code, Box::new(Wrapped::new(err, message)), data)
    }

    /// [`RichError::wrap`] plus a user-facing message
    #[track_caller]
    pub fn wrap_friendly(
        code: Code,
        err: impl Into<BoxError>,
        message: impl Into<String>,
        friendly: impl Into<String>,
        data: Vec<Datum>,
    ) -> Self {
        let mut rich = Self::wrap(code, err, message, data);
        rich.friendly = friendly.into();
        rich
    }

    /// [`RichError::wrap_friendly`] plus a fix hint
    #[track_caller]
    pub fn wrap_friendly_fix(
        code: Code,
        err: impl Into<BoxError>,
        message: impl Into<String>,
        friendly: impl Into<String>,
        fix: impl Into<String>,
        data: Vec<Datum>,
    ) -> Self {
        let mut rich = Self::wrap_friendly(code, err, message, friendly, data);
        rich.fix = fix.into();
        rich
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn code(&self) -> Code {
        self.code
    }

    /// The immediate, developer-facing cause
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// Fix hint, empty if unset
    pub fn fix(&self) -> &str {
        &self.fix
    }

    /// Friendly text as given, without label or data
    pub fn friendly_template(&self) -> &str {
        &self.friendly
    }

    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    /// Where the cause was created or wrapped
    pub fn location(&self) -> Option<&'static Location<'static>> {
        if let Some(message) = self.cause.downcast_ref::<Message>() {
            Some(message.location())
        } else {
            self.cause
                .downcast_ref::<Wrapped>()
                .map(|wrapped| wrapped.location())
        }
    }

    /// Label of the code in the default registry
    pub fn label(&self) -> String {
        registry::code_label(self.code)
    }

    /// HTTP status of the code in the default registry
    pub fn http_status(&self) -> i32 {
        registry::code_http_status(self.code)
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// End-user text, labelled from the default registry.
    ///
    /// Empty when neither friendly text nor a fix was given; callers should
    /// then fall back to a generic message. Otherwise renders
    /// `"<label>: <friendly>"`, then each data value comma-separated with a
    /// period after the last, then the fix.
    pub fn friendly(&self) -> String {
        self.render_friendly(&self.label())
    }

    /// [`RichError::friendly`] labelled from `registry`
    pub fn friendly_with(&self, registry: &CodeRegistry) -> String {
        self.render_friendly(&registry.label(self.code))
    }

    /// [`RichError::friendly`], or `fallback` when that is empty
    pub fn friendly_or_generic(&self, fallback: &str) -> String {
        let friendly = self.friendly();
        if friendly.is_empty() {
            fallback.to_string()
        } else {
            friendly
        }
    }

    /// Log-facing text labelled from `registry`
    pub fn describe_with(&self, registry: &CodeRegistry) -> String {
        format!("{}: {}", registry.label(self.code), self.cause)
    }

    fn render_friendly(&self, label: &str) -> String {
        if self.friendly.is_empty() && self.fix.is_empty() {
            return String::new();
        }

        let mut output = format!("{}: {}", label, self.friendly);

        let last = self.data.len().saturating_sub(1);
        for (i, datum) in self.data.iter().enumerate() {
            let separator = if i == last { '.' } else { ',' };
            output.push_str(&format!(" {}{}", datum, separator));
        }

        if !self.fix.is_empty() {
            output.push(' ');
            output.push_str(&self.fix);
        }

        output
    }
}

impl fmt::Display for RichError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.cause)
    }
}

impl Error for RichError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Decorate the error side of a `Result`; `Ok` values pass through.
pub trait ResultExt<T> {
    /// Wrap the error with a code and message
    fn wrap_err(self, code: Code, message: &str, data: Vec<Datum>) -> Result<T, RichError>;

    /// Wrap the error with a code, message and user-facing message
    fn wrap_err_friendly(
        self,
        code: Code,
        message: &str,
        friendly: &str,
        data: Vec<Datum>,
    ) -> Result<T, RichError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[track_caller]
    fn wrap_err(self, code: Code, message: &str, data: Vec<Datum>) -> Result<T, RichError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(RichError::wrap(code, err, message, data)),
        }
    }

    #[track_caller]
    fn wrap_err_friendly(
        self,
        code: Code,
        message: &str,
        friendly: &str,
        data: Vec<Datum>,
    ) -> Result<T, RichError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(RichError::wrap_friendly(code, err, message, friendly, data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use std::io;

    fn assert_send_sync<T: Send + Sync + 'static>() {}

    #[test]
    fn test_rich_error_is_thread_safe() {
        assert_send_sync::<RichError>();
    }

    #[test]
    fn test_new_with_message() {
        let err = RichError::new_friendly(Code::GENERIC, "machine error", "message", data![]);

        assert_eq!(err.friendly(), "error: message");
        assert_eq!(err.to_string(), "error: machine error");
        assert_eq!(err.fix(), "");
        assert_eq!(err.friendly_template(), "message");
    }

    #[test]
    fn test_no_friendly_text_renders_empty() {
        let err = RichError::new(Code::GENERIC, "so bad", data!["ignored"]);

        assert_eq!(err.friendly(), "");
        assert_eq!(err.friendly_or_generic("something went wrong"), "something went wrong");
        assert_eq!(err.to_string(), "error: so bad");
    }

    #[test]
    fn test_root_cause_of_three_level_chain() {
        let val = "a";
        let a = RichError::new(Code::GENERIC, "so bad", data![]);
        let b = RichError::wrap(Code::INVALID_ARGS, a, val, data![]);
        assert_eq!(b.to_string(), "arguments: a: error: so bad");

        let c = RichError::wrap_friendly_fix(
            Code::FORBIDDEN,
            b,
            "you're not allowed access to the value",
            "please try a different value",
            "",
            data![val],
        );

        let root = root_cause(&c);
        assert!(root.downcast_ref::<RichError>().is_none());
        assert!(root.is::<Message>());
        assert_eq!(root.to_string(), "so bad");
        assert_eq!(c.code(), Code::FORBIDDEN);
    }

    #[test]
    fn test_wrap_friendly_fix_with_data() {
        let fix = "are you sure you're logged in?";
        let err = RichError::wrap_friendly_fix(
            Code::FORBIDDEN,
            Message::new("denied"),
            "forbidden",
            "you don't have access to the following things:",
            fix,
            data!["apples", "oranges"],
        );

        assert_eq!(err.code(), Code::FORBIDDEN);
        assert_eq!(err.fix(), fix);
        assert_eq!(
            err.friendly(),
            format!(
                "auth: you don't have access to the following things: apples, oranges. {}",
                fix
            )
        );
        assert_eq!(err.to_string(), "auth: forbidden: denied");
    }

    #[test]
    fn test_new_friendly_fix_with_data() {
        let err = RichError::new_friendly_fix(
            Code::FORBIDDEN,
            "forbidden",
            "you don't have access to the following things:",
            "are you sure you're logged in?",
            data!["apples", "oranges"],
        );

        assert_eq!(
            err.friendly(),
            "auth: you don't have access to the following things: apples, oranges. are you sure you're logged in?"
        );
        assert_eq!(err.http_status(), 403);
    }

    #[test]
    fn test_wrap_foreign_error_with_empty_message() {
        let lookup = |_id: i32| -> Result<(), io::Error> {
            Err(io::Error::new(io::ErrorKind::NotFound, "not found"))
        };

        let id = 1;
        let err = RichError::wrap_friendly(
            Code::NOT_FOUND,
            lookup(id).unwrap_err(),
            "",
            "couldn't find data with the id",
            data![id],
        );

        assert_eq!(err.friendly(), "missing: couldn't find data with the id 1.");
        assert_eq!(err.to_string(), "missing: : not found");
        assert!(root_cause(&err).is::<io::Error>());
    }

    #[test]
    fn test_fix_without_friendly_text() {
        let err =
            RichError::new_friendly_fix(Code::UNAUTHORIZED, "bad token", "", "log in again", data![]);
        assert_eq!(err.friendly(), "auth:  log in again");
    }

    #[test]
    fn test_single_datum_ends_with_period() {
        let err =
            RichError::new_friendly(Code::INVALID_SYNTAX, "parse", "cannot parse", data!["{"]);
        assert_eq!(err.friendly(), "syntax: cannot parse {.");
    }

    #[test]
    fn test_unregistered_code_renders_defaults() {
        let err = RichError::new_friendly(Code::new(-1), "odd", "odd failure", data![]);

        assert_eq!(err.to_string(), "error: odd");
        assert_eq!(err.friendly(), "error: odd failure");
        assert_eq!(err.http_status(), 500);
        assert_eq!(err.label(), "error");
    }

    #[test]
    fn test_rendering_against_isolated_registry() {
        let registry = CodeRegistry::new();
        let quota = Code::new(4290);
        registry.register(quota, 429, "quota").unwrap();

        let err = RichError::new_friendly(quota, "bucket empty", "slow down", data![]);

        assert_eq!(err.friendly_with(&registry), "quota: slow down");
        assert_eq!(err.describe_with(&registry), "quota: bucket empty");
        // Not registered in the default registry
        assert_eq!(err.to_string(), "error: bucket empty");
    }

    #[test]
    fn test_cause_and_source() {
        let err = RichError::wrap(Code::UNAVAILABLE, Message::new("refused"), "connect", data![]);

        assert_eq!(err.cause().to_string(), "connect: refused");
        assert!(err.cause().is::<Wrapped>());
        assert_eq!(err.source().map(|s| s.to_string()), Some("connect: refused".to_string()));
    }

    #[test]
    fn test_location_points_at_constructor_call() {
        let line = line!() + 1;
        let err = RichError::new_friendly_fix(Code::GENERIC, "x", "y", "z", data![]);
        let location = err.location().unwrap();
        assert_eq!(location.line(), line);
        assert!(location.file().ends_with("mod.rs"));

        let line = line!() + 1;
        let wrapped = RichError::wrap_friendly(Code::GENERIC, err, "w", "f", data![]);
        assert_eq!(wrapped.location().unwrap().line(), line);
    }

    #[test]
    fn test_data_kept_in_call_order() {
        let err = RichError::new(Code::GENERIC, "m", data![3, "two", 1.5]);
        let rendered: Vec<String> = err.data().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["3", "two", "1.5"]);
    }

    #[test]
    fn test_result_ext() {
        let ok: Result<u8, io::Error> = Ok(7);
        assert_eq!(ok.wrap_err(Code::GENERIC, "unused", data![]).unwrap(), 7);

        let failed: Result<u8, io::Error> =
            Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
        let err = failed
            .wrap_err_friendly(Code::UNAVAILABLE, "fetch", "service is unreachable", data![])
            .unwrap_err();

        assert_eq!(err.code(), Code::UNAVAILABLE);
        assert_eq!(err.to_string(), "unavailable: fetch: timed out");
        assert_eq!(err.friendly(), "unavailable: service is unreachable");
    }
}
