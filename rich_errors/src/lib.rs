//! Rich, classified errors for application boundaries.
//!
//! A [`RichError`] couples a developer-facing cause with a [`Code`], an
//! optional end-user message, an optional fix hint and the data values
//! involved. Codes map to an HTTP status and a short label through a
//! [`CodeRegistry`]; the process default is seeded with the built-in codes
//! and can be extended with [`register_code`].
//!
//! ```
//! use rich_errors::{data, root_cause, Code, Message, RichError};
//!
//! let fix = "are you sure you're logged in?";
//! let err = RichError::wrap_friendly_fix(
//!     Code::FORBIDDEN,
//!     Message::new("token rejected"),
//!     "forbidden",
//!     "you don't have access to the following things:",
//!     fix,
//!     data!["apples", "oranges"],
//! );
//!
//! assert_eq!(err.to_string(), "auth: forbidden: token rejected");
//! assert_eq!(
//!     err.friendly(),
//!     "auth: you don't have access to the following things: apples, oranges. are you sure you're logged in?"
//! );
//! assert_eq!(err.http_status(), 403);
//! assert_eq!(root_cause(&err).to_string(), "token rejected");
//! ```

// Internal modules
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;

// Re-export key types for library consumers
pub use error::{
    root_cause, try_root_cause, BoxError, Datum, Message, ResultExt, RichError, Wrapped,
};
pub use registry::{
    code_details, code_http_status, code_label, default_registry, register_code, Code,
    CodeDetails, CodeRegistry, RegistryError, RegistryResult,
};
