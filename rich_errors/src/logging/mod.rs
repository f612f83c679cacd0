//! Global logging module for rich_errors
//!
//! Provides a process-wide logger installed once at startup and helpers for
//! reporting rich errors at application boundaries. Reporting without an
//! explicit service is a no-op until a global logger is installed.

pub mod codes;
pub mod config;
pub mod events;
pub mod service;

use std::sync::{Arc, OnceLock};

use crate::error::{root_cause, RichError};

pub use codes::EventCode;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, NullLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    let service = Arc::new(LoggingService::with_config());

    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized")?;

    service.log_info_with_code(
        codes::system::LOGGING_INITIALIZED,
        &format!(
            "Global logging system initialized ({})",
            crate::config::build_info::source_info()
        ),
    );

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Send an event to `target`, or to the global logger when no target is given
pub fn dispatch(target: Option<&LoggingService>, event: LogEvent) {
    match target {
        Some(service) => service.log_event(event),
        None => {
            if let Some(global) = try_get_global_logger() {
                global.log_event(event);
            }
        }
    }
}

// ============================================================================
// RICH ERROR REPORTING
// ============================================================================

/// Build the `E001` event describing a rich error
pub fn rich_error_event(err: &RichError) -> LogEvent {
    let mut event = LogEvent::error(codes::report::RICH_ERROR_REPORTED, &err.to_string())
        .with_context("code", &err.code().to_string())
        .with_context("label", &err.label())
        .with_context("http_status", &err.http_status().to_string())
        .with_context("root_cause", &root_cause(err).to_string());

    let friendly = err.friendly();
    if !friendly.is_empty() {
        event = event.with_context("friendly", &friendly);
    }
    event
}

/// Report a rich error to the global logger
pub fn log_rich_error(err: &RichError) {
    dispatch(None, rich_error_event(err));
}

/// Report a rich error to a specific logging service
pub fn log_rich_error_to(service: &LoggingService, err: &RichError) {
    service.log_event(rich_error_event(err));
}
