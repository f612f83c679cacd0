//! Configuration access for logging
//!
//! Buffer limits are compile-time constants; levels and sinks are runtime
//! preferences read once from the environment.

use super::events::LogLevel;
use crate::config::compile_time::logging::LOG_BUFFER_SIZE;
use crate::config::runtime::{RegistryPreferences, RuntimeConfig};
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<RuntimeConfig> = OnceLock::new();

/// Preferences read from the environment on first use
fn get_runtime_preferences() -> &'static RuntimeConfig {
    RUNTIME_PREFERENCES.get_or_init(RuntimeConfig::from_env)
}

pub fn get_min_log_level() -> LogLevel {
    get_runtime_preferences().logging.min_log_level
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().logging.enable_console_logging
}

pub fn registry_preferences() -> &'static RegistryPreferences {
    &get_runtime_preferences().registry
}

/// Get event buffer size (compile-time constant)
pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}
