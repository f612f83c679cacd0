//! Event codes emitted by the crate's own logging, with their categories.
//!
//! These identify log events (registrations, reported errors), not error
//! classifications; classifications live in [`crate::registry::Code`].

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Identifier attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventCode(&'static str);

impl EventCode {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for EventCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// EVENT CODE CONSTANTS
// ============================================================================

/// Code registry events
pub mod registry {
    use super::EventCode;

    pub const CODE_REGISTERED: EventCode = EventCode::new("R001");
    pub const DUPLICATE_REGISTRATION: EventCode = EventCode::new("R002");
}

/// Rich error reporting events
pub mod report {
    use super::EventCode;

    pub const RICH_ERROR_REPORTED: EventCode = EventCode::new("E001");
}

/// System lifecycle events
pub mod system {
    use super::EventCode;

    pub const GENERIC_INFO: EventCode = EventCode::new("I000");
    pub const LOGGING_INITIALIZED: EventCode = EventCode::new("I001");
}

// ============================================================================
// CATEGORY TABLE
// ============================================================================

static EVENT_CATEGORIES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn get_event_categories() -> &'static HashMap<&'static str, &'static str> {
    EVENT_CATEGORIES.get_or_init(|| {
        [
            (registry::CODE_REGISTERED, "Registry"),
            (registry::DUPLICATE_REGISTRATION, "Registry"),
            (report::RICH_ERROR_REPORTED, "Report"),
            (system::GENERIC_INFO, "System"),
            (system::LOGGING_INITIALIZED, "System"),
        ]
        .into_iter()
        .map(|(code, category)| (code.as_str(), category))
        .collect()
    })
}

/// Get event category, "Unknown" for unlisted codes
pub fn get_category(code: &str) -> &'static str {
    get_event_categories()
        .get(code)
        .copied()
        .unwrap_or("Unknown")
}
