//! Code registry: maps classification codes to presentation details
//!
//! A [`CodeRegistry`] is an explicit, lock-guarded mapping seeded with the
//! built-in codes. The process default lives behind [`default_registry`];
//! tests and embedders can build isolated instances instead. Lookups never
//! fail: unregistered codes resolve to status 500 and label `"error"`.

pub mod code;
pub mod error;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::compile_time::registry::{DEFAULT_HTTP_STATUS, DEFAULT_LABEL};
use crate::logging::{self, codes as event_codes, LogEvent, LoggingService};

pub use code::{Code, CodeDetails, BUILTIN_CODES};
pub use error::{RegistryError, RegistryResult};

/// Thread-safe mapping from [`Code`] to [`CodeDetails`]
pub struct CodeRegistry {
    codes: RwLock<HashMap<Code, CodeDetails>>,
    logger: Option<Arc<LoggingService>>,
    log_registrations: bool,
}

impl CodeRegistry {
    /// Registry seeded with the built-in codes
    pub fn new() -> Self {
        let codes = BUILTIN_CODES
            .iter()
            .map(|&(code, status, label)| (code, CodeDetails::new(status, label)))
            .collect();

        Self::with_codes(codes)
    }

    /// Registry with no codes at all
    pub fn empty() -> Self {
        Self::with_codes(HashMap::new())
    }

    fn with_codes(codes: HashMap<Code, CodeDetails>) -> Self {
        Self {
            codes: RwLock::new(codes),
            logger: None,
            log_registrations: logging::config::registry_preferences().log_registrations,
        }
    }

    /// Send registration events to `service` instead of the global logger
    pub fn with_logger(mut self, service: Arc<LoggingService>) -> Self {
        self.logger = Some(service);
        self
    }

    /// Turn `R001` events for successful registrations on or off.
    /// Defaults to `RICH_ERRORS_REGISTRY_LOG_REGISTRATIONS` (on when unset).
    pub fn log_registrations(mut self, enabled: bool) -> Self {
        self.log_registrations = enabled;
        self
    }

    // The map is only ever mutated by a single insert, so a poisoned
    // lock still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Code, CodeDetails>> {
        self.codes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Code, CodeDetails>> {
        self.codes.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register presentation details for a new code.
    ///
    /// Any status and any label are accepted as given. The only rejection is
    /// a code that is already present, in which case the registry keeps the
    /// existing details.
    pub fn register(
        &self,
        code: Code,
        http_status: i32,
        label: impl Into<String>,
    ) -> RegistryResult<()> {
        let label = label.into();
        let result = self.try_insert(code, http_status, label.clone());

        match &result {
            Ok(()) => {
                if self.log_registrations {
                    let event = LogEvent::info_with_code(
                        event_codes::registry::CODE_REGISTERED,
                        "Error code registered",
                    )
                    .with_context("code", &code.to_string())
                    .with_context("http_status", &http_status.to_string())
                    .with_context("label", &label);
                    logging::dispatch(self.logger.as_deref(), event);
                }
            }
            Err(err) => {
                let event = LogEvent::warning_with_code(err.event_code(), &err.to_string())
                    .with_context("code", &code.to_string());
                logging::dispatch(self.logger.as_deref(), event);
            }
        }

        result
    }

    fn try_insert(&self, code: Code, http_status: i32, label: String) -> RegistryResult<()> {
        let mut codes = self.write();

        if let Some(existing) = codes.get(&code) {
            return Err(RegistryError::already_registered(
                code,
                existing.http_status(),
                existing.label(),
            ));
        }

        codes.insert(code, CodeDetails::new(http_status, label));
        Ok(())
    }

    /// Registered details, if any
    pub fn details(&self, code: Code) -> Option<CodeDetails> {
        self.read().get(&code).cloned()
    }

    /// Registered label, or `"error"` for unregistered codes
    pub fn label(&self, code: Code) -> String {
        self.read()
            .get(&code)
            .map(|details| details.label().to_string())
            .unwrap_or_else(|| DEFAULT_LABEL.to_string())
    }

    /// Registered HTTP status, or 500 for unregistered codes
    pub fn http_status(&self, code: Code) -> i32 {
        self.read()
            .get(&code)
            .map(CodeDetails::http_status)
            .unwrap_or(DEFAULT_HTTP_STATUS)
    }

    pub fn contains(&self, code: Code) -> bool {
        self.read().contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All registered codes in ascending order
    pub fn codes(&self) -> Vec<Code> {
        let mut codes: Vec<Code> = self.read().keys().copied().collect();
        codes.sort();
        codes
    }
}

impl Default for CodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeRegistry")
            .field("codes", &*self.read())
            .finish()
    }
}

// ============================================================================
// PROCESS DEFAULT REGISTRY
// ============================================================================

static DEFAULT_REGISTRY: OnceLock<CodeRegistry> = OnceLock::new();

/// Process-wide registry, seeded with the built-in codes on first use
pub fn default_registry() -> &'static CodeRegistry {
    DEFAULT_REGISTRY.get_or_init(CodeRegistry::new)
}

/// Register a code with the default registry
pub fn register_code(code: Code, http_status: i32, label: impl Into<String>) -> RegistryResult<()> {
    default_registry().register(code, http_status, label)
}

/// Label of a code in the default registry, `"error"` if unregistered
pub fn code_label(code: Code) -> String {
    default_registry().label(code)
}

/// HTTP status of a code in the default registry, 500 if unregistered
pub fn code_http_status(code: Code) -> i32 {
    default_registry().http_status(code)
}

/// Details of a code in the default registry
pub fn code_details(code: Code) -> Option<CodeDetails> {
    default_registry().details(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger};
    use assert_matches::assert_matches;

    #[test]
    fn test_builtin_table() {
        let registry = CodeRegistry::new();

        let expected = [
            (Code::UNKNOWN, 500, "error"),
            (Code::GENERIC, 500, "error"),
            (Code::INVALID_SYNTAX, 400, "syntax"),
            (Code::INVALID_ARGS, 400, "arguments"),
            (Code::UNAUTHORIZED, 401, "auth"),
            (Code::FORBIDDEN, 403, "auth"),
            (Code::NOT_FOUND, 404, "missing"),
            (Code::UNAVAILABLE, 503, "unavailable"),
        ];
        for (code, status, label) in expected {
            assert_eq!(registry.http_status(code), status);
            assert_eq!(registry.label(code), label);
        }
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_unregistered_codes_use_defaults() {
        let registry = CodeRegistry::new();

        for code in [Code::new(-1), Code::new(8), Code::new(i32::MAX), Code::new(i32::MIN)] {
            assert_eq!(registry.label(code), "error");
            assert_eq!(registry.http_status(code), 500);
            assert!(registry.details(code).is_none());
        }

        let empty = CodeRegistry::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.label(Code::FORBIDDEN), "error");
        assert_eq!(empty.http_status(Code::NOT_FOUND), 500);
    }

    #[test]
    fn test_register_and_read_back() {
        let registry = CodeRegistry::new();
        let no_database = Code::new(100);

        registry.register(no_database, 504, "database").unwrap();

        assert_eq!(registry.http_status(no_database), 504);
        assert_eq!(registry.label(no_database), "database");
        assert_eq!(
            registry.details(no_database),
            Some(CodeDetails::new(504, "database"))
        );
        assert!(registry.contains(no_database));
    }

    #[test]
    fn test_duplicate_registration_keeps_original() {
        let registry = CodeRegistry::new();

        let result = registry.register(Code::FORBIDDEN, 200, "forbidden");
        assert_matches!(
            result,
            Err(RegistryError::AlreadyRegistered { code, existing_status: 403, .. }) if code == Code::FORBIDDEN
        );
        assert_eq!(registry.http_status(Code::FORBIDDEN), 403);
        assert_eq!(registry.label(Code::FORBIDDEN), "auth");

        let custom = Code::new(100);
        registry.register(custom, 504, "database").unwrap();
        assert!(registry.register(custom, 502, "other").is_err());
        assert_eq!(registry.details(custom), Some(CodeDetails::new(504, "database")));
    }

    #[test]
    fn test_any_status_and_label_are_accepted() {
        let registry = CodeRegistry::new();
        let long_label = "a label well past anything a status line would carry";

        let cases = [
            (Code::new(100), 600, "teapot"),
            (Code::new(101), 0, "zero"),
            (Code::new(102), -1, "negative"),
            (Code::new(103), 404, ""),
            (Code::new(104), 500, long_label),
        ];
        for (code, status, label) in cases {
            registry.register(code, status, label).unwrap();
        }

        for (code, status, label) in cases {
            assert!(registry.contains(code));
            assert_eq!(registry.http_status(code), status);
            assert_eq!(registry.label(code), label);
        }
        assert_eq!(registry.len(), 8 + cases.len());
    }

    #[test]
    fn test_codes_sorted() {
        let registry = CodeRegistry::new();
        registry.register(Code::new(-5), 418, "teapot").unwrap();

        let codes = registry.codes();
        assert_eq!(codes.first(), Some(&Code::new(-5)));
        assert_eq!(codes.last(), Some(&Code::UNAVAILABLE));
    }

    fn memory_registry() -> (Arc<MemoryLogger>, CodeRegistry) {
        let memory = Arc::new(MemoryLogger::new());
        let registry = CodeRegistry::new()
            .with_logger(Arc::new(LoggingService::new(memory.clone(), LogLevel::Debug)));
        (memory, registry)
    }

    #[test]
    fn test_registration_events() {
        let (memory, registry) = memory_registry();
        let registry = registry.log_registrations(true);

        registry.register(Code::new(100), 504, "database").unwrap();
        registry.register(Code::FORBIDDEN, 200, "forbidden").unwrap_err();

        let registered = memory.get_events_with_code(event_codes::registry::CODE_REGISTERED);
        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].level, LogLevel::Info);
        assert_eq!(registered[0].context["code"], "100");
        assert_eq!(registered[0].context["http_status"], "504");
        assert_eq!(registered[0].context["label"], "database");

        let warnings = memory.get_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, event_codes::registry::DUPLICATE_REGISTRATION);
        assert_eq!(warnings[0].context["code"], "5");
        assert_eq!(memory.event_count(), 2);
    }

    #[test]
    fn test_registration_events_can_be_silenced() {
        let (memory, registry) = memory_registry();
        let registry = registry.log_registrations(false);

        registry.register(Code::new(100), 504, "database").unwrap();
        assert!(!memory.has_event_with_code(event_codes::registry::CODE_REGISTERED));

        // Rejections are still reported
        registry.register(Code::new(100), 502, "other").unwrap_err();
        assert!(memory.has_event_with_code(event_codes::registry::DUPLICATE_REGISTRATION));
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(CodeRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let shared = registry.register(Code::new(1000), 500, "shared").is_ok();
                    registry.register(Code::new(2000 + i), 500, "own").unwrap();
                    assert_eq!(registry.label(Code::FORBIDDEN), "auth");
                    shared
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(registry.len(), 8 + 1 + 8);
    }

    #[test]
    fn test_default_registry_free_functions() {
        let database = Code::new(100);
        // Other tests may have registered it first
        let _ = register_code(database, 504, "database");

        assert_eq!(code_http_status(database), 504);
        assert_eq!(code_label(database), "database");
        assert_eq!(code_details(database), Some(CodeDetails::new(504, "database")));
        assert_eq!(database.label(), "database");
        assert_eq!(database.http_status(), 504);

        assert!(register_code(Code::FORBIDDEN, 200, "forbidden").is_err());
        assert_eq!(code_http_status(Code::FORBIDDEN), 403);
        assert_eq!(code_label(Code::new(-1)), "error");
        assert_eq!(code_http_status(Code::new(-1)), 500);
    }
}
