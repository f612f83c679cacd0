// build.rs - TOML-driven constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    registry: RegistryLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct RegistryLimits {
    default_http_status: i32,
    default_label: String,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RICH_ERRORS_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=RICH_ERRORS_CONFIG_DIR");

    let profile =
        env::var("RICH_ERRORS_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("RICH_ERRORS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the crate directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig) {
    let registry = &config.registry;

    // Unregistered codes must keep rendering as "error" / 500
    if registry.default_http_status != 500 {
        panic!("CONTRACT: default_http_status must be 500");
    }
    if registry.default_label != "error" {
        panic!("CONTRACT: default_label must be \"error\"");
    }

    if config.logging.log_buffer_size == 0 {
        panic!("CONFIG: log_buffer_size must be positive");
    }
    if config.logging.max_log_message_length == 0 {
        panic!("CONFIG: max_log_message_length must be positive");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod registry {{
        pub const DEFAULT_HTTP_STATUS: i32 = {};
        pub const DEFAULT_LABEL: &str = {:?};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.registry.default_http_status,
        config.registry.default_label,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(&output_path, constants_code)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", output_path.display(), e));
}
