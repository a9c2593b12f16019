//! Environment overrides
//!
//! Kept in its own test binary: it sets process-wide environment variables that
//! would leak into the other config tests.

use pwrstat_exporter::config::Config;

#[test]
fn test_env_overrides_source_settings() {
    // Given: Source settings supplied through the environment
    std::env::set_var("PWRSTAT_EXPORTER__SOURCE__ARGS", "-status -verbose");
    std::env::set_var("PWRSTAT_EXPORTER__SOURCE__TIMEOUT_SECONDS", "3");
    std::env::set_var("PWRSTAT_EXPORTER__SERVER__LISTEN_ADDRESS", "127.0.0.1:9999");

    // When: Loading configuration without a file
    let config = Config::load("config/does-not-exist").expect("Failed to load config");

    // Then: The list is split on spaces and scalars keep their types
    assert_eq!(
        config.source.args,
        vec!["-status".to_string(), "-verbose".to_string()]
    );
    assert_eq!(config.source.timeout_seconds, 3);
    assert_eq!(config.server.listen_address, "127.0.0.1:9999");
    assert!(config.validate().is_ok());
}
