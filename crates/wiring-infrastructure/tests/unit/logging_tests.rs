//! Logging configuration tests

use tracing::Level;
use wiring_infrastructure::{LoggingConfig, init_logging, parse_log_level};

#[test]
fn test_parse_log_level_accepts_known_levels() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("Info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    let err = parse_log_level("verbose").unwrap_err();

    assert!(err.to_string().contains("Invalid log level: verbose"));
}

#[test]
fn test_init_logging_rejects_invalid_level_before_installing() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };

    assert!(init_logging(&config).is_err());
}

#[test]
fn test_second_init_fails_instead_of_panicking() {
    let config = LoggingConfig::default();

    // Another test in this binary may have installed the subscriber first
    let _ = init_logging(&config);

    assert!(init_logging(&config).is_err());
}
