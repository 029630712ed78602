//! Global subscriber installation.
//!
//! Lives in its own test binary so the subscriber it installs does not
//! leak into the library's unit tests.

use codebase_chat::logging::{init, LogConfig, LogFormat};

#[test]
fn test_init_only_once() {
    assert!(init(LogConfig::default()));
    assert!(!init(LogConfig::default()));
    assert!(!init(LogConfig {
        format: LogFormat::Json,
        ..LogConfig::default()
    }));
}
