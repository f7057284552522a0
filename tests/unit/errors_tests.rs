/*!
 * Tests for error types and conversions
 */

use transqa::{AppError, ClassificationError, ConfigError, DetectionError};

#[test]
fn test_configError_display_shouldNameField() {
    let error = ConfigError::invalid("similarity_cutoff", "1.5 is outside 0-1");
    assert_eq!(
        error.to_string(),
        "Invalid configuration value for similarity_cutoff: 1.5 is outside 0-1"
    );
}

#[test]
fn test_detectionError_from_shouldWrapSourceErrors() {
    let from_config: DetectionError = ConfigError::DuplicatePattern("semantic_drift".to_string()).into();
    assert!(matches!(from_config, DetectionError::Config(_)));
    assert!(from_config.to_string().contains("semantic_drift"));

    let from_classification: DetectionError = ClassificationError::Unavailable("down".to_string()).into();
    assert!(matches!(from_classification, DetectionError::Classification(_)));
}

#[test]
fn test_appError_from_shouldConvertCommonErrors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(AppError::from(io_error), AppError::File(_)));

    let anyhow_error = anyhow::anyhow!("something broke");
    assert!(matches!(AppError::from(anyhow_error), AppError::Unknown(_)));

    let detection = DetectionError::TaskFailed("pair 3".to_string());
    assert!(matches!(AppError::from(detection), AppError::Detection(_)));
}

#[test]
fn test_configError_fromSerdeJson_shouldBeParseError() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(ConfigError::from(json_error), ConfigError::Parse(_)));
}
