use super::*;

#[test]
fn test_error_codes_in_display() {
    let err = CoreError::InvalidMigrationFilename {
        filename: "invalid_2.sql".to_string(),
    };
    assert!(err.to_string().starts_with("[M001]"));
    assert!(err.to_string().contains("invalid_2.sql"));

    let err = CoreError::DuplicateMigrationVersion { version: 2 };
    assert_eq!(err.to_string(), "[M004] Duplicate migration version: 2");

    let err = CoreError::MissingMigrationVersion { version: 3 };
    assert_eq!(err.to_string(), "[M005] Missing migration version: 3");
}

#[test]
fn test_yaml_error_converts_to_parse_error() {
    let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
    let err: CoreError = yaml_err.into();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}
