//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{
    automaton::AutomatonConfig, keywords::KeywordsConfig, scan::ScanConfig,
    scoring::ScoringConfig, ConfigLoader, KiloConfig, Validate,
};
use crate::error::config::{ConfigError, ConfigSection};
use crate::tests::TestFixture;
use std::path::PathBuf;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = KiloConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.scoring.max_score, 1.0);
    assert_eq!(config.scoring.precision, 3);
    assert_eq!(
        config.automaton.cache_path,
        Some(PathBuf::from("config/ac_automaton.json"))
    );
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = KiloConfig::default();

    config.scoring.max_score = 0.0;
    assert!(config.validate().is_err());

    config.scoring.max_score = 1.0;
    config.scan.max_concurrency = 0;
    assert!(config.validate().is_err());

    config.scan.max_concurrency = 4;
    config.log.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

/// Test that validation fails for each section's invalid values.
#[test]
fn test_specific_validation_rules() {
    let keywords = KeywordsConfig {
        default_weight: -0.1,
        ..KeywordsConfig::default()
    };
    assert!(matches!(
        keywords.validate(),
        Err(ConfigError::ValueOutOfRange {
            section: ConfigSection::Keywords,
            field: "default_weight",
            ..
        })
    ));

    let keywords = KeywordsConfig {
        keywords_path: PathBuf::new(),
        ..KeywordsConfig::default()
    };
    assert!(matches!(
        keywords.validate(),
        Err(ConfigError::InvalidValue {
            section: ConfigSection::Keywords,
            field: "keywords_path",
            ..
        })
    ));

    let automaton = AutomatonConfig {
        cache_path: Some(PathBuf::new()),
        rebuild: false,
    };
    assert!(matches!(
        automaton.validate(),
        Err(ConfigError::InvalidValue {
            section: ConfigSection::Automaton,
            ..
        })
    ));

    let automaton = AutomatonConfig {
        cache_path: None,
        rebuild: true,
    };
    assert!(automaton.validate().is_ok());

    let scoring = ScoringConfig {
        max_score: 1.0,
        precision: 11,
    };
    assert!(matches!(
        scoring.validate(),
        Err(ConfigError::ValueOutOfRange {
            section: ConfigSection::Scoring,
            field: "precision",
            ..
        })
    ));

    let scan = ScanConfig {
        max_concurrency: 1,
        max_file_size_bytes: 0,
    };
    assert!(scan.validate().is_err());
}

/// Test loading configuration from a TOML file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .write_file(
            "kilo.toml",
            r#"
            [scoring]
            max_score = 2.0

            [automaton]
            rebuild = true

            [keywords]
            default_weight = 0.25
            "#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_FILE").load().unwrap();

    assert_eq!(config.scoring.max_score, 2.0);
    assert!(config.automaton.rebuild);
    assert_eq!(config.keywords.default_weight, 0.25);

    // Other values should be defaults
    assert_eq!(config.scoring.precision, 3);
    assert_eq!(
        config.keywords.keywords_path,
        PathBuf::from("config/scam_keywords.yml")
    );
}

/// Test loading configuration from YAML and JSON files.
#[test]
fn test_load_config_other_formats() {
    let fixture = TestFixture::new().unwrap();

    let yaml = fixture
        .write_file("kilo.yaml", "scoring:\n  precision: 2\n")
        .unwrap();
    let config = ConfigLoader::new(Some(&yaml), "TEST_YAML").load().unwrap();
    assert_eq!(config.scoring.precision, 2);

    let json = fixture
        .write_file("kilo.json", r#"{ "scan": { "max_file_size_bytes": 1024 } }"#)
        .unwrap();
    let config = ConfigLoader::new(Some(&json), "TEST_JSON").load().unwrap();
    assert_eq!(config.scan.max_file_size_bytes, 1024);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .write_file("kilo.toml", "[scoring]\nmax_score = 2.0\n")
        .unwrap();

    fixture.set_env("TEST_ENV__SCORING__MAX_SCORE", "5.0");
    fixture.set_env("TEST_ENV__LOG__LEVEL", "trace");

    let config = ConfigLoader::new(Some(&config_path), "TEST_ENV").load().unwrap();

    // Environment variables take precedence over the file
    assert_eq!(config.scoring.max_score, 5.0);
    assert_eq!(config.log.level, "trace");
}

/// Test that an invalid value from the environment fails validation.
#[test]
fn test_env_var_validation() {
    let mut fixture = TestFixture::new().unwrap();
    fixture.set_env("TEST_ENV_INVALID__SCAN__MAX_CONCURRENCY", "0");

    let result = ConfigLoader::new(None::<&str>, "TEST_ENV_INVALID").load();
    let error = result.unwrap_err();
    assert!(matches!(
        error,
        ConfigError::ValueOutOfRange {
            section: ConfigSection::Scan,
            field: "max_concurrency",
            ..
        }
    ));
    assert_eq!(
        error.to_string(),
        "scan.max_concurrency is out of range: must be greater than 0"
    );
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .write_file("invalid.toml", "[scoring\nmax_score = one\"\n")
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test missing files and unsupported extensions.
#[test]
fn test_load_missing_or_unsupported_file() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.path("missing.toml");
    assert!(matches!(
        ConfigLoader::new(Some(&missing), "TEST_MISSING").load(),
        Err(ConfigError::FileNotFound(_))
    ));

    let ini = fixture.write_file("kilo.ini", "a = 1").unwrap();
    assert!(matches!(
        ConfigLoader::new(Some(&ini), "TEST_INI").load(),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

/// Test that a generated default configuration loads back unchanged.
#[test]
fn test_generated_config_round_trip() {
    let fixture = TestFixture::new().unwrap();
    let toml = toml::to_string_pretty(&KiloConfig::default()).unwrap();
    let path = fixture.write_file("generated.toml", toml).unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_GENERATED").load().unwrap();
    assert_eq!(config.keywords.default_weight, 0.1);
    assert_eq!(config.scan.max_concurrency, num_cpus::get());
}
