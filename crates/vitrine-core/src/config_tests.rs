//! Tests for `config` module

use std::path::PathBuf;

use figment::Jail;

use super::config::{ConfigError, RecommenderConfig};

#[test]
fn test_defaults_match_documented_values() {
    let config = RecommenderConfig::default();
    assert!((config.similarity_weight - 0.75).abs() < f64::EPSILON);
    assert_eq!(config.neighbor_pool_size, 30);
    assert_eq!(config.max_vocabulary_size, 20_000);
    assert_eq!(config.ngram_range, (1, 2));
    assert_eq!(config.min_document_frequency, 2);
    assert_eq!(config.default_top_n, 10);
    assert_eq!(config.suggestion_limit, 5);
    assert_eq!(config.data_file, "clean_data.csv");
    assert_eq!(
        config.data_dirs,
        vec![PathBuf::from("data"), PathBuf::from(".")]
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_without_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let config = RecommenderConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config, RecommenderConfig::default());
        Ok(())
    });
}

#[test]
fn test_toml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "vitrine.toml",
            r#"
                similarity_weight = 0.5
                neighbor_pool_size = 12
                ngram_range = [1, 3]
                data_dirs = ["datasets"]
            "#,
        )?;
        let config = RecommenderConfig::load().map_err(|e| e.to_string())?;
        assert!((config.similarity_weight - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.neighbor_pool_size, 12);
        assert_eq!(config.ngram_range, (1, 3));
        assert_eq!(config.data_dirs, vec![PathBuf::from("datasets")]);
        // Untouched keys keep their defaults
        assert_eq!(config.default_top_n, 10);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("vitrine.toml", "neighbor_pool_size = 12")?;
        jail.set_env("VITRINE_NEIGHBOR_POOL_SIZE", "40");
        jail.set_env("VITRINE_DATA_FILE", "catalog.csv");
        let config = RecommenderConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.neighbor_pool_size, 40);
        assert_eq!(config.data_file, "catalog.csv");
        Ok(())
    });
}

#[test]
fn test_load_rejects_out_of_range_values() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "similarity_weight = 1.5")?;
        let err = RecommenderConfig::load_from("custom.toml").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "similarity_weight"
        ));
        Ok(())
    });
}

#[test]
fn test_load_reports_type_errors() {
    Jail::expect_with(|jail| {
        jail.create_file("vitrine.toml", "neighbor_pool_size = \"many\"")?;
        let err = RecommenderConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        Ok(())
    });
}

#[test]
fn test_validate_rejects_bad_ngram_range() {
    let config = RecommenderConfig {
        ngram_range: (2, 1),
        ..RecommenderConfig::default()
    };
    assert!(config.validate().is_err());

    let config = RecommenderConfig {
        ngram_range: (0, 2),
        ..RecommenderConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_counts() {
    for config in [
        RecommenderConfig {
            neighbor_pool_size: 0,
            ..RecommenderConfig::default()
        },
        RecommenderConfig {
            max_vocabulary_size: 0,
            ..RecommenderConfig::default()
        },
        RecommenderConfig {
            min_document_frequency: 0,
            ..RecommenderConfig::default()
        },
        RecommenderConfig {
            default_top_n: 0,
            ..RecommenderConfig::default()
        },
    ] {
        assert!(config.validate().is_err(), "{config:?}");
    }
}

#[test]
fn test_validate_rejects_nan_weight() {
    let config = RecommenderConfig {
        similarity_weight: f64::NAN,
        ..RecommenderConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_data_dirs() {
    let config = RecommenderConfig {
        data_dirs: Vec::new(),
        ..RecommenderConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_to_toml_string_roundtrips_through_figment() {
    Jail::expect_with(|jail| {
        let original = RecommenderConfig {
            neighbor_pool_size: 7,
            search_cutoff: 0.3,
            ..RecommenderConfig::default()
        };
        let rendered = original.to_toml_string().map_err(|e| e.to_string())?;
        jail.create_file("vitrine.toml", &rendered)?;
        let loaded = RecommenderConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(loaded, original);
        Ok(())
    });
}
