//! Integration tests for ConfigManager

use std::time::Duration;

use ghostline_config::*;
use serial_test::serial;
use tempfile::TempDir;

fn manager_in(dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("ghostline").join("config.toml"))
        .with_env_prefix("GHOSTLINE_IT")
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();
    assert_eq!(config.model, "codellama:7b-code");
    assert_eq!(config.ollama.base_url, "http://localhost:11434");
    assert_eq!(config.ollama.request_timeout_ms, 4000);
    assert_eq!(config.ollama.max_attempts, 4);
    assert_eq!(config.cache.max_entries, 1000);
    assert_eq!(config.cache.idle_timeout_secs, 600);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.debug);
}

#[test]
#[serial]
fn test_load_without_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);

    let config = manager.load_config().unwrap();
    assert_eq!(config, AppConfig::default());
}

// ============================================================================
// Layering
// ============================================================================

#[test]
#[serial]
fn test_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    std::fs::create_dir_all(manager.config_path().parent().unwrap()).unwrap();
    std::fs::write(
        manager.config_path(),
        "model = \"starcoder2:3b\"\n\n[ollama]\nbase_url = \"http://gpu-box:11434\"\n",
    )
    .unwrap();

    let config = manager.load_config().unwrap();
    assert_eq!(config.model, "starcoder2:3b");
    assert_eq!(config.ollama.base_url, "http://gpu-box:11434");
    assert_eq!(config.ollama.max_attempts, 4);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    manager
        .save_config(&AppConfig {
            model: "from-file".to_string(),
            ..AppConfig::default()
        })
        .unwrap();

    std::env::set_var("GHOSTLINE_IT_MODEL", "from-env");
    std::env::set_var("GHOSTLINE_IT_OLLAMA__MAX_ATTEMPTS", "2");
    let result = manager.load_config();
    std::env::remove_var("GHOSTLINE_IT_MODEL");
    std::env::remove_var("GHOSTLINE_IT_OLLAMA__MAX_ATTEMPTS");

    let config = result.unwrap();
    assert_eq!(config.model, "from-env");
    assert_eq!(config.ollama.max_attempts, 2);
    assert_eq!(
        config.ollama.generation_config().request_timeout,
        Duration::from_secs(4)
    );
}

#[test]
#[serial]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    std::fs::create_dir_all(manager.config_path().parent().unwrap()).unwrap();
    std::fs::write(manager.config_path(), "[cache]\nmax_entries = 0\n").unwrap();

    match manager.load_config() {
        Err(ConfigError::Validation(msg)) => assert!(msg.contains("Cache size")),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    std::fs::create_dir_all(manager.config_path().parent().unwrap()).unwrap();
    std::fs::write(manager.config_path(), "model = [unterminated").unwrap();

    assert!(matches!(manager.load_config(), Err(ConfigError::Parse(_))));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
#[serial]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    let mut config = AppConfig::default();
    config.ollama.temperature = 0.2;
    config.logging.debug = true;

    manager.save_config(&config).unwrap();
    assert!(manager.config_path().exists());

    assert_eq!(manager.load_config().unwrap(), config);
}

#[test]
#[serial]
fn test_set_model_persists() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);

    let updated = manager.set_model("deepseek-coder:1.3b").unwrap();
    assert_eq!(updated.model, "deepseek-coder:1.3b");

    let reloaded = manager.load_config().unwrap();
    assert_eq!(reloaded.model, "deepseek-coder:1.3b");
}

#[test]
#[serial]
fn test_set_model_rejects_blank() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);

    assert!(manager.set_model("   ").is_err());
    assert!(!manager.config_path().exists());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validation_rules() {
    let manager = ConfigManager::new();
    assert!(manager.validate_config(&AppConfig::default()).is_ok());

    let cases: [fn(&mut AppConfig); 10] = [
        |c| c.model = String::new(),
        |c| c.ollama.base_url = " ".to_string(),
        |c| c.ollama.max_attempts = 0,
        |c| c.ollama.request_timeout_ms = 0,
        |c| c.ollama.probe_timeout_ms = 0,
        |c| c.ollama.temperature = 2.5,
        |c| c.ollama.temperature = -0.1,
        |c| c.cache.max_entries = 0,
        |c| c.cache.idle_timeout_secs = 0,
        |c| c.logging.level = "verbose".to_string(),
    ];

    for mutate in cases {
        let mut config = AppConfig::default();
        mutate(&mut config);
        assert!(
            matches!(manager.validate_config(&config), Err(ConfigError::Validation(_))),
            "expected {:?} to be rejected",
            config
        );
    }
}

#[test]
fn test_log_level_is_case_insensitive() {
    let manager = ConfigManager::new();
    let mut config = AppConfig::default();
    config.logging.level = "DEBUG".to_string();
    assert!(manager.validate_config(&config).is_ok());
}
