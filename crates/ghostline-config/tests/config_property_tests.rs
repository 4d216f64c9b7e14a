//! Property tests for configuration validation

use ghostline_config::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_temperature_range(temperature in -5.0f64..5.0) {
        let manager = ConfigManager::new();
        let mut config = AppConfig::default();
        config.ollama.temperature = temperature;

        let valid = manager.validate_config(&config).is_ok();
        prop_assert_eq!(valid, (0.0..=2.0).contains(&temperature));
    }
}
