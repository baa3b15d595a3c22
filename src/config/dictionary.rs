//! Dictionary configuration validation.
//!
//! The dictionary section of the configuration file deserializes straight into
//! [`DictionaryConfig`]; this module checks the values the builder would
//! otherwise clamp.

use super::{ConfigResult, Validate};
use crate::data_structures::dictionary::DictionaryConfig;
use crate::error::config::ConfigError;

impl Validate for DictionaryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_rehash_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "dictionary.max_rehash_attempts must be greater than 0".to_string(),
            ));
        }

        if self.max_displacements == Some(0) {
            return Err(ConfigError::ValidationError(
                "dictionary.max_displacements must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_bounds() {
        let mut config = DictionaryConfig::default();
        assert!(config.validate().is_ok());

        config.max_rehash_attempts = 0;
        assert!(config.validate().is_err());

        config.max_rehash_attempts = 4;
        config.max_displacements = Some(0);
        assert!(config.validate().is_err());
    }
}
