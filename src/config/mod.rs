mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use crate::persona::Persona;
use defaults::*;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            working_dir: default_working_dir(),
            timeout_sec: default_timeout_sec(),
            synthesis_timeout_sec: default_synthesis_timeout_sec(),
            request_deadline_sec: None,
            provider: default_provider(),
            synthesis_provider: None,
            persona_providers: HashMap::new(),
            providers: ProvidersConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        for id in self.persona_providers.keys() {
            if Persona::from_id(id).is_none() {
                return Err(ConfigError::UnknownPersona(id.clone()));
            }
        }

        if self.timeout_sec == 0 || self.synthesis_timeout_sec == 0 {
            return Err(ConfigError::Invalid(
                "timeouts must be greater than zero".to_string(),
            ));
        }

        if self.request_deadline_sec == Some(0) {
            return Err(ConfigError::Invalid(
                "request_deadline_sec must be greater than zero".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 || self.retry.backoff_base_ms == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts and retry.backoff_base_ms must be greater than zero"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Route every responder to the offline provider
    pub fn force_offline(&mut self) {
        self.provider = Provider::Offline;
        self.synthesis_provider = Some(Provider::Offline);
        self.persona_providers.clear();
    }

    pub fn provider_for(&self, persona: Persona) -> Provider {
        self.persona_providers
            .get(persona.id())
            .copied()
            .unwrap_or(self.provider)
    }

    pub fn synthesis_provider(&self) -> Provider {
        self.synthesis_provider.unwrap_or(self.provider)
    }

    pub fn persona_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }

    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_sec)
    }

    pub fn request_deadline(&self) -> Option<Duration> {
        self.request_deadline_sec.map(Duration::from_secs)
    }
}
