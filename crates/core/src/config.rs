use serde::Deserialize;

/// Root application configuration. Loaded from an optional `reward-calc.toml`
/// and environment variables with the prefix `REWARD_CALC__`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the reward schedule is persisted between sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// JSON file used by the file backend.
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Fixed key the configuration record is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    File,
    /// In-process only; nothing survives the session.
    Memory,
}

fn default_storage_path() -> String {
    "reward-calc.json".to_string()
}
fn default_storage_key() -> String {
    "rewardCalculatorConfig".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the optional config file and environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("reward-calc").required(false))
            .add_source(
                config::Environment::with_prefix("REWARD_CALC")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
