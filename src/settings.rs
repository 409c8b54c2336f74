use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SignBridgeSettings {
    pub logging: LoggingSettings,
    pub vault: VaultSettings,
    pub enrichment: EnrichmentSettings,
    pub providers: Vec<ProviderSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VaultSettings {
    /// Directory for the file-backed vault; in-memory when unset
    pub storage_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentSettings {
    /// Graph API root, optionally including a version segment
    pub graph_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub name: String,
    pub display_name: Option<String>,
    pub enabled: bool,
    /// Scopes used when a sign-in request names none; provider defaults when empty
    pub scopes: Vec<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            graph_base_url: "https://graph.facebook.com".to_string(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            display_name: None,
            enabled: true,
            scopes: Vec::new(),
        }
    }
}

impl SignBridgeSettings {
    /// Load settings from configuration files and environment variables, then start logging
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read or parsed
    /// - TOML parsing fails
    /// - Logger initialization fails
    pub fn load() -> anyhow::Result<Self> {
        // Load base settings from TOML or defaults
        let mut settings = Self::load_base_settings()?;

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut settings);

        Self::initialize_logging(&settings.logging)?;
        Ok(settings)
    }

    /// Initialize `env_logger` at the configured level
    ///
    /// # Errors
    ///
    /// Returns an error if a logger is already installed
    pub fn initialize_logging(logging: &LoggingSettings) -> anyhow::Result<()> {
        env_logger::Builder::new()
            .parse_filters(&logging.level)
            .try_init()?;
        Ok(())
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `SIGNBRIDGE_CONFIG_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read
    /// - TOML parsing fails
    fn load_base_settings() -> anyhow::Result<Self> {
        let mut settings = Self::default();

        let default_config_path = std::path::PathBuf::from("Settings.toml");
        if default_config_path.exists() {
            settings = Self::from_toml(&fs::read_to_string(&default_config_path)?)?;
            println!(
                "✓ Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(config_dir) = std::env::var("SIGNBRIDGE_CONFIG_DIR") {
            let config_path = std::path::Path::new(&config_dir).join("Settings.toml");
            if config_path.exists() {
                settings = Self::from_toml(&fs::read_to_string(&config_path)?)?;
                println!("✓ Overriding settings from {}", config_path.display());
            } else {
                println!(
                    "ℹ SIGNBRIDGE_CONFIG_DIR set but no Settings.toml found at: {}",
                    config_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or does not match the settings layout
    pub fn from_toml(toml_content: &str) -> anyhow::Result<Self> {
        Ok(basic_toml::from_str(toml_content)?)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_logging_env_overrides(&mut settings.logging);
        Self::apply_vault_env_overrides(&mut settings.vault);
        Self::apply_enrichment_env_overrides(&mut settings.enrichment);
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    fn apply_vault_env_overrides(vault_settings: &mut VaultSettings) {
        if let Ok(storage_dir) = std::env::var("SIGNBRIDGE_VAULT_DIR") {
            if !storage_dir.is_empty() {
                vault_settings.storage_dir = Some(storage_dir);
            }
        }
    }

    fn apply_enrichment_env_overrides(enrichment_settings: &mut EnrichmentSettings) {
        if let Ok(base_url) = std::env::var("GRAPH_API_BASE_URL") {
            enrichment_settings.graph_base_url = base_url;
        }
    }

    /// Get enabled providers
    #[must_use]
    pub fn get_enabled_providers(&self) -> Vec<&ProviderSettings> {
        self.providers.iter().filter(|p| p.enabled).collect()
    }

    /// Get provider by name
    #[must_use]
    pub fn get_provider(&self, name: &str) -> Option<&ProviderSettings> {
        self.providers.iter().find(|p| p.name == name)
    }
}
