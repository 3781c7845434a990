//! Configuration management

use crate::speech::VoiceGender;
use crate::translit::FallbackPolicy;
use crate::{PeppiError, Result};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `[speech] api_key`
pub const API_KEY_ENV: &str = "PEPPI_TTS_API_KEY";

/// Core configuration
///
/// Holds the transliteration fallback policy, the answer-matching threshold
/// and the speech provider settings. Credentials live here so they are
/// supplied at construction time, never hardcoded in providers.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.peppi.cfg by default)
    path: PathBuf,
}

impl Config {
    /// Load configuration from ~/.peppi.cfg or create it with defaults
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| PeppiError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| PeppiError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// In-memory configuration with default values, not backed by a file
    pub fn defaults() -> Self {
        Self {
            ini: Self::default_config(),
            path: Self::config_path(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| PeppiError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.peppi.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".peppi.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("transliteration"))
            .set("fallback", "passthrough")
            .set("placeholder", "?");

        ini.with_section(Some("similarity"))
            .set("threshold", "0.8");

        ini.with_section(Some("speech"))
            .set("providers", "ai-voice")
            .set("endpoint", "")
            .set("api_key", "")
            .set("timeout_secs", "10")
            .set("transliterate", "false")
            .set("default_gender", "female");

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f64) -> f64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Transliteration

    /// Policy for characters the mapping tables do not cover
    ///
    /// `fallback = placeholder` emits `placeholder` once per unmapped
    /// cluster; anything else passes the original characters through.
    pub fn fallback_policy(&self) -> FallbackPolicy {
        match self
            .get_string("transliteration", "fallback", "passthrough")
            .to_ascii_lowercase()
            .as_str()
        {
            "placeholder" => FallbackPolicy::Placeholder(self.get_string(
                "transliteration",
                "placeholder",
                "?",
            )),
            "passthrough" => FallbackPolicy::PassThrough,
            other => {
                warn!("Unknown fallback policy '{}', passing characters through", other);
                FallbackPolicy::PassThrough
            }
        }
    }

    // Answer matching

    /// Minimum similarity for a learner answer to be accepted
    pub fn similarity_threshold(&self) -> f64 {
        self.get_float("similarity", "threshold", crate::similarity::DEFAULT_THRESHOLD)
    }

    // Speech

    /// Provider names, in fallback order
    pub fn speech_providers(&self) -> Vec<String> {
        self.get_string("speech", "providers", "ai-voice")
            .split(',')
            .map(|name| name.trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Vendor endpoint URL (empty when not configured)
    pub fn speech_endpoint(&self) -> String {
        self.get_string("speech", "endpoint", "")
    }

    /// Vendor API key; the environment variable wins over the file
    pub fn speech_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| self.ini.get_from(Some("speech"), "api_key").map(str::to_string))
            .filter(|key| !key.trim().is_empty())
    }

    /// Per-call timeout for speech providers
    pub fn speech_timeout(&self) -> Duration {
        let secs = self.get_int("speech", "timeout_secs", 10).max(1);
        Duration::from_secs(secs as u64)
    }

    /// Transliterate text before sending it to the voice vendor?
    pub fn transliterate_for_speech(&self) -> bool {
        self.get_bool("speech", "transliterate", false)
    }

    /// Voice gender used when a request does not name one
    pub fn default_gender(&self) -> VoiceGender {
        self.get_string("speech", "default_gender", "female")
            .parse()
            .unwrap_or_else(|_| {
                warn!("Invalid default_gender in config, using female");
                VoiceGender::Female
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::defaults();
        assert_eq!(config.fallback_policy(), FallbackPolicy::PassThrough);
        assert_eq!(config.similarity_threshold(), 0.8);
        assert_eq!(config.speech_providers(), vec!["ai-voice".to_string()]);
        assert_eq!(config.speech_timeout(), Duration::from_secs(10));
        assert!(!config.transliterate_for_speech());
        assert_eq!(config.default_gender(), VoiceGender::Female);
    }

    #[test]
    fn test_placeholder_policy() {
        let mut config = Config::defaults();
        config.set("transliteration", "fallback", "Placeholder");
        config.set("transliteration", "placeholder", "<?>");
        assert_eq!(
            config.fallback_policy(),
            FallbackPolicy::Placeholder("<?>".to_string())
        );

        config.set("transliteration", "fallback", "bogus");
        assert_eq!(config.fallback_policy(), FallbackPolicy::PassThrough);
    }

    #[test]
    fn test_provider_list_parsing() {
        let mut config = Config::defaults();
        config.set("speech", "providers", " AI-Voice, ,backup ");
        assert_eq!(
            config.speech_providers(),
            vec!["ai-voice".to_string(), "backup".to_string()]
        );
    }

    #[test]
    fn test_timeout_never_zero() {
        let mut config = Config::defaults();
        config.set("speech", "timeout_secs", "0");
        assert_eq!(config.speech_timeout(), Duration::from_secs(1));
    }
}
