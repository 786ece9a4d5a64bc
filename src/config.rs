use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

use crate::history::{FileStore, DEFAULT_HISTORY_CAPACITY};
use crate::intent::{Intent, Platform, MAX_TONE};
use crate::synthesizer::OptimizeOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub optimizer: OptimizerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub default_intent: Intent,
    #[serde(default)]
    pub default_platform: Platform,
    pub default_tone: u8,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Artificial delay before an interactive optimize, in milliseconds.
    #[serde(default)]
    pub optimize_latency_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub store_path: Option<PathBuf>,
    pub history_capacity: usize,
    pub template_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            optimizer: OptimizerConfig {
                default_intent: Intent::General,
                default_platform: Platform::Generic,
                default_tone: 50,
                debounce_ms: default_debounce_ms(),
                optimize_latency_ms: 0,
            },
            storage: StorageConfig {
                store_path: std::env::var("PROMPTLENS_STORE").ok().map(PathBuf::from),
                history_capacity: DEFAULT_HISTORY_CAPACITY,
                template_dir: None,
            },
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".promptlens"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yml"))
    }

    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path).await
    }

    /// Reads `path`, creating it with defaults when absent.
    pub async fn load_from(path: &PathBuf) -> Result<Self> {
        if fs::try_exists(path).await? {
            let content = fs::read_to_string(path).await?;
            let mut config: Config = serde_yaml::from_str(&content)?;

            // Environment wins over the file for the store location
            if let Ok(store) = std::env::var("PROMPTLENS_STORE") {
                config.storage.store_path = Some(PathBuf::from(store));
            }
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path).await?;
            Ok(config)
        }
    }

    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path).await
    }

    pub async fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;

        Ok(())
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.storage.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(FileStore::default_path()?),
        }
    }

    pub fn set_default_intent(&mut self, intent: Intent) {
        self.optimizer.default_intent = intent;
    }

    pub fn set_default_platform(&mut self, platform: Platform) {
        self.optimizer.default_platform = platform;
    }

    pub fn set_default_tone(&mut self, tone: u8) {
        self.optimizer.default_tone = tone.min(MAX_TONE);
    }

    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.storage.history_capacity = capacity.max(1);
    }

    pub fn set_debounce_ms(&mut self, debounce_ms: u64) {
        self.optimizer.debounce_ms = debounce_ms;
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.optimizer.debounce_ms)
    }

    pub fn optimize_latency(&self) -> Duration {
        Duration::from_millis(self.optimizer.optimize_latency_ms)
    }

    /// Options for a run, command-line values taking precedence over defaults.
    pub fn optimize_options(
        &self,
        intent: Option<Intent>,
        platform: Option<Platform>,
        tone: Option<u8>,
    ) -> OptimizeOptions {
        OptimizeOptions {
            intent: intent.unwrap_or(self.optimizer.default_intent),
            platform: platform.unwrap_or(self.optimizer.default_platform),
            tone: tone.unwrap_or(self.optimizer.default_tone).min(MAX_TONE),
        }
    }

    pub fn validate_all_settings(&self) -> ValidationResult {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        if self.optimizer.default_tone > MAX_TONE {
            issues.push(format!(
                "Default tone must be between 0 and {} (found {})",
                MAX_TONE, self.optimizer.default_tone
            ));
        }

        if self.storage.history_capacity == 0 {
            issues.push("History capacity must be at least 1".to_string());
        } else if self.storage.history_capacity > 100 {
            warnings.push("History capacity is very high (>100), the store file will grow large".to_string());
        }

        if self.optimizer.debounce_ms == 0 {
            warnings.push("Debounce delay is 0, live analysis will run on every keystroke".to_string());
        } else if self.optimizer.debounce_ms > 5000 {
            warnings.push("Debounce delay is very high (>5s), live analysis will feel unresponsive".to_string());
        }

        if self.optimizer.optimize_latency_ms > 10_000 {
            warnings.push("Optimize latency is above 10s".to_string());
        }

        if let Some(dir) = &self.storage.template_dir {
            if !dir.is_dir() {
                issues.push(format!("Template directory does not exist: {}", dir.display()));
            }
        }

        ValidationResult {
            is_valid: issues.is_empty(),
            issues,
            warnings,
        }
    }
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}
