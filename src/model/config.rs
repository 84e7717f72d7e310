use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "CONTENT_REFINER_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "GROQ_API_KEY";
const ENV_BASE_URL: &str = "GROQ_BASE_URL";
const ENV_PARAPHRASE_MODEL: &str = "GROQ_PARAPHRASE_MODEL";
const ENV_HUMANIZE_MODEL: &str = "GROQ_HUMANIZE_MODEL";
const ENV_AI_DETECT_MODEL: &str = "GROQ_AI_DETECT_MODEL";
const ENV_PLAGIARISM_MODEL: &str = "GROQ_PLAGIARISM_MODEL";
const ENV_INSIGHT_MODEL: &str = "GROQ_INSIGHT_MODEL";

pub const DEFAULT_PARAPHRASE_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_AI_DETECT_MODEL: &str = "qwen/qwen3-32b";
pub const DEFAULT_PLAGIARISM_MODEL: &str = "groq/compound";
pub const DEFAULT_INSIGHT_MODEL: &str = "llama-3.3-70b-versatile";

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Generation parameters sent with every chat completion
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Omitted from requests when unset
    #[serde(default)]
    pub max_completion_tokens: Option<u32>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    1.0
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_completion_tokens: None,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub llm: LlmSettings,
}

/// Model names used for each kind of call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub paraphrase: String,
    pub humanize: String,
    pub ai_detect: String,
    pub plagiarism: String,
    pub insight: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ModelConfig {
    /// Resolve model names through `lookup`, falling back to the built-in defaults.
    ///
    /// Humanize falls back to the paraphrase override before the default.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let paraphrase_override = get(ENV_PARAPHRASE_MODEL);

        Self {
            paraphrase: paraphrase_override
                .clone()
                .unwrap_or_else(|| DEFAULT_PARAPHRASE_MODEL.to_string()),
            humanize: get(ENV_HUMANIZE_MODEL)
                .or(paraphrase_override)
                .unwrap_or_else(|| DEFAULT_PARAPHRASE_MODEL.to_string()),
            ai_detect: get(ENV_AI_DETECT_MODEL)
                .unwrap_or_else(|| DEFAULT_AI_DETECT_MODEL.to_string()),
            plagiarism: get(ENV_PLAGIARISM_MODEL)
                .unwrap_or_else(|| DEFAULT_PLAGIARISM_MODEL.to_string()),
            insight: get(ENV_INSIGHT_MODEL).unwrap_or_else(|| DEFAULT_INSIGHT_MODEL.to_string()),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// `None` keeps the server up but fails every model call
    pub api_key: Option<String>,
    pub models: ModelConfig,
    pub llm: LlmSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            api_key: None,
            models: ModelConfig::default(),
            llm: LlmSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let api_key = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty());

        // Load config file
        let config_path =
            lookup(ENV_CONFIG_PATH).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut llm = Self::load_config_file(&config_path)
            .map(|cf| cf.llm)
            .unwrap_or_default();

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            llm.base_url = base_url;
        }

        Self {
            port,
            host,
            api_key,
            models: ModelConfig::from_lookup(&lookup),
            llm,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
