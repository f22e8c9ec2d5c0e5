use crate::core::advice::{RequestSettings, MAX_INPUT_CHARS, MIN_ANSWER_CHARS};
use crate::core::prompt::{PromptTemplate, DEFAULT_TEMPLATE};
use crate::core::retry::BackoffPolicy;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_factor: f64,
    pub max_delay_ms: u64,
    pub max_input_chars: usize,
    pub min_answer_chars: usize,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_attempts: 2,
            initial_delay_ms: 1000,
            backoff_factor: 2.0,
            max_delay_ms: 10_000,
            max_input_chars: MAX_INPUT_CHARS,
            min_answer_chars: MIN_ANSWER_CHARS,
        }
    }
}

impl RequestConfig {
    pub fn settings(&self) -> RequestSettings {
        RequestSettings {
            timeout: Duration::from_millis(self.timeout_ms),
            backoff: BackoffPolicy {
                max_attempts: self.max_attempts,
                initial_delay: Duration::from_millis(self.initial_delay_ms),
                factor: self.backoff_factor,
                max_delay: Duration::from_millis(self.max_delay_ms),
            },
            max_input_chars: self.max_input_chars,
            min_answer_chars: self.min_answer_chars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub template: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BotError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn prompt_template(&self) -> Result<PromptTemplate> {
        PromptTemplate::new(self.prompt.template.clone())
    }

    pub fn request_settings(&self) -> RequestSettings {
        self.request.settings()
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// 替換環境變數 (例如 ${GEMINI_API_KEY})，未設定的變數保持原樣
fn substitute_env_vars(content: &str) -> String {
    env_var_pattern()
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("backend.base_url", &self.backend.base_url)?;
        validation::validate_non_empty_string("backend.model", &self.backend.model)?;
        validation::validate_non_empty_string("backend.api_key", &self.backend.api_key)?;
        if self.backend.api_key.starts_with("${") {
            return Err(BotError::MissingConfigError {
                field: format!("backend.api_key ({})", self.backend.api_key),
            });
        }

        validation::validate_positive_number("request.timeout_ms", self.request.timeout_ms as usize, 1)?;
        validation::validate_range("request.max_attempts", self.request.max_attempts, 1, 10)?;
        validation::validate_range("request.backoff_factor", self.request.backoff_factor, 1.0, 10.0)?;
        if self.request.max_delay_ms < self.request.initial_delay_ms {
            return Err(BotError::InvalidConfigValueError {
                field: "request.max_delay_ms".to_string(),
                value: self.request.max_delay_ms.to_string(),
                reason: "Must not be smaller than request.initial_delay_ms".to_string(),
            });
        }
        validation::validate_positive_number(
            "request.max_input_chars",
            self.request.max_input_chars,
            1,
        )?;

        self.prompt_template()?;
        Ok(())
    }
}
