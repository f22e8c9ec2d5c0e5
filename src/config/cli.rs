use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "careerbot")]
#[command(about = "Ask a career coach backed by Gemini and read the formatted answer")]
pub struct CliConfig {
    /// Question to ask; starts an interactive session when omitted
    pub question: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gemini API key, overrides backend.api_key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name, overrides backend.model
    #[arg(long)]
    pub model: Option<String>,

    /// API base URL, overrides backend.base_url
    #[arg(long)]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Print answers without ANSI styling
    #[arg(long)]
    pub plain: bool,

    /// Watch connectivity to the API host and report changes
    #[arg(long)]
    pub check_connectivity: bool,
}

impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋設定
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(model) = &self.model {
            config.backend.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.backend.base_url = base_url.clone();
        }
        if self.api_key.is_some() || config.backend.api_key.is_empty() {
            let api_key = validate_required_field("backend.api_key", &self.api_key)?;
            config.backend.api_key = api_key.clone();
        }
        Ok(())
    }
}
