use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dataset::LoaderOptions;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;

pub const DEFAULT_CONFIG_FILE: &str = "vulnscope.toml";
pub const ENV_PREFIX: &str = "VULNSCOPE_";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned when none is given on the command line
    pub data_directory: Option<PathBuf>,

    /// Where rendered reports are written
    pub output_dir: PathBuf,

    /// Default tracing filter, overridden by RUST_LOG
    #[validate(length(min = 1))]
    pub log_level: String,

    #[validate(nested)]
    pub loader: LoaderOptions,

    #[validate(nested)]
    pub llm: LLMConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: None,
            output_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            loader: LoaderOptions::default(),
            llm: LLMConfig::default(),
        }
    }
}

pub struct ConfigService;

impl ConfigService {
    /// Layered configuration: defaults, then the TOML file, then environment.
    ///
    /// `DATA_DIRECTORY` and `COHERE_API_KEY` are read as-is; every other key
    /// uses the `VULNSCOPE_` prefix with `__` for nesting, e.g.
    /// `VULNSCOPE_LLM__MODEL`. Prefixed keys win over the bare ones.
    pub fn load(config_file: Option<&Path>) -> Result<AppConfig> {
        let file = match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::ConfigError(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Self::figment(&file)
            .extract::<AppConfig>()
            .map_err(|e| AppError::ConfigError(e.to_string()))
            .and_then(|config| {
                config
                    .validate()
                    .map_err(|e| AppError::ValidationError(e.to_string()))?;
                Ok(config)
            })
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::raw().filter(|key| key == "data_directory"))
            .merge(Env::raw().filter_map(|key| {
                if key == "cohere_api_key" {
                    Some("llm.api_key".into())
                } else {
                    None
                }
            }))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
