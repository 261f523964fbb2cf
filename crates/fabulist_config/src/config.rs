//! Configuration structures.

use config::{Config, File, FileFormat};
use fabulist_error::{ConfigError, FabulistError, FabulistResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../fabulist.toml");

/// Text model settings.
///
/// ```toml
/// [text]
/// model = "gpt2-medium"
/// api_base = "https://api-inference.huggingface.co/models"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextConfig {
    /// Model identifier on the hub
    pub model: String,
    /// Base URL of the inference endpoint; the model id is appended
    pub api_base: String,
    /// Base URL of the model hub used to check that the model exists
    pub hub_base: String,
    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Penalty applied to repeated tokens
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f32,
}

fn default_top_p() -> f32 {
    0.9
}

fn default_repetition_penalty() -> f32 {
    1.1
}

/// Image model settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageConfig {
    /// Model identifiers tried in order until one loads
    pub candidates: Vec<String>,
    /// Base URL of the inference endpoint; the model id is appended
    pub api_base: String,
    /// Base URL of the model hub used to check that a model exists
    pub hub_base: String,
    /// What the model should avoid
    pub negative_prompt: String,
    /// Denoising steps
    pub inference_steps: u32,
    /// Classifier-free guidance scale
    pub guidance_scale: f32,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

/// HTTP client settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Retry settings for transient HTTP failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: usize,
    /// Delay before the first retry
    pub initial_backoff_ms: u64,
    /// Upper bound on any single delay
    pub max_delay_secs: u64,
}

/// Artifact output settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory run folders are created under
    pub directory: PathBuf,
}

/// Top-level Fabulist configuration.
///
/// # Example
///
/// ```no_run
/// use fabulist_config::FabulistConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FabulistConfig::load()?;
/// println!("Text model: {}", config.text.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FabulistConfig {
    /// Text model settings
    pub text: TextConfig,
    /// Image model settings
    pub image: ImageConfig,
    /// HTTP client settings
    pub http: HttpConfig,
    /// Retry settings
    pub retry: RetryConfig,
    /// Artifact output settings
    pub output: OutputConfig,
}

impl FabulistConfig {
    /// Bundled defaults only, ignoring user files.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse or validate.
    #[instrument]
    pub fn defaults() -> FabulistResult<Self> {
        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file fails to parse or the merged
    /// configuration fails validation.
    #[instrument]
    pub fn load() -> FabulistResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration, replacing the user layers with `explicit` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` is missing or malformed, or if the
    /// merged configuration fails validation.
    #[instrument]
    pub fn load_with(explicit: Option<&Path>) -> FabulistResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        match explicit {
            Some(path) => {
                debug!(path = %path.display(), "Layering explicit configuration file");
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                debug!("Loading configuration: current dir > home dir > bundled defaults");

                if let Some(home) = dirs::home_dir() {
                    let home_config = home.join(".config/fabulist/fabulist.toml");
                    builder = builder.add_source(File::from(home_config).required(false));
                }

                builder = builder.add_source(File::with_name("fabulist").required(false));
            }
        }

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> FabulistResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                FabulistError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FabulistError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the drivers cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text.model.trim().is_empty() {
            return Err(ConfigError::new("text.model must not be empty"));
        }
        if self.image.candidates.is_empty() {
            return Err(ConfigError::new("image.candidates must not be empty"));
        }
        if self.image.candidates.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::new("image.candidates must not contain blank entries"));
        }
        if self.image.width == 0 || self.image.height == 0 {
            return Err(ConfigError::new(format!(
                "image dimensions must be positive, got {}x{}",
                self.image.width, self.image.height
            )));
        }
        if self.image.inference_steps == 0 {
            return Err(ConfigError::new("image.inference_steps must be positive"));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::new("http.timeout_secs must be positive"));
        }
        Ok(())
    }
}
