use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::prompts;

/// Repository-local configuration file name
pub const LOCAL_CONFIG_FILE: &str = ".sap-testgen.yaml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub stages: StageConfigs,
}

impl Default for Config {
    fn default() -> Self {
        load_default_config()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BehaviorConfig {
    pub verbose: bool,
}

/// Connection settings for the chat completion endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_seconds: u64,
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 120,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StageConfigs {
    #[serde(default)]
    pub steps: StepsConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub script: ScriptConfig,
}

/// Configuration for the test case stage
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StepsConfig {
    pub model: String,
    pub prompt: Option<String>,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            prompt: None,
        }
    }
}

/// Configuration for the test data stage
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub model: String,
    pub prompt: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            prompt: None,
        }
    }
}

/// Configuration for the automation script stage
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScriptConfig {
    pub model: String,
    pub prompt: Option<String>,
    /// Keyword library the generated script is written against
    pub library: String,
    /// Language marker expected on the script's fenced block
    pub fence_tag: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            prompt: None,
            library: "SapFlow".to_string(),
            fence_tag: "python".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the standard config paths
    pub fn load() -> Result<Self> {
        // 1. .sap-testgen.yaml in current directory
        // 2. ~/.config/sap-testgen/config.yaml
        // 3. Embedded default
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(&local);
        }

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                return Self::load_from_path(&user_config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file does not exist: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        prompts::check_overrides(&config.stages)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Get the user configuration path
    pub fn user_config_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("sap-testgen").join("config.yaml"))
        } else {
            dirs::home_dir()
                .map(|home_dir| home_dir.join(".config").join("sap-testgen").join("config.yaml"))
        }
    }

    /// Read the API key from the configured environment variable.
    /// A `.env` file in the working directory is honoured.
    pub fn api_key(&self) -> Result<String> {
        // Missing .env is fine; the variable may already be exported
        let _ = dotenvy::dotenv();

        let key = std::env::var(&self.llm.api_key_env).with_context(|| {
            format!(
                "API key not found: set {} in the environment or a .env file",
                self.llm.api_key_env
            )
        })?;

        if key.trim().is_empty() {
            anyhow::bail!("API key in {} is empty", self.llm.api_key_env);
        }

        Ok(key)
    }

    /// Create a sample configuration file
    pub fn create_sample_config() -> Result<String> {
        let mut sample = load_default_config();

        sample.behavior.verbose = true;
        sample.llm.temperature = Some(0.2);
        // Built-in templates keep every placeholder a stage needs
        sample.stages.steps.prompt = Some(prompts::steps::STEPS_PROMPT.to_string());
        sample.stages.data.prompt = Some(prompts::data::DATA_PROMPT.to_string());
        sample.stages.script.prompt = Some(prompts::script::SCRIPT_PROMPT.to_string());

        serde_yaml::to_string(&sample).context("Failed to serialize sample configuration")
    }
}

/// Load the complete default configuration from embedded YAML
pub fn load_default_config() -> Config {
    const DEFAULT_CONFIG: &str = include_str!("../config/default_config.yaml");

    serde_yaml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded default configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.behavior.verbose);
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.stages.steps.model, "gpt-3.5-turbo");
        assert_eq!(config.stages.data.model, "gpt-3.5-turbo");
        assert_eq!(config.stages.script.fence_tag, "python");
    }

    #[test]
    fn test_script_stage_uses_different_model() {
        let config = Config::default();
        assert_ne!(config.stages.script.model, config.stages.steps.model);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config().unwrap();
        assert!(sample.contains("behavior:"));
        assert!(sample.contains("stages:"));
        assert!(sample.contains("llm:"));
        assert!(sample.contains("fence_tag"));
    }

    #[test]
    fn test_config_loading_from_path() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("test_config.yaml");

        let test_config = r#"
behavior:
  verbose: true

stages:
  steps:
    model: "local-model"
    prompt: "Custom case for {transaction_code}: {title}. {kind_instruction}"
"#;

        fs::write(&config_path, test_config).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert!(config.behavior.verbose);
        assert_eq!(config.stages.steps.model, "local-model");
        assert_eq!(
            config.stages.steps.prompt.as_deref(),
            Some("Custom case for {transaction_code}: {title}. {kind_instruction}")
        );
        // Sections missing from the file fall back to defaults
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.stages.script.library, "SapFlow");
    }

    #[test]
    fn test_partial_stage_section_keeps_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("partial.yaml");
        fs::write(&config_path, "stages:\n  script:\n    library: \"SapRobot\"\n").unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.stages.script.library, "SapRobot");
        assert_eq!(config.stages.script.model, "gpt-4o");
        assert_eq!(config.stages.script.fence_tag, "python");
    }

    #[test]
    fn test_sample_config_loads_with_built_in_prompts() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, Config::create_sample_config().unwrap()).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(
            config.stages.steps.prompt.as_deref(),
            Some(prompts::steps::STEPS_PROMPT)
        );
        assert_eq!(
            config.stages.script.prompt.as_deref(),
            Some(prompts::script::SCRIPT_PROMPT)
        );
    }

    #[test]
    fn test_override_missing_placeholders_is_rejected_on_load() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("broken.yaml");
        fs::write(
            &config_path,
            "stages:\n  data:\n    prompt: \"Custom test data prompt\"\n",
        )
        .unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("{test_case}"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let result = Config::load_from_path(&temp_dir.path().join("absent.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_from_custom_env_var() {
        let mut config = Config::default();
        config.llm.api_key_env = "SAP_TESTGEN_TEST_KEY".to_string();

        std::env::set_var("SAP_TESTGEN_TEST_KEY", "sk-test");
        assert_eq!(config.api_key().unwrap(), "sk-test");

        std::env::set_var("SAP_TESTGEN_TEST_KEY", "   ");
        assert!(config.api_key().is_err());

        std::env::remove_var("SAP_TESTGEN_TEST_KEY");
        let err = config.api_key().unwrap_err().to_string();
        assert!(err.contains("SAP_TESTGEN_TEST_KEY"));
    }
}
