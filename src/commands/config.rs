use crate::cli::args::ConfigArgs;
use crate::commands::Command;
use crate::config::{Config, LOCAL_CONFIG_FILE};
use anyhow::Result;
use std::path::PathBuf;

/// Config command implementation (no model calls)
pub struct ConfigCommand {
    config: Config,
}

impl ConfigCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Command for ConfigCommand {
    type Args = ConfigArgs;

    async fn execute(&self, args: ConfigArgs) -> Result<()> {
        self.handle_config(args.show, args.init)
    }
}

impl ConfigCommand {
    fn handle_config(&self, show: bool, init: bool) -> Result<()> {
        if init {
            let sample_config = Config::create_sample_config()?;
            println!("# Sample sap-testgen configuration");
            println!(
                "# Copy this to ~/.config/sap-testgen/config.yaml or {}",
                LOCAL_CONFIG_FILE
            );
            println!();
            println!("{}", sample_config);
            return Ok(());
        }

        if show {
            println!("🔍 sap-testgen configuration status:");
            println!();

            let local_config_path = PathBuf::from(LOCAL_CONFIG_FILE);
            if local_config_path.exists() {
                println!("✅ Local config: {}", LOCAL_CONFIG_FILE);
            } else {
                println!("❌ Local config: {} (not found)", LOCAL_CONFIG_FILE);
            }

            if let Some(user_config_path) = Config::user_config_path() {
                if user_config_path.exists() {
                    println!("✅ User config: {}", user_config_path.display());
                } else {
                    println!("❌ User config: {} (not found)", user_config_path.display());
                    if let Some(parent) = user_config_path.parent() {
                        if !parent.exists() {
                            println!("   💡 Create directory: mkdir -p {}", parent.display());
                        }
                    }
                }
            } else {
                println!("❌ User config: Unable to determine config directory");
            }

            // Report presence only, never the value
            let key_env = &self.config.llm.api_key_env;
            if self.config.api_key().is_ok() {
                println!("✅ API key: {} is set", key_env);
            } else {
                println!("❌ API key: {} is not set", key_env);
            }

            println!();
            println!("🧠 Models:");
            println!("   test case: {}", self.config.stages.steps.model);
            println!("   test data: {}", self.config.stages.data.model);
            println!("   script:    {}", self.config.stages.script.model);

            println!();
            println!(
                "💡 To create a sample config: sap-testgen config --init > ~/.config/sap-testgen/config.yaml"
            );

            return Ok(());
        }

        println!("sap-testgen config management");
        println!();
        println!("Options:");
        println!("  --show  Show current configuration status");
        println!("  --init  Generate sample configuration");
        println!();
        println!("Examples:");
        println!("  sap-testgen config --show");
        println!("  sap-testgen config --init > ~/.config/sap-testgen/config.yaml");
        println!(
            "  sap-testgen config --init > {}  # Directory-specific config",
            LOCAL_CONFIG_FILE
        );

        Ok(())
    }
}
