pub mod args;

use crate::commands::{Command, ConfigCommand, RunCommand, SessionCommand};
use crate::config::Config;
use crate::Commands;
use anyhow::Result;
use args::{CommonArgs, ConfigArgs, RunArgs, SessionArgs};

/// Command dispatcher that routes CLI commands to their implementations
pub struct CommandDispatcher {
    config: Config,
}

impl CommandDispatcher {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn dispatch(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Run {
                transaction_code,
                title,
                kind,
                until,
                dry_run,
                verbose,
            } => {
                let args = RunArgs {
                    common: CommonArgs { dry_run, verbose },
                    transaction_code,
                    title,
                    kind,
                    until,
                };
                let cmd = RunCommand::new(self.config.clone());
                let resolved_args = cmd.resolve_args(args);

                cmd.execute(resolved_args).await
            }
            Commands::Session { verbose } => {
                let args = SessionArgs { verbose };
                let cmd = SessionCommand::new(self.config.clone());
                let resolved_args = cmd.resolve_args(args);

                cmd.execute(resolved_args).await
            }
            Commands::Config { show, init } => {
                let args = ConfigArgs { show, init };
                let cmd = ConfigCommand::new(self.config.clone());
                cmd.execute(args).await
            }
        }
    }
}
