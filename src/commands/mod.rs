pub mod config;
pub mod run;
pub mod session;

pub use config::ConfigCommand;
pub use run::RunCommand;
pub use session::SessionCommand;

use anyhow::Result;

use crate::completion::{CompletionClient, OpenAiClient};
use crate::config::Config;

/// A CLI command backed by the generation pipeline
#[allow(async_fn_in_trait)]
pub trait Command {
    type Args;

    /// Merge configuration defaults into CLI arguments
    fn resolve_args(&self, args: Self::Args) -> Self::Args {
        args
    }

    async fn execute(&self, args: Self::Args) -> Result<()>;
}

/// Build the production completion client. Reads the credential once.
pub fn build_client(config: &Config) -> Result<Box<dyn CompletionClient>> {
    let api_key = config.api_key()?;
    let client = OpenAiClient::new(&config.llm, api_key)?;
    Ok(Box::new(client))
}
