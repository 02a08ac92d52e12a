mod cli;
mod commands;
mod completion;
mod config;
mod generators;
mod pipeline;
mod prompts;
mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli::args::Stage;
use generators::TestKind;

#[derive(Parser)]
#[command(name = "sap-testgen")]
#[command(about = "AI-assisted SAP test case, test data and automation script generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a test case and, optionally, its test data and automation script
    Run {
        /// SAP transaction code (e.g. VA01, ME21N)
        transaction_code: String,

        /// Test case title
        title: String,

        /// Positive (happy path) or negative (deliberate error) test
        #[arg(short, long, value_enum, default_value_t = TestKind::Positive)]
        kind: TestKind,

        /// Last stage to run
        #[arg(long, value_enum, default_value_t = Stage::Script)]
        until: Stage,

        /// Print the test case prompt without calling the model
        #[arg(long)]
        dry_run: bool,

        /// Show verbose output for debugging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Start an interactive generation session
    Session {
        /// Show verbose output for debugging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show configuration status or generate a sample configuration file
    Config {
        /// Show current configuration path and status
        #[arg(long)]
        show: bool,

        /// Generate sample configuration
        #[arg(long)]
        init: bool,
    },
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Run { verbose, .. } | Commands::Session { verbose } => *verbose,
            Commands::Config { .. } => false,
        }
    }
}

/// Logs go to stderr so rendered artifacts on stdout stay clean
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load()?;

    init_tracing(cli.command.verbose() || config.behavior.verbose);

    cli::CommandDispatcher::new(config)
        .dispatch(cli.command)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing_run_command() {
        let args = vec![
            "sap-testgen",
            "run",
            "VA01",
            "Create Sales Order with Valid Customer",
            "--kind",
            "negative",
            "--until",
            "data",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Run {
                transaction_code,
                title,
                kind,
                until,
                dry_run,
                verbose,
            } => {
                assert_eq!(transaction_code, "VA01");
                assert_eq!(title, "Create Sales Order with Valid Customer");
                assert_eq!(kind, TestKind::Negative);
                assert_eq!(until, Stage::Data);
                assert!(!dry_run);
                assert!(!verbose);
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_cli_parsing_run_command_minimal() {
        let args = vec!["sap-testgen", "run", "ME21N", "Create purchase order"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Run {
                kind,
                until,
                dry_run,
                ..
            } => {
                assert_eq!(kind, TestKind::Positive);
                assert_eq!(until, Stage::Script);
                assert!(!dry_run);
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_cli_parsing_run_requires_title() {
        let args = vec!["sap-testgen", "run", "VA01"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_rejects_unknown_kind() {
        let args = vec!["sap-testgen", "run", "VA01", "t", "--kind", "neutral"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_session_command() {
        let cli = Cli::try_parse_from(vec!["sap-testgen", "session", "-v"]).unwrap();
        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Session { verbose: true }));
    }

    #[test]
    fn test_cli_parsing_config_command() {
        let cli = Cli::try_parse_from(vec!["sap-testgen", "config", "--show"]).unwrap();
        match cli.command {
            Commands::Config { show, init } => {
                assert!(show);
                assert!(!init);
            }
            _ => panic!("Expected config command"),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "sap-testgen");
    }

    #[test]
    fn test_dry_run_executes_without_credentials() {
        use commands::Command;

        let mut config = config::Config::default();
        config.llm.api_key_env = "SAP_TESTGEN_DRY_RUN_UNSET".to_string();
        let cmd = commands::RunCommand::new(config);
        let args = cli::args::RunArgs {
            common: cli::args::CommonArgs {
                dry_run: true,
                verbose: false,
            },
            transaction_code: "VA01".to_string(),
            title: "Create Sales Order".to_string(),
            kind: TestKind::Positive,
            until: Stage::Script,
        };

        tokio_test::block_on(cmd.execute(args)).unwrap();
    }
}
