use anyhow::{Context, Result};
use tracing::info;

use crate::cli::args::{RunArgs, Stage};
use crate::commands::{build_client, Command};
use crate::config::Config;
use crate::generators::{GenerationRequest, StepGenerator};
use crate::pipeline::Pipeline;
use crate::prompts::PromptRegistry;
use crate::render;

/// One-shot pipeline: test case, then data, then script
pub struct RunCommand {
    config: Config,
}

impl RunCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Command for RunCommand {
    type Args = RunArgs;

    fn resolve_args(&self, mut args: RunArgs) -> RunArgs {
        if self.config.behavior.verbose {
            args.common.verbose = true;
        }
        args
    }

    async fn execute(&self, args: RunArgs) -> Result<()> {
        let request = GenerationRequest::new(&args.transaction_code, &args.title, args.kind)?;

        if args.common.dry_run {
            let prompts = PromptRegistry::default().with_overrides(&self.config.stages);
            let composed = StepGenerator::new(prompts.steps, &self.config.stages.steps.model)
                .compose(&request);

            println!("🔍 Dry run mode - would execute with model {}:", composed.model);
            for message in &composed.messages {
                println!("--- {:?} ---", message.role);
                println!("{}", message.content);
            }
            println!("---");
            return Ok(());
        }

        let client = build_client(&self.config)?;
        let mut pipeline = Pipeline::from_config(&self.config, client);
        let mut out = std::io::stdout();

        if args.common.verbose {
            println!(
                "🔧 Generating {} test case for {}...",
                request.test_kind(),
                request.transaction_code()
            );
        }

        let doc = pipeline
            .generate_test_case(&request)
            .await
            .context("Test case generation failed")?;
        render::test_case(&mut out, &doc)?;

        if args.until < Stage::Data {
            return Ok(());
        }

        if args.common.verbose {
            println!("🔧 Generating test data...");
        }
        let data = pipeline
            .generate_test_data()
            .await
            .context("Test data generation failed")?;
        render::test_data(&mut out, &data)?;

        if args.until < Stage::Script {
            return Ok(());
        }

        if args.common.verbose {
            println!("🔧 Generating automation script...");
        }
        let script = pipeline
            .generate_script()
            .await
            .context("Script generation failed")?;
        render::script(&mut out, &script, &self.config.stages.script.fence_tag)?;

        info!(extraction = ?script.extraction, "Pipeline finished");
        Ok(())
    }
}
