use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::cli::args::SessionArgs;
use crate::commands::{build_client, Command};
use crate::completion::CompletionClient;
use crate::config::Config;
use crate::generators::{GenerationError, GenerationRequest, TestKind};
use crate::pipeline::Pipeline;
use crate::render;
use crate::session::SessionSlots;

/// A discrete user action in the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Case,
    Data,
    Script,
    Show,
    Clear,
    Help,
    Quit,
}

impl Action {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "case" | "c" | "new" => Some(Action::Case),
            "data" | "d" => Some(Action::Data),
            "script" | "s" => Some(Action::Script),
            "show" => Some(Action::Show),
            "clear" => Some(Action::Clear),
            "help" | "h" | "?" => Some(Action::Help),
            "quit" | "q" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Action::Case => "case    generate a new test case",
            Action::Data => "data    generate test data for the current case",
            Action::Script => "script  generate an automation script",
            Action::Show => "show    show the current session",
            Action::Clear => "clear   discard the current session",
            Action::Help => "help    show this menu",
            Action::Quit => "quit    leave the session",
        }
    }
}

/// Actions offered for the current session state
pub fn available_actions(slots: &SessionSlots) -> Vec<Action> {
    let mut actions = vec![Action::Case];
    if slots.can_generate_data() {
        actions.push(Action::Data);
    }
    if slots.can_generate_script() {
        actions.push(Action::Script);
    }
    if !slots.is_empty() {
        actions.push(Action::Show);
        actions.push(Action::Clear);
    }
    actions.push(Action::Help);
    actions.push(Action::Quit);
    actions
}

/// Interactive command loop over a pipeline.
///
/// Each action awaits its stage to completion before the next line is read,
/// so a stage can never be triggered twice concurrently.
pub struct SessionHost<C: CompletionClient + ?Sized, R, W> {
    pipeline: Pipeline<C>,
    input: R,
    out: W,
    fence_tag: String,
}

impl<C, R, W> SessionHost<C, R, W>
where
    C: CompletionClient + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(pipeline: Pipeline<C>, input: R, out: W, fence_tag: impl Into<String>) -> Self {
        Self {
            pipeline,
            input,
            out,
            fence_tag: fence_tag.into(),
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Pipeline<C>, W) {
        (self.pipeline, self.out)
    }

    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "🧪 SAP Test Case Generator")?;
        self.print_menu()?;

        while let Some(line) = self.prompt("\n> ").await? {
            if line.trim().is_empty() {
                continue;
            }

            let Some(action) = Action::parse(&line) else {
                writeln!(self.out, "❓ Unknown action '{}'", line.trim())?;
                self.print_menu()?;
                continue;
            };

            // Hidden actions are refused here as well as in the pipeline
            if !available_actions(self.pipeline.session()).contains(&action) {
                let err = match action {
                    Action::Data => "Generate a test case first.",
                    Action::Script => "Generate test data first.",
                    _ => "Nothing in this session yet.",
                };
                writeln!(self.out, "❌ {}", err)?;
                continue;
            }

            debug!(?action, "Session action");
            match action {
                Action::Case => self.generate_case().await?,
                Action::Data => self.generate_data().await?,
                Action::Script => self.generate_script().await?,
                Action::Show => self.show()?,
                Action::Clear => {
                    self.pipeline.clear();
                    writeln!(self.out, "🧹 Session cleared")?;
                }
                Action::Help => self.print_menu()?,
                Action::Quit => break,
            }
        }

        writeln!(self.out, "👋 Bye")?;
        Ok(())
    }

    async fn generate_case(&mut self) -> Result<()> {
        let Some(transaction_code) = self
            .prompt("Enter the SAP Transaction Code (e.g., VA01, ME21N): ")
            .await?
        else {
            return Ok(());
        };
        if transaction_code.trim().is_empty() {
            let err = GenerationError::InputInvalid(
                "Please enter an SAP transaction code.".to_string(),
            );
            return render::failure(&mut self.out, &err);
        }

        let Some(title) = self.prompt("Test case title: ").await? else {
            return Ok(());
        };
        let Some(kind) = self.prompt("Test kind [positive/negative] (positive): ").await? else {
            return Ok(());
        };

        let request = match kind
            .parse::<TestKind>()
            .and_then(|kind| GenerationRequest::new(&transaction_code, &title, kind))
        {
            Ok(request) => request,
            Err(err) => return render::failure(&mut self.out, &err),
        };

        writeln!(
            self.out,
            "⏳ Generating {} test case for {}...",
            request.test_kind(),
            request.transaction_code()
        )?;
        self.out.flush()?;

        match self.pipeline.generate_test_case(&request).await {
            Ok(doc) => {
                render::test_case(&mut self.out, &doc)?;
                writeln!(self.out, "💡 Next: 'data' to generate test data")?;
                Ok(())
            }
            Err(err) => render::failure(&mut self.out, &err),
        }
    }

    async fn generate_data(&mut self) -> Result<()> {
        writeln!(self.out, "⏳ Generating test data...")?;
        self.out.flush()?;

        match self.pipeline.generate_test_data().await {
            Ok(data) => {
                render::test_data(&mut self.out, &data)?;
                writeln!(self.out, "💡 Next: 'script' to generate an automation script")?;
                Ok(())
            }
            Err(err) => render::failure(&mut self.out, &err),
        }
    }

    async fn generate_script(&mut self) -> Result<()> {
        writeln!(self.out, "⏳ Generating automation script...")?;
        self.out.flush()?;

        match self.pipeline.generate_script().await {
            Ok(script) => render::script(&mut self.out, &script, &self.fence_tag),
            Err(err) => render::failure(&mut self.out, &err),
        }
    }

    fn show(&mut self) -> Result<()> {
        let slots = self.pipeline.session().clone();
        if let Some(updated_at) = self.pipeline.session_store().updated_at() {
            writeln!(
                self.out,
                "🕒 Last updated {}",
                updated_at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }
        if let Some(doc) = &slots.last_test_case {
            render::test_case(&mut self.out, doc)?;
        }
        if let Some(data) = &slots.last_test_data {
            render::test_data(&mut self.out, data)?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "Available actions:")?;
        for action in available_actions(self.pipeline.session()) {
            writeln!(self.out, "  {}", action.label())?;
        }
        Ok(())
    }

    /// Print a prompt and read one line. `None` on end of input.
    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Interactive session command
pub struct SessionCommand {
    config: Config,
}

impl SessionCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Command for SessionCommand {
    type Args = SessionArgs;

    fn resolve_args(&self, mut args: SessionArgs) -> SessionArgs {
        if self.config.behavior.verbose {
            args.verbose = true;
        }
        args
    }

    async fn execute(&self, args: SessionArgs) -> Result<()> {
        let client = build_client(&self.config)?;
        let pipeline = Pipeline::from_config(&self.config, client);

        if args.verbose {
            println!(
                "🔧 Models: {} / {} / {}",
                self.config.stages.steps.model,
                self.config.stages.data.model,
                self.config.stages.script.model
            );
        }

        let mut host = SessionHost::new(
            pipeline,
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            &self.config.stages.script.fence_tag,
        );
        host.run().await
    }
}
