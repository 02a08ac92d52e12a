use tracing::info;

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::generators::{
    AutomationScript, DataGenerator, GenerationError, GenerationRequest, ScriptGenerator,
    StepGenerator, TestCaseDocument, TestDataArtifact,
};
use crate::prompts::PromptRegistry;
use crate::session::{SessionSlots, SessionStore};

/// The three generation stages bound to one client and one session.
///
/// Each method is one discrete user action. Preconditions are checked
/// against the session before any remote call is made.
pub struct Pipeline<C: CompletionClient + ?Sized> {
    client: Box<C>,
    steps: StepGenerator,
    data: DataGenerator,
    script: ScriptGenerator,
    session: SessionStore,
}

impl<C: CompletionClient + ?Sized> Pipeline<C> {
    pub fn new(
        client: Box<C>,
        steps: StepGenerator,
        data: DataGenerator,
        script: ScriptGenerator,
    ) -> Self {
        Self {
            client,
            steps,
            data,
            script,
            session: SessionStore::new(),
        }
    }

    /// Build the stages from configuration, applying prompt overrides
    pub fn from_config(config: &Config, client: Box<C>) -> Self {
        let prompts = PromptRegistry::default().with_overrides(&config.stages);
        let stages = &config.stages;

        Self::new(
            client,
            StepGenerator::new(prompts.steps, &stages.steps.model),
            DataGenerator::new(prompts.data, &stages.data.model),
            ScriptGenerator::new(
                prompts.script,
                &stages.script.model,
                &stages.script.library,
                &stages.script.fence_tag,
            ),
        )
    }

    pub fn session(&self) -> &SessionSlots {
        self.session.get()
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.session
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// Generate a test case and make it the session's current case
    pub async fn generate_test_case(
        &mut self,
        request: &GenerationRequest,
    ) -> Result<TestCaseDocument, GenerationError> {
        let doc = self.steps.generate(&*self.client, request).await?;
        info!(
            transaction_code = request.transaction_code(),
            test_kind = %request.test_kind(),
            "Recorded new test case, test data invalidated"
        );
        self.session.record_test_case(doc.clone());
        Ok(doc)
    }

    /// Generate test data for the current test case
    pub async fn generate_test_data(&mut self) -> Result<TestDataArtifact, GenerationError> {
        let test_case = self.session.get().last_test_case.clone().ok_or_else(|| {
            GenerationError::InputInvalid(
                "No test case in this session. Generate a test case first.".to_string(),
            )
        })?;

        let artifact = self.data.generate(&*self.client, &test_case).await?;
        self.session.record_test_data(artifact.clone());
        Ok(artifact)
    }

    /// Generate an automation script from the current test case and data
    pub async fn generate_script(&mut self) -> Result<AutomationScript, GenerationError> {
        let slots = self.session.get();
        let (test_case, test_data) = match (&slots.last_test_case, &slots.last_test_data) {
            (Some(case), Some(data)) => (case.clone(), data.clone()),
            (None, _) => {
                return Err(GenerationError::InputInvalid(
                    "No test case in this session. Generate a test case first.".to_string(),
                ))
            }
            (Some(_), None) => {
                return Err(GenerationError::InputInvalid(
                    "No test data for the current test case. Generate test data first."
                        .to_string(),
                ))
            }
        };

        self.script
            .generate(&*self.client, &test_case, &test_data)
            .await
    }
}
