use tracing::warn;

use crate::completion::{CompletionClient, CompletionRequest};
use crate::prompts::{render, script};

use super::{
    call_model, extract_script, AutomationScript, GenerationError, TestCaseDocument,
    TestDataArtifact,
};

/// Translates a test case and its data into a keyword-driven script
#[derive(Debug, Clone)]
pub struct ScriptGenerator {
    template: String,
    model: String,
    library: String,
    fence_tag: String,
}

impl ScriptGenerator {
    pub fn new(
        template: impl Into<String>,
        model: impl Into<String>,
        library: impl Into<String>,
        fence_tag: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            model: model.into(),
            library: library.into(),
            fence_tag: fence_tag.into(),
        }
    }

    pub fn compose(
        &self,
        test_case: &TestCaseDocument,
        test_data: &TestDataArtifact,
    ) -> CompletionRequest {
        let user = render(
            &self.template,
            &[
                ("library", self.library.as_str()),
                ("fence_tag", self.fence_tag.as_str()),
                ("test_case", test_case.as_str()),
                ("test_data", test_data.as_str()),
            ],
        );
        CompletionRequest::new(&self.model, script::SCRIPT_SYSTEM_PROMPT, &user)
    }

    pub async fn generate<C>(
        &self,
        client: &C,
        test_case: &TestCaseDocument,
        test_data: &TestDataArtifact,
    ) -> Result<AutomationScript, GenerationError>
    where
        C: CompletionClient + ?Sized,
    {
        if test_case.is_blank() || test_data.is_blank() {
            return Err(GenerationError::InputInvalid(
                "Generate a test case and its test data before generating a script.".to_string(),
            ));
        }

        let reply = call_model(client, "script", self.compose(test_case, test_data)).await?;
        let (text, extraction) = extract_script(&reply, &self.fence_tag);

        if extraction.is_degraded() {
            warn!(
                fence_tag = %self.fence_tag,
                "No fenced block in script reply, returning raw text"
            );
        }

        Ok(AutomationScript { text, extraction })
    }
}
