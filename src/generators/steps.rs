use crate::completion::{CompletionClient, CompletionRequest};
use crate::prompts::{render, steps};

use super::{call_model, GenerationError, GenerationRequest, TestCaseDocument, TestKind};

/// Produces a structured test case document for a transaction
#[derive(Debug, Clone)]
pub struct StepGenerator {
    template: String,
    model: String,
}

impl StepGenerator {
    pub fn new(template: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            model: model.into(),
        }
    }

    /// Compose the system and user messages for a request
    pub fn compose(&self, request: &GenerationRequest) -> CompletionRequest {
        let kind_instruction = match request.test_kind() {
            TestKind::Positive => steps::POSITIVE_INSTRUCTION,
            TestKind::Negative => steps::NEGATIVE_INSTRUCTION,
        };
        let test_kind = request.test_kind().to_string();

        let user = render(
            &self.template,
            &[
                ("transaction_code", request.transaction_code()),
                ("title", request.title()),
                ("test_kind", test_kind.as_str()),
                ("kind_instruction", kind_instruction),
            ],
        );

        CompletionRequest::new(&self.model, steps::STEPS_SYSTEM_PROMPT, &user)
    }

    pub async fn generate<C>(
        &self,
        client: &C,
        request: &GenerationRequest,
    ) -> Result<TestCaseDocument, GenerationError>
    where
        C: CompletionClient + ?Sized,
    {
        let reply = call_model(client, "steps", self.compose(request)).await?;
        Ok(TestCaseDocument::new(reply))
    }
}
