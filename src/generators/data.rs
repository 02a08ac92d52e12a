use crate::completion::{CompletionClient, CompletionRequest};
use crate::prompts::{data, render};

use super::{call_model, GenerationError, TestCaseDocument, TestDataArtifact};

/// Derives a markdown table of sample data from a test case
#[derive(Debug, Clone)]
pub struct DataGenerator {
    template: String,
    model: String,
}

impl DataGenerator {
    pub fn new(template: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            model: model.into(),
        }
    }

    pub fn compose(&self, test_case: &TestCaseDocument) -> CompletionRequest {
        let user = render(&self.template, &[("test_case", test_case.as_str())]);
        CompletionRequest::new(&self.model, data::DATA_SYSTEM_PROMPT, &user)
    }

    pub async fn generate<C>(
        &self,
        client: &C,
        test_case: &TestCaseDocument,
    ) -> Result<TestDataArtifact, GenerationError>
    where
        C: CompletionClient + ?Sized,
    {
        if test_case.is_blank() {
            return Err(GenerationError::InputInvalid(
                "Generate a test case before generating test data.".to_string(),
            ));
        }

        let reply = call_model(client, "data", self.compose(test_case)).await?;
        Ok(TestDataArtifact::new(reply))
    }
}
