pub mod data;
pub mod extract;
pub mod script;
pub mod steps;
pub mod types;

pub use data::DataGenerator;
pub use extract::extract_script;
pub use script::ScriptGenerator;
pub use steps::StepGenerator;
pub use types::*;

use crate::completion::{CompletionClient, CompletionRequest};
use tracing::{info, warn};

/// Value-level failure of a generation stage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// A precondition failed before any remote call was issued
    #[error("{0}")]
    InputInvalid(String),
    /// The remote call failed or returned nothing usable
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Issue one completion call for a stage, converting every fault into
/// `GenerationFailed`
pub(crate) async fn call_model<C>(
    client: &C,
    stage: &'static str,
    request: CompletionRequest,
) -> Result<String, GenerationError>
where
    C: CompletionClient + ?Sized,
{
    info!(stage, model = %request.model, "Requesting completion");

    let reply = client.complete(request).await.map_err(|e| {
        let cause = format!("{:#}", e);
        warn!(stage, %cause, "Completion call failed");
        GenerationError::GenerationFailed(cause)
    })?;

    if reply.trim().is_empty() {
        warn!(stage, "Completion call returned an empty reply");
        return Err(GenerationError::GenerationFailed(
            "the model returned an empty response".to_string(),
        ));
    }

    info!(stage, reply_len = reply.len(), "Completion received");
    Ok(reply)
}
