use std::fmt;

use super::GenerationError;

/// Whether the test case exercises the happy path or a deliberate error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TestKind {
    #[default]
    Positive,
    Negative,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::Positive => write!(f, "positive"),
            TestKind::Negative => write!(f, "negative"),
        }
    }
}

impl std::str::FromStr for TestKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "positive" | "p" | "+" => Ok(TestKind::Positive),
            "negative" | "n" | "-" => Ok(TestKind::Negative),
            other => Err(GenerationError::InputInvalid(format!(
                "unknown test kind '{}', expected positive or negative",
                other
            ))),
        }
    }
}

/// Validated input for the test case stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    transaction_code: String,
    title: String,
    test_kind: TestKind,
}

impl GenerationRequest {
    /// Trim and validate the request fields
    pub fn new(
        transaction_code: &str,
        title: &str,
        test_kind: TestKind,
    ) -> Result<Self, GenerationError> {
        let transaction_code = transaction_code.trim();
        if transaction_code.is_empty() {
            return Err(GenerationError::InputInvalid(
                "Please enter an SAP transaction code.".to_string(),
            ));
        }

        let title = title.trim();
        if title.is_empty() {
            return Err(GenerationError::InputInvalid(
                "Please enter a test case title.".to_string(),
            ));
        }

        Ok(Self {
            transaction_code: transaction_code.to_string(),
            title: title.to_string(),
            test_kind,
        })
    }

    pub fn transaction_code(&self) -> &str {
        &self.transaction_code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn test_kind(&self) -> TestKind {
        self.test_kind
    }
}

/// Structured test case text (objective, prerequisites, steps, final result)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseDocument(String);

impl TestCaseDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TestCaseDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sample data for a test case, rendered as a markdown table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDataArtifact(String);

impl TestDataArtifact {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TestDataArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the script text was recovered from the model reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Interior of a fence tagged with the expected language marker
    Tagged,
    /// Interior of the first fence, whatever its tag
    FirstFence,
    /// No usable fence; the raw reply is returned as-is
    Raw,
}

impl Extraction {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Extraction::Raw)
    }
}

/// Automation script produced by the last stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationScript {
    pub text: String,
    pub extraction: Extraction,
}

impl AutomationScript {
    pub fn is_degraded(&self) -> bool {
        self.extraction.is_degraded()
    }
}

impl fmt::Display for AutomationScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_fields() {
        let request = GenerationRequest::new("  VA01 ", " Create order\n", TestKind::Negative)
            .unwrap();
        assert_eq!(request.transaction_code(), "VA01");
        assert_eq!(request.title(), "Create order");
        assert_eq!(request.test_kind(), TestKind::Negative);
    }

    #[test]
    fn test_request_rejects_blank_transaction_code() {
        let err = GenerationRequest::new("   ", "title", TestKind::Positive).unwrap_err();
        assert_eq!(
            err,
            GenerationError::InputInvalid("Please enter an SAP transaction code.".to_string())
        );
    }

    #[test]
    fn test_request_rejects_blank_title() {
        let err = GenerationRequest::new("ME21N", "", TestKind::Positive).unwrap_err();
        assert!(matches!(err, GenerationError::InputInvalid(_)));
    }

    #[test]
    fn test_test_kind_parsing() {
        assert_eq!("Negative".parse::<TestKind>().unwrap(), TestKind::Negative);
        assert_eq!("".parse::<TestKind>().unwrap(), TestKind::Positive);
        assert!("sideways".parse::<TestKind>().is_err());
    }

    #[test]
    fn test_only_raw_extraction_is_degraded() {
        assert!(Extraction::Raw.is_degraded());
        assert!(!Extraction::Tagged.is_degraded());
        assert!(!Extraction::FirstFence.is_degraded());
    }
}
