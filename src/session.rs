use chrono::{DateTime, Utc};

use crate::generators::{TestCaseDocument, TestDataArtifact};

/// Last artifacts produced in this session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSlots {
    pub last_test_case: Option<TestCaseDocument>,
    pub last_test_data: Option<TestDataArtifact>,
}

impl SessionSlots {
    /// Test data may only be derived from a recorded test case
    pub fn can_generate_data(&self) -> bool {
        self.last_test_case.is_some()
    }

    /// Scripts need both a test case and its data
    pub fn can_generate_script(&self) -> bool {
        self.last_test_case.is_some() && self.last_test_data.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.last_test_case.is_none() && self.last_test_data.is_none()
    }
}

/// In-memory session state threading artifacts between stages.
///
/// Recording a new test case always clears the test data slot, since data is
/// derived from a specific case and must be regenerated.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: SessionSlots,
    updated_at: Option<DateTime<Utc>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_test_case(&mut self, doc: TestCaseDocument) {
        self.slots = SessionSlots {
            last_test_case: Some(doc),
            last_test_data: None,
        };
        self.touch();
    }

    pub fn record_test_data(&mut self, artifact: TestDataArtifact) {
        self.slots.last_test_data = Some(artifact);
        self.touch();
    }

    pub fn get(&self) -> &SessionSlots {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots = SessionSlots::default();
        self.updated_at = None;
    }

    /// Time of the last recorded artifact, if any
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
