/// System persona for the test case stage
pub const STEPS_SYSTEM_PROMPT: &str = "You are a senior QA engineer specialized in SAP. You produce clear, structured, step-by-step functional test cases that a tester can execute without further explanation.";

/// Test case prompt. Placeholders: `{transaction_code}`, `{title}`, `{test_kind}`, `{kind_instruction}`
pub const STEPS_PROMPT: &str = "Write a detailed {test_kind} test case for SAP transaction {transaction_code}.

**Test Case Title**: {title}

**Scenario Focus**: {kind_instruction}

**Required Structure** (use these exact section headings in Markdown):
- **Objective**: One or two sentences describing what this test case verifies
- **Prerequisites**: Master data, authorizations and system settings that must exist before execution
- **Test Steps**: A numbered list. Every step must state:
  - the action to perform in transaction {transaction_code}
  - the test data to enter (field name and value)
  - the expected result of that step
- **Final Expected Result**: The overall outcome that marks this test case as passed

Use realistic SAP field names and keep each step to a single user action.";

/// Branch instruction for positive test cases
pub const POSITIVE_INSTRUCTION: &str = "This is a positive test. Every step must use valid data so that the transaction reaches successful completion, ending with the system confirming the document or record was saved.";

/// Branch instruction for negative test cases
pub const NEGATIVE_INSTRUCTION: &str = "This is a negative test. Include exactly one step that deliberately enters invalid or missing data to trigger a specific, predictable SAP error message. State the expected error message text in that step and verify the transaction cannot be completed.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_prompt_requests_all_sections() {
        assert!(STEPS_PROMPT.contains("**Objective**"));
        assert!(STEPS_PROMPT.contains("**Prerequisites**"));
        assert!(STEPS_PROMPT.contains("**Test Steps**"));
        assert!(STEPS_PROMPT.contains("**Final Expected Result**"));
    }

    #[test]
    fn test_steps_prompt_has_placeholders() {
        assert!(STEPS_PROMPT.contains("{transaction_code}"));
        assert!(STEPS_PROMPT.contains("{title}"));
        assert!(STEPS_PROMPT.contains("{kind_instruction}"));
    }

    #[test]
    fn test_branch_instructions_differ() {
        assert!(POSITIVE_INSTRUCTION.contains("successful completion"));
        assert!(NEGATIVE_INSTRUCTION.contains("error"));
    }

    #[test]
    fn test_system_persona() {
        assert!(STEPS_SYSTEM_PROMPT.contains("senior QA engineer"));
    }
}
