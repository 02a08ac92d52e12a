/// System persona for the test data stage
pub const DATA_SYSTEM_PROMPT: &str = "You are a senior QA engineer preparing realistic SAP test data for manual and automated test execution.";

/// Test data prompt. Placeholder: `{test_case}`
pub const DATA_PROMPT: &str = "Read the following SAP test case and infer every input field a tester needs to fill in while executing it.

Produce plausible sample values for those fields and present them as a Markdown table with the columns:
| Step | Field | Value | Notes |

Only output the table. Do not repeat the test case.

--- TEST CASE ---
{test_case}
--- END TEST CASE ---";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_prompt_asks_for_table() {
        assert!(DATA_PROMPT.contains("Markdown table"));
        assert!(DATA_PROMPT.contains("{test_case}"));
    }
}
