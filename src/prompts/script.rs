/// System persona for the automation script stage
pub const SCRIPT_SYSTEM_PROMPT: &str = "You are a senior QA automation engineer who converts SAP manual test cases into maintainable automation scripts.";

/// Script prompt. Placeholders: `{library}`, `{fence_tag}`, `{test_case}`, `{test_data}`
pub const SCRIPT_PROMPT: &str = "Convert the manual SAP test case below into an automation script that uses the `{library}` keyword library.

**Rules**:
- Translate every numbered test step into one or more `{library}` keyword calls (for example `{library}.open_transaction`, `{library}.set_field`, `{library}.press`, `{library}.assert_status`)
- Bind every value from the test data table to a named variable at the top of the script and reference the variables in the keyword calls
- Add a short comment above each block naming the test step it implements
- Verify the final expected result with an assertion keyword

Return the complete script inside a single fenced code block tagged `{fence_tag}`.

--- TEST CASE ---
{test_case}
--- END TEST CASE ---

--- TEST DATA ---
{test_data}
--- END TEST DATA ---";
