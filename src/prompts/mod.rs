pub mod data;
pub mod script;
pub mod steps;

use anyhow::Result;

use crate::config::StageConfigs;

/// Placeholders an override must keep so each stage still sees its inputs
const STEPS_REQUIRED: &[&str] = &["transaction_code", "title", "kind_instruction"];
const DATA_REQUIRED: &[&str] = &["test_case"];
const SCRIPT_REQUIRED: &[&str] = &["test_case", "test_data"];

/// Prompt registry with one user template per generation stage
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    pub steps: String,
    pub data: String,
    pub script: String,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self {
            steps: steps::STEPS_PROMPT.to_string(),
            data: data::DATA_PROMPT.to_string(),
            script: script::SCRIPT_PROMPT.to_string(),
        }
    }
}

impl PromptRegistry {
    /// Create a new registry with config overrides applied
    pub fn with_overrides(&self, stages: &StageConfigs) -> Self {
        let mut registry = self.clone();

        if let Some(ref prompt) = stages.steps.prompt {
            registry.steps = prompt.clone();
        }

        if let Some(ref prompt) = stages.data.prompt {
            registry.data = prompt.clone();
        }

        if let Some(ref prompt) = stages.script.prompt {
            registry.script = prompt.clone();
        }

        registry
    }
}

/// Reject prompt overrides that drop a placeholder their stage depends on
pub fn check_overrides(stages: &StageConfigs) -> Result<()> {
    let overrides = [
        ("steps", stages.steps.prompt.as_deref(), STEPS_REQUIRED),
        ("data", stages.data.prompt.as_deref(), DATA_REQUIRED),
        ("script", stages.script.prompt.as_deref(), SCRIPT_REQUIRED),
    ];

    for (stage, prompt, required) in overrides {
        let Some(prompt) = prompt else {
            continue;
        };
        let missing: Vec<String> = required
            .iter()
            .map(|name| format!("{{{}}}", name))
            .filter(|placeholder| !prompt.contains(placeholder.as_str()))
            .collect();
        if !missing.is_empty() {
            anyhow::bail!(
                "Prompt override for the {} stage is missing {}",
                stage,
                missing.join(", ")
            );
        }
    }

    Ok(())
}

/// Substitute `{name}` placeholders in a template.
/// Unknown placeholders are left in place, and substituted values are never
/// rescanned, so model output containing braces passes through verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let rendered = render(
            "{a} and {a} then {b}",
            &[("a", "first"), ("b", "second")],
        );
        assert_eq!(rendered, "first and first then second");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let rendered = render("{known} {unknown}", &[("known", "x")]);
        assert_eq!(rendered, "x {unknown}");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let rendered = render(
            "{test_case} / {test_data}",
            &[("test_case", "uses {test_data} literally"), ("test_data", "T")],
        );
        assert_eq!(rendered, "uses {test_data} literally / T");
    }

    #[test]
    fn test_prompt_config_overrides() {
        let registry = PromptRegistry::default();
        let mut config = Config::default();
        config.stages.steps.prompt = Some("Custom steps prompt".to_string());
        config.stages.script.prompt = Some("Custom script prompt".to_string());

        let overridden = registry.with_overrides(&config.stages);
        assert_eq!(overridden.steps, "Custom steps prompt");
        assert_eq!(overridden.script, "Custom script prompt");
        // Unchanged prompts should remain the same
        assert_eq!(overridden.data, registry.data);
    }

    #[test]
    fn test_built_in_prompts_pass_override_check() {
        let mut config = Config::default();
        config.stages.steps.prompt = Some(steps::STEPS_PROMPT.to_string());
        config.stages.data.prompt = Some(data::DATA_PROMPT.to_string());
        config.stages.script.prompt = Some(script::SCRIPT_PROMPT.to_string());
        assert!(check_overrides(&config.stages).is_ok());
        assert!(check_overrides(&Config::default().stages).is_ok());
    }

    #[test]
    fn test_override_without_placeholders_is_rejected() {
        let mut config = Config::default();
        config.stages.data.prompt = Some("Make up some test data".to_string());
        let err = check_overrides(&config.stages).unwrap_err().to_string();
        assert!(err.contains("data stage"));
        assert!(err.contains("{test_case}"));

        let mut config = Config::default();
        config.stages.steps.prompt = Some("Test {transaction_code}: {title}".to_string());
        let err = check_overrides(&config.stages).unwrap_err().to_string();
        assert!(err.contains("{kind_instruction}"));
        assert!(!err.contains("{title}"));

        let mut config = Config::default();
        config.stages.script.prompt = Some("Automate {test_case}".to_string());
        let err = check_overrides(&config.stages).unwrap_err().to_string();
        assert!(err.contains("{test_data}"));
    }
}
