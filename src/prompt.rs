//! Prompt construction for both pipeline stages.

use crate::runner::PersonaResult;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::OnceLock;

const REFLECT_TEMPLATE: &str = include_str!("../prompts/reflect.md");
const ACTIONS_TEMPLATE: &str = include_str!("../prompts/synthesis/actions.md");
const PLAN_TEMPLATE: &str = include_str!("../prompts/synthesis/plan.md");

pub const NO_CONTEXT: &str = "No additional context provided";
pub const NO_PREFERENCES: &str = "None specified";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"))
}

/// Fill `{{NAME}}` placeholders in one pass.
///
/// Substituted values are never rescanned; unknown placeholders are left as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    placeholder_re()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Render `key: value` pairs in insertion order, strings unquoted
pub fn render_pairs(map: &Map<String, Value>) -> Option<String> {
    if map.is_empty() {
        return None;
    }
    let rendered = map
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}: {}", key, s),
            other => format!("{}: {}", key, other),
        })
        .collect::<Vec<_>>()
        .join(", ");
    Some(rendered)
}

/// The shared prompt every persona receives
pub fn reflect_prompt(dilemma: &str, context: &Map<String, Value>) -> String {
    let context = render_pairs(context).unwrap_or_else(|| NO_CONTEXT.to_string());
    fill_template(
        REFLECT_TEMPLATE,
        &[("DILEMMA", dilemma), ("CONTEXT", context.as_str())],
    )
}

/// One `Name (id): text` block per persona, failures included
pub fn format_perspectives(results: &[PersonaResult]) -> String {
    results
        .iter()
        .map(|r| format!("{} ({}): {}", r.display_name, r.persona_id, r.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn actions_prompt(results: &[PersonaResult], dilemma: &str) -> String {
    let perspectives = format_perspectives(results);
    fill_template(
        ACTIONS_TEMPLATE,
        &[("DILEMMA", dilemma), ("PERSPECTIVES", perspectives.as_str())],
    )
}

pub fn plan_prompt(results: &[PersonaResult], preferences: &Map<String, Value>) -> String {
    let preferences = render_pairs(preferences).unwrap_or_else(|| NO_PREFERENCES.to_string());
    let perspectives = format_perspectives(results);
    fill_template(
        PLAN_TEMPLATE,
        &[
            ("PERSPECTIVES", perspectives.as_str()),
            ("PREFERENCES", preferences.as_str()),
        ],
    )
}
