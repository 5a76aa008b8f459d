use crate::api::{PlanResponse, ReflectResponse};
use crate::error::OutputError;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `<request_id>.json` and `<request_id>.md` for a reflection
pub fn write_reflection_report(
    report_dir: &Path,
    response: &ReflectResponse,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let json_path = report_dir.join(format!("{}.json", response.request_id));
    let json = serde_json::to_string_pretty(response)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let md_path = report_dir.join(format!("{}.md", response.request_id));
    fs::write(&md_path, render_reflection(response)).map_err(OutputError::WriteReport)?;

    Ok(md_path)
}

/// Write `<plan_id>.json` and `<plan_id>.md` for an action plan
pub fn write_plan_report(report_dir: &Path, response: &PlanResponse) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let json_path = report_dir.join(format!("{}.json", response.plan_id));
    let json = serde_json::to_string_pretty(response)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let md_path = report_dir.join(format!("{}.md", response.plan_id));
    fs::write(&md_path, render_plan(response)).map_err(OutputError::WriteReport)?;

    Ok(md_path)
}

pub fn render_reflection(response: &ReflectResponse) -> String {
    let mut content = String::new();

    content.push_str("# Reflection\n\n");
    content.push_str("| Field | Value |\n");
    content.push_str("|-------|-------|\n");
    content.push_str(&format!("| Entry | `{}` |\n", response.request_id));
    content.push_str(&format!("| User | {} |\n", response.user_id));
    content.push_str(&format!("| Created | {} |\n", response.timestamp));
    content.push_str("\n## Dilemma\n\n");
    content.push_str(&format!("> {}\n\n", response.dilemma.trim()));
    content.push_str("---\n\n");

    content.push_str("## Perspectives\n\n");
    for persona in &response.responses {
        content.push_str(&format!(
            "### {} {} (`{}`)\n\n",
            persona.icon, persona.display_name, persona.persona_id
        ));
        content.push_str(&format!("{}\n\n", persona.text.trim()));
    }

    content.push_str("## Suggested Actions\n\n");
    push_numbered(&mut content, &response.suggested_actions);

    content
}

pub fn render_plan(response: &PlanResponse) -> String {
    let mut content = String::new();

    content.push_str("# Action Plan\n\n");
    content.push_str(&format!("- **Plan:** `{}`\n", response.plan_id));
    content.push_str(&format!("- **Entry:** `{}`\n", response.entry_id));
    content.push_str(&format!("- **Created:** {}\n\n", response.created_at));
    content.push_str("## Steps\n\n");
    push_numbered(&mut content, &response.steps);

    content
}

fn push_numbered(content: &mut String, items: &[String]) {
    for (idx, item) in items.iter().enumerate() {
        content.push_str(&format!("{}. {}\n", idx + 1, item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PersonaResponse;

    fn reflection() -> ReflectResponse {
        ReflectResponse {
            request_id: "entry-test".to_string(),
            user_id: "u1".to_string(),
            timestamp: "2026-10-19T09:00:00+00:00".to_string(),
            dilemma: "Should I take the new role?".to_string(),
            responses: vec![PersonaResponse {
                persona_id: "rational-analyst".to_string(),
                display_name: "Alex".to_string(),
                icon: "📊".to_string(),
                text: "List the trade-offs.".to_string(),
            }],
            suggested_actions: vec!["Write a pros/cons list".to_string(), "Sleep on it".to_string()],
        }
    }

    #[test]
    fn test_render_reflection() {
        let md = render_reflection(&reflection());
        assert!(md.contains("> Should I take the new role?"));
        assert!(md.contains("### 📊 Alex (`rational-analyst`)"));
        assert!(md.contains("1. Write a pros/cons list\n2. Sleep on it\n"));
    }

    #[test]
    fn test_write_reflection_report() {
        let dir = tempfile::tempdir().unwrap();
        let md_path = write_reflection_report(dir.path(), &reflection()).unwrap();

        assert_eq!(md_path, dir.path().join("entry-test.md"));
        let json = fs::read_to_string(dir.path().join("entry-test.json")).unwrap();
        let parsed: ReflectResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.suggested_actions.len(), 2);
    }

    #[test]
    fn test_write_plan_report() {
        let dir = tempfile::tempdir().unwrap();
        let plan = PlanResponse {
            plan_id: "ap-test".to_string(),
            entry_id: "entry-test".to_string(),
            steps: vec!["Start".to_string()],
            created_at: "2026-10-19T09:00:00+00:00".to_string(),
        };
        write_plan_report(&dir.path().join("nested"), &plan).unwrap();

        let md = fs::read_to_string(dir.path().join("nested/ap-test.md")).unwrap();
        assert!(md.contains("- **Entry:** `entry-test`"));
        assert!(md.contains("1. Start\n"));
    }
}
