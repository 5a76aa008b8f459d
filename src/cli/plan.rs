//! CLI handler for the `plan` subcommand
//!
//! Reads persona responses saved by `reflect --json` (or a hand-written plan
//! request) and synthesizes a full action plan without re-running personas.

use crate::api::{PlanRequest, PlanResponse, ReflectResponse};
use crate::cli::{load_config, PlanArgs};
use crate::orchestrator::Orchestrator;
use crate::output::write_plan_report;
use anyhow::Context;
use std::path::Path;
use tracing::info;

pub async fn execute(args: PlanArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;

    let mut request = load_plan_request(&args.input)?;
    for (key, value) in &args.preferences {
        request.user_preferences.insert(key.clone(), value.clone());
    }

    info!(
        "Planning from {} saved responses in {:?}",
        request.responses.len(),
        args.input
    );

    let orchestrator = Orchestrator::from_config(&config);
    let response = orchestrator.handle_plan(request).await?;

    if let Some(dir) = &args.common.out_dir {
        let path = write_plan_report(dir, &response)?;
        info!("Wrote report: {}", path.display());
    }

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_plan(&response);
    }

    Ok(())
}

/// Accept either a `PlanRequest` or a saved `ReflectResponse`
fn load_plan_request(path: &Path) -> anyhow::Result<PlanRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan input {:?}", path))?;

    if let Ok(request) = serde_json::from_str::<PlanRequest>(&content) {
        return Ok(request);
    }

    let reflection: ReflectResponse = serde_json::from_str(&content).with_context(|| {
        format!(
            "{:?} is neither a plan request nor a saved reflection",
            path
        )
    })?;
    Ok(PlanRequest::from(reflection))
}

fn print_plan(response: &PlanResponse) {
    println!("\n=== Action Plan {} ===\n", response.plan_id);
    println!("Entry: {}\n", response.entry_id);
    for (idx, step) in response.steps.iter().enumerate() {
        println!("  {}. {}", idx + 1, step);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_plan_request_from_reflection() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "requestId": "entry-7",
                "userId": "u",
                "timestamp": "2026-10-19T09:00:00+00:00",
                "dilemma": "d",
                "responses": [{{"personaId": "empathetic-friend", "displayName": "Maya", "icon": "💙", "text": "hi"}}],
                "suggestedActions": ["a"]
            }}"#
        )
        .unwrap();

        let request = load_plan_request(file.path()).unwrap();
        assert_eq!(request.entry_id, "entry-7");
        assert_eq!(request.responses.len(), 1);
        assert!(request.user_preferences.is_empty());
    }

    #[test]
    fn test_load_plan_request_direct() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"entryId": "entry-8", "responses": [], "userPreferences": {{"pace": "slow"}}}}"#
        )
        .unwrap();

        let request = load_plan_request(file.path()).unwrap();
        assert_eq!(request.entry_id, "entry-8");
        assert_eq!(request.user_preferences["pace"], "slow");
    }

    #[test]
    fn test_load_plan_request_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_plan_request(file.path()).is_err());
    }
}
