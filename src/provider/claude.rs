use super::retry::retry_with_backoff;
use super::{base_command, check_output, non_empty, Responder};
use crate::config::RetryConfig;
use crate::error::ResponderError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

pub struct ClaudeResponder {
    pub binary: PathBuf,
    pub model: String,
    pub system_prompt: String,
    pub working_dir: PathBuf,
    pub retry: RetryConfig,
}

impl ClaudeResponder {
    async fn invoke(&self, prompt: &str, session_hint: &str) -> Result<String, ResponderError> {
        let mut cmd = base_command(&self.binary, &self.working_dir);

        // Ensure subscription auth is used (not API key)
        cmd.env_remove("ANTHROPIC_API_KEY");

        cmd.arg("-p")
            .arg(prompt)
            .arg("--model")
            .arg(&self.model)
            .arg("--output-format")
            .arg("json");

        if !self.system_prompt.is_empty() {
            cmd.arg("--append-system-prompt").arg(&self.system_prompt);
        }

        debug!(
            "claude_cli call {} with {} byte prompt",
            session_hint,
            prompt.len()
        );

        let output = cmd.output().await?;
        check_output(&output)?;

        parse_claude_output(&String::from_utf8_lossy(&output.stdout))
    }
}

#[async_trait]
impl Responder for ClaudeResponder {
    fn name(&self) -> &'static str {
        "claude_cli"
    }

    async fn generate(&self, prompt: &str, session_hint: &str) -> Result<String, ResponderError> {
        retry_with_backoff(&self.retry, ResponderError::is_transient, || {
            self.invoke(prompt, session_hint)
        })
        .await
    }
}

/// Claude wraps the reply in {"result": "...", "is_error": bool, ...}
fn parse_claude_output(raw: &str) -> Result<String, ResponderError> {
    #[derive(Deserialize)]
    struct ClaudeOutput {
        #[serde(default)]
        result: Option<String>,
        #[serde(default)]
        is_error: bool,
    }

    let trimmed = raw.trim();
    if !trimmed.starts_with('{') {
        return non_empty(trimmed.to_string());
    }

    match serde_json::from_str::<ClaudeOutput>(trimmed) {
        Ok(out) if out.is_error => Err(ResponderError::Rejected(
            out.result.unwrap_or_else(|| "claude reported an error".to_string()),
        )),
        Ok(out) => match out.result {
            Some(text) => non_empty(text),
            None => Err(ResponderError::MalformedResponse(
                "missing 'result' field in claude output".to_string(),
            )),
        },
        Err(e) => Err(ResponderError::MalformedResponse(format!(
            "unparseable claude output: {}",
            e
        ))),
    }
}
