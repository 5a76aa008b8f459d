use super::retry::retry_with_backoff;
use super::{base_command, check_output, non_empty, Responder};
use crate::config::RetryConfig;
use crate::error::ResponderError;
use async_trait::async_trait;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub struct CodexResponder {
    pub binary: PathBuf,
    pub model: String,
    pub system_prompt: String,
    pub working_dir: PathBuf,
    pub retry: RetryConfig,
}

impl CodexResponder {
    /// Codex has no system prompt flag; the instruction leads the prompt
    fn full_prompt(&self, prompt: &str) -> String {
        if self.system_prompt.is_empty() {
            prompt.to_string()
        } else {
            format!("{}\n\n---\n\n{}", self.system_prompt.trim(), prompt)
        }
    }

    async fn invoke(&self, prompt: &str, session_hint: &str) -> Result<String, ResponderError> {
        let full_prompt = self.full_prompt(prompt);

        // Capture final assistant message to a temp file
        let out_file = NamedTempFile::new()?;

        let mut cmd = base_command(&self.binary, &self.working_dir);
        cmd.arg("exec")
            .arg("--model")
            .arg(&self.model)
            .arg("--json")
            .arg("--output-last-message")
            .arg(out_file.path())
            // Read prompt from stdin
            .arg("-");

        cmd.stdin(std::process::Stdio::piped());
        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());

        debug!(
            "codex_cli call {} with {} byte prompt",
            session_hint,
            full_prompt.len()
        );

        let mut child = cmd.spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(full_prompt.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        check_output(&output)?;

        let message = tokio::fs::read_to_string(out_file.path())
            .await
            .map_err(|e| {
                ResponderError::MalformedResponse(format!("no last message written: {}", e))
            })?;

        non_empty(message)
    }
}

#[async_trait]
impl Responder for CodexResponder {
    fn name(&self) -> &'static str {
        "codex_cli"
    }

    async fn generate(&self, prompt: &str, session_hint: &str) -> Result<String, ResponderError> {
        retry_with_backoff(&self.retry, ResponderError::is_transient, || {
            self.invoke(prompt, session_hint)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder(system_prompt: &str) -> CodexResponder {
        CodexResponder {
            binary: PathBuf::from("codex"),
            model: "gpt-4.1".to_string(),
            system_prompt: system_prompt.to_string(),
            working_dir: PathBuf::from("."),
            retry: RetryConfig::default(),
        }
    }

    #[test]
    fn test_system_prompt_leads() {
        let full = responder("You are Alex.\n").full_prompt("User Dilemma: x");
        assert_eq!(full, "You are Alex.\n\n---\n\nUser Dilemma: x");
    }

    #[test]
    fn test_without_system_prompt() {
        assert_eq!(responder("").full_prompt("hello"), "hello");
    }
}
