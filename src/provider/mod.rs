mod claude;
mod codex;
mod offline;
mod retry;

pub use claude::ClaudeResponder;
pub use codex::CodexResponder;
pub use offline::OfflineResponder;

use crate::config::{Config, Provider};
use crate::error::ResponderError;
use crate::persona::PersonaSpec;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::process::Command;

/// One external generative responder.
///
/// A call is a single logical attempt from the caller's point of view;
/// implementations may retry transient failures internally.
#[async_trait]
pub trait Responder: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str, session_hint: &str) -> Result<String, ResponderError>;
}

/// Create the responder that speaks for `spec` using `provider`
pub fn create_responder(
    config: &Config,
    provider: Provider,
    spec: &PersonaSpec,
) -> Arc<dyn Responder> {
    match provider {
        Provider::ClaudeCli => Arc::new(ClaudeResponder {
            binary: config.providers.claude_cli.binary.clone(),
            model: config.providers.claude_cli.model.clone(),
            system_prompt: spec.system_prompt.clone(),
            working_dir: config.working_dir.clone(),
            retry: config.retry.clone(),
        }),
        Provider::CodexCli => Arc::new(CodexResponder {
            binary: config.providers.codex_cli.binary.clone(),
            model: config.providers.codex_cli.model.clone(),
            system_prompt: spec.system_prompt.clone(),
            working_dir: config.working_dir.clone(),
            retry: config.retry.clone(),
        }),
        Provider::Offline => Arc::new(OfflineResponder::for_spec(spec)),
    }
}

/// Build a command, using PATH lookup for bare binary names
fn base_command(binary: &Path, working_dir: &Path) -> Command {
    let binary_str = binary.to_string_lossy();
    let mut cmd = if binary_str.contains('/') || binary_str.contains('\\') {
        Command::new(binary)
    } else {
        Command::new(binary_str.as_ref())
    };
    cmd.current_dir(working_dir);
    // The task timeout drops the future; the child must not outlive it
    cmd.kill_on_drop(true);
    cmd
}

/// A non-zero exit is the responder refusing the request
fn check_output(output: &std::process::Output) -> Result<(), ResponderError> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(ResponderError::Rejected(format!(
        "exit code {}: {}",
        output.status.code().unwrap_or(-1),
        stderr.trim()
    )))
}

fn non_empty(text: String) -> Result<String, ResponderError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ResponderError::MalformedResponse(
            "responder returned no text".to_string(),
        ))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::Persona;
    use std::path::PathBuf;

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty("  hello \n".to_string()).unwrap(), "hello");
        assert!(matches!(
            non_empty(" \n\t".to_string()),
            Err(ResponderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_create_responder_by_provider() {
        let config = Config::default();
        let spec = Persona::RationalAnalyst.spec();
        assert_eq!(
            create_responder(&config, Provider::ClaudeCli, &spec).name(),
            "claude_cli"
        );
        assert_eq!(
            create_responder(&config, Provider::CodexCli, &spec).name(),
            "codex_cli"
        );
        assert_eq!(
            create_responder(&config, Provider::Offline, &spec).name(),
            "offline"
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let responder = ClaudeResponder {
            binary: PathBuf::from("/nonexistent/persona-reflect-test-binary"),
            model: "sonnet".to_string(),
            system_prompt: String::new(),
            working_dir: PathBuf::from("."),
            retry: crate::config::RetryConfig {
                max_attempts: 1,
                backoff_base_ms: 1,
            },
        };
        let err = responder.generate("hello", "test-session").await.unwrap_err();
        assert!(matches!(err, ResponderError::Unavailable(_)));
    }
}
