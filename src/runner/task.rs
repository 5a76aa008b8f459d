use crate::error::ResponderError;
use crate::persona::PersonaSpec;
use crate::provider::Responder;
use std::time::{Duration, Instant};
use tokio::time::timeout as tokio_timeout;
use tracing::{debug, warn};
use uuid::Uuid;

/// Text substituted for any persona whose call did not produce a reply.
pub const FALLBACK_TEXT: &str = "I'm having trouble processing this right now. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum PersonaStatus {
    Completed,
    TimedOut { after: Duration },
    Failed { error: String },
}

impl std::fmt::Display for PersonaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonaStatus::Completed => write!(f, "completed"),
            PersonaStatus::TimedOut { after } => write!(f, "timed_out after {:?}", after),
            PersonaStatus::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// Outcome of one responder call. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaResult {
    pub persona_id: String,
    pub display_name: String,
    pub icon: String,
    pub text: String,
    pub status: PersonaStatus,
}

impl PersonaResult {
    pub fn completed(spec: &PersonaSpec, text: impl Into<String>) -> Self {
        Self {
            persona_id: spec.id.clone(),
            display_name: spec.display_name.clone(),
            icon: spec.icon.clone(),
            text: text.into(),
            status: PersonaStatus::Completed,
        }
    }

    pub fn timed_out(spec: &PersonaSpec, after: Duration) -> Self {
        Self::fallback(spec, PersonaStatus::TimedOut { after })
    }

    pub fn failed_with(spec: &PersonaSpec, error: impl Into<String>) -> Self {
        Self::fallback(
            spec,
            PersonaStatus::Failed {
                error: error.into(),
            },
        )
    }

    fn fallback(spec: &PersonaSpec, status: PersonaStatus) -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            status,
            ..Self::completed(spec, String::new())
        }
    }

    pub fn failed(&self) -> bool {
        !matches!(self.status, PersonaStatus::Completed)
    }

    /// Present iff the call failed
    pub fn error_detail(&self) -> Option<String> {
        match &self.status {
            PersonaStatus::Completed => None,
            PersonaStatus::TimedOut { after } => {
                Some(ResponderError::Timeout(*after).to_string())
            }
            PersonaStatus::Failed { error } => Some(error.clone()),
        }
    }
}

/// Run exactly one responder call under `timeout`.
///
/// Never fails: every error, including the timeout, becomes a fallback
/// result. Text that arrived before a timeout is discarded.
pub async fn run_task(
    spec: &PersonaSpec,
    responder: &dyn Responder,
    prompt: &str,
    timeout: Duration,
) -> PersonaResult {
    let start = Instant::now();
    let session_hint = format!("{}-{}", spec.id, Uuid::new_v4());

    debug!(
        "Running {} via {} (session {})",
        spec.id,
        responder.name(),
        session_hint
    );

    let outcome = match tokio_timeout(timeout, responder.generate(prompt, &session_hint)).await {
        Ok(result) => result,
        Err(_) => Err(ResponderError::Timeout(timeout)),
    };

    let result = match outcome {
        Ok(text) => PersonaResult::completed(spec, text),
        Err(ResponderError::Timeout(after)) => {
            warn!("{} timed out after {:?}", spec.id, after);
            PersonaResult::timed_out(spec, after)
        }
        Err(e) => {
            warn!("{} failed: {}", spec.id, e);
            PersonaResult::failed_with(spec, e.to_string())
        }
    };

    debug!(
        "{} finished in {:?}: {}",
        spec.id,
        start.elapsed(),
        result.status
    );

    result
}
