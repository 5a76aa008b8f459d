use super::Responder;
use crate::error::ResponderError;
use crate::persona::{Persona, PersonaSpec};
use async_trait::async_trait;

const OFFLINE_ACTIONS: &str = "1. Write the dilemma down in a single sentence\n\
2. Note which perspective above resonates with you most, and why\n\
3. Take five slow breaths before deciding anything\n\
4. Pick one small step you can finish tomorrow and put it in your calendar\n\
5. Check in with yourself at the end of the week and adjust";

/// Deterministic responder that never leaves the process.
///
/// Used by `--offline` runs so the pipeline can be exercised without any
/// provider CLI installed.
pub struct OfflineResponder {
    reply: String,
}

impl OfflineResponder {
    pub fn for_spec(spec: &PersonaSpec) -> Self {
        let reply = match Persona::from_id(&spec.id) {
            Some(persona) => format!(
                "{} ({}) is offline. Sit with this for a moment: {{{{TOPIC}}}}",
                persona.display_name(),
                persona.title()
            ),
            None => OFFLINE_ACTIONS.to_string(),
        };
        Self { reply }
    }
}

#[async_trait]
impl Responder for OfflineResponder {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn generate(&self, prompt: &str, _session_hint: &str) -> Result<String, ResponderError> {
        let topic = prompt
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("your dilemma");
        Ok(self.reply.replace("{{TOPIC}}", topic))
    }
}
