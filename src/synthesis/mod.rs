//! Synthesis stage: reduces persona results to a bounded action list
//!
//! After the fan-out completes, this module:
//! 1. Builds a prompt listing every persona's reply (fallbacks included)
//! 2. Runs one task against the synthesizer responder
//! 3. Parses the reply into at most 5 (quick) or 7 (full plan) steps
//!
//! The stage never returns an empty plan: a failed call or an unusable reply
//! becomes the single-step fallback plan.

mod parser;

pub use parser::parse_action_lines;

use crate::config::Config;
use crate::error::SynthesisError;
use crate::persona::PersonaSpec;
use crate::prompt::{actions_prompt, plan_prompt};
use crate::provider::{create_responder, Responder};
use crate::runner::{run_task, PersonaResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const QUICK_ACTION_CAP: usize = 5;
pub const PLAN_STEP_CAP: usize = 7;
pub const FALLBACK_STEP: &str = "Please try creating your action plan again";

/// Ordered, non-empty list of action steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionPlan(Vec<String>);

impl ActionPlan {
    pub fn fallback() -> Self {
        Self(vec![FALLBACK_STEP.to_string()])
    }

    #[allow(dead_code)]
    pub fn steps(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_fallback(&self) -> bool {
        self.0.len() == 1 && self.0[0] == FALLBACK_STEP
    }

    pub fn into_steps(self) -> Vec<String> {
        self.0
    }
}

pub struct SynthesisStage {
    spec: PersonaSpec,
    responder: Arc<dyn Responder>,
    timeout: Duration,
}

impl SynthesisStage {
    pub fn new(responder: Arc<dyn Responder>, timeout: Duration) -> Self {
        Self {
            spec: PersonaSpec::synthesizer(),
            responder,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let responder = create_responder(
            config,
            config.synthesis_provider(),
            &PersonaSpec::synthesizer(),
        );
        Self::new(responder, config.synthesis_timeout())
    }

    /// Quick synthesis: up to 5 immediate actions for one dilemma
    pub async fn synthesize_actions(&self, results: &[PersonaResult], dilemma: &str) -> ActionPlan {
        info!("Synthesizing actions from {} perspectives", results.len());
        let prompt = actions_prompt(results, dilemma);
        self.synthesize(&prompt, QUICK_ACTION_CAP).await
    }

    /// Full plan: up to 7 progressive steps, shaped by user preferences
    pub async fn synthesize_plan(
        &self,
        results: &[PersonaResult],
        preferences: &Map<String, Value>,
    ) -> ActionPlan {
        info!(
            "Synthesizing action plan from {} perspectives ({} preferences)",
            results.len(),
            preferences.len()
        );
        let prompt = plan_prompt(results, preferences);
        self.synthesize(&prompt, PLAN_STEP_CAP).await
    }

    async fn synthesize(&self, prompt: &str, cap: usize) -> ActionPlan {
        debug!("Synthesis prompt is {} bytes", prompt.len());
        let result = run_task(&self.spec, self.responder.as_ref(), prompt, self.timeout).await;

        match parse_result(&result, cap) {
            Ok(plan) => {
                info!("Synthesis produced {} steps", plan.len());
                plan
            }
            Err(e) => {
                warn!("{}; returning fallback plan", e);
                ActionPlan::fallback()
            }
        }
    }
}

fn parse_result(result: &PersonaResult, cap: usize) -> Result<ActionPlan, SynthesisError> {
    if let Some(detail) = result.error_detail() {
        return Err(SynthesisError::Responder(detail));
    }
    let steps = parse_action_lines(&result.text, cap);
    if steps.is_empty() {
        return Err(SynthesisError::ParseEmpty);
    }
    Ok(ActionPlan(steps))
}
