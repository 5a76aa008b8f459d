//! End-to-end entry points: fan-out followed by synthesis.

use crate::api::{PersonaResponse, PlanRequest, PlanResponse, ReflectRequest, ReflectResponse};
use crate::config::Config;
use crate::error::OrchestrationError;
use crate::runner::{FanOutCoordinator, PersonaResult, PersonaResultSet, RequestContext};
use crate::synthesis::{ActionPlan, SynthesisStage};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

/// Result of one `reflect` call
#[derive(Debug, Clone)]
pub struct Reflection {
    pub results: PersonaResultSet,
    pub actions: ActionPlan,
}

/// Holds no per-request state; every call is self-contained.
pub struct Orchestrator {
    fan_out: FanOutCoordinator,
    synthesis: SynthesisStage,
}

impl Orchestrator {
    pub fn new(fan_out: FanOutCoordinator, synthesis: SynthesisStage) -> Self {
        Self { fan_out, synthesis }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            FanOutCoordinator::from_config(config),
            SynthesisStage::from_config(config),
        )
    }

    /// Run every persona, then synthesize quick actions from their replies
    pub async fn reflect(&self, request: &RequestContext) -> Reflection {
        let results = self.fan_out.run(request).await;
        let actions = self
            .synthesis
            .synthesize_actions(results.as_slice(), request.dilemma())
            .await;
        if actions.is_fallback() {
            warn!(
                "No usable actions synthesized ({} of {} personas failed)",
                results.failed_count(),
                results.len()
            );
        }
        Reflection { results, actions }
    }

    /// Synthesize a full plan from insights the caller already has
    pub async fn plan(
        &self,
        results: &[PersonaResult],
        preferences: &Map<String, Value>,
    ) -> Result<ActionPlan, OrchestrationError> {
        if results.is_empty() {
            return Err(OrchestrationError::InvalidInput(
                "at least one persona response is required".to_string(),
            ));
        }
        Ok(self.synthesis.synthesize_plan(results, preferences).await)
    }

    pub async fn handle_reflect(
        &self,
        request: ReflectRequest,
    ) -> Result<ReflectResponse, OrchestrationError> {
        let context = RequestContext::new(request.dilemma, request.context)?;
        info!("Processing dilemma for user {}", request.user_id);

        let reflection = self.reflect(&context).await;

        Ok(ReflectResponse {
            request_id: format!("entry-{}", Uuid::new_v4()),
            user_id: request.user_id,
            timestamp: Utc::now().to_rfc3339(),
            dilemma: context.dilemma().to_string(),
            responses: reflection
                .results
                .iter()
                .map(PersonaResponse::from)
                .collect(),
            suggested_actions: reflection.actions.into_steps(),
        })
    }

    pub async fn handle_plan(&self, request: PlanRequest) -> Result<PlanResponse, OrchestrationError> {
        if request.entry_id.trim().is_empty() {
            return Err(OrchestrationError::InvalidInput(
                "entry id must not be empty".to_string(),
            ));
        }
        info!("Creating action plan for entry {}", request.entry_id);

        let results: Vec<PersonaResult> =
            request.responses.iter().map(PersonaResult::from).collect();
        let plan = self.plan(&results, &request.user_preferences).await?;

        Ok(PlanResponse {
            plan_id: format!("ap-{}", Uuid::new_v4()),
            entry_id: request.entry_id,
            steps: plan.into_steps(),
            created_at: Utc::now().to_rfc3339(),
        })
    }
}
