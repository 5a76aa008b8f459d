use crate::config::Config;
use crate::error::OrchestrationError;
use crate::persona::{Persona, PersonaSpec};
use crate::prompt::reflect_prompt;
use crate::provider::{create_responder, Responder};
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout as tokio_timeout;
use tracing::{info, warn};

use super::task::{run_task, PersonaResult};

/// One end-user submission
#[derive(Debug, Clone)]
pub struct RequestContext {
    dilemma: String,
    context: Map<String, Value>,
}

impl RequestContext {
    pub fn new(
        dilemma: impl Into<String>,
        context: Map<String, Value>,
    ) -> Result<Self, OrchestrationError> {
        let dilemma = dilemma.into();
        if dilemma.trim().is_empty() {
            return Err(OrchestrationError::InvalidInput(
                "dilemma text must not be empty".to_string(),
            ));
        }
        Ok(Self { dilemma, context })
    }

    pub fn dilemma(&self) -> &str {
        &self.dilemma
    }

    #[allow(dead_code)]
    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    /// The prompt shared by every persona for this request
    pub fn prompt(&self) -> String {
        reflect_prompt(&self.dilemma, &self.context)
    }
}

/// Results for every configured persona, in registry order.
///
/// The length always equals the number of configured personas; tasks that
/// failed, panicked or missed the request deadline hold fallback entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaResultSet {
    results: Vec<PersonaResult>,
}

impl PersonaResultSet {
    fn assemble(
        specs: &[&PersonaSpec],
        slots: Vec<Option<PersonaResult>>,
        deadline: Option<Duration>,
    ) -> Self {
        let results = specs
            .iter()
            .zip(slots)
            .map(|(spec, slot)| {
                slot.unwrap_or_else(|| {
                    PersonaResult::timed_out(spec, deadline.unwrap_or_default())
                })
            })
            .collect();
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PersonaResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[PersonaResult] {
        &self.results
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.failed()).count()
    }

    #[allow(dead_code)]
    pub fn get(&self, persona_id: &str) -> Option<&PersonaResult> {
        self.results.iter().find(|r| r.persona_id == persona_id)
    }
}

/// A persona paired with the responder that speaks for it
#[derive(Clone)]
pub struct PersonaBinding {
    pub spec: PersonaSpec,
    pub responder: Arc<dyn Responder>,
}

/// Runs every persona concurrently and joins all of them.
pub struct FanOutCoordinator {
    personas: Vec<PersonaBinding>,
    timeout: Duration,
    deadline: Option<Duration>,
}

impl FanOutCoordinator {
    pub fn new(personas: Vec<PersonaBinding>, timeout: Duration, deadline: Option<Duration>) -> Self {
        Self {
            personas,
            timeout,
            deadline,
        }
    }

    /// Bind the full persona registry to responders chosen by config
    pub fn from_config(config: &Config) -> Self {
        let personas = Persona::all()
            .iter()
            .map(|persona| {
                let spec = persona.spec();
                let responder = create_responder(config, config.provider_for(*persona), &spec);
                PersonaBinding { spec, responder }
            })
            .collect();
        Self::new(personas, config.persona_timeout(), config.request_deadline())
    }

    pub fn specs(&self) -> impl Iterator<Item = &PersonaSpec> {
        self.personas.iter().map(|b| &b.spec)
    }

    pub async fn run(&self, request: &RequestContext) -> PersonaResultSet {
        self.run_prompt(&request.prompt()).await
    }

    /// Launch one task per persona against `prompt` and wait for all of them
    pub async fn run_prompt(&self, prompt: &str) -> PersonaResultSet {
        let start = Instant::now();

        info!(
            "Fanning out to {} personas (timeout {:?})",
            self.personas.len(),
            self.timeout
        );

        let mut futures = FuturesUnordered::new();
        let mut abort_handles = Vec::with_capacity(self.personas.len());

        for (idx, binding) in self.personas.iter().enumerate() {
            let spec = binding.spec.clone();
            let responder = binding.responder.clone();
            let prompt = prompt.to_string();
            let timeout = self.timeout;

            let handle = tokio::spawn(async move {
                run_task(&spec, responder.as_ref(), &prompt, timeout).await
            });
            abort_handles.push(handle.abort_handle());
            futures.push(async move { (idx, handle.await) });
        }

        let mut slots: Vec<Option<PersonaResult>> = vec![None; self.personas.len()];

        let collect = async {
            while let Some((idx, joined)) = futures.next().await {
                let spec = &self.personas[idx].spec;
                let result = match joined {
                    Ok(result) => result,
                    Err(e) => {
                        warn!("Task for {} did not finish: {}", spec.id, e);
                        PersonaResult::failed_with(spec, format!("task aborted: {}", e))
                    }
                };
                info!("Completed {}: {}", result.persona_id, result.status);
                slots[idx] = Some(result);
            }
        };

        match self.deadline {
            Some(deadline) => {
                if tokio_timeout(deadline, collect).await.is_err() {
                    warn!(
                        "Request deadline of {:?} reached; abandoning unfinished personas",
                        deadline
                    );
                    for handle in &abort_handles {
                        handle.abort();
                    }
                }
            }
            None => collect.await,
        }

        let specs: Vec<&PersonaSpec> = self.specs().collect();
        let set = PersonaResultSet::assemble(&specs, slots, self.deadline);

        info!(
            "Fan-out finished in {:.1}s: {} of {} personas degraded",
            start.elapsed().as_secs_f64(),
            set.failed_count(),
            set.len()
        );

        set
    }
}
