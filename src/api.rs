//! Request/response shapes exchanged with callers.

use crate::persona::PersonaSpec;
use crate::runner::PersonaResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_user_id() -> String {
    "default_user".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,

    #[serde(alias = "dilemmaText")]
    pub dilemma: String,

    #[serde(default, alias = "contextData")]
    pub context: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaResponse {
    #[serde(alias = "persona")]
    pub persona_id: String,

    #[serde(alias = "name")]
    pub display_name: String,

    #[serde(default)]
    pub icon: String,

    #[serde(alias = "response")]
    pub text: String,
}

impl From<&PersonaResult> for PersonaResponse {
    fn from(result: &PersonaResult) -> Self {
        Self {
            persona_id: result.persona_id.clone(),
            display_name: result.display_name.clone(),
            icon: result.icon.clone(),
            text: result.text.clone(),
        }
    }
}

impl From<&PersonaResponse> for PersonaResult {
    /// Caller-supplied insights are taken at face value
    fn from(response: &PersonaResponse) -> Self {
        let spec = PersonaSpec {
            id: response.persona_id.clone(),
            display_name: response.display_name.clone(),
            icon: response.icon.clone(),
            system_prompt: String::new(),
        };
        PersonaResult::completed(&spec, response.text.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectResponse {
    pub request_id: String,
    pub user_id: String,
    pub timestamp: String,
    pub dilemma: String,
    pub responses: Vec<PersonaResponse>,
    pub suggested_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub entry_id: String,

    pub responses: Vec<PersonaResponse>,

    #[serde(default)]
    pub user_preferences: Map<String, Value>,
}

impl From<ReflectResponse> for PlanRequest {
    fn from(reflection: ReflectResponse) -> Self {
        Self {
            entry_id: reflection.request_id,
            responses: reflection.responses,
            user_preferences: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan_id: String,
    pub entry_id: String,
    pub steps: Vec<String>,
    pub created_at: String,
}
