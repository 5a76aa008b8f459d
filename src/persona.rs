//! The closed set of coaching personas and the registry built from them.
//!
//! Registry order is significant: every fan-out result set is reported in
//! this order regardless of which call finished first.

use serde::Serialize;

const COGNITIVE_BEHAVIORAL_PROMPT: &str = include_str!("../prompts/personas/cognitive-behavioral.md");
const EMPATHETIC_FRIEND_PROMPT: &str = include_str!("../prompts/personas/empathetic-friend.md");
const RATIONAL_ANALYST_PROMPT: &str = include_str!("../prompts/personas/rational-analyst.md");
const MINDFULNESS_MENTOR_PROMPT: &str = include_str!("../prompts/personas/mindfulness-mentor.md");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    CognitiveBehavioral,
    EmpatheticFriend,
    RationalAnalyst,
    MindfulnessMentor,
}

impl Persona {
    /// All personas in registry order.
    pub fn all() -> &'static [Persona] {
        &[
            Persona::CognitiveBehavioral,
            Persona::EmpatheticFriend,
            Persona::RationalAnalyst,
            Persona::MindfulnessMentor,
        ]
    }

    /// Stable slug used in responses and config keys.
    pub fn id(&self) -> &'static str {
        match self {
            Persona::CognitiveBehavioral => "cognitive-behavioral",
            Persona::EmpatheticFriend => "empathetic-friend",
            Persona::RationalAnalyst => "rational-analyst",
            Persona::MindfulnessMentor => "mindfulness-mentor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::CognitiveBehavioral => "Dr. Chen",
            Persona::EmpatheticFriend => "Maya",
            Persona::RationalAnalyst => "Alex",
            Persona::MindfulnessMentor => "Sage",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Persona::CognitiveBehavioral => "🧠",
            Persona::EmpatheticFriend => "💙",
            Persona::RationalAnalyst => "📊",
            Persona::MindfulnessMentor => "🧘",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Persona::CognitiveBehavioral => "Cognitive-Behavioral Coach",
            Persona::EmpatheticFriend => "Empathetic Friend",
            Persona::RationalAnalyst => "Rational Analyst",
            Persona::MindfulnessMentor => "Mindfulness Mentor",
        }
    }

    /// One-line summary shown by `personas`.
    pub fn description(&self) -> &'static str {
        match self {
            Persona::CognitiveBehavioral => {
                "Helps identify thought patterns and develop practical strategies"
            }
            Persona::EmpatheticFriend => "Provides emotional support and validation",
            Persona::RationalAnalyst => "Offers structured, data-driven approaches",
            Persona::MindfulnessMentor => "Guides toward present-moment awareness",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Persona::CognitiveBehavioral => COGNITIVE_BEHAVIORAL_PROMPT,
            Persona::EmpatheticFriend => EMPATHETIC_FRIEND_PROMPT,
            Persona::RationalAnalyst => RATIONAL_ANALYST_PROMPT,
            Persona::MindfulnessMentor => MINDFULNESS_MENTOR_PROMPT,
        }
    }

    pub fn from_id(id: &str) -> Option<Persona> {
        Persona::all().iter().copied().find(|p| p.id() == id)
    }

    pub fn spec(&self) -> PersonaSpec {
        PersonaSpec {
            id: self.id().to_string(),
            display_name: self.display_name().to_string(),
            icon: self.icon().to_string(),
            system_prompt: self.system_prompt().to_string(),
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Static identity of one responder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaSpec {
    pub id: String,
    pub display_name: String,
    pub icon: String,
    #[serde(skip)]
    pub system_prompt: String,
}

impl PersonaSpec {
    /// Spec for the second-stage synthesizer, which is not a persona.
    pub fn synthesizer() -> Self {
        Self {
            id: "orchestrator-synthesis".to_string(),
            display_name: "Synthesizer".to_string(),
            icon: "🎯".to_string(),
            system_prompt: include_str!("../prompts/synthesis/system.md").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_order_is_fixed() {
        let ids: Vec<_> = Persona::all().iter().map(|p| p.id()).collect();
        assert_eq!(
            ids,
            vec![
                "cognitive-behavioral",
                "empathetic-friend",
                "rational-analyst",
                "mindfulness-mentor"
            ]
        );
    }

    #[test]
    fn test_ids_unique_and_round_trip() {
        let ids: HashSet<_> = Persona::all().iter().map(|p| p.id()).collect();
        assert_eq!(ids.len(), Persona::all().len());
        for persona in Persona::all() {
            assert_eq!(Persona::from_id(persona.id()), Some(*persona));
        }
        assert_eq!(Persona::from_id("unknown"), None);
    }

    #[test]
    fn test_spec_carries_prompt() {
        let spec = Persona::EmpatheticFriend.spec();
        assert_eq!(spec.display_name, "Maya");
        assert!(spec.system_prompt.contains("empathetic friend"));
    }

    #[test]
    fn test_every_persona_has_description() {
        for persona in Persona::all() {
            assert!(!persona.description().trim().is_empty());
        }
        assert_eq!(
            Persona::EmpatheticFriend.description(),
            "Provides emotional support and validation"
        );
    }
}
