use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Protagonist snapshot reported by the story service.
/// The service owns this data; the client only ever replaces it whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub class: Option<String>,

    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub inventory: Vec<String>,

    /// Other character → how the protagonist stands with them
    #[serde(default)]
    pub relationships: BTreeMap<String, String>,

    #[serde(default)]
    pub story_progress: f64,
    #[serde(default)]
    pub current_location: Option<String>,

    #[serde(default)]
    pub active_quests: Vec<String>,
    #[serde(default)]
    pub completed_quests: Vec<String>,
}
