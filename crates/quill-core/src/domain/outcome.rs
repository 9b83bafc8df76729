use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of entity a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Author,
    Post,
}

/// Kind of action a mutation performed. `Cancel` marks an unpublish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Update,
    Delete,
    Add,
    Cancel,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Author => "author",
            EntityKind::Post => "post",
        }
    }
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
            ActionKind::Add => "add",
            ActionKind::Cancel => "cancel",
        }
    }
}

/// Confirmation value returned by mutations whose callers only need an
/// acknowledgement, not the mutated entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub entity_id: Uuid,
    pub message: String,
    pub entity: EntityKind,
    pub action: ActionKind,
}

impl Outcome {
    pub fn new(entity_id: Uuid, entity: EntityKind, action: ActionKind) -> Self {
        Self {
            entity_id,
            message: "completed successfully".to_string(),
            entity,
            action,
        }
    }
}
