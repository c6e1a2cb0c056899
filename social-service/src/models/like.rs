use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource a like points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Post,
    Comment,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Post => "post",
            TargetType::Comment => "comment",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique key of a like relation. At most one row exists per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LikeKey {
    pub actor_id: i64,
    pub target_id: i64,
    pub target_type: TargetType,
}

impl LikeKey {
    pub fn new(actor_id: i64, target_id: i64, target_type: TargetType) -> Self {
        Self {
            actor_id,
            target_id,
            target_type,
        }
    }
}

/// Result of one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    /// Whether the relation exists after the toggle.
    pub fn liked(&self) -> bool {
        matches!(self, ToggleOutcome::Added)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleOutcome::Added => "added",
            ToggleOutcome::Removed => "removed",
        }
    }
}
