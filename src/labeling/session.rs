// src/labeling/session.rs

/// One of the three configured annotators. `slot` picks their vote column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotator {
    pub name: String,
    pub slot: usize,
}

impl Annotator {
    /// Looks a name up in the configured annotator list.
    pub fn from_config(annotators: &[String; 3], name: &str) -> Option<Self> {
        annotators
            .iter()
            .position(|a| a == name.trim())
            .map(|slot| Annotator {
                name: annotators[slot].clone(),
                slot,
            })
    }
}

/// Per-session labeling state, passed explicitly to every labeling step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: i64,
    pub annotator: Annotator,
    /// Property ids labeled during this session, oldest first.
    pub labeled_ids: Vec<String>,
}

impl SessionContext {
    pub fn has_labeled(&self, property_id: &str) -> bool {
        self.labeled_ids.iter().any(|id| id == property_id)
    }
}
