// Display metadata for a tracked entity
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: String,
    pub label: String,
    pub color: Option<String>,
}

impl Entity {
    pub fn new(id: String, label: String, color: Option<String>) -> Self {
        Self { id, label, color }
    }
}
