//! Tasker work queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::instructions::Category;
use crate::table::{FieldValue, Record};

/// One work item assigned to the current contributor.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct QueueItem {
    pub id: String,
    pub title: String,
    pub project_id: String,
    pub project_name: String,
    pub category: Category,
    pub assigned_at: DateTime<Utc>,
}

impl Record for QueueItem {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Text(self.id.clone()),
            "title" => FieldValue::Text(self.title.clone()),
            "project" => FieldValue::Text(self.project_name.clone()),
            "category" => FieldValue::Text(self.category.title().to_string()),
            "assigned_at" => FieldValue::Integer(self.assigned_at.timestamp()),
            _ => FieldValue::Missing,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["title", "project"]
    }
}
