//! Review tasks within a project.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::instructions::Category;
use crate::table::{FieldValue, Record};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Active,
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    fn rank(&self) -> i64 {
        match self {
            TaskStatus::Active => 0,
            TaskStatus::Pending => 1,
            TaskStatus::Completed => 2,
        }
    }
}

/// One review task: a batch of data points reviewed by assigned experts.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub status: TaskStatus,
    /// Share of data points covered by at least one review.
    pub coverage_pct: u8,
    /// Inter-reviewer agreement with the reference labels.
    pub accuracy_pct: u8,
    pub last_edit: NaiveDate,
    /// Labeling category, used to generate tasker instructions.
    pub category: Category,
    pub assignee_ids: Vec<u32>,
}

impl Record for Task {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Text(self.id.clone()),
            "title" => FieldValue::Text(self.title.clone()),
            "status" => FieldValue::Integer(self.status.rank()),
            "coverage" => FieldValue::Integer(self.coverage_pct as i64),
            "accuracy" => FieldValue::Integer(self.accuracy_pct as i64),
            "last_edit" => FieldValue::Integer(self.last_edit.num_days_from_ce() as i64),
            "category" => FieldValue::Text(self.category.title().to_string()),
            "assignees" => FieldValue::Count(self.assignee_ids.len()),
            _ => FieldValue::Missing,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["title"]
    }
}
