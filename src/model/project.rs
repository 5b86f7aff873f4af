//! Review projects.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::table::{FieldValue, Record};

/// Delivery status of a project.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub enum ProjectStatus {
    #[default]
    OnTrack,
    AtRisk,
    BehindSchedule,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::OnTrack => "On Track",
            ProjectStatus::AtRisk => "At Risk",
            ProjectStatus::BehindSchedule => "Behind Schedule",
        }
    }

    /// Ordinal used for sorting: healthiest first.
    fn rank(&self) -> i64 {
        match self {
            ProjectStatus::OnTrack => 0,
            ProjectStatus::AtRisk => 1,
            ProjectStatus::BehindSchedule => 2,
        }
    }
}

/// One review project.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tasks_completed: u32,
    pub total_tasks: u32,
    pub status: ProjectStatus,
    pub due_date: NaiveDate,
}

impl Project {
    /// Completion as a whole percentage (0 when the project has no tasks).
    pub fn completion_pct(&self) -> u8 {
        if self.total_tasks == 0 {
            return 0;
        }
        ((self.tasks_completed * 100) / self.total_tasks) as u8
    }
}

impl Record for Project {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Text(self.id.clone()),
            "name" => FieldValue::Text(self.name.clone()),
            "description" => FieldValue::Text(self.description.clone()),
            "completed" => FieldValue::Integer(self.tasks_completed as i64),
            "total" => FieldValue::Integer(self.total_tasks as i64),
            "progress" => FieldValue::Integer(self.completion_pct() as i64),
            "status" => FieldValue::Integer(self.status.rank()),
            "due_date" => FieldValue::Integer(self.due_date.num_days_from_ce() as i64),
            _ => FieldValue::Missing,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "description"]
    }
}
