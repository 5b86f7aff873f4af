//! Human reviewers and per-reviewer insights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::{FieldValue, Record};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub enum ExpertStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ExpertStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExpertStatus::NotStarted => "not started",
            ExpertStatus::InProgress => "in progress",
            ExpertStatus::Completed => "completed",
        }
    }

    fn rank(&self) -> i64 {
        match self {
            ExpertStatus::NotStarted => 0,
            ExpertStatus::InProgress => 1,
            ExpertStatus::Completed => 2,
        }
    }
}

/// One reviewer assigned to the current task.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Expert {
    pub id: u32,
    pub name: String,
    pub role: String,
    /// Share of assigned data points already reviewed.
    pub progress_pct: u8,
    /// Instruction document version the reviewer last worked against.
    pub doc_version: String,
    pub status: ExpertStatus,
    /// None until the reviewer submits their first annotation.
    pub latest_edit: Option<DateTime<Utc>>,
}

impl Record for Expert {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::Text(self.name.clone()),
            "role" => FieldValue::Text(self.role.clone()),
            "progress" => FieldValue::Integer(self.progress_pct as i64),
            "version" => FieldValue::Text(self.doc_version.clone()),
            "status" => FieldValue::Integer(self.status.rank()),
            "latest_edit" => match self.latest_edit {
                Some(ts) => FieldValue::Integer(ts.timestamp()),
                None => FieldValue::Missing,
            },
            _ => FieldValue::Missing,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "role"]
    }
}

/// Category of an automatically surfaced observation about a reviewer.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum InsightKind {
    Alert,
    Progress,
    Quality,
    Trend,
}

impl InsightKind {
    pub fn label(&self) -> &'static str {
        match self {
            InsightKind::Alert => "Alert",
            InsightKind::Progress => "Progress",
            InsightKind::Quality => "Quality",
            InsightKind::Trend => "Trend",
        }
    }
}

/// A single observation shown in the expert detail popup.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Insight {
    pub expert_id: u32,
    pub kind: InsightKind,
    pub message: String,
}
