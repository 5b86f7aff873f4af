//! Evaluation runs and labeled dataset versions.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::table::{FieldValue, Record};

/// Outcome of an evaluation run.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum RunStatus {
    Completed {
        accuracy: f64,
        completeness: f64,
        insights: String,
    },
    InProgress {
        progress_pct: u8,
    },
    Failed {
        error: String,
    },
}

impl RunStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Completed { .. } => "Completed",
            RunStatus::InProgress { .. } => "In Progress",
            RunStatus::Failed { .. } => "Failed",
        }
    }

    fn rank(&self) -> i64 {
        match self {
            RunStatus::Completed { .. } => 0,
            RunStatus::InProgress { .. } => 1,
            RunStatus::Failed { .. } => 2,
        }
    }
}

/// One evaluation run against a dataset version.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct EvalRun {
    pub id: u32,
    pub name: String,
    pub date: NaiveDate,
    pub status: RunStatus,
    pub data_version: String,
}

impl EvalRun {
    pub fn accuracy(&self) -> Option<f64> {
        match &self.status {
            RunStatus::Completed { accuracy, .. } => Some(*accuracy),
            _ => None,
        }
    }

    pub fn completeness(&self) -> Option<f64> {
        match &self.status {
            RunStatus::Completed { completeness, .. } => Some(*completeness),
            _ => None,
        }
    }
}

impl Record for EvalRun {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::Text(self.name.clone()),
            "date" => FieldValue::Integer(self.date.num_days_from_ce() as i64),
            "status" => FieldValue::Integer(self.status.rank()),
            // Incomplete runs have no metrics; Missing sorts them last.
            "accuracy" => match self.accuracy() {
                Some(v) => FieldValue::Float(v),
                None => FieldValue::Missing,
            },
            "completeness" => match self.completeness() {
                Some(v) => FieldValue::Float(v),
                None => FieldValue::Missing,
            },
            "version" => FieldValue::Text(self.data_version.clone()),
            _ => FieldValue::Missing,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "version"]
    }
}

/// One version of the labeled dataset, with its aggregate quality metrics.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct DatasetVersion {
    pub id: u32,
    pub version: String,
    pub created_at: NaiveDate,
    pub author: String,
    pub accuracy: f64,
    pub precision: f64,
    pub human_rating: f64,
    pub ai_rating: f64,
}

impl Record for DatasetVersion {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "version" => FieldValue::Text(self.version.clone()),
            "created_at" => FieldValue::Integer(self.created_at.num_days_from_ce() as i64),
            "author" => FieldValue::Text(self.author.clone()),
            "accuracy" => FieldValue::Float(self.accuracy),
            "precision" => FieldValue::Float(self.precision),
            "human_rating" => FieldValue::Float(self.human_rating),
            "ai_rating" => FieldValue::Float(self.ai_rating),
            _ => FieldValue::Missing,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["version", "author"]
    }
}
