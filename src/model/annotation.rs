//! Reviewed data points with expert feedback and discussion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::{FieldValue, Record};

/// A reviewer's verdict on one model response.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub enum Vote {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Per-expert feedback on one annotation.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ExpertFeedback {
    pub expert_id: u32,
    pub note: String,
    pub vote: Vote,
}

/// A discussion comment attached to an annotation.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Comment {
    pub id: u32,
    pub author: String,
    pub role: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

/// One reviewed data point: a scan, the model's response, the reference
/// evaluation response, and everything the reviewers said about it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Annotation {
    pub id: u32,
    /// Reference to the underlying scan (opaque to the dashboard).
    pub image: String,
    pub input: String,
    pub model_response: String,
    pub eval_response: String,
    /// Reviewer grade, 1..=5.
    pub grade: u8,
    pub consensus: String,
    pub cumulative_feedback: String,
    pub feedback: Vec<ExpertFeedback>,
    pub comments: Vec<Comment>,
}

impl Annotation {
    /// Positive votes out of total votes, for the consensus column.
    pub fn vote_tally(&self) -> (usize, usize) {
        let positive = self
            .feedback
            .iter()
            .filter(|f| f.vote == Vote::Positive)
            .count();
        (positive, self.feedback.len())
    }

}

impl Record for Annotation {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "input" => FieldValue::Text(self.input.clone()),
            "model_response" => FieldValue::Text(self.model_response.clone()),
            "eval_response" => FieldValue::Text(self.eval_response.clone()),
            "grade" => FieldValue::Integer(self.grade as i64),
            "consensus" => FieldValue::Text(self.consensus.clone()),
            "cumulative_feedback" => FieldValue::Text(self.cumulative_feedback.clone()),
            "feedback" => FieldValue::Count(self.feedback.len()),
            "comments" => FieldValue::Count(self.comments.len()),
            _ => FieldValue::Missing,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["model_response", "eval_response", "cumulative_feedback"]
    }
}
