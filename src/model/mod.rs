//! Domain records for the review dashboard.
//!
//! This module contains the data shown on the dashboard's tabs:
//!
//! - [`project`]: review projects and their delivery status
//! - [`task`]: review tasks within a project
//! - [`expert`]: human reviewers and their progress
//! - [`annotation`]: reviewed data points with feedback and comments
//! - [`evals`]: evaluation runs and dataset versions
//! - [`queue`]: the tasker work queue
//!
//! Every tabular entity implements [`crate::table::Record`] so the shared
//! view core can search, sort and paginate it.

mod annotation;
mod evals;
mod expert;
mod project;
mod queue;
mod task;

pub use annotation::{Annotation, Comment, ExpertFeedback, Vote};
pub use evals::{DatasetVersion, EvalRun, RunStatus};
pub use expert::{Expert, ExpertStatus, Insight, InsightKind};
pub use project::{Project, ProjectStatus};
pub use queue::QueueItem;
pub use task::{Task, TaskStatus};

use serde::{Deserialize, Serialize};

/// Everything the dashboard shows, held in memory for the whole session.
///
/// The only mutation after construction is comment insertion on annotations;
/// all view state lives outside the workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub experts: Vec<Expert>,
    pub annotations: Vec<Annotation>,
    pub runs: Vec<EvalRun>,
    pub versions: Vec<DatasetVersion>,
    pub queue: Vec<QueueItem>,
    pub insights: Vec<Insight>,
}

impl Workspace {
    /// Insights concerning a single expert, in declaration order.
    pub fn insights_for(&self, expert_id: u32) -> Vec<&Insight> {
        self.insights
            .iter()
            .filter(|i| i.expert_id == expert_id)
            .collect()
    }

    /// Appends a comment to the annotation with the given id. Returns false
    /// when the id is unknown.
    pub fn add_comment(&mut self, annotation_id: u32, comment: Comment) -> bool {
        match self.annotations.iter_mut().find(|a| a.id == annotation_id) {
            Some(a) => {
                a.comments.push(comment);
                true
            }
            None => false,
        }
    }
}
