//! Pre-built demo workspace.
//!
//! The dashboard runs entirely on static in-memory data; this module builds
//! the one dataset it ships with. Identifiers and content are stable across
//! runs so screenshots, tests and demos agree.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::instructions::Category;
use crate::model::{
    Annotation, Comment, DatasetVersion, EvalRun, Expert, ExpertFeedback, ExpertStatus, Insight,
    InsightKind, Project, ProjectStatus, QueueItem, RunStatus, Task, TaskStatus, Vote, Workspace,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

impl Workspace {
    /// Builds the demo workspace: a medical-imaging review program with four
    /// projects, four reviewers, a handful of reviewed scans and a short
    /// evaluation history.
    pub fn demo() -> Self {
        Self {
            projects: demo_projects(),
            tasks: demo_tasks(),
            experts: demo_experts(),
            annotations: demo_annotations(),
            runs: demo_runs(),
            versions: demo_versions(),
            queue: demo_queue(),
            insights: demo_insights(),
        }
    }
}

fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "PROJ-001".to_string(),
            name: "AI Model Evaluation".to_string(),
            description: "Evaluate the performance of our latest AI model on medical image analysis."
                .to_string(),
            tasks_completed: 15,
            total_tasks: 50,
            status: ProjectStatus::OnTrack,
            due_date: date(2024, 12, 14),
        },
        Project {
            id: "PROJ-002".to_string(),
            name: "Data Annotation".to_string(),
            description: "Annotate a large dataset of X-ray images for machine learning training."
                .to_string(),
            tasks_completed: 80,
            total_tasks: 100,
            status: ProjectStatus::AtRisk,
            due_date: date(2024, 11, 29),
        },
        Project {
            id: "PROJ-003".to_string(),
            name: "Algorithm Optimization".to_string(),
            description: "Optimize our current algorithms for faster processing of medical data."
                .to_string(),
            tasks_completed: 5,
            total_tasks: 20,
            status: ProjectStatus::BehindSchedule,
            due_date: date(2024, 12, 1),
        },
        Project {
            id: "PROJ-004".to_string(),
            name: "User Interface Testing".to_string(),
            description: "Conduct usability tests on the new radiologist interface.".to_string(),
            tasks_completed: 30,
            total_tasks: 40,
            status: ProjectStatus::OnTrack,
            due_date: date(2024, 12, 31),
        },
    ]
}

fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "TASK-001".to_string(),
            project_id: "PROJ-001".to_string(),
            title: "Annotate Medical Images".to_string(),
            status: TaskStatus::Active,
            coverage_pct: 75,
            accuracy_pct: 92,
            last_edit: date(2024, 11, 9),
            category: Category::ImageSegmentation,
            assignee_ids: vec![1, 2, 3],
        },
        Task {
            id: "TASK-002".to_string(),
            project_id: "PROJ-001".to_string(),
            title: "Sentence equivalence questions".to_string(),
            status: TaskStatus::Pending,
            coverage_pct: 50,
            accuracy_pct: 88,
            last_edit: date(2024, 11, 5),
            category: Category::TextClassification,
            assignee_ids: vec![1, 2, 3, 4],
        },
        Task {
            id: "TASK-003".to_string(),
            project_id: "PROJ-002".to_string(),
            title: "Reading comprehension questions".to_string(),
            status: TaskStatus::Completed,
            coverage_pct: 100,
            accuracy_pct: 95,
            last_edit: date(2024, 10, 28),
            category: Category::TextClassification,
            assignee_ids: vec![2],
        },
        Task {
            id: "TASK-004".to_string(),
            project_id: "PROJ-002".to_string(),
            title: "Tag clinical entities in radiology reports".to_string(),
            status: TaskStatus::Active,
            coverage_pct: 40,
            accuracy_pct: 90,
            last_edit: date(2024, 11, 8),
            category: Category::NamedEntityRecognition,
            assignee_ids: vec![3, 4],
        },
    ]
}

fn demo_experts() -> Vec<Expert> {
    vec![
        Expert {
            id: 1,
            name: "Dr. Jane Smith".to_string(),
            role: "Radiologist".to_string(),
            progress_pct: 75,
            doc_version: "1.2".to_string(),
            status: ExpertStatus::InProgress,
            latest_edit: Some(ts(2024, 11, 9, 14, 30)),
        },
        Expert {
            id: 2,
            name: "Dr. John Doe".to_string(),
            role: "Neurologist".to_string(),
            progress_pct: 100,
            doc_version: "1.2".to_string(),
            status: ExpertStatus::Completed,
            latest_edit: Some(ts(2024, 11, 8, 16, 45)),
        },
        Expert {
            id: 3,
            name: "Dr. Emily Brown".to_string(),
            role: "Oncologist".to_string(),
            progress_pct: 30,
            doc_version: "1.1".to_string(),
            status: ExpertStatus::InProgress,
            latest_edit: Some(ts(2024, 11, 9, 10, 15)),
        },
        Expert {
            id: 4,
            name: "Dr. Michael Lee".to_string(),
            role: "Radiologist".to_string(),
            progress_pct: 0,
            doc_version: "1.2".to_string(),
            status: ExpertStatus::NotStarted,
            latest_edit: None,
        },
    ]
}

fn demo_annotations() -> Vec<Annotation> {
    vec![
        Annotation {
            id: 1,
            image: "scans/mri-brain-0001.png".to_string(),
            input: "Patient presents with recurring headaches in the frontal lobe region."
                .to_string(),
            model_response:
                "Potential abnormality detected in the frontal lobe. Further investigation recommended."
                    .to_string(),
            eval_response:
                "Clear indication of small mass in the right frontal lobe. Requires immediate follow-up."
                    .to_string(),
            grade: 4,
            consensus: "Abnormality present, requires urgent attention".to_string(),
            cumulative_feedback:
                "Model shows promise but needs improvement in specificity and urgency assessment"
                    .to_string(),
            feedback: vec![
                ExpertFeedback {
                    expert_id: 2,
                    note: "Accurate detection, missed urgency".to_string(),
                    vote: Vote::Positive,
                },
                ExpertFeedback {
                    expert_id: 1,
                    note: "Correct identification, lacks specificity".to_string(),
                    vote: Vote::Neutral,
                },
                ExpertFeedback {
                    expert_id: 3,
                    note: "Good initial assessment".to_string(),
                    vote: Vote::Positive,
                },
            ],
            comments: vec![Comment {
                id: 1,
                author: "Dr. John Doe".to_string(),
                role: "Neurologist".to_string(),
                text: "Good catch on the abnormality, but location specificity needs improvement."
                    .to_string(),
                posted_at: ts(2024, 11, 9, 15, 0),
            }],
        },
        Annotation {
            id: 2,
            image: "scans/mri-brain-0002.png".to_string(),
            input: "Sudden-onset left-sided weakness, symptoms began four hours ago.".to_string(),
            model_response:
                "Diffusion restriction in the right MCA territory consistent with acute ischemic stroke."
                    .to_string(),
            eval_response: "Acute infarct in the right MCA territory. Thrombectomy candidate."
                .to_string(),
            grade: 5,
            consensus: "Findings confirmed by all reviewers".to_string(),
            cumulative_feedback: "Excellent localization and urgency call".to_string(),
            feedback: vec![
                ExpertFeedback {
                    expert_id: 2,
                    note: "Textbook presentation, correctly flagged".to_string(),
                    vote: Vote::Positive,
                },
                ExpertFeedback {
                    expert_id: 1,
                    note: "Agree with territory and acuity".to_string(),
                    vote: Vote::Positive,
                },
            ],
            comments: Vec::new(),
        },
        Annotation {
            id: 3,
            image: "scans/xray-chest-0117.png".to_string(),
            input: "Routine screening, 54-year-old smoker.".to_string(),
            model_response: "No acute cardiopulmonary abnormality.".to_string(),
            eval_response: "8mm nodule in the left upper lobe, overlooked by the model.".to_string(),
            grade: 2,
            consensus: "Model missed a clinically relevant finding".to_string(),
            cumulative_feedback: "False negative on a small nodule; sensitivity needs work"
                .to_string(),
            feedback: vec![
                ExpertFeedback {
                    expert_id: 1,
                    note: "Missed the nodule entirely".to_string(),
                    vote: Vote::Negative,
                },
                ExpertFeedback {
                    expert_id: 3,
                    note: "Nodule is subtle but visible".to_string(),
                    vote: Vote::Negative,
                },
                ExpertFeedback {
                    expert_id: 4,
                    note: "Borderline call at this size".to_string(),
                    vote: Vote::Neutral,
                },
            ],
            comments: vec![Comment {
                id: 1,
                author: "Dr. Jane Smith".to_string(),
                role: "Radiologist".to_string(),
                text: "Flagging for the next training batch.".to_string(),
                posted_at: ts(2024, 11, 8, 9, 20),
            }],
        },
        Annotation {
            id: 4,
            image: "scans/mri-knee-0045.png".to_string(),
            input: "Knee pain after twisting injury during sports.".to_string(),
            model_response: "Tear of the medial meniscus posterior horn.".to_string(),
            eval_response: "Confirmed medial meniscus tear, grade III signal.".to_string(),
            grade: 5,
            consensus: "Correct and complete".to_string(),
            cumulative_feedback: "Reliable on musculoskeletal cases".to_string(),
            feedback: vec![ExpertFeedback {
                expert_id: 4,
                note: "Matches arthroscopy report".to_string(),
                vote: Vote::Positive,
            }],
            comments: Vec::new(),
        },
        Annotation {
            id: 5,
            image: "scans/mri-pituitary-0009.png".to_string(),
            input: "Galactorrhea with elevated prolactin.".to_string(),
            model_response: "Pituitary microadenoma, 6mm, left of midline.".to_string(),
            eval_response: "Microadenoma confirmed; recommend endocrine correlation.".to_string(),
            grade: 4,
            consensus: "Agreed with minor wording differences".to_string(),
            cumulative_feedback: "Good detection, phrasing of recommendations inconsistent"
                .to_string(),
            feedback: vec![
                ExpertFeedback {
                    expert_id: 2,
                    note: "Correct finding, verbose report".to_string(),
                    vote: Vote::Positive,
                },
                ExpertFeedback {
                    expert_id: 3,
                    note: "Would add dynamic contrast series".to_string(),
                    vote: Vote::Neutral,
                },
            ],
            comments: Vec::new(),
        },
        Annotation {
            id: 6,
            image: "scans/ct-abdomen-0230.png".to_string(),
            input: "Right lower quadrant pain, fever, elevated white count.".to_string(),
            model_response: "Dilated appendix with periappendiceal fat stranding.".to_string(),
            eval_response: "Acute appendicitis, no perforation.".to_string(),
            grade: 3,
            consensus: "Finding right, differential too narrow".to_string(),
            cumulative_feedback: "Should mention perforation status explicitly".to_string(),
            feedback: vec![ExpertFeedback {
                expert_id: 1,
                note: "Missing perforation assessment".to_string(),
                vote: Vote::Neutral,
            }],
            comments: Vec::new(),
        },
    ]
}

fn demo_runs() -> Vec<EvalRun> {
    vec![
        EvalRun {
            id: 1,
            name: "Run 1".to_string(),
            date: date(2024, 11, 2),
            status: RunStatus::Completed {
                accuracy: 0.86,
                completeness: 0.88,
                insights: "Improved accuracy on edge cases".to_string(),
            },
            data_version: "1.0".to_string(),
        },
        EvalRun {
            id: 2,
            name: "Run 2".to_string(),
            date: date(2024, 11, 7),
            status: RunStatus::InProgress { progress_pct: 65 },
            data_version: "1.1".to_string(),
        },
        EvalRun {
            id: 3,
            name: "Run 3".to_string(),
            date: date(2024, 11, 12),
            status: RunStatus::Failed {
                error: "API Timeout".to_string(),
            },
            data_version: "1.2".to_string(),
        },
        EvalRun {
            id: 4,
            name: "Run 4".to_string(),
            date: date(2024, 11, 17),
            status: RunStatus::Completed {
                accuracy: 0.90,
                completeness: 0.92,
                insights: "Significant improvement in overall performance".to_string(),
            },
            data_version: "1.3".to_string(),
        },
    ]
}

fn demo_versions() -> Vec<DatasetVersion> {
    vec![
        DatasetVersion {
            id: 1,
            version: "1.0".to_string(),
            created_at: date(2024, 11, 1),
            author: "John Doe".to_string(),
            accuracy: 0.85,
            precision: 0.86,
            human_rating: 0.84,
            ai_rating: 0.85,
        },
        DatasetVersion {
            id: 2,
            version: "1.1".to_string(),
            created_at: date(2024, 11, 5),
            author: "Jane Smith".to_string(),
            accuracy: 0.87,
            precision: 0.88,
            human_rating: 0.86,
            ai_rating: 0.87,
        },
        DatasetVersion {
            id: 3,
            version: "1.2".to_string(),
            created_at: date(2024, 11, 10),
            author: "Alice Johnson".to_string(),
            accuracy: 0.89,
            precision: 0.90,
            human_rating: 0.88,
            ai_rating: 0.89,
        },
        DatasetVersion {
            id: 4,
            version: "1.3".to_string(),
            created_at: date(2024, 11, 15),
            author: "Bob Wilson".to_string(),
            accuracy: 0.91,
            precision: 0.92,
            human_rating: 0.90,
            ai_rating: 0.91,
        },
    ]
}

fn demo_queue() -> Vec<QueueItem> {
    vec![
        QueueItem {
            id: "t1".to_string(),
            title: "Review MRI scan #1234".to_string(),
            project_id: "PROJ-001".to_string(),
            project_name: "AI Model Evaluation".to_string(),
            category: Category::ImageSegmentation,
            assigned_at: ts(2024, 11, 9, 5, 58),
        },
        QueueItem {
            id: "t2".to_string(),
            title: "Annotate chest X-ray batch #5678".to_string(),
            project_id: "PROJ-002".to_string(),
            project_name: "Data Annotation".to_string(),
            category: Category::ImageSegmentation,
            assigned_at: ts(2024, 11, 9, 6, 58),
        },
        QueueItem {
            id: "t3".to_string(),
            title: "Classify triage notes batch #91".to_string(),
            project_id: "PROJ-003".to_string(),
            project_name: "Algorithm Optimization".to_string(),
            category: Category::TextClassification,
            assigned_at: ts(2024, 11, 9, 7, 58),
        },
    ]
}

fn demo_insights() -> Vec<Insight> {
    vec![
        Insight {
            expert_id: 3,
            kind: InsightKind::Alert,
            message: "Dr. Emily Brown is behind schedule (30% complete).".to_string(),
        },
        Insight {
            expert_id: 4,
            kind: InsightKind::Alert,
            message: "Dr. Michael Lee has not started the task.".to_string(),
        },
        Insight {
            expert_id: 2,
            kind: InsightKind::Progress,
            message: "Dr. John Doe has completed all annotations.".to_string(),
        },
        Insight {
            expert_id: 1,
            kind: InsightKind::Progress,
            message: "Dr. Jane Smith: Average time per annotation: 3.5 minutes.".to_string(),
        },
        Insight {
            expert_id: 1,
            kind: InsightKind::Quality,
            message: "Dr. Jane Smith: High disagreement rate (15%) on tumor classification."
                .to_string(),
        },
        Insight {
            expert_id: 2,
            kind: InsightKind::Quality,
            message: "Dr. John Doe: Inter-annotator agreement at 85% for critical structures."
                .to_string(),
        },
        Insight {
            expert_id: 1,
            kind: InsightKind::Trend,
            message: "Dr. Jane Smith: Annotation speed improving by 5% week-over-week.".to_string(),
        },
        Insight {
            expert_id: 3,
            kind: InsightKind::Trend,
            message: "Dr. Emily Brown: Slight decrease in overall annotation quality (-2%)."
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{self, Record};
    use std::collections::HashSet;

    #[test]
    fn demo_workspace_is_populated() {
        let ws = Workspace::demo();
        assert_eq!(ws.projects.len(), 4);
        assert_eq!(ws.experts.len(), 4);
        assert!(ws.tasks.len() >= 3);
        assert!(ws.annotations.len() >= 5);
        assert_eq!(ws.runs.len(), 4);
        assert_eq!(ws.versions.len(), 4);
        assert_eq!(ws.queue.len(), 3);
    }

    #[test]
    fn demo_ids_are_unique() {
        let ws = Workspace::demo();
        let ann: HashSet<u32> = ws.annotations.iter().map(|a| a.id).collect();
        assert_eq!(ann.len(), ws.annotations.len());
        let prj: HashSet<String> = ws.projects.iter().map(|p| p.id()).collect();
        assert_eq!(prj.len(), ws.projects.len());
    }

    #[test]
    fn stroke_search_scenario() {
        let ws = Workspace::demo();
        let rows = table::filter(&ws.annotations, "stroke");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].model_response.contains("stroke"));
    }

    #[test]
    fn every_feedback_references_a_known_expert() {
        let ws = Workspace::demo();
        let ids: HashSet<u32> = ws.experts.iter().map(|e| e.id).collect();
        for annotation in &ws.annotations {
            for fb in &annotation.feedback {
                assert!(ids.contains(&fb.expert_id));
            }
        }
        for insight in &ws.insights {
            assert!(ids.contains(&insight.expert_id));
        }
    }

    #[test]
    fn add_comment_targets_the_right_annotation() {
        let mut ws = Workspace::demo();
        let before = ws.annotations[0].comments.len();
        let ok = ws.add_comment(
            ws.annotations[0].id,
            Comment {
                id: 99,
                author: "Current User".to_string(),
                role: "QA Engineer".to_string(),
                text: "check".to_string(),
                posted_at: ts(2024, 11, 10, 0, 0),
            },
        );
        assert!(ok);
        assert_eq!(ws.annotations[0].comments.len(), before + 1);
        assert!(!ws.add_comment(9999, ws.annotations[0].comments[0].clone()));
    }
}
