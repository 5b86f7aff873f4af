//! Markdown instruction generator for labeling tasks.
//!
//! Taskers see a generated instruction document per task: a category-specific
//! task description, the interface elements they will use, any extra form
//! components the coordinator added, and free-form notes. The document is
//! plain markdown rendered by [`InstructionDoc::render`].

use serde::{Deserialize, Serialize};

/// Labeling category of a task.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    TextClassification,
    ImageSegmentation,
    NamedEntityRecognition,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::TextClassification,
            Category::ImageSegmentation,
            Category::NamedEntityRecognition,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::TextClassification => "Text Classification",
            Category::ImageSegmentation => "Image Segmentation",
            Category::NamedEntityRecognition => "Named Entity Recognition",
        }
    }
}

/// Kind of an extra form component added to the instruction page.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    TextInput,
    Label,
    Checkbox,
    TextArea,
}

impl ComponentKind {
    pub fn title(&self) -> &'static str {
        match self {
            ComponentKind::TextInput => "Text Input",
            ComponentKind::Label => "Label",
            ComponentKind::Checkbox => "Checkbox",
            ComponentKind::TextArea => "Text Area",
        }
    }
}

/// An extra form component with its prompt text.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct InstructionComponent {
    pub kind: ComponentKind,
    pub content: String,
}

/// A labeling instruction document.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct InstructionDoc {
    pub name: String,
    pub category: Category,
    pub labels: Vec<String>,
    pub components: Vec<InstructionComponent>,
    /// Free-form markdown appended under "## Instructions".
    pub notes: String,
}

impl InstructionDoc {
    /// New document with the default label set.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            labels: vec![
                "Positive".to_string(),
                "Negative".to_string(),
                "Neutral".to_string(),
            ],
            components: Vec::new(),
            notes: String::new(),
        }
    }

    /// Adds a label; blank input is trimmed and skipped.
    pub fn add_label(&mut self, label: &str) {
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            self.labels.push(trimmed.to_string());
        }
    }

    /// Removes the label at `index` if it exists.
    pub fn remove_label(&mut self, index: usize) {
        if index < self.labels.len() {
            self.labels.remove(index);
        }
    }

    pub fn add_component(&mut self, kind: ComponentKind, content: impl Into<String>) {
        self.components.push(InstructionComponent {
            kind,
            content: content.into(),
        });
    }

    pub fn update_component(&mut self, index: usize, content: impl Into<String>) {
        if let Some(component) = self.components.get_mut(index) {
            component.content = content.into();
        }
    }

    pub fn remove_component(&mut self, index: usize) {
        if index < self.components.len() {
            self.components.remove(index);
        }
    }

    /// Renders the full markdown document.
    pub fn render(&self) -> String {
        let mut out = format!("# {} Instructions\n\n", self.category.title());
        let labels = self.labels.join(", ");

        match self.category {
            Category::TextClassification => {
                out.push_str(&format!(
                    "## Task Description\n\nClassify the given text into one of the following categories: {labels}.\n\n"
                ));
                out.push_str("## Interface Elements\n\n");
                out.push_str("1. Text Input: Enter the text to be classified\n");
                out.push_str(&format!("2. Classification Buttons: {labels}\n\n"));
            }
            Category::ImageSegmentation => {
                out.push_str(
                    "## Task Description\n\nSegment the given image by identifying and labeling specific regions.\n\n",
                );
                out.push_str("## Interface Elements\n\n");
                out.push_str("1. Image Display: The image to be segmented\n");
                out.push_str("2. Segmentation Tools: Use these to mark regions in the image\n");
                out.push_str(&format!("3. Label Buttons: {labels}\n\n"));
            }
            Category::NamedEntityRecognition => {
                out.push_str(
                    "## Task Description\n\nIdentify and label named entities in the given text.\n\n",
                );
                out.push_str("## Interface Elements\n\n");
                out.push_str("1. Text Input: Enter the text for named entity recognition\n");
                out.push_str("2. Entity Type Buttons: Person, Organization, Location\n\n");
            }
        }

        out.push_str("## Additional Components\n\n");
        for (i, component) in self.components.iter().enumerate() {
            out.push_str(&format!(
                "{}. {}: {}\n",
                i + 1,
                component.kind.title(),
                component.content
            ));
        }

        out.push_str(&format!("\n## Instructions\n\n{}", self.notes));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_doc_interpolates_labels() {
        let mut doc = InstructionDoc::new("sentiment", Category::TextClassification);
        doc.notes = "Be consistent.".to_string();
        let md = doc.render();
        assert!(md.starts_with("# Text Classification Instructions\n\n"));
        assert!(md.contains("categories: Positive, Negative, Neutral."));
        assert!(md.contains("2. Classification Buttons: Positive, Negative, Neutral\n"));
        assert!(md.ends_with("## Instructions\n\nBe consistent."));
    }

    #[test]
    fn segmentation_doc_lists_tools() {
        let mut doc = InstructionDoc::new("regions", Category::ImageSegmentation);
        doc.labels = vec!["Tumor".to_string(), "Healthy".to_string()];
        let md = doc.render();
        assert!(md.contains("Segment the given image"));
        assert!(md.contains("3. Label Buttons: Tumor, Healthy\n"));
    }

    #[test]
    fn ner_doc_has_fixed_entity_buttons() {
        let doc = InstructionDoc::new("entities", Category::NamedEntityRecognition);
        let md = doc.render();
        assert!(md.contains("2. Entity Type Buttons: Person, Organization, Location\n"));
    }

    #[test]
    fn components_are_numbered_in_order() {
        let mut doc = InstructionDoc::new("x", Category::TextClassification);
        doc.add_component(ComponentKind::Checkbox, "Uncertain case");
        doc.add_component(ComponentKind::TextArea, "Rationale");
        let md = doc.render();
        assert!(md.contains("1. Checkbox: Uncertain case\n2. Text Area: Rationale\n"));
    }

    #[test]
    fn blank_labels_are_skipped() {
        let mut doc = InstructionDoc::new("x", Category::TextClassification);
        let before = doc.labels.len();
        doc.add_label("   ");
        assert_eq!(doc.labels.len(), before);
        doc.add_label("  Unsure ");
        assert_eq!(doc.labels.last().map(String::as_str), Some("Unsure"));
    }

    #[test]
    fn every_category_renders_a_task_description() {
        for category in Category::all() {
            let md = InstructionDoc::new("doc", *category).render();
            assert!(md.contains("## Task Description"));
            assert!(md.contains("## Interface Elements"));
        }
    }

    #[test]
    fn component_edits() {
        let mut doc = InstructionDoc::new("x", Category::TextClassification);
        doc.add_component(ComponentKind::TextInput, "a");
        doc.update_component(0, "b");
        assert_eq!(doc.components[0].content, "b");
        doc.remove_component(0);
        assert!(doc.components.is_empty());
        // Out-of-range edits are no-ops.
        doc.update_component(5, "c");
        doc.remove_component(5);
    }
}
