//! Link reference and footnote definitions collected during the block pass.
//!
//! Reference definitions have the form:
//! ```markdown
//! [label]: url "optional title"
//! [label]: <url> 'optional title'
//! [label]: url (optional title)
//! ```
//!
//! Footnote definitions have the form:
//! ```markdown
//! [^id]: Footnote content here.
//!     Can continue on multiple lines
//!     as long as they're indented.
//! ```

use std::collections::HashMap;

/// A reference definition that maps a label to a URL and optional title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    pub label: String,
    pub url: String,
    pub title: Option<String>,
}

/// A footnote definition that maps an ID to its raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteDefinition {
    pub id: String,
    pub content: String,
    /// The definition continued over indented lines and should be parsed as
    /// block content.
    pub has_block: bool,
}

/// Registry that stores all reference definitions and footnotes in a document.
/// Labels are stored in normalized (lowercase) form for case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceRegistry {
    definitions: HashMap<String, ReferenceDefinition>,
    footnotes: HashMap<String, FootnoteDefinition>,
}

fn normalize_label(label: &str) -> String {
    label.to_lowercase()
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference definition. A later definition of the same label wins.
    pub fn add(&mut self, label: String, url: String, title: Option<String>) {
        let normalized_label = normalize_label(&label);
        self.definitions
            .insert(normalized_label, ReferenceDefinition { label, url, title });
    }

    /// Look up a reference definition by label (case-insensitive).
    pub fn get(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.definitions.get(&normalize_label(label))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.definitions.contains_key(&normalize_label(label))
    }

    pub fn add_footnote(&mut self, id: String, content: String, has_block: bool) {
        let normalized_id = normalize_label(&id);
        self.footnotes.insert(
            normalized_id,
            FootnoteDefinition {
                id,
                content,
                has_block,
            },
        );
    }

    /// Look up a footnote definition by ID (case-insensitive).
    pub fn get_footnote(&self, id: &str) -> Option<&FootnoteDefinition> {
        self.footnotes.get(&normalize_label(id))
    }

    pub fn contains_footnote(&self, id: &str) -> bool {
        self.footnotes.contains_key(&normalize_label(id))
    }

    pub fn len(&self) -> usize {
        self.definitions.len() + self.footnotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.footnotes.is_empty()
    }
}
