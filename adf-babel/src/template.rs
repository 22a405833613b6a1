//! Ticket template parsing
//!
//! Tickets are drafted as Markdown files with a small metadata preamble:
//!
//! ```text
//! ## Remove the legacy rate limiter
//!
//! ### Project Information
//! **Project:** TALK
//! **Priority:** High
//! **Labels:** cleanup, tech-debt
//!
//! ## Description
//! ...
//! ## References and Notes
//! ...
//! ## Acceptance Criteria
//! ...
//! ```
//!
//! [`parse_template`] pulls out the title and metadata fields and collects the
//! lines of the three content sections verbatim, ready to be joined by
//! [`TicketTemplate::full_description`] and converted. Parsing is total:
//! missing fields keep their defaults and unknown sections are dropped.
//!
//! Metadata values that are still template placeholders (`PROJECT_KEY`,
//! `High | Medium | Low`, `label1, label2`, ...) are ignored.

use crate::ir::nodes::Document;
use serde::Serialize;

/// Values used when the template does not set them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefaults {
    pub project_key: String,
    pub priority: String,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        TemplateDefaults {
            project_key: "EM".to_string(),
            priority: "Medium".to_string(),
        }
    }
}

/// Everything extracted from a ticket template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketTemplate {
    pub title: String,
    pub project_key: String,
    pub priority: String,
    pub labels: Vec<String>,
    pub components: Vec<String>,
    pub assignee: Option<String>,
    pub parent_issue: Option<String>,
    pub description_section: Vec<String>,
    pub references_section: Vec<String>,
    pub acceptance_criteria_section: Vec<String>,
}

impl TicketTemplate {
    fn new(defaults: &TemplateDefaults) -> Self {
        TicketTemplate {
            title: String::new(),
            project_key: defaults.project_key.clone(),
            priority: defaults.priority.clone(),
            labels: Vec::new(),
            components: Vec::new(),
            assignee: None,
            parent_issue: None,
            description_section: Vec::new(),
            references_section: Vec::new(),
            acceptance_criteria_section: Vec::new(),
        }
    }

    /// Joins the non-empty sections into one Markdown body.
    ///
    /// The description goes first without a heading; references and
    /// acceptance criteria get their `##` headings back.
    pub fn full_description(&self) -> String {
        let mut sections = Vec::new();
        if !self.description_section.is_empty() {
            sections.push(self.description_section.join("\n"));
        }
        if !self.references_section.is_empty() {
            sections.push(format!(
                "## References and Notes\n\n{}",
                self.references_section.join("\n")
            ));
        }
        if !self.acceptance_criteria_section.is_empty() {
            sections.push(format!(
                "## Acceptance Criteria\n\n{}",
                self.acceptance_criteria_section.join("\n")
            ));
        }
        sections.join("\n\n")
    }

    /// The full description converted to a document.
    pub fn description_document(&self) -> Document {
        crate::convert(&self.full_description())
    }

    fn section_mut(&mut self, section: Section) -> Option<&mut Vec<String>> {
        match section {
            Section::Description => Some(&mut self.description_section),
            Section::References => Some(&mut self.references_section),
            Section::AcceptanceCriteria => Some(&mut self.acceptance_criteria_section),
            Section::None | Section::ProjectInformation | Section::Other => None,
        }
    }
}

/// The section the parser is currently in, named by its last heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    ProjectInformation,
    Description,
    References,
    AcceptanceCriteria,
    Other,
}

impl Section {
    fn from_heading(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "project information" => Section::ProjectInformation,
            "description" => Section::Description,
            "references and notes" => Section::References,
            "acceptance criteria" => Section::AcceptanceCriteria,
            _ => Section::Other,
        }
    }
}

/// Parses a ticket template.
pub fn parse_template(content: &str, defaults: &TemplateDefaults) -> TicketTemplate {
    let mut ticket = TicketTemplate::new(defaults);
    let mut section = Section::None;
    let mut in_preamble = true;

    for raw in content.trim_end_matches('\n').split('\n') {
        let line = raw.trim();

        if ticket.title.is_empty() && (line.starts_with("# ") || line.starts_with("## ")) {
            ticket.title = line.trim_start_matches('#').trim().to_string();
            continue;
        }

        if in_preamble || section == Section::ProjectInformation {
            if apply_metadata(&mut ticket, line) {
                continue;
            }
            if let Some(name) = line.strip_prefix("## ") {
                in_preamble = false;
                section = Section::from_heading(name);
            } else if let Some(name) = line.strip_prefix("### ") {
                section = Section::from_heading(name);
            }
        } else if let Some(name) = line.strip_prefix("## ") {
            section = Section::from_heading(name);
        } else if let Some(lines) = ticket.section_mut(section) {
            lines.push(raw.to_string());
        }
    }

    ticket
}

/// Reads a `**Field:** value` line into `ticket`. Returns false when the line
/// is not a metadata field.
fn apply_metadata(ticket: &mut TicketTemplate, line: &str) -> bool {
    const FIELDS: [&str; 6] = [
        "**Project:**",
        "**Priority:**",
        "**Labels:**",
        "**Components:**",
        "**Assignee:**",
        "**Parent:**",
    ];
    let Some(field) = FIELDS.iter().find(|field| line.starts_with(*field)) else {
        return false;
    };
    let value = metadata_value(line);

    match *field {
        "**Project:**" => {
            if let Some(value) = value.filter(|v| !v.contains("PROJECT_KEY")) {
                ticket.project_key = value;
            }
        }
        "**Priority:**" => {
            if let Some(value) = value.filter(|v| !v.contains('|')) {
                ticket.priority = value;
            }
        }
        "**Labels:**" => {
            if let Some(value) = value.filter(|v| !v.contains("label1")) {
                ticket.labels = split_list(&value);
            }
        }
        "**Components:**" => {
            if let Some(value) = value.filter(|v| !v.contains("component1")) {
                ticket.components = split_list(&value);
            }
        }
        "**Assignee:**" => {
            ticket.assignee = value.filter(|v| {
                !v.contains("user@example.com") && !v.contains("ENV[") && !v.contains("Unassigned")
            });
        }
        _ => {
            if let Some(value) = value.filter(|v| !v.contains("PARENT-KEY")) {
                ticket.parent_issue = Some(value);
            }
        }
    }
    true
}

/// The text after the first `:`, trimmed, with stray `**` removed from both ends.
fn metadata_value(line: &str) -> Option<String> {
    let (_, rest) = line.split_once(':')?;
    let value = rest.trim();
    let value = value.strip_prefix("**").map_or(value, str::trim_start);
    let value = value.strip_suffix("**").map_or(value, str::trim_end);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
