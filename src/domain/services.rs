//! Note rendering and quality checks.
//!
//! The formatter is a pure view over a template schema and an answer
//! record. It never mutates the record, and the same inputs always give the
//! same text.

use super::models::{
    AnswerRecord, CheckRule, FieldDef, FieldKind, LineRule, QualityCheck, Section, Template,
};

/// Renders DAP notes and evaluates quality checks for one template.
///
/// Line order, labels, and dependent-line conditions all come from the
/// template's [`LineRule`]s, so every template goes through the same code.
///
/// # Examples
///
/// ```
/// use dapnote::domain::{templates, AnswerRecord, NoteFormatter, TemplateId};
///
/// let mut record = AnswerRecord::default();
/// record.set_text("serviceType", "Transport to shelter");
///
/// let formatter = NoteFormatter::new(templates::template(TemplateId::Transportation), &record);
/// let note = formatter.render();
/// assert!(note.starts_with("DATA:\nService Type: Transport to shelter\n\nASSESSMENT:"));
/// assert!(!formatter.can_copy());
/// ```
pub struct NoteFormatter<'a> {
    template: &'a Template,
    record: &'a AnswerRecord,
}

impl<'a> NoteFormatter<'a> {
    pub fn new(template: &'a Template, record: &'a AnswerRecord) -> Self {
        Self { template, record }
    }

    /// Produces the full note: `DATA:`, `ASSESSMENT:` and `PLAN:` sections
    /// separated by one blank line, with no trailing newline.
    pub fn render(&self) -> String {
        Section::ALL
            .iter()
            .map(|section| {
                let mut block = vec![section.header().to_string()];
                block.extend(self.section_lines(*section));
                block.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Lines for one section in declared order, headers excluded.
    pub fn section_lines(&self, section: Section) -> Vec<String> {
        self.template
            .lines
            .iter()
            .filter(|rule| rule.section == section)
            .filter_map(|rule| self.line(rule))
            .collect()
    }

    fn line(&self, rule: &LineRule) -> Option<String> {
        if let Some(condition) = rule.when {
            if !condition.holds(self.record) {
                return None;
            }
        }
        let field = self.template.field(rule.field)?;
        let value = self.display_value(field)?;
        Some(format!("{}: {}", rule.label, value))
    }

    /// The text a field contributes to the note, or `None` when it is empty.
    ///
    /// Single-select fields append ` - {other}` when the sentinel option is
    /// chosen and its companion text is filled. Multi-select fields join the
    /// labels of checked choices with `, ` in schema order, substituting the
    /// companion text for the `other` choice when present.
    pub fn display_value(&self, field: &FieldDef) -> Option<String> {
        match field.kind {
            FieldKind::Text => self.filled_text(field.name).map(str::to_string),
            FieldKind::Select { other, .. } => {
                let value = self.filled_text(field.name)?;
                let suffix = other
                    .filter(|link| link.sentinel == value)
                    .and_then(|link| self.filled_text(link.field));
                Some(match suffix {
                    Some(other_text) => format!("{value} - {other_text}"),
                    None => value.to_string(),
                })
            }
            FieldKind::Multi { choices, other } => {
                let labels: Vec<&str> = choices
                    .iter()
                    .filter(|choice| self.record.is_checked(field.name, choice.id))
                    .map(|choice| {
                        other
                            .filter(|link| link.sentinel == choice.id)
                            .and_then(|link| self.filled_text(link.field))
                            .unwrap_or(choice.label)
                    })
                    .collect();
                if labels.is_empty() {
                    None
                } else {
                    Some(labels.join(", "))
                }
            }
        }
    }

    fn filled_text(&self, name: &str) -> Option<&'a str> {
        let value = self.record.text(name).trim();
        if value.is_empty() { None } else { Some(value) }
    }

    /// Required fields that are still empty, in schema order.
    pub fn missing_required(&self) -> Vec<&'a FieldDef> {
        self.template
            .fields
            .iter()
            .filter(|field| field.required && !self.record.is_filled(field.name))
            .collect()
    }

    pub fn quality_checks(&self) -> Vec<QualityCheck> {
        self.template
            .checks
            .iter()
            .map(|rule| QualityCheck {
                description: rule.description(),
                passed: self.evaluate(rule),
            })
            .collect()
    }

    fn evaluate(&self, rule: &CheckRule) -> bool {
        match *rule {
            CheckRule::AllRequired => self
                .template
                .required_fields()
                .all(|field| self.record.is_filled(field.name)),
            CheckRule::Present { field, .. } => self.record.is_filled(field),
            CheckRule::DetailIf { when, detail, .. } => {
                !when.holds(self.record) || self.record.is_filled(detail)
            }
        }
    }

    /// Whether every quality check passes; gates the copy action.
    pub fn can_copy(&self) -> bool {
        self.template.checks.iter().all(|rule| self.evaluate(rule))
    }
}
