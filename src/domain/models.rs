use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

/// Identifier of one of the built-in note templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Transportation,
    WellBeing,
    Crisis,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::Transportation,
        TemplateId::WellBeing,
        TemplateId::Crisis,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Transportation => "transportation",
            TemplateId::WellBeing => "wellbeing",
            TemplateId::Crisis => "crisis",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DomainError::UnknownTemplate(s.to_string()))
    }
}

/// The three fixed sections of a DAP note, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Data,
    Assessment,
    Plan,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Data, Section::Assessment, Section::Plan];

    pub fn header(self) -> &'static str {
        match self {
            Section::Data => "DATA:",
            Section::Assessment => "ASSESSMENT:",
            Section::Plan => "PLAN:",
        }
    }
}

/// One entry of a multi-select field: identifier plus the text used in notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub id: &'static str,
    pub label: &'static str,
}

/// Links a sentinel option (or the `other` choice) to the text field
/// holding the user's own wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherLink {
    pub sentinel: &'static str,
    pub field: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select {
        options: &'static [&'static str],
        other: Option<OtherLink>,
    },
    Multi {
        choices: &'static [Choice],
        other: Option<OtherLink>,
    },
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "free text",
            FieldKind::Select { .. } => "a single option",
            FieldKind::Multi { .. } => "a set of choices",
        }
    }
}

/// A named slot in the answer record, shown on one wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub prompt: &'static str,
    pub step: usize,
    pub kind: FieldKind,
    pub required: bool,
}

/// Predicate over the answer record used by dependent lines and checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The field is filled and holds something other than `value`.
    Differs {
        field: &'static str,
        value: &'static str,
    },
    Equals {
        field: &'static str,
        value: &'static str,
    },
    /// The named choice of a multi-select field is checked.
    Checked {
        field: &'static str,
        choice: &'static str,
    },
}

impl Condition {
    pub fn holds(&self, record: &AnswerRecord) -> bool {
        match *self {
            Condition::Differs { field, value } => {
                record.is_filled(field) && record.text(field).trim() != value
            }
            Condition::Equals { field, value } => record.text(field).trim() == value,
            Condition::Checked { field, choice } => record.is_checked(field, choice),
        }
    }
}

/// Declares that `field` renders as `label: value` inside `section`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRule {
    pub section: Section,
    pub label: &'static str,
    pub field: &'static str,
    pub when: Option<Condition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckRule {
    AllRequired,
    Present {
        description: &'static str,
        field: &'static str,
    },
    /// Vacuously passes unless `when` holds; then `detail` must be filled.
    DetailIf {
        description: &'static str,
        when: Condition,
        detail: &'static str,
    },
}

impl CheckRule {
    pub fn description(&self) -> &'static str {
        match self {
            CheckRule::AllRequired => "All required fields completed",
            CheckRule::Present { description, .. } => *description,
            CheckRule::DetailIf { description, .. } => *description,
        }
    }
}

/// Static schema of a note template.
#[derive(Debug)]
pub struct Template {
    pub id: TemplateId,
    pub title: &'static str,
    pub description: &'static str,
    pub total_steps: usize,
    pub fields: &'static [FieldDef],
    pub lines: &'static [LineRule],
    pub checks: &'static [CheckRule],
}

impl Template {
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Looks up a field, failing with [`DomainError::UnknownField`].
    pub fn require_field(&self, name: &str) -> DomainResult<&'static FieldDef> {
        self.field(name).ok_or_else(|| DomainError::UnknownField {
            template: self.id.to_string(),
            field: name.to_string(),
        })
    }

    pub fn fields_for_step(&self, step: usize) -> impl Iterator<Item = &'static FieldDef> + '_ {
        self.fields.iter().filter(move |field| field.step == step)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldDef> + '_ {
        self.fields.iter().filter(|field| field.required)
    }
}

/// Value stored for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Choices(BTreeMap<String, bool>),
}

/// In-memory answers for one wizard session.
///
/// Absent fields read as their kind's default: `""` for text and
/// single-select fields, all-unchecked for multi-select fields.
///
/// # Examples
///
/// ```
/// use dapnote::domain::AnswerRecord;
///
/// let mut record = AnswerRecord::default();
/// assert_eq!(record.text("pickupLocation"), "");
///
/// record.set_text("pickupLocation", "123 Main St");
/// record.set_choice("accessibilityNeeds", "wheelchair", true);
/// assert!(record.is_filled("pickupLocation"));
/// assert!(record.is_checked("accessibilityNeeds", "wheelchair"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    values: BTreeMap<String, FieldValue>,
}

impl AnswerRecord {
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }

    pub fn is_checked(&self, field: &str, choice: &str) -> bool {
        match self.values.get(field) {
            Some(FieldValue::Choices(choices)) => choices.get(choice).copied().unwrap_or(false),
            _ => false,
        }
    }

    /// True for non-blank text or a choice set with at least one checked entry.
    pub fn is_filled(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(FieldValue::Text(value)) => !value.trim().is_empty(),
            Some(FieldValue::Choices(choices)) => choices.values().any(|checked| *checked),
            None => false,
        }
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    /// Updates one choice, leaving the rest of the field's choices as they were.
    pub fn set_choice(&mut self, field: &str, choice: &str, checked: bool) {
        let entry = self
            .values
            .entry(field.to_string())
            .or_insert_with(|| FieldValue::Choices(BTreeMap::new()));
        match entry {
            FieldValue::Choices(choices) => {
                choices.insert(choice.to_string(), checked);
            }
            FieldValue::Text(_) => {
                let mut choices = BTreeMap::new();
                choices.insert(choice.to_string(), checked);
                *entry = FieldValue::Choices(choices);
            }
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks every stored value against the template's schema.
    pub fn validate(&self, template: &Template) -> DomainResult<()> {
        for (name, value) in &self.values {
            let field = template.require_field(name)?;
            match (field.kind, value) {
                (FieldKind::Text, FieldValue::Text(_)) => {}
                (FieldKind::Select { options, .. }, FieldValue::Text(text)) => {
                    if !text.is_empty() && !options.contains(&text.as_str()) {
                        return Err(DomainError::InvalidOption {
                            field: name.clone(),
                            value: text.clone(),
                        });
                    }
                }
                (FieldKind::Multi { choices, .. }, FieldValue::Choices(set)) => {
                    if let Some(unknown) = set
                        .keys()
                        .find(|key| !choices.iter().any(|choice| choice.id == key.as_str()))
                    {
                        return Err(DomainError::UnknownChoice {
                            field: name.clone(),
                            choice: unknown.clone(),
                        });
                    }
                }
                (kind, _) => {
                    return Err(DomainError::KindMismatch {
                        field: name.clone(),
                        expected: kind.describe(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Result of one named quality check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityCheck {
    pub description: &'static str,
    pub passed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_round_trip_names() {
        for id in TemplateId::ALL {
            assert_eq!(id.as_str().parse::<TemplateId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_template_id_is_rejected() {
        let err = "housing".parse::<TemplateId>().unwrap_err();
        assert_eq!(err, DomainError::UnknownTemplate("housing".to_string()));
    }

    #[test]
    fn test_missing_fields_read_as_defaults() {
        let record = AnswerRecord::default();
        assert_eq!(record.text("anything"), "");
        assert!(!record.is_checked("anything", "wheelchair"));
        assert!(!record.is_filled("anything"));
    }

    #[test]
    fn test_blank_text_is_not_filled() {
        let mut record = AnswerRecord::default();
        record.set_text("notes", "   ");
        assert!(!record.is_filled("notes"));
        record.set_text("notes", "ok");
        assert!(record.is_filled("notes"));
    }

    #[test]
    fn test_set_choice_preserves_other_choices() {
        let mut record = AnswerRecord::default();
        record.set_choice("needs", "food", true);
        record.set_choice("needs", "housing", true);
        record.set_choice("needs", "food", false);

        assert!(!record.is_checked("needs", "food"));
        assert!(record.is_checked("needs", "housing"));
        assert!(record.is_filled("needs"));
    }

    #[test]
    fn test_choice_set_with_nothing_checked_is_not_filled() {
        let mut record = AnswerRecord::default();
        record.set_choice("needs", "food", false);
        assert!(!record.is_filled("needs"));
    }

    #[test]
    fn test_condition_differs_requires_a_value() {
        let condition = Condition::Differs {
            field: "safetyLevel",
            value: "No concerns identified",
        };
        let mut record = AnswerRecord::default();
        assert!(!condition.holds(&record));

        record.set_text("safetyLevel", "No concerns identified");
        assert!(!condition.holds(&record));

        record.set_text("safetyLevel", "Minor concerns");
        assert!(condition.holds(&record));
    }

    #[test]
    fn test_record_deserializes_from_json() {
        let record: AnswerRecord = serde_json::from_str(
            r#"{"pickupLocation": "123 Main St", "accessibilityNeeds": {"wheelchair": true}}"#,
        )
        .unwrap();

        assert_eq!(record.text("pickupLocation"), "123 Main St");
        assert!(record.is_checked("accessibilityNeeds", "wheelchair"));
    }
}
