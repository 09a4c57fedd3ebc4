//! Form state for the note wizard.
//!
//! [`Wizard`] owns the active template, the current step, and the answer
//! record. It has no knowledge of the terminal, so every transition can be
//! driven directly from tests.

use tracing::{debug, info, trace};

use crate::domain::templates;
use crate::domain::{
    AnswerRecord, DomainError, DomainResult, FieldKind, NoteFormatter, QualityCheck, Template,
    TemplateId,
};

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    NoTemplateSelected,
    /// 1-indexed, always within `1..=total_steps`.
    Step(usize),
}

/// Outcome of [`Wizard::retreat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved,
    Exited,
}

/// Holds one wizard session.
///
/// The record only lives in memory; exiting or starting over discards it.
///
/// # Examples
///
/// ```
/// use dapnote::application::{Wizard, WizardState};
/// use dapnote::domain::TemplateId;
///
/// let mut wizard = Wizard::default();
/// wizard.select_template(TemplateId::Transportation);
/// wizard.set_text("pickupLocation", "123 Main St").unwrap();
/// wizard.advance();
/// assert_eq!(wizard.state(), WizardState::Step(2));
///
/// wizard.exit();
/// assert_eq!(wizard.state(), WizardState::NoTemplateSelected);
/// assert!(wizard.record().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Wizard {
    template: Option<&'static Template>,
    step: usize,
    record: AnswerRecord,
}

impl Wizard {
    /// Starts a fresh session on step 1 of the given template.
    pub fn select_template(&mut self, id: TemplateId) {
        self.template = Some(templates::template(id));
        self.step = 1;
        self.record.clear();
        info!(template = %id, "template selected");
    }

    /// Like [`Wizard::select_template`] but takes the template's string id.
    pub fn select_template_named(&mut self, name: &str) -> DomainResult<()> {
        let id = name.parse::<TemplateId>()?;
        self.select_template(id);
        Ok(())
    }

    pub fn template(&self) -> Option<&'static Template> {
        self.template
    }

    pub fn state(&self) -> WizardState {
        match self.template {
            Some(_) => WizardState::Step(self.step),
            None => WizardState::NoTemplateSelected,
        }
    }

    pub fn step(&self) -> Option<usize> {
        self.template.map(|_| self.step)
    }

    pub fn is_final_step(&self) -> bool {
        self.template
            .is_some_and(|template| self.step == template.total_steps)
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    fn active(&self) -> DomainResult<&'static Template> {
        self.template.ok_or(DomainError::NoActiveTemplate)
    }

    /// Sets a free-text or single-select field.
    ///
    /// Single-select values must be empty or one of the declared options.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> DomainResult<()> {
        let template = self.active()?;
        let field = template.require_field(name)?;
        let value = value.into();
        match field.kind {
            FieldKind::Text => {}
            FieldKind::Select { options, .. } => {
                if !value.is_empty() && !options.contains(&value.as_str()) {
                    return Err(DomainError::InvalidOption {
                        field: name.to_string(),
                        value,
                    });
                }
            }
            FieldKind::Multi { .. } => {
                return Err(DomainError::KindMismatch {
                    field: name.to_string(),
                    expected: field.kind.describe(),
                });
            }
        }
        trace!(field = name, "field updated");
        self.record.set_text(name, value);
        Ok(())
    }

    /// Checks or unchecks one choice of a multi-select field, leaving its
    /// other choices untouched.
    pub fn set_option(&mut self, field_name: &str, choice: &str, checked: bool) -> DomainResult<()> {
        let template = self.active()?;
        let field = template.require_field(field_name)?;
        let FieldKind::Multi { choices, .. } = field.kind else {
            return Err(DomainError::KindMismatch {
                field: field_name.to_string(),
                expected: field.kind.describe(),
            });
        };
        if !choices.iter().any(|c| c.id == choice) {
            return Err(DomainError::UnknownChoice {
                field: field_name.to_string(),
                choice: choice.to_string(),
            });
        }
        trace!(field = field_name, choice, checked, "choice updated");
        self.record.set_choice(field_name, choice, checked);
        Ok(())
    }

    pub fn clear_field(&mut self, name: &str) -> DomainResult<()> {
        self.active()?.require_field(name)?;
        self.record.remove(name);
        Ok(())
    }

    /// Replaces the whole record after checking it against the schema.
    pub fn load_record(&mut self, record: AnswerRecord) -> DomainResult<()> {
        record.validate(self.active()?)?;
        self.record = record;
        Ok(())
    }

    /// Moves forward one step. Returns `false` on the last step or with no
    /// template selected.
    pub fn advance(&mut self) -> bool {
        match self.template {
            Some(template) if self.step < template.total_steps => {
                self.step += 1;
                debug!(step = self.step, "advanced");
                true
            }
            _ => false,
        }
    }

    /// Moves back one step, or leaves the wizard entirely from step 1.
    pub fn retreat(&mut self) -> Retreat {
        if self.template.is_some() && self.step > 1 {
            self.step -= 1;
            debug!(step = self.step, "moved back");
            Retreat::Moved
        } else {
            self.exit();
            Retreat::Exited
        }
    }

    /// Clears the answers and returns to step 1, keeping the template.
    pub fn reset(&mut self) {
        self.record.clear();
        if self.template.is_some() {
            self.step = 1;
        }
        info!("started new note");
    }

    pub fn exit(&mut self) {
        self.template = None;
        self.step = 0;
        self.record.clear();
        info!("left wizard");
    }

    pub fn formatter(&self) -> Option<NoteFormatter<'_>> {
        self.template
            .map(|template| NoteFormatter::new(template, &self.record))
    }

    /// The note as it would be copied right now.
    pub fn preview(&self) -> Option<String> {
        self.formatter().map(|formatter| formatter.render())
    }

    pub fn quality_checks(&self) -> Vec<QualityCheck> {
        self.formatter()
            .map(|formatter| formatter.quality_checks())
            .unwrap_or_default()
    }

    /// True only with a template selected and every check passing.
    pub fn can_copy(&self) -> bool {
        self.formatter().is_some_and(|formatter| formatter.can_copy())
    }
}
