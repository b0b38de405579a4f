//! Step-by-step progression through the registration form.
//!
//! A step can only be left forwards once all of its fields validate; going
//! back is always allowed. Submission is reachable from the last step once
//! every earlier step has been validated in the current session.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::domain::registration::{FieldErrors, RegistrationForm, RegistrationPayload, STEPS};

pub const STEP_COUNT: usize = STEPS.len();
pub const LAST_STEP: usize = STEP_COUNT - 1;

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("submission is only possible from the last step")]
    NotFinalStep,
    #[error("step {0} has not been validated")]
    StepSkipped(usize),
    #[error("form contains {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wizard {
    step: usize,
    form: RegistrationForm,
    validated: BTreeSet<usize>,
    errors: FieldErrors,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a wizard from state carried across requests.
    ///
    /// Out-of-range steps are clamped and unknown step indexes dropped.
    pub fn restore(
        step: usize,
        validated: impl IntoIterator<Item = usize>,
        form: RegistrationForm,
    ) -> Self {
        Self {
            step: step.min(LAST_STEP),
            form,
            validated: validated.into_iter().filter(|s| *s < STEP_COUNT).collect(),
            errors: FieldErrors::new(),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn validated(&self) -> &BTreeSet<usize> {
        &self.validated
    }

    pub fn is_first_step(&self) -> bool {
        self.step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    /// Completion percentage shown in the progress bar.
    pub fn progress(&self) -> u8 {
        (self.step * 100 / LAST_STEP) as u8
    }

    /// Validates the current step and advances when it passes.
    ///
    /// Returns `true` when the step was valid. Data of every step is kept
    /// either way.
    pub fn next(&mut self) -> bool {
        self.errors = self.form.validate_step(self.step);
        if !self.errors.is_empty() {
            return false;
        }
        self.validated.insert(self.step);
        self.step = (self.step + 1).min(LAST_STEP);
        true
    }

    pub fn back(&mut self) {
        self.errors.clear();
        self.step = self.step.saturating_sub(1);
    }

    /// Validates the whole form ahead of relaying it.
    ///
    /// When a field fails, the wizard moves to the first step that holds an
    /// invalid field so its messages are visible.
    pub fn prepare_submission(&mut self) -> Result<RegistrationPayload, WizardError> {
        if !self.is_last_step() {
            return Err(WizardError::NotFinalStep);
        }
        if let Some(skipped) = (0..LAST_STEP).find(|s| !self.validated.contains(s)) {
            return Err(WizardError::StepSkipped(skipped));
        }
        match self.form.to_payload() {
            Ok(payload) => {
                self.errors.clear();
                self.validated.insert(LAST_STEP);
                Ok(payload)
            }
            Err(errors) => {
                let first_invalid = STEPS
                    .iter()
                    .position(|step| step.fields.iter().any(|f| errors.contains_key(&f.key)))
                    .unwrap_or(LAST_STEP);
                self.step = first_invalid;
                self.validated.retain(|s| *s < first_invalid);
                self.errors = errors.clone();
                Err(WizardError::Invalid(errors))
            }
        }
    }

    /// Returns to the first step with every field back at its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::FieldKey;
    use crate::domain::registration::tests::valid_form;

    fn at_last_step() -> Wizard {
        let mut wizard = Wizard::restore(0, [], valid_form());
        for _ in 0..LAST_STEP {
            assert!(wizard.next());
        }
        wizard
    }

    #[test]
    fn next_with_invalid_field_stays_and_keeps_data() {
        for step in 0..STEP_COUNT {
            let mut form = valid_form();
            let key = STEPS[step]
                .fields
                .iter()
                .find(|f| !f.rule.is_optional())
                .unwrap()
                .key;
            form.set(key, "");
            let mut wizard = Wizard::restore(step, 0..step, form.clone());

            assert!(!wizard.next());
            assert_eq!(wizard.step(), step);
            assert!(wizard.errors().contains_key(&key));
            assert_eq!(wizard.form(), &form);
        }
    }

    #[test]
    fn next_advances_and_clamps() {
        let mut wizard = at_last_step();
        assert_eq!(wizard.step(), LAST_STEP);
        assert_eq!(wizard.progress(), 100);
        assert!(wizard.next());
        assert_eq!(wizard.step(), LAST_STEP);
    }

    #[test]
    fn back_is_unconditional() {
        let mut form = valid_form();
        form.set(FieldKey::DiemRenLuyen, "");
        let mut wizard = Wizard::restore(3, 0..3, form.clone());
        wizard.back();
        assert_eq!(wizard.step(), 2);
        wizard.back();
        wizard.back();
        wizard.back();
        assert_eq!(wizard.step(), 0);
        assert!(wizard.is_first_step());
        assert_eq!(wizard.form(), &form);
    }

    #[test]
    fn progress_tracks_step() {
        let wizard = Wizard::restore(2, [0, 1], RegistrationForm::default());
        assert_eq!(wizard.progress(), 40);
        assert_eq!(Wizard::new().progress(), 0);
    }

    #[test]
    fn restore_clamps_state() {
        let wizard = Wizard::restore(42, [0, 1, 9], RegistrationForm::default());
        assert_eq!(wizard.step(), LAST_STEP);
        assert_eq!(wizard.validated().len(), 2);
    }

    #[test]
    fn submission_requires_last_step_and_validated_steps() {
        let mut wizard = Wizard::restore(2, [0, 1], valid_form());
        assert_eq!(wizard.prepare_submission(), Err(WizardError::NotFinalStep));

        let mut wizard = Wizard::restore(LAST_STEP, [0, 1, 3, 4], valid_form());
        assert_eq!(wizard.prepare_submission(), Err(WizardError::StepSkipped(2)));
    }

    #[test]
    fn valid_submission_then_reset() {
        let mut wizard = at_last_step();
        let payload = wizard.prepare_submission().unwrap();
        assert_eq!(payload.get("mssv"), Some(&serde_json::json!("21110001")));

        wizard.reset();
        assert_eq!(wizard.step(), 0);
        assert_eq!(wizard.form(), &RegistrationForm::default());
        assert!(wizard.validated().is_empty());
    }

    #[test]
    fn invalid_submission_moves_to_first_invalid_step() {
        let mut wizard = at_last_step();
        wizard.form_mut().set(FieldKey::DiemCtxh, "-5");
        assert!(matches!(
            wizard.prepare_submission(),
            Err(WizardError::Invalid(_))
        ));
        assert_eq!(wizard.step(), LAST_STEP);

        wizard.form_mut().set(FieldKey::DiemCtxh, "1");
        wizard.form_mut().set(FieldKey::Mssv, "123");
        assert!(wizard.prepare_submission().is_err());
        assert_eq!(wizard.step(), 0);
        assert_eq!(wizard.errors().get(&FieldKey::Mssv), Some(&"MSSV không hợp lệ"));
        assert_eq!(wizard.form().get(FieldKey::HoTen), "Nguyen Van A");
    }
}
