use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::registration::{FieldErrors, FieldKey, STEPS, StepSpec};
use crate::domain::wizard::Wizard;
use crate::forms::registration::encode_validated;

/// Everything the wizard template needs to render the current step and
/// carry the other steps as hidden inputs.
#[derive(Debug, Serialize)]
pub struct WizardPageData {
    pub steps: &'static [StepSpec],
    pub step: usize,
    pub progress: u8,
    pub is_first_step: bool,
    pub is_last_step: bool,
    pub values: BTreeMap<FieldKey, String>,
    pub errors: FieldErrors,
    /// Hidden control value listing the validated steps.
    pub validated: String,
}

impl From<&Wizard> for WizardPageData {
    fn from(wizard: &Wizard) -> Self {
        Self {
            steps: &STEPS,
            step: wizard.step(),
            progress: wizard.progress(),
            is_first_step: wizard.is_first_step(),
            is_last_step: wizard.is_last_step(),
            values: wizard.form().values().clone(),
            errors: wizard.errors().clone(),
            validated: encode_validated(wizard.validated()),
        }
    }
}
