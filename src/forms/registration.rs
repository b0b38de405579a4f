//! Decoding of the posted registration wizard.
//!
//! The page posts every answer entered so far (inactive steps travel as
//! hidden inputs) plus three control fields: `step`, `validated` and
//! `action`.

use std::collections::BTreeMap;

use crate::domain::registration::RegistrationForm;
use crate::domain::wizard::Wizard;
use crate::forms::FormError;

pub const STEP_FIELD: &str = "step";
pub const VALIDATED_FIELD: &str = "validated";
pub const ACTION_FIELD: &str = "action";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Back,
    Submit,
}

impl WizardAction {
    fn parse(value: &str) -> Self {
        match value {
            "back" => Self::Back,
            "submit" => Self::Submit,
            _ => Self::Next,
        }
    }
}

#[derive(Debug)]
pub struct WizardSubmission {
    pub wizard: Wizard,
    pub action: WizardAction,
}

/// Serializes the validated step set for the hidden control field.
pub fn encode_validated<'a>(steps: impl IntoIterator<Item = &'a usize>) -> String {
    steps
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_validated(raw: &str) -> Vec<usize> {
    raw.split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}

/// Rebuilds the wizard from a urlencoded request body.
pub fn parse_wizard(body: &[u8]) -> Result<WizardSubmission, FormError> {
    let pairs: BTreeMap<String, String> = serde_html_form::from_bytes(body).map_err(|err| {
        log::error!("Failed to decode registration form: {err}");
        FormError::Invalid("Dữ liệu biểu mẫu không hợp lệ")
    })?;

    let mut step = 0;
    let mut validated = Vec::new();
    let mut action = WizardAction::Next;
    let mut form = RegistrationForm::default();

    for (name, value) in &pairs {
        match name.as_str() {
            STEP_FIELD => step = value.trim().parse().unwrap_or(0),
            VALIDATED_FIELD => validated = decode_validated(value),
            ACTION_FIELD => action = WizardAction::parse(value),
            _ => {}
        }
    }
    form.apply(pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())));

    Ok(WizardSubmission {
        wizard: Wizard::restore(step, validated, form),
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::FieldKey;

    #[test]
    fn restores_controls_and_answers() {
        let body = "step=2&validated=0%2C1&action=back&hoTen=Nguyen+Van+A&gioiTinh=N%E1%BB%AF&unknown=x";
        let submission = parse_wizard(body.as_bytes()).unwrap();
        assert_eq!(submission.action, WizardAction::Back);
        assert_eq!(submission.wizard.step(), 2);
        assert_eq!(
            submission.wizard.validated().iter().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );
        let form = submission.wizard.form();
        assert_eq!(form.get(FieldKey::HoTen), "Nguyen Van A");
        assert_eq!(form.get(FieldKey::GioiTinh), "Nữ");
        assert_eq!(form.get(FieldKey::Nganh), "CNTT");
    }

    #[test]
    fn missing_controls_fall_back_to_first_step() {
        let submission = parse_wizard(b"step=abc&validated=x,,3").unwrap();
        assert_eq!(submission.action, WizardAction::Next);
        assert_eq!(submission.wizard.step(), 0);
        assert_eq!(submission.wizard.validated().len(), 1);
    }

    #[test]
    fn validated_round_trips_through_hidden_field() {
        let steps = [0usize, 1, 4];
        assert_eq!(encode_validated(&steps), "0,1,4");
        assert_eq!(decode_validated("0,1,4"), vec![0, 1, 4]);
    }
}
