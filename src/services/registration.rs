//! Handling of one posted wizard step.

use crate::api::FormRelay;
use crate::domain::wizard::{Wizard, WizardError};
use crate::forms::registration::{WizardAction, WizardSubmission};

/// What the page shows after a wizard post.
#[derive(Debug)]
pub enum WizardOutcome {
    /// Render the wizard again at its current step.
    Continue(Wizard),
    /// The relay accepted the form; the wizard is back at a fresh start.
    Submitted(Wizard),
    /// The relay rejected the form; answers are kept for another try.
    RelayFailed(Wizard),
}

pub async fn handle_wizard<R>(relay: &R, submission: WizardSubmission) -> WizardOutcome
where
    R: FormRelay + ?Sized,
{
    let WizardSubmission { mut wizard, action } = submission;
    match action {
        WizardAction::Back => {
            wizard.back();
            WizardOutcome::Continue(wizard)
        }
        WizardAction::Next => {
            wizard.next();
            WizardOutcome::Continue(wizard)
        }
        WizardAction::Submit => submit(relay, wizard).await,
    }
}

async fn submit<R>(relay: &R, mut wizard: Wizard) -> WizardOutcome
where
    R: FormRelay + ?Sized,
{
    let payload = match wizard.prepare_submission() {
        Ok(payload) => payload,
        Err(WizardError::Invalid(errors)) => {
            log::info!("Registration rejected with {} invalid field(s)", errors.len());
            return WizardOutcome::Continue(wizard);
        }
        Err(err) => {
            // Reached by posting out of order; validate the current step instead.
            log::warn!("Registration submitted early: {err}");
            wizard.next();
            return WizardOutcome::Continue(wizard);
        }
    };

    match relay.submit_registration(&payload).await {
        Ok(()) => {
            wizard.reset();
            WizardOutcome::Submitted(wizard)
        }
        Err(err) => {
            log::error!("Failed to relay registration: {err}");
            WizardOutcome::RelayFailed(wizard)
        }
    }
}
