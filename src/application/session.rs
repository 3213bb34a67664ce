use crate::domain::beneficiary::{BeneficiaryField, BeneficiaryRecord};
use crate::domain::form::FormState;
use crate::domain::general::GeneralField;
use crate::domain::payload::SubmissionPayload;
use crate::domain::ports::{
    Notice, NoticeKind, PrompterBox, SubmissionGatewayBox, SubmissionReceipt,
};
use crate::domain::validation::ValidationError;
use crate::error::{RegistryError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

pub const REMOVED_NOTICE_DURATION: Duration = Duration::from_millis(1200);
pub const DEFAULT_FAILURE_MESSAGE: &str = "Ocurrió un error al enviar los datos.";

/// How a call to [`FormSession::submit`] ended.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission from this session was still running; nothing was sent.
    AlreadySubmitting,
    /// The form broke a rule; nothing was sent.
    Invalid(ValidationError),
    Accepted(SubmissionReceipt),
    /// The gateway failed. The form is left as it was so it can be resent.
    Failed(String),
}

/// How a call to [`FormSession::remove_beneficiary`] ended.
#[derive(Debug, PartialEq)]
pub enum RemoveOutcome {
    Cancelled,
    Removed(BeneficiaryRecord),
}

/// One person filling one form.
///
/// Owns the [`FormState`] and talks to the user through a prompter and to the
/// sheet through a gateway. All methods take `&self`: edits are synchronous,
/// while removal and submission suspend on the prompter or the network. The
/// state lock is never held across those suspension points.
pub struct FormSession {
    state: Mutex<FormState>,
    submitting: AtomicBool,
    prompter: PrompterBox,
    gateway: SubmissionGatewayBox,
}

/// Clears the submitting flag however the submission ends.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FormSession {
    /// Opens a fresh form with one blank beneficiary.
    pub fn new(prompter: PrompterBox, gateway: SubmissionGatewayBox) -> Self {
        Self::with_state(FormState::new(), prompter, gateway)
    }

    /// Opens a session on an existing form, e.g. a draft loaded from disk.
    pub fn with_state(
        state: FormState,
        prompter: PrompterBox,
        gateway: SubmissionGatewayBox,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            submitting: AtomicBool::new(false),
            prompter,
            gateway,
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        // A poisoned lock still holds a usable form.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A copy of the current form.
    pub fn snapshot(&self) -> FormState {
        self.state().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn update_general_field(&self, field: GeneralField, value: impl Into<String>) {
        self.state().update_general_field(field, value);
    }

    pub fn update_beneficiary_field(
        &self,
        index: usize,
        field: BeneficiaryField,
        value: impl Into<String>,
    ) -> Result<()> {
        self.state().update_beneficiary_field(index, field, value)
    }

    /// Appends a blank beneficiary and returns its index.
    pub fn add_beneficiary(&self) -> usize {
        self.state().add_beneficiary()
    }

    /// Asks for confirmation, then removes the beneficiary at `index`.
    ///
    /// Removing the only beneficiary leaves a blank one in its place. A
    /// transient notice follows a successful removal.
    pub async fn remove_beneficiary(&self, index: usize) -> Result<RemoveOutcome> {
        let name = self.state().display_name(index)?;

        let confirmed = self
            .prompter
            .confirm("¿Eliminar beneficiario?", &format!("Se eliminará {name}."))
            .await?;
        if !confirmed {
            log::debug!("Removal of beneficiary #{} cancelled", index + 1);
            return Ok(RemoveOutcome::Cancelled);
        }

        // Index is re-checked: the list may have changed while the prompt was open.
        let removed = self.state().remove_beneficiary(index)?;
        log::info!("Removed beneficiary #{} ({name})", index + 1);

        self.prompter
            .notify(
                Notice::new(NoticeKind::Success, "Eliminado", None)
                    .transient(REMOVED_NOTICE_DURATION),
            )
            .await?;

        Ok(RemoveOutcome::Removed(removed))
    }

    /// Validates the form and, if it passes, sends it through the gateway once.
    ///
    /// A call made while another is still in flight returns
    /// [`SubmitOutcome::AlreadySubmitting`] at once. The form is never cleared.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Submit ignored: a submission is already in flight");
            return Ok(SubmitOutcome::AlreadySubmitting);
        }
        let _guard = SubmittingGuard(&self.submitting);

        let payload = SubmissionPayload::try_from(&*self.state());
        let payload = match payload {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("Validation failed: {err}");
                self.prompter
                    .notify(Notice::new(
                        NoticeKind::Warning,
                        "Validación incompleta",
                        Some(err.message()),
                    ))
                    .await?;
                return Ok(SubmitOutcome::Invalid(err));
            }
        };

        match self.gateway.submit(&payload).await {
            Ok(receipt) => {
                self.prompter
                    .notify(Notice::new(
                        NoticeKind::Success,
                        "¡Enviado!",
                        Some(receipt.message_or_default().to_string()),
                    ))
                    .await?;
                Ok(SubmitOutcome::Accepted(receipt))
            }
            Err(err) => {
                log::error!("Submission failed: {err}");
                let message = failure_message(&err);
                self.prompter
                    .notify(Notice::new(NoticeKind::Error, "Oops...", Some(message.clone())))
                    .await?;
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }
}

/// The text shown to the user when the gateway fails: the server's own
/// message when it sent one, otherwise the generic failure text.
fn failure_message(err: &RegistryError) -> String {
    match err {
        RegistryError::Rejected { message: None, .. } => DEFAULT_FAILURE_MESSAGE.to_string(),
        other => {
            let message = other.to_string();
            if message.trim().is_empty() {
                DEFAULT_FAILURE_MESSAGE.to_string()
            } else {
                message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryGateway;
    use crate::infrastructure::scripted::ScriptedPrompter;

    fn filled(first: &str) -> BeneficiaryRecord {
        BeneficiaryRecord {
            staff_first_name: first.into(),
            staff_last_name1: "Perez".into(),
            staff_last_name2: "Cortes".into(),
            role: "Chofer".into(),
            child_name: "Ana".into(),
            child_sex: "Femenino".into(),
            child_age: "7".into(),
        }
    }

    #[tokio::test]
    async fn test_remove_asks_with_display_name() {
        let prompter = ScriptedPrompter::answering([true]);
        let session = FormSession::new(Box::new(prompter.clone()), Box::new(InMemoryGateway::new()));
        session.add_beneficiary();
        session
            .update_beneficiary_field(1, BeneficiaryField::StaffFirstName, "Rosa")
            .unwrap();

        let outcome = session.remove_beneficiary(1).await.unwrap();

        assert!(matches!(outcome, RemoveOutcome::Removed(ref b) if b.staff_first_name == "Rosa"));
        assert_eq!(session.snapshot().beneficiaries.len(), 1);
        assert_eq!(
            prompter.questions(),
            vec![("¿Eliminar beneficiario?".to_string(), "Se eliminará Rosa.".to_string())]
        );
        let notices = prompter.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Eliminado");
        assert_eq!(notices[0].dismiss_after, Some(REMOVED_NOTICE_DURATION));
    }

    #[tokio::test]
    async fn test_remove_cancelled_changes_nothing() {
        let prompter = ScriptedPrompter::answering([false]);
        let session = FormSession::new(Box::new(prompter.clone()), Box::new(InMemoryGateway::new()));
        session.add_beneficiary();
        let before = session.snapshot();

        let outcome = session.remove_beneficiary(0).await.unwrap();

        assert_eq!(outcome, RemoveOutcome::Cancelled);
        assert_eq!(session.snapshot(), before);
        assert_eq!(prompter.questions()[0].1, "Se eliminará Beneficiario #1.");
        assert!(prompter.notices().is_empty());
    }

    #[tokio::test]
    async fn test_remove_out_of_range_does_not_prompt() {
        let prompter = ScriptedPrompter::answering([true]);
        let session = FormSession::new(Box::new(prompter.clone()), Box::new(InMemoryGateway::new()));

        let err = session.remove_beneficiary(3).await.unwrap_err();

        assert!(matches!(err, RegistryError::IndexOutOfRange { index: 3, len: 1 }));
        assert!(prompter.questions().is_empty());
    }

    #[tokio::test]
    async fn test_submit_invalid_skips_gateway() {
        let prompter = ScriptedPrompter::new();
        let gateway = InMemoryGateway::new();
        let session = FormSession::new(Box::new(prompter.clone()), Box::new(gateway.clone()));

        let outcome = session.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.message() == "La dirección es obligatoria."));
        assert!(gateway.submissions().is_empty());
        assert_eq!(prompter.notices()[0].title, "Validación incompleta");
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_accepted_keeps_form() {
        let prompter = ScriptedPrompter::new();
        let gateway = InMemoryGateway::new();
        let mut form = FormState::new();
        form.general.department = "DOM".into();
        form.beneficiaries = vec![filled("Juan"), filled("Luis")];
        let session = FormSession::with_state(form.clone(), Box::new(prompter.clone()), Box::new(gateway.clone()));

        let outcome = session.submit().await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Accepted(SubmissionReceipt::default()));
        assert_eq!(gateway.submissions().len(), 1);
        assert_eq!(gateway.submissions()[0].beneficiarios.len(), 2);
        assert_eq!(session.snapshot(), form);

        let notice = &prompter.notices()[0];
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text.as_deref(), Some(crate::domain::ports::DEFAULT_SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_submit_failure_clears_flag() {
        let prompter = ScriptedPrompter::new();
        let gateway = InMemoryGateway::failing(502, Some("Sheet locked".into()));
        let mut form = FormState::new();
        form.general.department = "DOM".into();
        form.beneficiaries = vec![filled("Juan")];
        let session = FormSession::with_state(form, Box::new(prompter.clone()), Box::new(gateway));

        let outcome = session.submit().await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Failed("Sheet locked".to_string()));
        assert!(!session.is_submitting());
        assert_eq!(prompter.notices()[0].kind, NoticeKind::Error);
        assert_eq!(prompter.notices()[0].title, "Oops...");
    }

    #[tokio::test]
    async fn test_submit_rejected_without_message_uses_default_text() {
        let prompter = ScriptedPrompter::new();
        let gateway = InMemoryGateway::failing(404, None);
        let mut form = FormState::new();
        form.general.department = "DOM".into();
        form.beneficiaries = vec![filled("Juan")];
        let session = FormSession::with_state(form, Box::new(prompter.clone()), Box::new(gateway));

        let outcome = session.submit().await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Failed(DEFAULT_FAILURE_MESSAGE.to_string()));
        assert_eq!(
            prompter.notices()[0].text.as_deref(),
            Some("Ocurrió un error al enviar los datos.")
        );
    }
}
