use super::payload::SubmissionPayload;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Los datos fueron guardados con éxito en Sheets.";

/// What the sheet endpoint answered to an accepted submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmissionReceipt {
    pub fn message_or_default(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
    }
}

/// Persists a submission outside the process. One call, one attempt.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt>;
}

pub type SubmissionGatewayBox = Box<dyn SubmissionGateway>;

/// A file as stored by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_id: String,
    pub file_url: String,
}

#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload(
        &self,
        contents: Vec<u8>,
        file_name: &str,
        folder_id: &str,
    ) -> Result<UploadedFile>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A message shown to the person filling the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: Option<String>,
    /// Set for notices that go away on their own.
    pub dismiss_after: Option<Duration>,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, text: Option<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            text,
            dismiss_after: None,
        }
    }

    pub fn transient(mut self, after: Duration) -> Self {
        self.dismiss_after = Some(after);
        self
    }
}

/// Blocking dialogs: the caller is suspended until the user answers.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Yes/no question. `true` means confirmed.
    async fn confirm(&self, title: &str, body: &str) -> Result<bool>;

    /// Shows a notice. Transient notices never wait for the user.
    async fn notify(&self, notice: Notice) -> Result<()>;
}

pub type PrompterBox = Box<dyn Prompter>;

#[async_trait]
impl<P: Prompter + ?Sized> Prompter for Arc<P> {
    async fn confirm(&self, title: &str, body: &str) -> Result<bool> {
        (**self).confirm(title, body).await
    }

    async fn notify(&self, notice: Notice) -> Result<()> {
        (**self).notify(notice).await
    }
}
