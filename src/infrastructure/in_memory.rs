use crate::domain::payload::SubmissionPayload;
use crate::domain::ports::{SubmissionGateway, SubmissionReceipt};
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Reply {
    Accept(Option<String>),
    Reject { status: u16, message: Option<String> },
}

/// A gateway that keeps submissions in memory instead of sending them.
///
/// Clones share the same record of submissions, so a test can hand one clone
/// to a session and inspect the other. Used by `submit --dry-run`.
#[derive(Debug, Clone)]
pub struct InMemoryGateway {
    submissions: Arc<Mutex<Vec<SubmissionPayload>>>,
    reply: Reply,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGateway {
    /// Accepts everything, answering without a message.
    pub fn new() -> Self {
        Self::accepting(None)
    }

    pub fn accepting(message: Option<String>) -> Self {
        Self {
            submissions: Arc::default(),
            reply: Reply::Accept(message),
        }
    }

    /// Records every submission, then rejects it with `status`.
    pub fn failing(status: u16, message: Option<String>) -> Self {
        Self {
            submissions: Arc::default(),
            reply: Reply::Reject { status, message },
        }
    }

    /// Everything submitted so far, oldest first.
    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SubmissionGateway for InMemoryGateway {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt> {
        self.submissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(payload.clone());

        match &self.reply {
            Reply::Accept(message) => Ok(SubmissionReceipt {
                message: message.clone(),
            }),
            Reply::Reject { status, message } => Err(RegistryError::Rejected {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
