use crate::domain::ports::{Notice, Prompter};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<bool>,
    questions: Vec<(String, String)>,
    notices: Vec<Notice>,
}

/// A prompter that answers from a prepared list and remembers what it was
/// shown. Once the list runs out every question is answered with "no".
///
/// Clones share the same script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    script: Arc<Mutex<Script>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        let prompter = Self::new();
        prompter.lock().answers.extend(answers);
        prompter
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// `(title, body)` of every confirmation asked so far.
    pub fn questions(&self) -> Vec<(String, String)> {
        self.lock().questions.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock().notices.clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn confirm(&self, title: &str, body: &str) -> Result<bool> {
        let mut script = self.lock();
        script.questions.push((title.to_string(), body.to_string()));
        Ok(script.answers.pop_front().unwrap_or(false))
    }

    async fn notify(&self, notice: Notice) -> Result<()> {
        self.lock().notices.push(notice);
        Ok(())
    }
}
