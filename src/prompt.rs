//! Prompt collaborator
//!
//! The engine suspends on `confirm` and `alert` and resumes with the
//! operator's answer. Holding `&mut Session` across the await keeps every
//! other mutation out while a prompt is open.

use std::collections::VecDeque;
use std::future::Future;

/// Yes/no confirmation and acknowledgement prompts
pub trait Prompter {
    /// Ask a yes/no question. A cancelled prompt resolves to `false`.
    fn confirm(&mut self, message: &str) -> impl Future<Output = bool> + Send;

    /// Show a message and wait for acknowledgement
    fn alert(&mut self, message: &str) -> impl Future<Output = ()> + Send;
}

/// Prompter answering from a fixed script.
///
/// Confirms pop replies in order; an exhausted script answers `false`.
/// Every message shown is recorded.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<bool>,
    confirms: Vec<String>,
    alerts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(replies: impl IntoIterator<Item = bool>) -> Self {
        ScriptedPrompter {
            replies: replies.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Prompter that declines every confirmation
    pub fn declining() -> Self {
        Self::default()
    }

    /// Confirmation messages asked so far
    pub fn confirms(&self) -> &[String] {
        &self.confirms
    }

    /// Alert messages shown so far
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> impl Future<Output = bool> + Send {
        self.confirms.push(message.to_string());
        let reply = self.replies.pop_front().unwrap_or(false);
        std::future::ready(reply)
    }

    fn alert(&mut self, message: &str) -> impl Future<Output = ()> + Send {
        self.alerts.push(message.to_string());
        std::future::ready(())
    }
}
