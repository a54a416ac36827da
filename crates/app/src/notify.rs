//! Notifications
//!
//! Editors and views report outcomes through a `Notifier` and never block on
//! it. Destructive actions ask a `Confirm` first.

use mockall::automock;

/// Non-blocking success/failure reporting.
#[automock]
pub trait Notifier: Send + Sync {
    /// An operation succeeded.
    fn success(&self, message: &str);

    /// An operation failed; `message` is already user-facing.
    fn failure(&self, message: &str);
}

/// Interactive yes/no gate in front of destructive actions.
#[automock]
pub trait Confirm: Send + Sync {
    /// Whether the user agreed to `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Notifier that writes outcomes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn failure(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Confirmation that always answers the same, e.g. for `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = self.0, "confirmation answered without asking");

        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_answer_does_not_ask() {
        assert!(FixedAnswer(true).confirm("Delete model MX-12?"));
        assert!(!FixedAnswer(false).confirm("Delete model MX-12?"));
    }
}
