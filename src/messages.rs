//! Operator-facing message queue

use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Message,
    Notice,
    Warning,
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageLevel::Message => "message",
            MessageLevel::Notice => "notice",
            MessageLevel::Warning => "warning",
            MessageLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Messages shown to the operator on the next page render
pub trait MessageQueue: Send + Sync {
    fn enqueue(&self, message: &str, level: MessageLevel);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedMessage {
    pub level: MessageLevel,
    pub text: String,
}

/// In-memory queue, drained by whoever renders the page
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<QueuedMessage>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return everything queued so far
    pub fn drain(&self) -> Vec<QueuedMessage> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<QueuedMessage>> {
        // A panic while holding the lock cannot leave the Vec half-written
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MessageQueue for MessageLog {
    fn enqueue(&self, message: &str, level: MessageLevel) {
        self.lock().push(QueuedMessage {
            level,
            text: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_and_drain() {
        let log = MessageLog::new();
        log.enqueue("no such table", MessageLevel::Warning);

        assert_eq!(log.len(), 1);
        let drained = log.drain();
        assert_eq!(drained[0].level, MessageLevel::Warning);
        assert_eq!(drained[0].text, "no such table");
        assert!(log.is_empty());
    }
}
