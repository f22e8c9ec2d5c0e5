use crate::domain::model::{AdviceOutcome, Message};

pub const ERROR_PREFIX: &str = "I'm having trouble connecting right now.";

/// Conversation state owned by the caller. Every transition consumes the
/// old state and returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the user's message and marks a request as in flight.
    pub fn submit(mut self, text: &str) -> Self {
        self.messages.push(Message::user(text));
        self.is_loading = true;
        self.error = None;
        self
    }

    /// Records the result of the in-flight request. Failures also append a
    /// synthetic bot message so the conversation shows what went wrong.
    pub fn apply_outcome(mut self, outcome: AdviceOutcome) -> Self {
        self.is_loading = false;
        match outcome {
            AdviceOutcome::Success(answer) => {
                self.messages.push(Message::bot(answer));
            }
            AdviceOutcome::Failure { message, .. } => {
                self.messages
                    .push(Message::bot(format!("{} {}", ERROR_PREFIX, message)));
                self.error = Some(message);
            }
        }
        self
    }

    pub fn clear_error(mut self) -> Self {
        self.error = None;
        self
    }

    pub fn clear(self) -> Self {
        Self::default()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
