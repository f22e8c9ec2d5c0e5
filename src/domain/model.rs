use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Failure taxonomy of an advice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    Timeout,
    IncompleteResponse,
    AuthOrNotFound,
    Transient,
    Unexpected,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout | ErrorKind::IncompleteResponse | ErrorKind::Transient
        )
    }
}

/// A validated question together with the prompt sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRequest {
    pub(crate) question: String,
    pub(crate) prompt: String,
}

impl AdviceRequest {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceOutcome {
    Success(String),
    Failure { kind: ErrorKind, message: String },
}

impl AdviceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AdviceOutcome::Success(_))
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AdviceOutcome::Success(_) => None,
            AdviceOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub kind: MessageType,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageType::User,
            timestamp: Utc::now(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageType::Bot,
            timestamp: Utc::now(),
        }
    }
}

/// Structural unit of parsed chat text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    Header { level: u8, text: String },
    BulletList(Vec<String>),
    NumberedList(Vec<String>),
    CodeBlock { code: String, language: Option<String> },
    Quote(String),
    HorizontalRule,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        bold: false,
        italic: false,
        strikethrough: false,
        code: false,
    };
    pub const BOLD: Style = Style {
        bold: true,
        ..Style::PLAIN
    };
    pub const ITALIC: Style = Style {
        italic: true,
        ..Style::PLAIN
    };
    pub const BOLD_ITALIC: Style = Style {
        bold: true,
        italic: true,
        ..Style::PLAIN
    };
    pub const STRIKETHROUGH: Style = Style {
        strikethrough: true,
        ..Style::PLAIN
    };
    pub const CODE: Style = Style {
        code: true,
        ..Style::PLAIN
    };

    pub fn is_plain(&self) -> bool {
        *self == Style::PLAIN
    }
}

/// A run of inline text sharing one style combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::PLAIN)
    }
}
