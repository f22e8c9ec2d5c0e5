pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{GeminiBackend, TcpProbeObserver};
pub use crate::config::AppConfig;
pub use crate::core::advice::{AdviceRequester, RequestSettings};
pub use crate::core::chat::ChatState;
pub use crate::core::markdown::{parse_blocks, parse_inline, render, TerminalRenderer};
pub use crate::core::retry::{retry_with_backoff, BackoffPolicy};
pub use crate::domain::model::{AdviceOutcome, Block, Document, ErrorKind, Span, Style};
pub use crate::utils::error::{BotError, Result};
