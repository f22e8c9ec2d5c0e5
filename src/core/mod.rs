pub mod advice;
pub mod chat;
pub mod markdown;
pub mod prompt;
pub mod retry;

pub use crate::domain::model::{AdviceOutcome, AdviceRequest, Block, Document, ErrorKind, Span, Style};
pub use crate::domain::ports::{AdviceBackend, BackendError, ConnectivityObserver};
pub use crate::utils::error::Result;
