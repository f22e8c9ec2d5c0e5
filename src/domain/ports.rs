use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Failure reported by an [`AdviceBackend`].
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Remote text-completion service.
#[async_trait]
pub trait AdviceBackend: Send + Sync {
    /// Submits the prompt and returns the first candidate's text, or an empty
    /// string when the service produced no candidate.
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectivityStatus {
    Available,
    Unavailable,
    Losing,
    Lost,
}

pub trait ConnectivityObserver: Send + Sync {
    /// Starts a fresh observation. Consecutive duplicate statuses are
    /// suppressed; the observation stops once the receiver is dropped.
    fn observe(&self) -> mpsc::Receiver<ConnectivityStatus>;
}
