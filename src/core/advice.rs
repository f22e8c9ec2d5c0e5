use crate::core::prompt::PromptTemplate;
use crate::core::retry::{retry_with_backoff, BackoffPolicy};
use crate::domain::model::{AdviceOutcome, AdviceRequest};
use crate::domain::ports::{AdviceBackend, BackendError};
use crate::utils::error::{BotError, Result};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const MAX_INPUT_CHARS: usize = 1000;
pub const MIN_ANSWER_CHARS: usize = 10;

/// Tunables of a single advice request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSettings {
    pub timeout: Duration,
    pub backoff: BackoffPolicy,
    pub max_input_chars: usize,
    pub min_answer_chars: usize,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            backoff: BackoffPolicy::default(),
            max_input_chars: MAX_INPUT_CHARS,
            min_answer_chars: MIN_ANSWER_CHARS,
        }
    }
}

/// Trims the input and turns line breaks and tabs into single spaces.
pub fn sanitize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

impl AdviceRequest {
    pub fn new(input: &str, template: &PromptTemplate, max_chars: usize) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(BotError::InvalidInput {
                message: "Please enter a question.".to_string(),
            });
        }

        let length = trimmed.chars().count();
        if length > max_chars {
            return Err(BotError::InvalidInput {
                message: format!(
                    "Question is too long ({} characters, maximum {}).",
                    length, max_chars
                ),
            });
        }

        let question = sanitize(trimmed);
        let prompt = template.build(&question);
        Ok(Self { question, prompt })
    }
}

fn classify(err: BackendError) -> BotError {
    match err {
        BackendError::Status { code, message } if matches!(code, 401 | 403 | 404) => {
            BotError::AuthOrNotFound {
                status: code,
                message,
            }
        }
        BackendError::Status { code, message } => BotError::Transient {
            status: Some(code),
            message,
        },
        BackendError::Transport(message) => BotError::Transient {
            status: None,
            message,
        },
        BackendError::Decode(message) => BotError::Unexpected { message },
    }
}

impl From<Result<String>> for AdviceOutcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(answer) => AdviceOutcome::Success(answer),
            Err(e) => AdviceOutcome::Failure {
                kind: e.kind(),
                message: e.user_friendly_message(),
            },
        }
    }
}

/// Turns a user question into an answer from the backend, retrying
/// recoverable failures.
pub struct AdviceRequester<B: AdviceBackend> {
    backend: B,
    template: PromptTemplate,
    settings: RequestSettings,
}

impl<B: AdviceBackend> AdviceRequester<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            template: PromptTemplate::default(),
            settings: RequestSettings::default(),
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_settings(mut self, settings: RequestSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn request_advice(&self, input: &str) -> AdviceOutcome {
        self.try_request_advice(input).await.into()
    }

    pub async fn try_request_advice(&self, input: &str) -> Result<String> {
        let request = AdviceRequest::new(input, &self.template, self.settings.max_input_chars)?;
        tracing::debug!(
            "Requesting advice for a {}-character question",
            request.question().chars().count()
        );

        let request = &request;
        retry_with_backoff(&self.settings.backoff, BotError::is_retryable, |attempt| {
            self.attempt(request, attempt)
        })
        .await
    }

    async fn attempt(&self, request: &AdviceRequest, attempt: u32) -> Result<String> {
        tracing::debug!("Sending prompt to backend (attempt {})", attempt + 1);

        let response =
            tokio::time::timeout(self.settings.timeout, self.backend.generate(request.prompt()))
                .await;

        let answer = match response {
            Err(_) => {
                return Err(BotError::Timeout {
                    timeout_ms: self.settings.timeout.as_millis() as u64,
                })
            }
            Ok(Err(e)) => return Err(classify(e)),
            Ok(Ok(answer)) => answer,
        };

        let answer = answer.trim();
        let length = answer.chars().count();
        if length < self.settings.min_answer_chars {
            return Err(BotError::IncompleteResponse { length });
        }

        tracing::debug!("Received a {}-character answer", length);
        Ok(answer.to_string())
    }
}
