use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors from either summarization backend.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("API key not configured: set {0}")]
    MissingApiKey(String),

    #[error("hosted completion failed for {model}: {source}")]
    Hosted {
        model: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },

    #[error("hosted completion for {0} returned no content")]
    EmptyCompletion(String),

    #[error("failed to build completion request: {0}")]
    RequestBuild(String),

    #[error("local pipeline request failed for {model}: {source}")]
    Local {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("local pipeline returned {status} for {model}: {body}")]
    LocalStatus {
        model: String,
        status: u16,
        body: String,
    },

    #[error("local pipeline returned no summary for {0}")]
    EmptyPipelineOutput(String),
}

/// Errors from the in-memory rating store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("rating store lock poisoned")]
    Poisoned,
}

/// Failure of a request after it passed JSON validation.
///
/// Every variant maps to a 500 carrying the error message as `detail`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Summarize(#[from] SummarizeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}
