use crate::config::{LocalConfig, read_env_secret};
use crate::error::SummarizeError;
use serde::{Deserialize, Serialize};

/// Upper bound on generated summary length, in tokens
pub const MAX_LENGTH: u32 = 130;
/// Lower bound on generated summary length, in tokens
pub const MIN_LENGTH: u32 = 30;

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct PipelineRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct PipelineOutput {
    summary_text: String,
}

/// Client for a locally-run summarization server.
///
/// The server owns model resolution and caching: the first request for a
/// model id may block while the runtime downloads and loads it.
pub struct LocalPipeline {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl LocalPipeline {
    pub fn new(config: &LocalConfig) -> Self {
        Self::with_token(config, read_env_secret(&config.env_var_api_key))
    }

    pub fn with_token(config: &LocalConfig, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Summarize `text` with greedy decoding under the fixed length bounds
    pub async fn summarize(&self, model: &str, text: &str) -> Result<String, SummarizeError> {
        let url = format!("{}/models/{}", self.api_base, model);
        let body = PipelineRequest {
            inputs: text,
            parameters: GenerationParameters {
                max_length: MAX_LENGTH,
                min_length: MIN_LENGTH,
                do_sample: false,
            },
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let local_err = |source| SummarizeError::Local {
            model: model.to_string(),
            source,
        };

        let response = request.send().await.map_err(local_err)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::LocalStatus {
                model: model.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let outputs: Vec<PipelineOutput> = response.json().await.map_err(local_err)?;
        Self::extract_summary(model, outputs)
    }

    /// The primary output's summary text
    fn extract_summary(model: &str, outputs: Vec<PipelineOutput>) -> Result<String, SummarizeError> {
        outputs
            .into_iter()
            .next()
            .map(|output| output.summary_text)
            .ok_or_else(|| SummarizeError::EmptyPipelineOutput(model.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn pipeline_for(server: &ServerGuard) -> LocalPipeline {
        let config = LocalConfig {
            api_base: server.url(),
            env_var_api_key: "UNUSED_LOCAL_TOKEN".to_string(),
        };
        LocalPipeline::with_token(&config, None)
    }

    #[tokio::test]
    async fn test_summarize_sends_fixed_generation_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/facebook/bart-large-cnn")
            .match_body(Matcher::Json(json!({
                "inputs": "A long article.",
                "parameters": {"max_length": 130, "min_length": 30, "do_sample": false}
            })))
            .with_status(200)
            .with_body(r#"[{"summary_text": "Short."}, {"summary_text": "Other."}]"#)
            .create_async()
            .await;

        let pipeline = pipeline_for(&server);
        let summary = pipeline
            .summarize("facebook/bart-large-cnn", "A long article.")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(summary, "Short.");
    }

    #[tokio::test]
    async fn test_summarize_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/google/pegasus-xsum")
            .match_header("authorization", "Bearer hf_secret")
            .with_status(200)
            .with_body(r#"[{"summary_text": "ok"}]"#)
            .create_async()
            .await;

        let config = LocalConfig {
            api_base: format!("{}/", server.url()),
            env_var_api_key: "UNUSED_LOCAL_TOKEN".to_string(),
        };
        let pipeline = LocalPipeline::with_token(&config, Some("hf_secret".to_string()));
        let summary = pipeline.summarize("google/pegasus-xsum", "text").await.unwrap();

        mock.assert_async().await;
        assert_eq!(summary, "ok");
    }

    #[tokio::test]
    async fn test_summarize_unknown_model() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/models/nobody/nothing")
            .with_status(404)
            .with_body("Model nobody/nothing does not exist")
            .create_async()
            .await;

        let pipeline = pipeline_for(&server);
        let err = pipeline.summarize("nobody/nothing", "text").await.unwrap_err();

        match err {
            SummarizeError::LocalStatus { model, status, body } => {
                assert_eq!(model, "nobody/nothing");
                assert_eq!(status, 404);
                assert!(body.contains("does not exist"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_summarize_empty_output() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/models/facebook/bart-large-cnn")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let pipeline = pipeline_for(&server);
        let err = pipeline
            .summarize("facebook/bart-large-cnn", "text")
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeError::EmptyPipelineOutput(_)));
    }

    #[tokio::test]
    async fn test_summarize_malformed_output() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/models/facebook/bart-large-cnn")
            .with_status(200)
            .with_body(r#"{"generated_text": "wrong shape"}"#)
            .create_async()
            .await;

        let pipeline = pipeline_for(&server);
        let err = pipeline
            .summarize("facebook/bart-large-cnn", "text")
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeError::Local { .. }));
    }

    #[tokio::test]
    async fn test_summarize_unreachable_runtime() {
        let config = LocalConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            env_var_api_key: "UNUSED_LOCAL_TOKEN".to_string(),
        };
        let pipeline = LocalPipeline::with_token(&config, None);
        let err = pipeline.summarize("facebook/bart-large-cnn", "text").await.unwrap_err();
        assert!(matches!(err, SummarizeError::Local { .. }));
    }
}
