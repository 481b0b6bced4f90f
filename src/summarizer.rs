use crate::config::{Config, HostedConfig, read_env_secret};
use crate::error::SummarizeError;
use crate::models::SummaryResult;
use crate::pipeline::LocalPipeline;
use crate::registry::ModelRegistry;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes text concisely.";

/// Routes each model to the hosted API or the local pipeline
pub struct Summarizer {
    registry: Arc<ModelRegistry>,
    hosted: Option<Client<OpenAIConfig>>,
    hosted_env_var: String,
    local: LocalPipeline,
}

impl Summarizer {
    /// Build both backends, reading credentials from the environment
    pub fn new(config: &Config, registry: Arc<ModelRegistry>) -> Self {
        let api_key = read_env_secret(&config.hosted.env_var_api_key);
        Self::with_parts(
            registry,
            &config.hosted,
            api_key,
            LocalPipeline::new(&config.local),
        )
    }

    pub fn with_parts(
        registry: Arc<ModelRegistry>,
        hosted: &HostedConfig,
        api_key: Option<String>,
        local: LocalPipeline,
    ) -> Self {
        let hosted_client = api_key.map(|key| {
            let openai_config = OpenAIConfig::new()
                .with_api_key(key)
                .with_api_base(&hosted.api_base);
            Client::with_config(openai_config)
        });

        Self {
            registry,
            hosted: hosted_client,
            hosted_env_var: hosted.env_var_api_key.clone(),
            local,
        }
    }

    pub fn has_hosted_credentials(&self) -> bool {
        self.hosted.is_some()
    }

    /// Summarize `text` with both models, model1 first.
    ///
    /// The first failure aborts the comparison; no partial result escapes.
    /// Identical identifiers collapse into a single entry.
    pub async fn summarize_pair(
        &self,
        text: &str,
        model1: &str,
        model2: &str,
    ) -> Result<SummaryResult, SummarizeError> {
        let mut summaries = SummaryResult::new();

        for model in [model1, model2] {
            let summary = self.summarize(model, text).await?;
            summaries.insert(model.to_string(), summary);
        }

        Ok(summaries)
    }

    /// Summarize `text` with a single model
    pub async fn summarize(&self, model: &str, text: &str) -> Result<String, SummarizeError> {
        if self.registry.is_hosted(model) {
            tracing::debug!(model, "summarizing with hosted API");
            self.summarize_hosted(model, text).await
        } else {
            tracing::debug!(model, "summarizing with local pipeline");
            self.local.summarize(model, text).await
        }
    }

    async fn summarize_hosted(&self, model: &str, text: &str) -> Result<String, SummarizeError> {
        let client = self
            .hosted
            .as_ref()
            .ok_or_else(|| SummarizeError::MissingApiKey(self.hosted_env_var.clone()))?;

        let request = Self::build_request(model, text)?;
        let response = Self::execute_request(client, model, request).await?;

        Self::extract_content(model, response)
    }

    /// Build the two-message conversation asking for a concise summary
    fn build_request(model: &str, text: &str) -> Result<CreateChatCompletionRequest, SummarizeError> {
        let build_err = |e: async_openai::error::OpenAIError| SummarizeError::RequestBuild(e.to_string());

        let system_message: ChatCompletionRequestMessage = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT.to_string())
            .build()
            .map_err(build_err)?
            .into();

        let user_message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(format!(
                "Please summarize the following text concisely:\n\n{}",
                text
            ))
            .build()
            .map_err(build_err)?
            .into();

        CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages([system_message, user_message])
            .build()
            .map_err(build_err)
    }

    async fn execute_request(
        client: &Client<OpenAIConfig>,
        model: &str,
        request: CreateChatCompletionRequest,
    ) -> Result<CreateChatCompletionResponse, SummarizeError> {
        client
            .chat()
            .create(request)
            .await
            .map_err(|source| SummarizeError::Hosted {
                model: model.to_string(),
                source,
            })
    }

    /// First choice's message content
    fn extract_content(
        model: &str,
        response: CreateChatCompletionResponse,
    ) -> Result<String, SummarizeError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SummarizeError::EmptyCompletion(model.to_string()))
    }
}
