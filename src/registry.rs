use crate::config::ModelsConfig;

/// Read-only catalogue of the models clients may pick from
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: ModelsConfig,
}

impl ModelRegistry {
    pub fn new(models: ModelsConfig) -> Self {
        Self { models }
    }

    /// The registry as configured, provider family by provider family
    pub fn models(&self) -> &ModelsConfig {
        &self.models
    }

    /// Whether `model` is served by the hosted chat-completion API.
    ///
    /// Everything else, listed or not, is handed to the local runtime.
    pub fn is_hosted(&self, model: &str) -> bool {
        self.models.openai.iter().any(|m| m == model)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(ModelsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = ModelRegistry::default();
        assert_eq!(registry.models().openai, vec!["gpt-3.5-turbo", "gpt-4"]);
        assert_eq!(
            registry.models().huggingface,
            vec![
                "facebook/bart-large-cnn",
                "google/pegasus-xsum",
                "mistralai/Mistral-7B-v0.1"
            ]
        );
    }

    #[test]
    fn test_is_hosted() {
        let registry = ModelRegistry::default();
        assert!(registry.is_hosted("gpt-4"));
        assert!(registry.is_hosted("gpt-3.5-turbo"));
        assert!(!registry.is_hosted("facebook/bart-large-cnn"));
        assert!(!registry.is_hosted("some/unlisted-model"));
        assert!(!registry.is_hosted("GPT-4"));
    }
}
