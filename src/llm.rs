use anyhow::{anyhow, bail, Context, Result};
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use futures::future::BoxFuture;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::environment::{get_env_var_or, get_env_var_parsed};
use crate::{LLMClient, LLMParams, TARGET_LLM_REQUEST};

/// Prefix that upstream services put on failed completions.
const ERROR_MARKER: &str = "Error:";

/// An optional text-completion capability.
pub trait TextCompleter: Send + Sync {
    fn name(&self) -> &str;

    /// Whether completions should be requested at all.
    fn is_available(&self) -> bool {
        true
    }

    fn complete<'a>(&'a self, prompt: &'a str, max_tokens: u32) -> BoxFuture<'a, Result<String>>;
}

/// Network-backed completer for Ollama or OpenAI.
pub struct LlmCompleter {
    params: LLMParams,
    name: String,
}

impl LlmCompleter {
    pub fn new(params: LLMParams) -> Self {
        let backend = match params.llm_client {
            LLMClient::Ollama(_) => "ollama",
            LLMClient::OpenAI(_) => "openai",
        };
        let name = format!("{}:{}", backend, params.model);
        Self { params, name }
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        debug!(target: TARGET_LLM_REQUEST, "{}: sending prompt: {}", self.name, prompt);

        let response = match &self.params.llm_client {
            LLMClient::Ollama(ollama) => {
                let mut request =
                    GenerationRequest::new(self.params.model.clone(), prompt.to_string());
                request.options = Some(
                    GenerationOptions::default()
                        .temperature(self.params.temperature)
                        .num_predict(max_tokens as i32),
                );
                ollama
                    .generate(request)
                    .await
                    .map_err(|e| anyhow!("Ollama generation failed: {}", e))?
                    .response
            }
            LLMClient::OpenAI(client) => {
                let message = ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?;
                let request = CreateChatCompletionRequestArgs::default()
                    .model(self.params.model.as_str())
                    .temperature(self.params.temperature)
                    .max_completion_tokens(max_tokens)
                    .messages(vec![message.into()])
                    .build()?;
                client
                    .chat()
                    .create(request)
                    .await
                    .context("OpenAI chat completion failed")?
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.message.content)
                    .ok_or_else(|| anyhow!("OpenAI returned no content"))?
            }
        };

        debug!(target: TARGET_LLM_REQUEST, "{}: response received: {}", self.name, response);
        Ok(response)
    }
}

impl TextCompleter for LlmCompleter {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(&'a self, prompt: &'a str, max_tokens: u32) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.generate(prompt, max_tokens))
    }
}

/// Completer used when no language model is configured; sections are
/// always assembled extractively.
pub struct NullCompleter;

impl TextCompleter for NullCompleter {
    fn name(&self) -> &str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
        _max_tokens: u32,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async { Err::<String, _>(anyhow!("no language model configured")) })
    }
}

/// Requests a completion bounded by `limit`.
///
/// Errors, timeouts, empty output and output starting with an upstream error marker
/// all come back as `Err` so callers can fall back.
pub async fn generate_llm_response(
    completer: &dyn TextCompleter,
    prompt: &str,
    max_tokens: u32,
    limit: Duration,
) -> Result<String> {
    let text = match timeout(limit, completer.complete(prompt, max_tokens)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(
                target: TARGET_LLM_REQUEST,
                "{}: error generating response: {:#}",
                completer.name(),
                e
            );
            return Err(e);
        }
        Err(_) => {
            warn!(
                target: TARGET_LLM_REQUEST,
                "{}: request timed out after {}s",
                completer.name(),
                limit.as_secs()
            );
            bail!("language model request timed out after {}s", limit.as_secs());
        }
    };

    let text = text.trim();
    if text.is_empty() {
        warn!(target: TARGET_LLM_REQUEST, "{}: empty response", completer.name());
        bail!("language model returned an empty response");
    }
    if text.starts_with(ERROR_MARKER) {
        warn!(target: TARGET_LLM_REQUEST, "{}: response reports an error", completer.name());
        bail!("language model response reports an error");
    }
    Ok(text.to_string())
}

/// Builds the completer selected by `LLM_BACKEND` (`ollama`, `openai` or `none`).
pub fn completer_from_env() -> Arc<dyn TextCompleter> {
    let temperature: f32 = get_env_var_parsed("LLM_TEMPERATURE", 0.0);

    let params = match get_env_var_or("LLM_BACKEND", "ollama").to_lowercase().as_str() {
        "none" => {
            info!(target: TARGET_LLM_REQUEST, "Language model disabled, using extractive sections");
            return Arc::new(NullCompleter);
        }
        "openai" => {
            let api_key = get_env_var_or("OPENAI_API_KEY", "");
            if api_key.is_empty() {
                warn!(
                    target: TARGET_LLM_REQUEST,
                    "OPENAI_API_KEY is not set, using extractive sections"
                );
                return Arc::new(NullCompleter);
            }
            let config = OpenAIConfig::new().with_api_key(api_key);
            LLMParams {
                llm_client: LLMClient::OpenAI(OpenAIClient::with_config(config)),
                model: get_env_var_or("LLM_MODEL", "gpt-4o-mini"),
                temperature,
            }
        }
        _ => {
            let host = get_env_var_or("OLLAMA_HOST", "http://localhost");
            let port: u16 = get_env_var_parsed("OLLAMA_PORT", 11434);
            info!(target: TARGET_LLM_REQUEST, "Connecting to Ollama at {}:{}", host, port);
            LLMParams {
                llm_client: LLMClient::Ollama(Ollama::new(host, port)),
                model: get_env_var_or("LLM_MODEL", "llama3"),
                temperature,
            }
        }
    };

    Arc::new(LlmCompleter::new(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedCompleter(&'static str);

    impl TextCompleter for CannedCompleter {
        fn name(&self) -> &str {
            "canned"
        }

        fn complete<'a>(
            &'a self,
            _prompt: &'a str,
            _max_tokens: u32,
        ) -> BoxFuture<'a, Result<String>> {
            Box::pin(async move { Ok::<_, anyhow::Error>(self.0.to_string()) })
        }
    }

    struct StalledCompleter;

    impl TextCompleter for StalledCompleter {
        fn name(&self) -> &str {
            "stalled"
        }

        fn complete<'a>(
            &'a self,
            _prompt: &'a str,
            _max_tokens: u32,
        ) -> BoxFuture<'a, Result<String>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, anyhow::Error>("too late".to_string())
            })
        }
    }

    #[tokio::test]
    async fn test_usable_response_is_trimmed() {
        let completer = CannedCompleter("  A paragraph.  ");
        let text = generate_llm_response(&completer, "p", 10, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(text, "A paragraph.");
    }

    #[tokio::test]
    async fn test_error_marker_and_empty_output_are_rejected() {
        let limit = Duration::from_secs(1);
        let failed = CannedCompleter("Error: model overloaded");
        assert!(generate_llm_response(&failed, "p", 10, limit).await.is_err());
        let blank = CannedCompleter("   ");
        assert!(generate_llm_response(&blank, "p", 10, limit).await.is_err());
    }

    #[tokio::test]
    async fn test_marker_inside_paragraph_is_kept() {
        let completer =
            CannedCompleter("Compilers now explain each Error: with a suggested fix.");
        let text = generate_llm_response(&completer, "p", 10, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(text, "Compilers now explain each Error: with a suggested fix.");
    }

    #[tokio::test]
    async fn test_timeout_is_an_error() {
        let result =
            generate_llm_response(&StalledCompleter, "p", 10, Duration::from_millis(20)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_null_completer() {
        assert!(!NullCompleter.is_available());
        assert!(NullCompleter.complete("p", 10).await.is_err());
    }
}
