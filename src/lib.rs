pub mod analysis;
pub mod article;
pub mod config;
pub mod dedup;
pub mod environment;
pub mod llm;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod ranking;
pub mod record;
pub mod sentiment;
pub mod synthesis;
pub mod text;
pub mod topic;
pub mod vector;

use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use ollama_rs::Ollama;

pub const TARGET_PIPELINE: &str = "pipeline";
pub const TARGET_CLUSTER: &str = "cluster";
pub const TARGET_LLM_REQUEST: &str = "llm_request";

#[derive(Clone, Debug)]
pub enum LLMClient {
    Ollama(Ollama),
    OpenAI(OpenAIClient<OpenAIConfig>),
}

#[derive(Clone)]
pub struct LLMParams {
    pub llm_client: LLMClient,
    pub model: String,
    pub temperature: f32,
}

pub use article::Article;
pub use config::{PipelineConfig, RelevanceWeights, SynthesisConfig};
pub use llm::{completer_from_env, LlmCompleter, NullCompleter, TextCompleter};
pub use pipeline::{Pipeline, PipelineOutput};
pub use record::{ArticleRecord, SectionProvenance, SourceTopicRef};
pub use topic::{Polarity, SentimentSummary, Topic, TopicSkeleton};
