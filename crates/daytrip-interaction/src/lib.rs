//! Outbound collaborators: the prompt builder and the OpenAI completion client.

pub mod openai_completion_client;
pub mod prompt;

pub use openai_completion_client::{OpenAiClientFactory, OpenAiCompletionClient};
pub use prompt::PromptBuilder;
