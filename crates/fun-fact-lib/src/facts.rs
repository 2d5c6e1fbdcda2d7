//! Fun-fact prompt and response handling

use crate::{CompletionRequest, CompletionResponse};

/// Shown when the service answers without a usable candidate
pub const FALLBACK_FUN_FACT: &str = "No fun fact available";

/// Fixed parameters sent with every fun-fact request
#[derive(Debug, Clone, PartialEq)]
pub struct FactParams {
    pub model: String,
    /// Response length cap in tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f64,
}

impl Default for FactParams {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            max_tokens: 100,
            temperature: 0.7,
        }
    }
}

impl FactParams {
    /// Build the completion request for a place
    pub fn request_for(&self, title: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            prompt: fun_fact_prompt(title),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Prompt asking for a single-sentence fun fact about `title`
pub fn fun_fact_prompt(title: &str) -> String {
    format!(
        "You are a friendly tour guide. Give me one concise and interesting fun fact about \"{}\" in one sentence.",
        title
    )
}

/// Trimmed text of the first candidate, or [`FALLBACK_FUN_FACT`]
pub fn fact_text(response: &CompletionResponse) -> String {
    match response.first_text().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => FALLBACK_FUN_FACT.to_string(),
    }
}
