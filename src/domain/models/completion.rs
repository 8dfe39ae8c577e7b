use serde_json::Value;

/// Sampling defaults carried over from the original service configuration.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// A single prompt to send to a completion provider.
///
/// The model identifier is deliberately absent: it is provider configuration,
/// fixed when the client is constructed, so orchestrators stay provider-agnostic.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    prompt: String,
    system: Option<String>,
    max_tokens: u32,
    temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Provider response normalized to plain text, with the raw payload kept
/// for diagnostics.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    text: String,
    raw: Value,
}

impl CompletionResponse {
    pub fn new(text: impl Into<String>, raw: Value) -> Self {
        Self {
            text: text.into(),
            raw,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}
