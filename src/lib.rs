pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    AnalyzeContractUseCase, AnswerQuestionUseCase, CompletionClient, ContractAnalysis,
    PromptBuilder, SessionStore, NO_ANSWER_FALLBACK,
};

pub use connector::{
    api::{build_router, Container, ContainerConfig, ProviderKind},
    AnthropicClient, ExpiryPolicy, InMemorySessionStore, MockCompletionClient, OpenAiClient,
};

pub use domain::{
    AnalysisResult, CompletionRequest, CompletionResponse, DomainError, ResponseValidator, Session,
};
