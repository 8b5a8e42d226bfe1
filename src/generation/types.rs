use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body sent to the generation service
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
}

/// One NDJSON line of the streamed reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateChunk {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Ways a generation attempt can fail; each maps to a fixed user-facing reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("failed to build the generation request")]
    RequestBuild,

    #[error("generation service unreachable or too slow")]
    Transport,

    #[error("failed reading the generation stream")]
    StreamRead,

    #[error("generation service returned no text")]
    EmptyAnswer,
}

impl GenerationFailure {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            GenerationFailure::RequestBuild => {
                "Omlouvám se, při přípravě požadavku došlo k chybě. Zkuste to prosím za chvíli znovu."
            }
            GenerationFailure::Transport => {
                "Omlouvám se, AI server je momentálně nedostupný nebo odpovídá příliš pomalu. Zkuste to prosím za chvíli znovu."
            }
            GenerationFailure::StreamRead => {
                "Omlouvám se, při čtení odpovědi AI došlo k chybě. Zkuste to prosím za chvíli znovu."
            }
            GenerationFailure::EmptyAnswer => {
                "Omlouvám se, AI nevrátila žádnou odpověď. Zkuste to prosím za chvíli znovu."
            }
        }
    }
}

/// Final outcome of a generation call. Always convertible into a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregatedAnswer {
    Generated(String),
    Fallback(GenerationFailure),
}

impl AggregatedAnswer {
    pub fn as_str(&self) -> &str {
        match self {
            AggregatedAnswer::Generated(text) => text,
            AggregatedAnswer::Fallback(kind) => kind.fallback_message(),
        }
    }

    pub fn into_reply(self) -> String {
        match self {
            AggregatedAnswer::Generated(text) => text,
            AggregatedAnswer::Fallback(kind) => kind.fallback_message().to_string(),
        }
    }
}

impl From<Result<String, GenerationFailure>> for AggregatedAnswer {
    fn from(result: Result<String, GenerationFailure>) -> Self {
        match result {
            Ok(text) => AggregatedAnswer::Generated(text),
            Err(kind) => AggregatedAnswer::Fallback(kind),
        }
    }
}
