use crate::config::GenerationSettings;
use crate::error::ConfigError;
use crate::generation::stream::StreamAggregator;
use crate::generation::types::{AggregatedAnswer, GenerateRequest, GenerationFailure};
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error, info, warn};

/// Streaming client for the local generation service (Ollama `/api/generate`).
///
/// One call, one outbound request, no retries. Every failure is folded into
/// an [`AggregatedAnswer::Fallback`] so callers always get a reply string.
pub struct GenerationClient {
    client: Client,
    url: String,
    model: String,
}

impl GenerationClient {
    /// Create a client with the configured endpoint, model and timeout
    pub fn new(settings: &GenerationSettings) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            model: settings.model.clone(),
        })
    }

    /// Generate an answer for `prompt`
    pub async fn generate(&self, prompt: &str) -> AggregatedAnswer {
        let answer = AggregatedAnswer::from(self.stream_answer(prompt).await);

        match &answer {
            AggregatedAnswer::Generated(text) => {
                info!("Generated answer ({} chars)", text.chars().count())
            }
            AggregatedAnswer::Fallback(kind) => warn!("Generation failed: {}", kind),
        }
        answer
    }

    async fn stream_answer(&self, prompt: &str) -> Result<String, GenerationFailure> {
        let payload = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
        };

        let body = serde_json::to_vec(&payload).map_err(|e| {
            error!("Failed to serialize generation request: {}", e);
            GenerationFailure::RequestBuild
        })?;

        let request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
            .map_err(|e| {
                error!("Failed to build generation request: {}", e);
                GenerationFailure::RequestBuild
            })?;

        debug!(
            "Sending generation request to {} (model {}, {} prompt chars)",
            self.url,
            self.model,
            prompt.chars().count()
        );

        let response = self.client.execute(request).await.map_err(|e| {
            warn!("Generation service unreachable: {}", e);
            GenerationFailure::Transport
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation service returned status {}: {}", status, body);
            return Err(GenerationFailure::Transport);
        }

        debug!("Streaming generation response");
        let mut aggregator = StreamAggregator::new();
        let mut stream = response.bytes_stream();

        while let Some(item) = stream.next().await {
            let bytes = item.map_err(|e| {
                if e.is_timeout() {
                    warn!("Generation stream timed out: {}", e);
                    GenerationFailure::Transport
                } else {
                    warn!("Failed reading generation stream: {}", e);
                    GenerationFailure::StreamRead
                }
            })?;

            if aggregator.feed(&bytes)? {
                debug!("Generation service marked the stream done");
                break;
            }
        }

        aggregator.finish()
    }
}
