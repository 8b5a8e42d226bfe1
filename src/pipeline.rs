use crate::config::AppConfig;
use crate::error::{ChatError, ConfigError};
use crate::generation::{AggregatedAnswer, GenerationClient};
use crate::listings::{ListingSource, MySqlListingReader};
use crate::models::{ChatRequest, ChatResponse};
use crate::prompt::build_prompt;
use crate::snapshot::{format_for_prompt_bounded, SnapshotBudget};
use tracing::{debug, info};

/// Chat response pipeline: listings → snapshot → prompt → streamed answer.
///
/// Holds no per-request state, so one instance can serve concurrent requests.
pub struct ChatPipeline {
    source: Box<dyn ListingSource>,
    generator: GenerationClient,
    budget: SnapshotBudget,
}

impl ChatPipeline {
    pub fn new(
        source: Box<dyn ListingSource>,
        generator: GenerationClient,
        budget: SnapshotBudget,
    ) -> Self {
        Self {
            source,
            generator,
            budget,
        }
    }

    /// Wire the MySQL reader and generation client from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let source = MySqlListingReader::new(&config.database);
        let generator = GenerationClient::new(&config.generation)?;
        Ok(Self::new(
            Box::new(source),
            generator,
            config.snapshot_max_chars.into(),
        ))
    }

    /// Answer one user query.
    ///
    /// Only a datastore failure is returned as an error; every generation
    /// problem comes back as a fallback answer.
    pub async fn answer(&self, query: &str) -> Result<AggregatedAnswer, ChatError> {
        let listings = self.source.fetch_available_listings().await?;
        debug!(
            "Loaded {} listings from {}",
            listings.len(),
            self.source.source_name()
        );

        let snapshot = format_for_prompt_bounded(&listings, self.budget);
        let prompt = build_prompt(&snapshot, query);
        info!(
            "Prompt assembled: {} listings, {} snapshot chars",
            listings.len(),
            snapshot.chars().count()
        );

        Ok(self.generator.generate(&prompt).await)
    }

    /// Handle an inbound chat request and shape the reply for the HTTP layer
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        if !request.session_id.is_empty() {
            debug!("Chat request for session {}", request.session_id);
        }
        let answer = self.answer(&request.user_input).await?;
        Ok(ChatResponse {
            bot_reply: answer.into_reply(),
        })
    }
}
