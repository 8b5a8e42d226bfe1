pub mod config;
pub mod error;
pub mod generation;
pub mod listings;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod snapshot;

pub use config::AppConfig;
pub use error::{ChatError, ConfigError};
pub use generation::{AggregatedAnswer, GenerationClient, GenerationFailure};
pub use listings::{ListingSource, MySqlListingReader};
pub use models::{ChatRequest, ChatResponse, FieldValue, ListingRecord};
pub use pipeline::ChatPipeline;
