pub mod client;
pub mod stream;
pub mod types;

pub use client::GenerationClient;
pub use stream::StreamAggregator;
pub use types::{AggregatedAnswer, GenerateChunk, GenerateRequest, GenerationFailure};
