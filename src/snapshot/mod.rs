pub mod formatter;

pub use formatter::{format_for_prompt, format_for_prompt_bounded};

/// Size limit applied to the snapshot block before it goes into the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotBudget {
    #[default]
    Unbounded,
    /// Upper bound in characters for header, records and omission line.
    /// The first record is kept even when it and the omission line overshoot.
    MaxChars(usize),
}

impl From<Option<usize>> for SnapshotBudget {
    fn from(limit: Option<usize>) -> Self {
        match limit {
            Some(max) => SnapshotBudget::MaxChars(max),
            None => SnapshotBudget::Unbounded,
        }
    }
}
