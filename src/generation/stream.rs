use crate::generation::types::{GenerateChunk, GenerationFailure};
use tracing::{debug, warn};

/// Cap on how much undecoded body text is kept for the empty-answer log
const DIAGNOSTIC_LIMIT: usize = 2048;

/// Longest stream line accepted before the read is abandoned
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Incremental NDJSON decoder that joins the `response` fragments.
///
/// Bytes can arrive split anywhere; complete lines are decoded as soon as
/// their newline shows up and fragments are appended in arrival order.
/// Lines that fail to decode are logged and skipped. A line longer than
/// [`MAX_LINE_BYTES`] fails the whole read.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    pending: Vec<u8>,
    /// Prefix of `pending` already known to hold no newline
    scanned: usize,
    answer: String,
    discarded: String,
    done: bool,
    lines_seen: usize,
    lines_skipped: usize,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a body chunk. Returns `Ok(true)` once the service marked the
    /// stream done.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<bool, GenerationFailure> {
        if self.done {
            return Ok(true);
        }

        self.pending.extend_from_slice(bytes);
        while let Some(offset) = self.pending[self.scanned..]
            .iter()
            .position(|b| *b == b'\n')
        {
            let pos = self.scanned + offset;
            if pos > MAX_LINE_BYTES {
                return Err(line_too_long(pos));
            }
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.scanned = 0;
            self.process_line(&line[..pos]);
            if self.done {
                return Ok(true);
            }
        }

        if self.pending.len() > MAX_LINE_BYTES {
            return Err(line_too_long(self.pending.len()));
        }
        self.scanned = self.pending.len();
        Ok(false)
    }

    /// Flush the trailing unterminated line and settle the outcome
    pub fn finish(mut self) -> Result<String, GenerationFailure> {
        if !self.done && !self.pending.is_empty() {
            let tail = std::mem::take(&mut self.pending);
            self.process_line(&tail);
        }

        debug!(
            lines = self.lines_seen,
            skipped = self.lines_skipped,
            "Generation stream finished"
        );

        if self.answer.is_empty() {
            let unread = String::from_utf8_lossy(&self.pending).into_owned();
            self.keep_for_diagnostics(&unread);
            warn!(
                body = %self.discarded,
                "Generation service returned no text"
            );
            return Err(GenerationFailure::EmptyAnswer);
        }

        Ok(self.answer)
    }

    fn process_line(&mut self, raw: &[u8]) {
        let line = trim_ascii(raw);
        if line.is_empty() {
            return;
        }
        self.lines_seen += 1;

        let chunk: GenerateChunk = match serde_json::from_slice(line) {
            Ok(chunk) => chunk,
            Err(e) => {
                let text = String::from_utf8_lossy(line);
                warn!(line = %text, error = %e, "Skipping malformed stream line");
                self.lines_skipped += 1;
                self.keep_for_diagnostics(&text);
                return;
            }
        };

        if let Some(error) = &chunk.error {
            warn!(error = %error, "Generation service reported an error in the stream");
            self.keep_for_diagnostics(&String::from_utf8_lossy(line));
        }

        if let Some(fragment) = chunk.response {
            self.answer.push_str(&fragment);
        }

        if chunk.done {
            self.done = true;
        }
    }

    fn keep_for_diagnostics(&mut self, text: &str) {
        if text.is_empty() || self.discarded.len() >= DIAGNOSTIC_LIMIT {
            return;
        }
        if !self.discarded.is_empty() {
            self.discarded.push('\n');
        }
        let room = DIAGNOSTIC_LIMIT.saturating_sub(self.discarded.len());
        let mut cut = text.len().min(room);
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        self.discarded.push_str(&text[..cut]);
    }
}

fn line_too_long(len: usize) -> GenerationFailure {
    warn!(bytes = len, limit = MAX_LINE_BYTES, "Generation stream line too long");
    GenerationFailure::StreamRead
}

fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}
