//! Incremental decoder for newline-delimited JSON chat streams.
//!
//! Transport chunks do not respect line boundaries: a line may span several
//! reads and one read may carry several lines. Bytes are buffered until a
//! newline arrives, so multi-byte characters split across reads survive.
//! The leftover after the stream ends is parsed once more; if it is not
//! valid JSON it is dropped.

use super::error::{OllamaError, Result};
use super::protocol::ChatResponse;
use duet_application::UpdateSink;
use futures::{Stream, StreamExt};
use tracing::trace;

/// Consume a chat stream, reporting every fragment to `on_update`.
///
/// Returns the accumulated text, trimmed. A line carrying `error` aborts
/// with [`OllamaError::Generation`] and the partial text is discarded.
pub async fn decode_chat_stream<S, B, E>(mut stream: S, on_update: UpdateSink<'_>) -> Result<String>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut decoder = LineDecoder::default();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| OllamaError::Stream(e.to_string()))?;
        decoder.feed(chunk.as_ref(), on_update)?;
    }

    decoder.finish(on_update)
}

/// Line buffer plus the text accumulated so far.
#[derive(Debug, Default)]
struct LineDecoder {
    buffer: Vec<u8>,
    full: String,
}

impl LineDecoder {
    fn feed(&mut self, bytes: &[u8], on_update: UpdateSink<'_>) -> Result<()> {
        self.buffer.extend_from_slice(bytes);

        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let Ok(response) = serde_json::from_slice::<ChatResponse>(line.trim_ascii()) else {
                if !line.trim_ascii().is_empty() {
                    trace!("Skipping malformed stream line");
                }
                continue;
            };
            self.apply(response, on_update)?;
        }
        Ok(())
    }

    fn finish(mut self, on_update: UpdateSink<'_>) -> Result<String> {
        let tail = std::mem::take(&mut self.buffer);
        let tail = tail.trim_ascii();
        if !tail.is_empty() {
            match serde_json::from_slice::<ChatResponse>(tail) {
                Ok(response) => self.apply(response, on_update)?,
                Err(_) => trace!("Ignoring incomplete trailing stream line"),
            }
        }
        Ok(self.full.trim().to_string())
    }

    fn apply(&mut self, response: ChatResponse, on_update: UpdateSink<'_>) -> Result<()> {
        if let Some(error) = response.error_message() {
            return Err(OllamaError::Generation(error));
        }

        let piece = response.content();
        if !piece.is_empty() {
            self.full.push_str(piece);
            on_update(&self.full, piece);
        }
        Ok(())
    }
}
