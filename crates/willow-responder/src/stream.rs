//! Typewriter stream: reveals an already-known reply token by token.
//!
//! The emitter owns a repeating timer on a spawned task and pushes chunks
//! through an unbounded channel; the consumer drains them on its own loop.
//! Cancellation goes through a [`CancellationToken`] and is checked before
//! every send, so a cancelled stream never delivers another token and never
//! delivers the completion chunk.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use willow_core::StreamChunk;

/// Handle to a running stream; dropping it does not stop the stream
#[derive(Debug, Clone)]
pub struct StreamHandle {
    cancel: CancellationToken,
}

impl StreamHandle {
    /// Stop the stream: no further token or completion chunk will arrive
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Split text into word tokens with each whitespace run kept as its own
/// token, so concatenating the tokens reproduces the input exactly.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_ws = false;

    for ch in text.chars() {
        let is_ws = ch.is_whitespace();
        if !current.is_empty() && is_ws != current_is_ws {
            tokens.push(std::mem::take(&mut current));
        }
        current_is_ws = is_ws;
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Start revealing `text` one token per `chunk_interval` tick.
///
/// Returns the chunk receiver and a cancellation handle. After the final
/// token, exactly one [`StreamChunk::Done`] is sent and the task ends.
/// Only one stream should be in flight per conversation; starting a new one
/// is the caller's cue to cancel the previous handle first.
pub fn stream_text(
    text: &str,
    chunk_interval: Duration,
) -> (mpsc::UnboundedReceiver<StreamChunk>, StreamHandle) {
    let tokens = tokenize(text);
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    tokio::spawn(async move {
        let mut ticker = interval(chunk_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for token in tokens {
            tokio::select! {
                biased;
                _ = task_cancel.cancelled() => return,
                _ = ticker.tick() => {
                    if tx.send(StreamChunk::token(token)).is_err() {
                        return;
                    }
                }
            }
        }
        if task_cancel.is_cancelled() {
            return;
        }
        let _ = tx.send(StreamChunk::Done);
    });

    (rx, StreamHandle { cancel })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_whitespace_runs() {
        assert_eq!(tokenize("a  b\nc"), vec!["a", "  ", "b", "\n", "c"]);
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let text = "  leading, middle\t\tand trailing  ";
        assert_eq!(tokenize(text).concat(), text);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_is_lossless_and_completes_once() {
        let (mut rx, _handle) = stream_text("hello world", Duration::from_millis(30));

        let mut assembled = String::new();
        let mut completions = 0;
        while let Some(chunk) = rx.recv().await {
            match chunk {
                StreamChunk::Token { text } => assembled.push_str(&text),
                StreamChunk::Done => completions += 1,
            }
        }

        assert_eq!(assembled, "hello world");
        assert_eq!(completions, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_completes_immediately() {
        let (mut rx, _handle) = stream_text("", Duration::from_millis(30));
        assert_eq!(rx.recv().await, Some(StreamChunk::Done));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_all_delivery() {
        let (mut rx, handle) = stream_text(
            "one two three four five six",
            Duration::from_millis(30),
        );

        let first = rx.recv().await;
        assert!(matches!(first, Some(StreamChunk::Token { .. })));

        handle.cancel();

        // Channel closes without another token and without Done.
        while let Some(chunk) = rx.recv().await {
            panic!("no chunk should arrive after cancel, got {chunk:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_token() {
        let (mut rx, handle) = stream_text("never shown", Duration::from_secs(1));
        handle.cancel();
        assert_eq!(rx.recv().await, None);
    }
}
