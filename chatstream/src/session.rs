//! Conversation state for the terminal front-end

use std::future::Future;
use std::io;

use chatstream_llm::{LlmError, Message, StreamOrchestrator};
use futures_util::StreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// How a turn ended
#[derive(Debug)]
pub enum TurnOutcome {
    /// The vendor finished; holds the full reply
    Completed(String),
    /// The user interrupted the reply
    Cancelled,
    /// The vendor call or its stream failed
    Failed(LlmError),
}

/// Initial history for a conversation
///
/// An empty system prompt seeds nothing.
pub fn seed_history(system: &str) -> Vec<Message> {
    if system.is_empty() {
        Vec::new()
    } else {
        vec![Message::system(system)]
    }
}

/// One conversation against one provider
pub struct Session {
    orchestrator: StreamOrchestrator,
    history: Vec<Message>,
    seeded: usize,
}

impl Session {
    /// Start a conversation seeded with `system`
    pub fn new(orchestrator: StreamOrchestrator, system: &str) -> Self {
        let history = seed_history(system);
        let seeded = history.len();

        Self {
            orchestrator,
            history,
            seeded,
        }
    }

    /// Messages exchanged so far, system prompt first
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Forget every turn, keeping the system prompt
    pub fn clear(&mut self) {
        self.history.truncate(self.seeded);
    }

    /// Send `input` and write the reply to `out` as it streams
    ///
    /// A completed reply is appended to the history. A cancelled or failed
    /// turn is dropped entirely, user message included, so the history
    /// keeps alternating between user and assistant. A write error on `out`
    /// drops the turn the same way before it is returned.
    pub async fn send<W, C>(&mut self, input: String, out: &mut W, cancel: C) -> io::Result<TurnOutcome>
    where
        W: AsyncWrite + Unpin,
        C: Future<Output = ()>,
    {
        self.history.push(Message::user(input));

        let outcome = tokio::select! {
            outcome = stream_reply(&self.orchestrator, &self.history, out) => outcome,
            () = cancel => Ok(TurnOutcome::Cancelled),
        };

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                self.history.pop();
                return Err(e);
            }
        };

        match &outcome {
            TurnOutcome::Completed(reply) => self.history.push(Message::assistant(reply.clone())),
            TurnOutcome::Cancelled | TurnOutcome::Failed(_) => {
                self.history.pop();
            }
        }

        Ok(outcome)
    }
}

/// Stream one reply to `out`, skipping chunks without visible text
async fn stream_reply<W>(
    orchestrator: &StreamOrchestrator,
    history: &[Message],
    out: &mut W,
) -> io::Result<TurnOutcome>
where
    W: AsyncWrite + Unpin,
{
    let mut chunks = match orchestrator.run_turn(history).await {
        Ok(chunks) => chunks,
        Err(e) => return Ok(TurnOutcome::Failed(e)),
    };

    let mut reply = String::new();

    while let Some(chunk) = chunks.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => return Ok(TurnOutcome::Failed(e)),
        };

        if let Some(text) = chunk.visible_text() {
            out.write_all(text.as_bytes()).await?;
            out.flush().await?;
            reply.push_str(text);
        }
    }

    Ok(TurnOutcome::Completed(reply))
}
