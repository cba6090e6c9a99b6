// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Background assistant task and its request channel types.
//!
//! The task owns the model provider and processes one streamed turn at a
//! time.  Cancellation is explicit: the UI holds a [`CancelHandle`] whose
//! inner oneshot sender it drops (or takes) to stop the in-flight stream;
//! the task then emits [`AssistantEvent::Aborted`] with the partial text.

use std::sync::Arc;

use folio_model::{CompletionRequest, Message, ModelProvider, ResponseEvent};
use futures::StreamExt;
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::debug;

use crate::AssistantEvent;

/// Request sent from the UI to the background assistant task.
#[derive(Debug)]
pub enum AssistantRequest {
    /// Run one completion over the full conversation history.
    Submit { messages: Vec<Message> },
}

/// Shared cancel handle: holds the sender half of the current turn's oneshot
/// channel.  Dropping or taking the sender cancels the running turn.
pub type CancelHandle = Arc<Mutex<Option<oneshot::Sender<()>>>>;

/// Background task that owns the provider and forwards events back to the UI.
pub async fn assistant_task(
    provider: Arc<dyn ModelProvider>,
    mut rx: mpsc::Receiver<AssistantRequest>,
    tx: mpsc::Sender<AssistantEvent>,
    cancel_handle: CancelHandle,
) {
    while let Some(req) = rx.recv().await {
        match req {
            AssistantRequest::Submit { messages } => {
                debug!(n = messages.len(), "assistant task received submit");
                let (cancel_tx, cancel_rx) = oneshot::channel();
                *cancel_handle.lock().await = Some(cancel_tx);
                run_turn(provider.as_ref(), messages, &tx, cancel_rx).await;
                // Disarm: the turn is over, the handle must not cancel a
                // future turn.
                cancel_handle.lock().await.take();
            }
        }
    }
}

async fn run_turn(
    provider: &dyn ModelProvider,
    messages: Vec<Message>,
    tx: &mpsc::Sender<AssistantEvent>,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let req = CompletionRequest::streaming(messages);
    let mut stream = match provider.complete(req).await {
        Ok(s) => s,
        Err(e) => {
            let _ = tx.send(AssistantEvent::Error(e.to_string())).await;
            return;
        }
    };

    let mut acc = String::new();
    loop {
        tokio::select! {
            // The receiver resolves on send AND on sender drop; both mean
            // "stop reading the stream".
            _ = &mut cancel_rx => {
                debug!(streamed = acc.len(), "turn cancelled");
                let _ = tx.send(AssistantEvent::Aborted { partial_text: acc }).await;
                return;
            }
            item = stream.next() => match item {
                None => break,
                Some(Ok(ResponseEvent::TextDelta(t))) => {
                    if !t.is_empty() {
                        acc.push_str(&t);
                        let _ = tx.send(AssistantEvent::TextDelta(t)).await;
                    }
                }
                Some(Ok(ResponseEvent::Done)) => break,
                Some(Ok(ResponseEvent::Error(m))) => {
                    let _ = tx.send(AssistantEvent::Error(m)).await;
                    return;
                }
                Some(Err(e)) => {
                    let _ = tx.send(AssistantEvent::Error(e.to_string())).await;
                    return;
                }
            }
        }
    }

    let _ = tx.send(AssistantEvent::TextComplete(acc)).await;
    let _ = tx.send(AssistantEvent::TurnComplete).await;
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{Message, ResponseEvent, ScriptedMockProvider};

    async fn collect_turn_events(
        provider: impl ModelProvider + 'static,
        messages: Vec<Message>,
    ) -> Vec<AssistantEvent> {
        let provider: Arc<dyn ModelProvider> = Arc::new(provider);
        let (req_tx, req_rx) = mpsc::channel(4);
        let (ev_tx, mut ev_rx) = mpsc::channel(64);
        let cancel: CancelHandle = Arc::new(Mutex::new(None));
        let handle = tokio::spawn(assistant_task(provider, req_rx, ev_tx, cancel));

        req_tx.send(AssistantRequest::Submit { messages }).await.unwrap();
        drop(req_tx); // close channel so the task exits after the turn

        let mut events = Vec::new();
        while let Some(ev) = ev_rx.recv().await {
            events.push(ev);
        }
        handle.await.unwrap();
        events
    }

    #[tokio::test]
    async fn successful_turn_streams_then_completes() {
        let provider = ScriptedMockProvider::new(vec![vec![
            ResponseEvent::TextDelta("Hel".into()),
            ResponseEvent::TextDelta("lo".into()),
            ResponseEvent::Done,
        ]]);
        let events = collect_turn_events(provider, vec![Message::user("hi")]).await;

        assert!(matches!(&events[0], AssistantEvent::TextDelta(t) if t == "Hel"));
        assert!(matches!(&events[1], AssistantEvent::TextDelta(t) if t == "lo"));
        assert!(matches!(&events[2], AssistantEvent::TextComplete(t) if t == "Hello"));
        assert!(matches!(&events[3], AssistantEvent::TurnComplete));
    }

    #[tokio::test]
    async fn empty_deltas_are_not_forwarded() {
        let provider = ScriptedMockProvider::new(vec![vec![
            ResponseEvent::TextDelta(String::new()),
            ResponseEvent::TextDelta("x".into()),
            ResponseEvent::Done,
        ]]);
        let events = collect_turn_events(provider, vec![Message::user("hi")]).await;
        let deltas = events
            .iter()
            .filter(|e| matches!(e, AssistantEvent::TextDelta(_)))
            .count();
        assert_eq!(deltas, 1);
    }

    #[tokio::test]
    async fn mid_stream_error_reports_error_without_completion() {
        let provider = ScriptedMockProvider::fails_then_text("par", "boom", "unused");
        let events = collect_turn_events(provider, vec![Message::user("hi")]).await;

        assert!(matches!(&events[0], AssistantEvent::TextDelta(t) if t == "par"));
        assert!(matches!(&events[1], AssistantEvent::Error(m) if m == "boom"));
        assert!(
            !events.iter().any(|e| matches!(e, AssistantEvent::TextComplete(_))),
            "a failed turn must not commit"
        );
        assert!(!events.iter().any(|e| matches!(e, AssistantEvent::TurnComplete)));
    }

    #[tokio::test]
    async fn stream_ending_without_done_still_commits() {
        let provider = ScriptedMockProvider::new(vec![vec![ResponseEvent::TextDelta(
            "tail".into(),
        )]]);
        let events = collect_turn_events(provider, vec![Message::user("hi")]).await;
        assert!(events
            .iter()
            .any(|e| matches!(e, AssistantEvent::TextComplete(t) if t == "tail")));
    }

    // A provider whose stream never yields — used to exercise cancellation.
    struct PendingProvider;

    #[async_trait::async_trait]
    impl ModelProvider for PendingProvider {
        fn name(&self) -> &str {
            "pending"
        }
        fn model_name(&self) -> &str {
            "pending-model"
        }
        async fn complete(
            &self,
            _req: CompletionRequest,
        ) -> anyhow::Result<folio_model::ResponseStream> {
            Ok(Box::pin(futures::stream::pending()))
        }
    }

    #[tokio::test]
    async fn dropping_cancel_sender_aborts_the_turn() {
        let provider: Arc<dyn ModelProvider> = Arc::new(PendingProvider);
        let (req_tx, req_rx) = mpsc::channel(4);
        let (ev_tx, mut ev_rx) = mpsc::channel(64);
        let cancel: CancelHandle = Arc::new(Mutex::new(None));
        let cancel_ui = cancel.clone();
        tokio::spawn(assistant_task(provider, req_rx, ev_tx, cancel));

        req_tx
            .send(AssistantRequest::Submit { messages: vec![Message::user("hi")] })
            .await
            .unwrap();

        // Wait until the task has armed the cancel handle, then drop the
        // sender — the same gesture the UI makes on retopic or quit.
        loop {
            let armed = cancel_ui.lock().await.is_some();
            if armed {
                break;
            }
            tokio::task::yield_now().await;
        }
        drop(cancel_ui.lock().await.take());

        let ev = ev_rx.recv().await.unwrap();
        assert!(matches!(ev, AssistantEvent::Aborted { partial_text } if partial_text.is_empty()));
    }
}
