//! Channel-backed confirmation for UI hosts
//!
//! Every question becomes a [`Prompt`] on an unbounded channel. The UI
//! renders it and answers through the prompt's reply handle. Opening a new
//! prompt closes the current one, which then resolves as declined.

use super::ConfirmationPort;
use crate::error::{BridgeError, BridgeResult};
use crate::types::TxSummary;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};

/// Question for the UI
#[derive(Debug)]
pub enum Prompt {
    Signing {
        id: u64,
        summary: TxSummary,
        reply: oneshot::Sender<bool>,
    },
    AccountSelection {
        id: u64,
        candidates: Vec<String>,
        reply: oneshot::Sender<usize>,
    },
}

impl Prompt {
    pub fn id(&self) -> u64 {
        match self {
            Prompt::Signing { id, .. } | Prompt::AccountSelection { id, .. } => *id,
        }
    }
}

struct OpenPrompt {
    id: u64,
    close: oneshot::Sender<()>,
}

/// Holds the single open prompt
#[derive(Default)]
struct PromptSlot {
    next_id: AtomicU64,
    open: Mutex<Option<OpenPrompt>>,
}

impl PromptSlot {
    /// Register a new prompt, closing whichever one was open
    fn open(&self) -> (u64, oneshot::Receiver<()>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (close, closed) = oneshot::channel();

        let previous = self
            .open
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(OpenPrompt { id, close });

        if let Some(previous) = previous {
            crate::log_debug!("confirm", "Closing superseded prompt", prompt_id = previous.id);
            let _ = previous.close.send(());
        }

        (id, closed)
    }

    fn finish(&self, id: u64) {
        let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        if open.as_ref().map(|p| p.id) == Some(id) {
            *open = None;
        }
    }

    fn is_open(&self) -> bool {
        self.open.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

/// [`ConfirmationPort`] that forwards prompts to a UI task over a channel
pub struct ChannelConfirmation {
    requests: mpsc::UnboundedSender<Prompt>,
    slot: PromptSlot,
}

impl ChannelConfirmation {
    /// Create the port and the receiving end for the UI
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Prompt>) {
        let (requests, receiver) = mpsc::unbounded_channel();
        (
            Self {
                requests,
                slot: PromptSlot::default(),
            },
            receiver,
        )
    }

    /// Whether a prompt is currently waiting for an answer
    pub fn is_prompt_open(&self) -> bool {
        self.slot.is_open()
    }
}

impl ConfirmationPort for ChannelConfirmation {
    async fn confirm_signing(&self, summary: &TxSummary) -> BridgeResult<bool> {
        let (id, mut closed) = self.slot.open();
        let (reply, answer) = oneshot::channel();

        let prompt = Prompt::Signing {
            id,
            summary: summary.clone(),
            reply,
        };
        if self.requests.send(prompt).is_err() {
            crate::log_warn!("confirm", "No UI attached, declining signing request");
            self.slot.finish(id);
            return Ok(false);
        }

        let confirmed = tokio::select! {
            biased;
            _ = &mut closed => false,
            answer = answer => answer.unwrap_or(false),
        };

        self.slot.finish(id);
        Ok(confirmed)
    }

    async fn select_account(&self, candidates: &[String]) -> BridgeResult<usize> {
        if candidates.len() <= 1 {
            return Ok(0);
        }

        let (id, mut closed) = self.slot.open();
        let (reply, answer) = oneshot::channel();

        let prompt = Prompt::AccountSelection {
            id,
            candidates: candidates.to_vec(),
            reply,
        };
        if self.requests.send(prompt).is_err() {
            crate::log_warn!("confirm", "No UI attached, using first account");
            self.slot.finish(id);
            return Ok(0);
        }

        let selected = tokio::select! {
            biased;
            _ = &mut closed => Err(BridgeError::UserCancelled),
            answer = answer => answer.map_err(|_| BridgeError::UserCancelled),
        };

        self.slot.finish(id);
        selected
    }
}
