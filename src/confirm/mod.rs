//! User Confirmation Port
//!
//! The bridge asks the user twice: which wallet to bridge when several are
//! connected, and whether to sign each transaction. Both questions go
//! through [`ConfirmationPort`] so the core logic runs headless in tests
//! and behind any UI in production.
//!
//! At most one prompt is open at a time. Implementations close the open
//! prompt before showing a new one; see [`ChannelConfirmation`].

pub mod channel;

pub use channel::{ChannelConfirmation, Prompt};

use crate::error::BridgeResult;
use crate::types::TxSummary;

/// Confirmation collaborator
#[allow(async_fn_in_trait)]
pub trait ConfirmationPort {
    /// Show the transaction summary and ask for approval
    async fn confirm_signing(&self, summary: &TxSummary) -> BridgeResult<bool>;

    /// Let the user choose one of the derived public keys.
    ///
    /// Returns 0 immediately for zero or one candidates.
    async fn select_account(&self, candidates: &[String]) -> BridgeResult<usize>;
}

/// Headless confirmation: approves every request and picks the first account.
///
/// Matches the behaviour of a host without any UI attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl ConfirmationPort for AutoApprove {
    async fn confirm_signing(&self, _summary: &TxSummary) -> BridgeResult<bool> {
        Ok(true)
    }

    async fn select_account(&self, _candidates: &[String]) -> BridgeResult<usize> {
        Ok(0)
    }
}
