//! Signing relay between the ledger and the remote signer

use super::payload::{JsonSigningInputsDecoder, SigningInputsDecoder};
use super::signature::adapt_signature;
use super::CustomSignConfirmStep;
use crate::confirm::ConfirmationPort;
use crate::error::{BridgeError, BridgeResult};
use crate::wallet::WalletProvider;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::sync::Arc;
use std::time::Instant;

/// Signs ledger transactions with a provider-held EVM key.
///
/// For every request the relay decodes the signing inputs, asks for user
/// approval (unless disabled), runs the host's custom confirmation step,
/// sends `base64(keccak256(commitment))` to the provider and serializes the
/// returned signature for the ledger.
pub struct SigningRelay<W, P> {
    provider: Arc<W>,
    confirmation: Arc<P>,
    wallet_id: String,
    show_signing_modal: bool,
    custom_step: Option<CustomSignConfirmStep>,
    decoder: Arc<dyn SigningInputsDecoder>,
}

impl<W, P> Clone for SigningRelay<W, P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            confirmation: Arc::clone(&self.confirmation),
            wallet_id: self.wallet_id.clone(),
            show_signing_modal: self.show_signing_modal,
            custom_step: self.custom_step.clone(),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<W: WalletProvider, P: ConfirmationPort> SigningRelay<W, P> {
    pub fn new(provider: Arc<W>, confirmation: Arc<P>, wallet_id: impl Into<String>) -> Self {
        Self {
            provider,
            confirmation,
            wallet_id: wallet_id.into(),
            show_signing_modal: true,
            custom_step: None,
            decoder: Arc::new(JsonSigningInputsDecoder),
        }
    }

    pub fn with_signing_modal(mut self, show: bool) -> Self {
        self.show_signing_modal = show;
        self
    }

    pub fn with_custom_step(mut self, step: Option<CustomSignConfirmStep>) -> Self {
        self.custom_step = step;
        self
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn SigningInputsDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn wallet_id(&self) -> &str {
        &self.wallet_id
    }

    /// Produce a ledger-format signature for one signing request.
    ///
    /// `_context` is the public-key commitment the ledger passes along; the
    /// relay signs with its bound wallet regardless.
    pub async fn sign(&self, _context: &[u8], signing_inputs: &[u8]) -> BridgeResult<Vec<u8>> {
        let inputs = self.decoder.decode(signing_inputs)?;
        let digest = inputs.message_digest();

        crate::log_debug!(
            "signing",
            "Signing request",
            wallet_id = self.wallet_id,
            commitment = inputs.commitment_hex(),
            input_notes = inputs.summary.input_notes.len(),
            output_notes = inputs.summary.output_notes.len()
        );

        if self.show_signing_modal {
            let confirmed = self.confirmation.confirm_signing(&inputs.summary).await?;
            if !confirmed {
                crate::log_info!("signing", "User declined transaction", wallet_id = self.wallet_id);
                return Err(BridgeError::UserCancelled);
            }
        }

        if let Some(step) = &self.custom_step {
            step(inputs.summary.clone()).await?;
        }

        let message = STANDARD.encode(digest);
        let started = Instant::now();
        let response = self
            .provider
            .sign_message(&self.wallet_id, &message)
            .await
            .map_err(|e| {
                crate::log_error!("signing", "Remote signer failed", wallet_id = self.wallet_id, error = e);
                BridgeError::remote_signer(e)
            })?;

        crate::log_info!(
            "signing",
            "Transaction signed",
            wallet_id = self.wallet_id,
            elapsed_ms = started.elapsed().as_millis()
        );

        adapt_signature(&response.signature)
    }
}
