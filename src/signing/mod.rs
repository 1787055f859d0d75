//! Transaction Signing Module
//!
//! Bridges the ledger's signing hook to the remote EVM signer:
//! 1. Decode the signing inputs handed over by the ledger
//! 2. Ask the user to confirm (and run the host's own confirmation step)
//! 3. Sign `keccak256(commitment)` with the provider wallet
//! 4. Serialize the signature the way the ledger expects

pub mod payload;
pub mod relay;
pub mod signature;

pub use payload::{JsonSigningInputsDecoder, SigningInputs, SigningInputsDecoder};
pub use relay::SigningRelay;
pub use signature::{adapt_signature, SIGNATURE_PADDING};

use crate::confirm::ConfirmationPort;
use crate::error::BridgeResult;
use crate::types::TxSummary;
use crate::wallet::WalletProvider;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host-supplied step run after the built-in confirmation and before the
/// signer is called. Returning an error aborts signing with that error.
pub type CustomSignConfirmStep =
    Arc<dyn Fn(TxSummary) -> BoxFuture<'static, BridgeResult<()>> + Send + Sync>;

/// Wrap an async closure as a [`CustomSignConfirmStep`]
pub fn custom_sign_confirm_step<F, Fut>(step: F) -> CustomSignConfirmStep
where
    F: Fn(TxSummary) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = BridgeResult<()>> + 'static,
{
    Arc::new(move |summary| Box::pin(step(summary)))
}

/// Signing hook handed to the ledger client.
///
/// `context` is the public-key commitment of the signing account and
/// `signing_inputs` the encoded transaction to sign. The result is the
/// serialized auth signature.
pub trait SigningCallback: Send + Sync {
    fn sign<'a>(
        &'a self,
        context: &'a [u8],
        signing_inputs: &'a [u8],
    ) -> BoxFuture<'a, BridgeResult<Vec<u8>>>;
}

impl<W, P> SigningCallback for SigningRelay<W, P>
where
    W: WalletProvider + Send + Sync,
    P: ConfirmationPort + Send + Sync,
{
    fn sign<'a>(
        &'a self,
        context: &'a [u8],
        signing_inputs: &'a [u8],
    ) -> BoxFuture<'a, BridgeResult<Vec<u8>>> {
        Box::pin(SigningRelay::sign(self, context, signing_inputs))
    }
}
