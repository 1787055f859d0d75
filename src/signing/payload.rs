//! Decoding of ledger signing requests
//!
//! The ledger hands the signing hook an opaque byte payload. A
//! [`SigningInputsDecoder`] turns it into the transaction commitment that
//! gets signed and the summary shown to the user.

use crate::error::{BridgeError, BridgeResult};
use crate::types::TxSummary;
use crate::utils::crypto::{decode_hex_array, keccak256};
use serde::{Deserialize, Serialize};

/// Decoded signing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningInputs {
    /// Transaction commitment digest (32 bytes)
    pub commitment: [u8; 32],
    pub summary: TxSummary,
}

impl SigningInputs {
    pub fn commitment_hex(&self) -> String {
        format!("0x{}", hex::encode(self.commitment))
    }

    /// Value actually sent for signing: keccak256 of the commitment bytes
    pub fn message_digest(&self) -> [u8; 32] {
        keccak256(&self.commitment)
    }
}

/// Turns a ledger signing payload into [`SigningInputs`]
pub trait SigningInputsDecoder: Send + Sync {
    fn decode(&self, payload: &[u8]) -> BridgeResult<SigningInputs>;
}

/// Decoder for the JSON signing envelope:
/// `{"commitment": "0x<64 hex>", "summary": {"inputNotes": [...], "outputNotes": [...]}}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSigningInputsDecoder;

#[derive(Serialize, Deserialize)]
struct SigningEnvelope {
    commitment: String,
    #[serde(default)]
    summary: TxSummary,
}

impl JsonSigningInputsDecoder {
    /// Produce the envelope this decoder accepts
    pub fn encode(inputs: &SigningInputs) -> BridgeResult<Vec<u8>> {
        let envelope = SigningEnvelope {
            commitment: inputs.commitment_hex(),
            summary: inputs.summary.clone(),
        };
        Ok(serde_json::to_vec(&envelope)?)
    }
}

impl SigningInputsDecoder for JsonSigningInputsDecoder {
    fn decode(&self, payload: &[u8]) -> BridgeResult<SigningInputs> {
        let envelope: SigningEnvelope = serde_json::from_slice(payload)
            .map_err(|e| BridgeError::encoding(format!("malformed signing inputs: {}", e)))?;
        let commitment = decode_hex_array::<32>(&envelope.commitment, "transaction commitment")?;

        Ok(SigningInputs {
            commitment,
            summary: envelope.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetSummary, InputNoteSummary};

    #[test]
    fn test_decode_envelope() {
        let payload = format!(
            r#"{{"commitment":"0x{}","summary":{{"inputNotes":[{{"id":"0x01","sender":"0xaa","assets":[{{"kind":"fungible","faucetId":"0xfa","amount":5}}]}}],"outputNotes":[]}}}}"#,
            "11".repeat(32)
        );

        let inputs = JsonSigningInputsDecoder.decode(payload.as_bytes()).unwrap();
        assert_eq!(inputs.commitment, [0x11; 32]);
        assert_eq!(
            inputs.summary.input_notes,
            vec![InputNoteSummary {
                id: "0x01".into(),
                sender: "0xaa".into(),
                assets: vec![AssetSummary::Fungible { faucet_id: "0xfa".into(), amount: 5 }],
            }]
        );
    }

    #[test]
    fn test_summary_is_optional() {
        let payload = format!(r#"{{"commitment":"{}"}}"#, "00".repeat(32));
        let inputs = JsonSigningInputsDecoder.decode(payload.as_bytes()).unwrap();
        assert!(inputs.summary.is_empty());
    }

    #[test]
    fn test_bad_payloads() {
        assert!(matches!(
            JsonSigningInputsDecoder.decode(b"not json"),
            Err(BridgeError::Encoding(_))
        ));

        let short = br#"{"commitment":"0xabcd"}"#;
        assert!(JsonSigningInputsDecoder.decode(short).is_err());
    }

    #[test]
    fn test_encode_is_accepted_by_decode() {
        let inputs = SigningInputs {
            commitment: [7; 32],
            summary: TxSummary::default(),
        };
        let bytes = JsonSigningInputsDecoder::encode(&inputs).unwrap();
        assert_eq!(JsonSigningInputsDecoder.decode(&bytes).unwrap(), inputs);
    }

    #[test]
    fn test_message_digest_is_keccak_of_commitment() {
        let inputs = SigningInputs {
            commitment: [0; 32],
            summary: TxSummary::default(),
        };
        assert_eq!(inputs.message_digest(), keccak256(&[0u8; 32]));
        assert_ne!(inputs.message_digest(), inputs.commitment);
    }
}
