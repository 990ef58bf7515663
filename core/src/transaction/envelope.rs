//! The immutable [`Transaction`]: a body, an optional signature, and the
//! values derived from them.
//!
//! Encodings and the signing hash are computed once, at construction, so
//! every accessor after that is infallible except the ones that need a
//! complete signature (`id`, `origin`, `delegator`).

use alloy_primitives::{Address, Bytes, B256};
use tracing::trace;

use super::encoding::{self, encode_body, normalize_reserved};
use super::error::TransactionError;
use super::gas::intrinsic_gas;
use super::types::TransactionBody;
use crate::config::{DELEGATED_SIGNATURE_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::{blake2b256, blake2b256_multi, recover_address, SignatureError};

/// A Thor transaction.
///
/// Only created by [`Transaction::unsigned`], [`Transaction::with_signature`],
/// [`super::decode`], and the signing functions. Signing never mutates an
/// existing value; it returns a new one.
///
/// # Example
///
/// ```
/// use thor_tx_core::transaction::{Transaction, TransactionBodyBuilder};
///
/// let body = TransactionBodyBuilder::new(0x27).nonce(1).build();
/// let tx = Transaction::unsigned(body).unwrap();
/// assert!(!tx.is_signed());
/// assert!(tx.id().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    body: TransactionBody,
    signature: Option<Bytes>,
    signing_hash: B256,
    encoded: Bytes,
}

impl Transaction {
    /// Wrap a body without a signature.
    ///
    /// The body's `reserved` field is stored in canonical form (the form
    /// decoding yields), so `decode(tx.encoded())` compares equal to `tx`.
    pub fn unsigned(body: TransactionBody) -> Result<Self, TransactionError> {
        Self::build(body, None)
    }

    /// Attach a signature to a body.
    ///
    /// Accepts 65 bytes on any body (on a delegated body that is the
    /// sender half only, and the result is not yet signed), and 130 bytes
    /// on a delegated body.
    pub fn with_signature(
        body: TransactionBody,
        signature: impl Into<Bytes>,
    ) -> Result<Self, TransactionError> {
        let signature = signature.into();
        let len = signature.len();
        let valid = len == SIGNATURE_LENGTH
            || (len == DELEGATED_SIGNATURE_LENGTH && body.is_delegated());
        if !valid {
            return Err(TransactionError::InvalidSignature {
                operation: "with_signature",
                source: SignatureError::InvalidLength {
                    expected: expected_signature_length(&body),
                    actual: len,
                },
            });
        }
        Self::build(body, Some(signature))
    }

    /// Decoded signed transactions must carry a complete signature.
    pub(crate) fn decoded(
        body: TransactionBody,
        signature: Vec<u8>,
    ) -> Result<Self, TransactionError> {
        let expected = expected_signature_length(&body);
        if signature.len() != expected {
            return Err(TransactionError::InvalidSignature {
                operation: "decode",
                source: SignatureError::InvalidLength {
                    expected,
                    actual: signature.len(),
                },
            });
        }
        Self::build(body, Some(Bytes::from(signature)))
    }

    fn build(
        mut body: TransactionBody,
        signature: Option<Bytes>,
    ) -> Result<Self, TransactionError> {
        body.reserved = normalize_reserved(body.reserved.as_ref())?;

        let unsigned = encode_body(&body, None)?;
        let signing_hash = blake2b256(&unsigned);

        let complete = signature
            .as_ref()
            .is_some_and(|sig| sig.len() == expected_signature_length(&body));
        let encoded = match &signature {
            Some(sig) if complete => encode_body(&body, Some(sig))?,
            _ => unsigned,
        };

        trace!(
            hash = %signing_hash,
            signed = complete,
            len = encoded.len(),
            "transaction built"
        );
        Ok(Self {
            body,
            signature,
            signing_hash,
            encoded: Bytes::from(encoded),
        })
    }

    /// Decode a raw transaction. See [`super::decode`].
    pub fn decode(raw: &[u8], is_signed: bool) -> Result<Self, TransactionError> {
        encoding::decode(raw, is_signed)
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    /// The signature bytes, possibly only the sender half of a delegated
    /// transaction.
    pub fn signature(&self) -> Option<&Bytes> {
        self.signature.as_ref()
    }

    /// Whether the delegation feature bit is set.
    pub fn is_delegated(&self) -> bool {
        self.body.is_delegated()
    }

    /// True when a signature of the length the delegation flag requires is
    /// present: 65 bytes, or 130 when delegated.
    pub fn is_signed(&self) -> bool {
        self.signature
            .as_ref()
            .is_some_and(|sig| sig.len() == expected_signature_length(&self.body))
    }

    /// The signed encoding when fully signed, the unsigned one otherwise.
    pub fn encoded(&self) -> &Bytes {
        &self.encoded
    }

    /// The hash a signer signs.
    ///
    /// With `delegate_for` set to the sender's address this is the hash the
    /// gas payer signs instead: `blake2b256(signing_hash || address)`.
    pub fn signature_hash(&self, delegate_for: Option<&Address>) -> B256 {
        match delegate_for {
            None => self.signing_hash,
            Some(address) => blake2b256_multi(&[self.signing_hash.as_slice(), address.as_slice()]),
        }
    }

    /// Transaction id, the hash of the full signed encoding.
    pub fn id(&self) -> Result<B256, TransactionError> {
        self.require_signed("id")?;
        Ok(blake2b256(&self.encoded))
    }

    /// Address of the sender, recovered from the first signature.
    pub fn origin(&self) -> Result<Address, TransactionError> {
        let sig = self.signature.as_ref().ok_or(TransactionError::FieldUnavailable {
            operation: "origin",
            field: "origin",
            reason: "transaction is not signed",
        })?;
        recover_address(&self.signing_hash, &sig[..SIGNATURE_LENGTH]).map_err(|source| {
            TransactionError::InvalidSignature {
                operation: "origin",
                source,
            }
        })
    }

    /// Address of the gas payer, recovered from the second signature.
    pub fn delegator(&self) -> Result<Address, TransactionError> {
        if !self.is_delegated() {
            return Err(TransactionError::InvalidDelegationState {
                operation: "delegator",
                reason: "transaction is not delegated",
            });
        }
        self.require_signed("delegator")?;
        let origin = self.origin()?;
        let hash = self.signature_hash(Some(&origin));
        let sig: &[u8] = self.signature.as_ref().map_or(&[][..], |s| &s[..]);
        recover_address(&hash, &sig[SIGNATURE_LENGTH..]).map_err(|source| {
            TransactionError::InvalidSignature {
                operation: "delegator",
                source,
            }
        })
    }

    /// Gas charged before execution, from the clause list.
    pub fn intrinsic_gas(&self) -> u64 {
        intrinsic_gas(&self.body.clauses)
    }

    fn require_signed(&self, field: &'static str) -> Result<(), TransactionError> {
        if self.is_signed() {
            Ok(())
        } else {
            Err(TransactionError::FieldUnavailable {
                operation: field,
                field,
                reason: "transaction is not fully signed",
            })
        }
    }
}

fn expected_signature_length(body: &TransactionBody) -> usize {
    if body.is_delegated() {
        DELEGATED_SIGNATURE_LENGTH
    } else {
        SIGNATURE_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::types::Reserved;
    use crate::transaction::ErrorKind;
    use alloy_primitives::B64;

    fn body(reserved: Option<Reserved>) -> TransactionBody {
        TransactionBody {
            chain_tag: 1,
            block_ref: B64::ZERO,
            expiration: 32,
            clauses: vec![],
            gas_price_coef: 0,
            gas: 21_000,
            depends_on: None,
            nonce: 1,
            reserved,
        }
    }

    #[test]
    fn test_unsigned_accessors() {
        let tx = Transaction::unsigned(body(None)).unwrap();
        assert!(!tx.is_signed());
        assert!(!tx.is_delegated());
        assert!(tx.signature().is_none());
        assert_eq!(hex::encode(tx.encoded()), "cb018020c0808252088001c0");
        assert_eq!(tx.id().unwrap_err().kind(), ErrorKind::FieldUnavailable);
        assert_eq!(tx.origin().unwrap_err().kind(), ErrorKind::FieldUnavailable);
        assert_eq!(tx.intrinsic_gas(), 21_000);
    }

    #[test]
    fn test_signature_hash_separation() {
        let tx = Transaction::unsigned(body(None)).unwrap();
        let plain = tx.signature_hash(None);
        let delegated = tx.signature_hash(Some(&Address::repeat_byte(0x42)));
        assert_ne!(plain, delegated);
        assert_eq!(plain, blake2b256(tx.encoded()));
    }

    #[test]
    fn test_reserved_is_normalized() {
        let tx = Transaction::unsigned(body(Some(Reserved::default()))).unwrap();
        assert_eq!(tx.body().reserved, None);
        assert_eq!(tx, Transaction::unsigned(body(None)).unwrap());
    }

    #[test]
    fn test_with_signature_length_rules() {
        let plain = body(None);
        let delegated = body(Some(Reserved::delegated()));

        assert!(Transaction::with_signature(plain.clone(), vec![0u8; 65]).unwrap().is_signed());
        let err = Transaction::with_signature(plain, vec![0u8; 130]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSignature);

        let partial = Transaction::with_signature(delegated.clone(), vec![0u8; 65]).unwrap();
        assert!(!partial.is_signed());
        let unsigned = Transaction::unsigned(delegated.clone()).unwrap();
        assert_eq!(partial.encoded(), unsigned.encoded());

        let full = Transaction::with_signature(delegated.clone(), vec![0u8; 130]).unwrap();
        assert!(full.is_signed());
        assert!(Transaction::with_signature(delegated, vec![0u8; 64]).is_err());
    }

    #[test]
    fn test_delegator_requires_delegation() {
        let tx = Transaction::with_signature(body(None), vec![0u8; 65]).unwrap();
        assert_eq!(tx.delegator().unwrap_err().kind(), ErrorKind::InvalidDelegationState);

        let partial =
            Transaction::with_signature(body(Some(Reserved::delegated())), vec![0u8; 65]).unwrap();
        assert_eq!(partial.delegator().unwrap_err().kind(), ErrorKind::FieldUnavailable);
    }

    #[test]
    fn test_delegator_recovers_gas_payer() {
        use crate::crypto::{sign_hash, SecretKey};

        let sender = SecretKey::from_slice(&[0x11; 32]).unwrap();
        let gas_payer = SecretKey::from_slice(&[0x22; 32]).unwrap();
        let unsigned = Transaction::unsigned(body(Some(Reserved::delegated()))).unwrap();

        let mut signature = sign_hash(&sender, &unsigned.signature_hash(None)).unwrap().to_vec();
        let payer_hash = unsigned.signature_hash(Some(&sender.address()));
        signature.extend_from_slice(&sign_hash(&gas_payer, &payer_hash).unwrap());

        let tx = Transaction::with_signature(unsigned.body().clone(), signature).unwrap();
        assert_eq!(tx.origin().unwrap(), sender.address());
        assert_eq!(tx.delegator().unwrap(), gas_payer.address());
    }
}
