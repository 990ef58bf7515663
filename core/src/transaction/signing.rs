//! Transaction signing.
//!
//! Every function here takes a body (or a partially signed transaction) and
//! raw secret key bytes, and returns a new [`Transaction`]. Keys are
//! validated before anything else happens and are dropped (and zeroized)
//! before the function returns. Key bytes are never logged.
//!
//! ## Fee delegation
//!
//! A delegated transaction carries two signatures, `sender || gas_payer`:
//!
//! - the sender signs `signature_hash(None)`;
//! - the gas payer signs `signature_hash(Some(sender_address))`.
//!
//! Binding the sender's address into the gas payer's hash means neither
//! signature can be swapped for the other or replayed for a different
//! sender. When both keys are at hand use [`sign_with_delegator`]. When they
//! live in different places, the sender calls [`sign_for_delegator`] and
//! hands the result to the gas payer, who finishes it with
//! [`sign_as_delegator`].

use alloy_primitives::{Address, Bytes};
use tracing::debug;

use super::envelope::Transaction;
use super::error::TransactionError;
use super::types::TransactionBody;
use crate::config::{DELEGATED_SIGNATURE_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::{sign_hash, SecretKey};

const SIGNER: &str = "signer";
const GAS_PAYER: &str = "gas payer";

/// Sign a non-delegated body.
pub fn sign(body: &TransactionBody, signer_key: &[u8]) -> Result<Transaction, TransactionError> {
    const OP: &str = "sign";
    let signer = load_key(OP, SIGNER, signer_key)?;

    let unsigned = Transaction::unsigned(body.clone())?;
    if unsigned.is_delegated() {
        return Err(TransactionError::InvalidDelegationState {
            operation: OP,
            reason: "transaction is delegated, use sign_with_delegator",
        });
    }

    let signature = sign_with(OP, &signer, &unsigned, None)?;
    let tx = Transaction::with_signature(unsigned.body().clone(), signature.to_vec())?;
    debug!(hash = %tx.signature_hash(None), "transaction signed");
    Ok(tx)
}

/// Sign a delegated body with both the sender and the gas-payer key.
pub fn sign_with_delegator(
    body: &TransactionBody,
    signer_key: &[u8],
    delegator_key: &[u8],
) -> Result<Transaction, TransactionError> {
    const OP: &str = "sign_with_delegator";
    let signer = load_key(OP, SIGNER, signer_key)?;
    let gas_payer = load_key(OP, GAS_PAYER, delegator_key)?;

    let unsigned = Transaction::unsigned(body.clone())?;
    require_delegated(OP, &unsigned)?;

    let mut signature = Vec::with_capacity(DELEGATED_SIGNATURE_LENGTH);
    signature.extend_from_slice(&sign_with(OP, &signer, &unsigned, None)?);
    signature.extend_from_slice(&sign_with(OP, &gas_payer, &unsigned, Some(&signer.address()))?);

    let tx = Transaction::with_signature(unsigned.body().clone(), signature)?;
    debug!(hash = %tx.signature_hash(None), "delegated transaction signed");
    Ok(tx)
}

/// First half of two-party delegation: the sender signs alone.
///
/// The result carries a 65-byte signature and is not yet signed in the
/// sense of [`Transaction::is_signed`].
pub fn sign_for_delegator(
    body: &TransactionBody,
    signer_key: &[u8],
) -> Result<Transaction, TransactionError> {
    const OP: &str = "sign_for_delegator";
    let signer = load_key(OP, SIGNER, signer_key)?;

    let unsigned = Transaction::unsigned(body.clone())?;
    require_delegated(OP, &unsigned)?;

    let signature = sign_with(OP, &signer, &unsigned, None)?;
    debug!(hash = %unsigned.signature_hash(None), "sender half signed");
    Transaction::with_signature(unsigned.body().clone(), signature.to_vec())
}

/// Second half of two-party delegation: the gas payer countersigns.
///
/// `signer` is the sender's address, bound into the gas payer's hash. Any
/// existing gas-payer signature on `tx` is replaced.
pub fn sign_as_delegator(
    tx: &Transaction,
    signer: &Address,
    gas_payer_key: &[u8],
) -> Result<Transaction, TransactionError> {
    const OP: &str = "sign_as_delegator";
    let gas_payer = load_key(OP, GAS_PAYER, gas_payer_key)?;

    require_delegated(OP, tx)?;
    let sender_half = tx
        .signature()
        .map(|sig| &sig[..SIGNATURE_LENGTH])
        .ok_or(TransactionError::FieldUnavailable {
            operation: OP,
            field: "signature",
            reason: "sender has not signed yet",
        })?;

    let mut signature = Vec::with_capacity(DELEGATED_SIGNATURE_LENGTH);
    signature.extend_from_slice(sender_half);
    signature.extend_from_slice(&sign_with(OP, &gas_payer, tx, Some(signer))?);

    let signed = Transaction::with_signature(tx.body().clone(), Bytes::from(signature))?;
    debug!(hash = %signed.signature_hash(None), "gas payer half signed");
    Ok(signed)
}

fn load_key(
    operation: &'static str,
    role: &'static str,
    bytes: &[u8],
) -> Result<SecretKey, TransactionError> {
    SecretKey::from_slice(bytes).map_err(|source| TransactionError::InvalidKey {
        operation,
        role,
        source,
    })
}

fn require_delegated(operation: &'static str, tx: &Transaction) -> Result<(), TransactionError> {
    if tx.is_delegated() {
        Ok(())
    } else {
        Err(TransactionError::InvalidDelegationState {
            operation,
            reason: "transaction is not delegated, use sign",
        })
    }
}

fn sign_with(
    operation: &'static str,
    key: &SecretKey,
    tx: &Transaction,
    delegate_for: Option<&Address>,
) -> Result<[u8; SIGNATURE_LENGTH], TransactionError> {
    sign_hash(key, &tx.signature_hash(delegate_for))
        .map_err(|source| TransactionError::InvalidSignature { operation, source })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::types::Reserved;
    use crate::transaction::ErrorKind;
    use alloy_primitives::B64;
    use hex_literal::hex;

    const SIGNER_KEY: [u8; 32] =
        hex!("7582be841ca040aa940fff6c05773129e135623e41acce3e0b8ba520dc1ae26a");
    const GAS_PAYER_KEY: [u8; 32] =
        hex!("40de805e918403683fb9a6081c3fba072cdc5c88232c62a9509165122488dab7");

    fn body(delegated: bool) -> TransactionBody {
        TransactionBody {
            chain_tag: 1,
            block_ref: B64::ZERO,
            expiration: 32,
            clauses: vec![],
            gas_price_coef: 0,
            gas: 21_000,
            depends_on: None,
            nonce: 1,
            reserved: delegated.then(Reserved::delegated),
        }
    }

    fn address(key: &[u8]) -> Address {
        SecretKey::from_slice(key).unwrap().address()
    }

    #[test]
    fn sign_produces_65_bytes_and_recovers_origin() {
        let tx = sign(&body(false), &SIGNER_KEY).unwrap();
        assert!(tx.is_signed());
        assert_eq!(tx.signature().unwrap().len(), 65);
        assert_eq!(tx.origin().unwrap(), address(&SIGNER_KEY));
        assert!(tx.id().is_ok());
    }

    #[test]
    fn sign_leaves_body_untouched() {
        let original = body(false);
        let tx = sign(&original, &SIGNER_KEY).unwrap();
        assert_eq!(tx.body(), &original);
    }

    #[test]
    fn sign_rejects_delegated_body() {
        let err = sign(&body(true), &SIGNER_KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDelegationState);
    }

    #[test]
    fn sign_with_delegator_rejects_plain_body() {
        let err = sign_with_delegator(&body(false), &SIGNER_KEY, &GAS_PAYER_KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDelegationState);
    }

    #[test]
    fn invalid_keys_fail_before_delegation_checks() {
        let err = sign(&body(true), &[0u8; 32]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);

        let err = sign_with_delegator(&body(false), &SIGNER_KEY, &[1u8; 31]).unwrap_err();
        match err {
            TransactionError::InvalidKey { role, .. } => assert_eq!(role, GAS_PAYER),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn delegated_signature_is_concatenation() {
        let tx = sign_with_delegator(&body(true), &SIGNER_KEY, &GAS_PAYER_KEY).unwrap();
        let sig = tx.signature().unwrap();
        assert_eq!(sig.len(), 130);

        let unsigned = Transaction::unsigned(body(true)).unwrap();
        let sender = SecretKey::from_slice(&SIGNER_KEY).unwrap();
        let payer = SecretKey::from_slice(&GAS_PAYER_KEY).unwrap();
        let expected_sender = sign_hash(&sender, &unsigned.signature_hash(None)).unwrap();
        let expected_payer =
            sign_hash(&payer, &unsigned.signature_hash(Some(&sender.address()))).unwrap();
        assert_eq!(&sig[..65], &expected_sender[..]);
        assert_eq!(&sig[65..], &expected_payer[..]);

        assert_eq!(tx.origin().unwrap(), sender.address());
        assert_eq!(tx.delegator().unwrap(), payer.address());
    }

    #[test]
    fn two_step_delegation_matches_one_step() {
        let partial = sign_for_delegator(&body(true), &SIGNER_KEY).unwrap();
        assert!(!partial.is_signed());
        assert_eq!(partial.origin().unwrap(), address(&SIGNER_KEY));

        let full = sign_as_delegator(&partial, &address(&SIGNER_KEY), &GAS_PAYER_KEY).unwrap();
        let one_step = sign_with_delegator(&body(true), &SIGNER_KEY, &GAS_PAYER_KEY).unwrap();
        assert_eq!(full, one_step);

        // Countersigning again replaces the gas-payer half only.
        let again = sign_as_delegator(&full, &address(&SIGNER_KEY), &GAS_PAYER_KEY).unwrap();
        assert_eq!(again, full);
    }

    #[test]
    fn sign_as_delegator_requires_sender_signature() {
        let unsigned = Transaction::unsigned(body(true)).unwrap();
        let err = sign_as_delegator(&unsigned, &address(&SIGNER_KEY), &GAS_PAYER_KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldUnavailable);
    }
}
