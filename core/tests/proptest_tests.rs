//! Property-based tests for the transaction codec.
//!
//! Generates arbitrary bodies and checks the properties every node relies
//! on: decode inverts encode, integers are minimal on the wire, and the
//! sender and gas-payer hashes never coincide.

use alloy_primitives::{Address, Bytes, B256, B64, U256};
use proptest::prelude::*;

use thor_tx_core::codec::{self, Value};
use thor_tx_core::crypto;
use thor_tx_core::transaction::{
    self, unsigned_profile, Clause, Reserved, Transaction, TransactionBody,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_u256() -> impl Strategy<Value = U256> {
    prop_oneof![
        Just(U256::ZERO),
        any::<u64>().prop_map(U256::from),
        any::<[u8; 32]>().prop_map(U256::from_be_bytes),
    ]
}

fn arb_clause() -> impl Strategy<Value = Clause> {
    (
        proptest::option::of(any::<[u8; 20]>()),
        arb_u256(),
        proptest::collection::vec(any::<u8>(), 0..64),
    )
        .prop_map(|(to, value, data)| Clause {
            to: to.map(Address::from),
            value,
            data: Bytes::from(data),
        })
}

fn arb_reserved() -> impl Strategy<Value = Option<Reserved>> {
    let unused = proptest::collection::vec(proptest::collection::vec(1u8..=255, 1..4), 1..3)
        .prop_map(|slots| slots.into_iter().map(Bytes::from).collect::<Vec<_>>());
    prop_oneof![
        Just(None),
        Just(Some(Reserved::delegated())),
        (1u32..=u32::MAX, unused).prop_map(|(features, unused)| Some(Reserved {
            features: Some(features),
            unused: Some(unused),
        })),
    ]
}

prop_compose! {
    fn arb_body()(
        chain_tag in any::<u8>(),
        block_ref in any::<[u8; 8]>(),
        expiration in any::<u32>(),
        clauses in proptest::collection::vec(arb_clause(), 0..4),
        gas_price_coef in any::<u8>(),
        gas in any::<u64>(),
        depends_on in proptest::option::of(any::<[u8; 32]>()),
        nonce in any::<u64>(),
        reserved in arb_reserved(),
    ) -> TransactionBody {
        TransactionBody {
            chain_tag,
            block_ref: B64::from(block_ref),
            expiration,
            clauses,
            gas_price_coef,
            gas,
            depends_on: depends_on.map(B256::from),
            nonce,
            reserved,
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unsigned_round_trip(body in arb_body()) {
        let tx = Transaction::unsigned(body).unwrap();
        let decoded = transaction::decode(tx.encoded(), false).unwrap();
        prop_assert_eq!(&decoded, &tx);
        prop_assert_eq!(decoded.encoded(), tx.encoded());
    }

    #[test]
    fn signed_round_trip(mut body in arb_body(), key in any::<[u8; 32]>()) {
        prop_assume!(crypto::SecretKey::from_slice(&key).is_ok());
        let tx = if body.is_delegated() {
            transaction::sign_with_delegator(&body, &key, &key).unwrap()
        } else {
            body.reserved = None;
            transaction::sign(&body, &key).unwrap()
        };
        let decoded = transaction::decode(tx.encoded(), true).unwrap();
        prop_assert_eq!(decoded.id().unwrap(), tx.id().unwrap());
        prop_assert_eq!(decoded.origin().unwrap(), tx.origin().unwrap());
    }

    #[test]
    fn integers_are_minimal_on_the_wire(gas in any::<u64>(), nonce in any::<u64>()) {
        let body = TransactionBody {
            chain_tag: 1,
            block_ref: B64::ZERO,
            expiration: 0,
            clauses: vec![],
            gas_price_coef: 0,
            gas,
            depends_on: None,
            nonce,
            reserved: None,
        };
        let tx = Transaction::unsigned(body).unwrap();
        let Value::Struct(fields) = codec::decode_object(tx.encoded(), unsigned_profile()).unwrap()
        else {
            panic!("expected a struct");
        };
        prop_assert!(fields.contains_key("gas"));

        // Re-read the raw list: each numeric item is minimal big-endian.
        let codec::RlpItem::List(items) = codec::rlp::decode(tx.encoded()).unwrap() else {
            panic!("expected a list");
        };
        for index in [2usize, 5, 7] {
            let codec::RlpItem::Bytes(bytes) = &items[index] else {
                panic!("expected bytes");
            };
            prop_assert!(bytes.first() != Some(&0));
        }
    }

    #[test]
    fn sender_and_gas_payer_hashes_differ(body in arb_body(), sender in any::<[u8; 20]>()) {
        let tx = Transaction::unsigned(body).unwrap();
        prop_assert_ne!(
            tx.signature_hash(None),
            tx.signature_hash(Some(&Address::from(sender)))
        );
    }
}
