use proptest::prelude::*;

use eth_account::{
    derive_address, hash_message, public_key_hex, recover_public_key, sign, Keypair, Signature,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn signing_is_deterministic(
        seed in prop::array::uniform32(any::<u8>()),
        message in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        if let Ok(first) = sign(&seed, &message) {
            let second = sign(&seed, &message).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn signature_recovers_signer(
        seed in prop::array::uniform32(any::<u8>()),
        message in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        if let Ok(signature) = sign(&seed, &message) {
            let recovered = recover_public_key(&message, &signature).unwrap();
            prop_assert_eq!(
                hex::encode_upper(recovered.serialize_uncompressed()),
                public_key_hex(&seed).unwrap()
            );
            let digest = hash_message(&message);
            prop_assert_eq!(
                signature.recover_address(&digest).unwrap(),
                derive_address(&seed).unwrap()
            );
        }
    }

    #[test]
    fn encodings_have_fixed_lengths(seed in prop::array::uniform32(any::<u8>())) {
        if let Ok(keypair) = Keypair::from_secret_bytes(&seed) {
            prop_assert_eq!(keypair.address().to_string().len(), 42);
            prop_assert!(keypair.address().to_string().starts_with("0x"));
            prop_assert_eq!(keypair.public_key_bytes()[0], 0x04);
            prop_assert_eq!(keypair.public_key_hex().len(), 130);

            let signature = keypair.sign(b"length");
            prop_assert_eq!(signature.to_hex().len(), 130);
            prop_assert!(signature.recovery_id() <= 3);
        }
    }

    #[test]
    fn hex_round_trips(seed in prop::array::uniform32(any::<u8>())) {
        if let Ok(keypair) = Keypair::from_secret_bytes(&seed) {
            let reparsed = Keypair::from_hex(&keypair.private_key_hex()).unwrap();
            prop_assert_eq!(reparsed.private_key_bytes(), seed);
            prop_assert_eq!(reparsed.address(), keypair.address());

            let signature = keypair.sign(&seed);
            prop_assert_eq!(Signature::from_hex(&signature.to_hex()).unwrap(), signature);
        }
    }

    #[test]
    fn different_keys_different_addresses(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>()),
    ) {
        prop_assume!(a != b);
        if let (Ok(x), Ok(y)) = (derive_address(&a), derive_address(&b)) {
            prop_assert_ne!(x, y);
        }
    }
}
