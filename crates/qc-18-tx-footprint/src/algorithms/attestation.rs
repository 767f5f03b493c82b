//! # Attestation
//!
//! Signing and verification over canonical bytes. The signature scheme
//! itself is a collaborator behind [`AttestationSigner`] and
//! [`SignatureVerifier`].

use crate::domain::{FootprintError, Hash, PublicKey, TransactionEnvelope, ValidationStamp};
use crate::ports::{AttestationSigner, SignatureVerifier};

/// Digest of the envelope's canonical bytes.
pub fn transaction_hash(env: &TransactionEnvelope) -> Result<Hash, FootprintError> {
    Ok(shared_crypto::blake3_hash(&env.canonical_bytes()?))
}

/// Sign the envelope as its submitter.
pub fn sign_envelope<S: AttestationSigner + ?Sized>(
    env: &mut TransactionEnvelope,
    signer: &S,
) -> Result<(), FootprintError> {
    let message = env.canonical_bytes()?;
    env.attach_signature(signer.sign(&message))
}

/// Sign the envelope as the node that propagated it.
pub fn sign_origin<S: AttestationSigner + ?Sized>(
    env: &mut TransactionEnvelope,
    signer: &S,
) -> Result<(), FootprintError> {
    let message = env.canonical_bytes()?;
    env.attach_origin_signature(signer.sign(&message))
}

/// Create and sign a stamp for `signer`.
pub fn signed_stamp<S: AttestationSigner + ?Sized>(
    stamp: ValidationStamp,
    signer: &S,
) -> Result<ValidationStamp, FootprintError> {
    let mut stamp = stamp;
    let message = stamp.canonical_bytes();
    stamp.attach_signature(signer.sign(&message))?;
    Ok(stamp)
}

/// Check the submitter signature against the submitter key.
pub fn verify_envelope_signature<V: SignatureVerifier + ?Sized>(
    env: &TransactionEnvelope,
    verifier: &V,
) -> Result<bool, FootprintError> {
    let public_key = env
        .previous_public_key()
        .ok_or(FootprintError::MissingField("previous_public_key"))?;
    let signature = env
        .signature()
        .ok_or(FootprintError::MissingField("signature"))?;
    Ok(verifier.verify(public_key, &env.canonical_bytes()?, signature))
}

/// Check the origin signature against the propagating node's key.
pub fn verify_origin_signature<V: SignatureVerifier + ?Sized>(
    env: &TransactionEnvelope,
    origin_key: &PublicKey,
    verifier: &V,
) -> Result<bool, FootprintError> {
    let signature = env
        .origin_signature()
        .ok_or(FootprintError::MissingField("origin_signature"))?;
    Ok(verifier.verify(origin_key, &env.canonical_bytes()?, signature))
}

/// Check a stamp against its own node identity.
pub fn verify_stamp<V: SignatureVerifier + ?Sized>(
    stamp: &ValidationStamp,
    verifier: &V,
) -> Result<bool, FootprintError> {
    let public_key = stamp
        .node_public_key()
        .ok_or(FootprintError::MissingField("node_public_key"))?;
    let signature = stamp
        .node_signature()
        .ok_or(FootprintError::MissingField("node_signature"))?;
    Ok(verifier.verify(public_key, &stamp.canonical_bytes(), signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Ed25519Verifier;
    use crate::domain::{PayloadEntry, Timestamp, TransactionData, TxType, ValidationStatus};
    use shared_crypto::Ed25519KeyPair;

    fn envelope(submitter: &Ed25519KeyPair) -> TransactionEnvelope {
        TransactionEnvelope::for_submitter(
            *submitter.public_key().as_bytes(),
            TxType::CONTRACT_CALL,
            TransactionData::new().with(PayloadEntry::Code(b"sendTo(a, 1)".to_vec())),
            Timestamp(42),
        )
    }

    #[test]
    fn test_envelope_sign_verify() {
        let submitter = Ed25519KeyPair::from_seed([1; 32]);
        let mut env = envelope(&submitter);
        sign_envelope(&mut env, &submitter).unwrap();

        assert!(verify_envelope_signature(&env, &Ed25519Verifier).unwrap());
    }

    #[test]
    fn test_origin_signature_uses_origin_key() {
        let submitter = Ed25519KeyPair::from_seed([1; 32]);
        let relay = Ed25519KeyPair::from_seed([2; 32]);
        let mut env = envelope(&submitter);
        sign_envelope(&mut env, &submitter).unwrap();
        sign_origin(&mut env, &relay).unwrap();

        let relay_key = *relay.public_key().as_bytes();
        let submitter_key = *submitter.public_key().as_bytes();
        assert!(verify_origin_signature(&env, &relay_key, &Ed25519Verifier).unwrap());
        assert!(!verify_origin_signature(&env, &submitter_key, &Ed25519Verifier).unwrap());
        assert_ne!(env.signature(), env.origin_signature());
    }

    #[test]
    fn test_unsigned_envelope_reports_missing_signature() {
        let submitter = Ed25519KeyPair::from_seed([1; 32]);
        let env = envelope(&submitter);
        assert_eq!(
            verify_envelope_signature(&env, &Ed25519Verifier),
            Err(FootprintError::MissingField("signature"))
        );
    }

    #[test]
    fn test_stamp_sign_verify() {
        let node = Ed25519KeyPair::from_seed([3; 32]);
        let stamp = signed_stamp(
            ValidationStamp::new(
                ValidationStatus::Validated,
                Timestamp(5),
                *node.public_key().as_bytes(),
            ),
            &node,
        )
        .unwrap();

        assert!(verify_stamp(&stamp, &Ed25519Verifier).unwrap());
    }

    #[test]
    fn test_stamp_signed_by_other_node_fails() {
        let node = Ed25519KeyPair::from_seed([3; 32]);
        let impostor = Ed25519KeyPair::from_seed([4; 32]);
        let stamp = signed_stamp(
            ValidationStamp::new(
                ValidationStatus::Validated,
                Timestamp(5),
                *node.public_key().as_bytes(),
            ),
            &impostor,
        )
        .unwrap();

        assert!(!verify_stamp(&stamp, &Ed25519Verifier).unwrap());
    }

    #[test]
    fn test_transaction_hash_tracks_payload() {
        let submitter = Ed25519KeyPair::from_seed([1; 32]);
        let a = envelope(&submitter);
        let mut b = envelope(&submitter);
        assert_eq!(transaction_hash(&a).unwrap(), transaction_hash(&b).unwrap());

        b.amend_data(TransactionData::new()).unwrap();
        assert_ne!(transaction_hash(&a).unwrap(), transaction_hash(&b).unwrap());
    }
}
