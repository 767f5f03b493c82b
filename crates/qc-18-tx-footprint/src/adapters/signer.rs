//! # Ed25519 Attestation
//!
//! Binds the signing ports to `shared-crypto` and provides the key set for a
//! consensus round.

use shared_crypto::{blake3_hash_many, verify_detached, Ed25519KeyPair};

use crate::algorithms::{ConsensusParticipants, RoundOptions};
use crate::domain::{
    ProposalSharedOriginKey, PublicKey, Signature, CROSS_VALIDATION_COUNT, WELCOME_GROUP_SIZE,
};
use crate::ports::{AttestationSigner, SignatureVerifier};

impl AttestationSigner for Ed25519KeyPair {
    fn public_key(&self) -> PublicKey {
        *Ed25519KeyPair::public_key(self).as_bytes()
    }

    fn sign(&self, message: &[u8]) -> Signature {
        Ed25519KeyPair::sign(self, message).to_bytes()
    }
}

/// Ed25519 verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        verify_detached(public_key, message, signature)
    }
}

/// Every key one round needs, with a distinct identity per participant.
pub struct ParticipantKeys {
    submitter: Ed25519KeyPair,
    master: Ed25519KeyPair,
    cross_validators: Vec<Ed25519KeyPair>,
    welcome_nodes: Vec<PublicKey>,
    storage_nodes: Vec<PublicKey>,
}

impl ParticipantKeys {
    /// Fresh random keys.
    pub fn generate(storage_nodes: usize) -> Self {
        let pk = |kp: Ed25519KeyPair| *kp.public_key().as_bytes();
        Self {
            submitter: Ed25519KeyPair::generate(),
            master: Ed25519KeyPair::generate(),
            cross_validators: (0..CROSS_VALIDATION_COUNT)
                .map(|_| Ed25519KeyPair::generate())
                .collect(),
            welcome_nodes: (0..WELCOME_GROUP_SIZE)
                .map(|_| pk(Ed25519KeyPair::generate()))
                .collect(),
            storage_nodes: (0..storage_nodes)
                .map(|_| pk(Ed25519KeyPair::generate()))
                .collect(),
        }
    }

    /// Reproducible keys derived from `seed`.
    pub fn from_seed(seed: u8, storage_nodes: usize) -> Self {
        let key = |role: &[u8], index: usize| {
            Ed25519KeyPair::from_seed(blake3_hash_many(&[
                &[seed],
                role,
                &(index as u64).to_le_bytes(),
            ]))
        };
        Self {
            submitter: key(b"submitter", 0),
            master: key(b"master", 0),
            cross_validators: (0..CROSS_VALIDATION_COUNT)
                .map(|i| key(b"validator", i))
                .collect(),
            welcome_nodes: (0..WELCOME_GROUP_SIZE)
                .map(|i| *key(b"welcome", i).public_key().as_bytes())
                .collect(),
            storage_nodes: (0..storage_nodes)
                .map(|i| *key(b"storage", i).public_key().as_bytes())
                .collect(),
        }
    }

    /// Borrowed view for the round builder.
    pub fn participants(&self) -> ConsensusParticipants<'_, Ed25519KeyPair> {
        ConsensusParticipants {
            submitter: &self.submitter,
            master: &self.master,
            cross_validators: &self.cross_validators,
            welcome_nodes: &self.welcome_nodes,
            storage_nodes: &self.storage_nodes,
        }
    }

    /// Reference round options carrying this submitter's proposal.
    pub fn reference_options(&self) -> RoundOptions {
        RoundOptions::reference(self.proposal_shared_origin_key())
    }

    /// Submitter key pair.
    pub fn submitter(&self) -> &Ed25519KeyPair {
        &self.submitter
    }

    /// Shared origin key proposal for the submitter.
    ///
    /// The encrypted private key is a stand-in of realistic width; nothing
    /// decrypts it.
    pub fn proposal_shared_origin_key(&self) -> ProposalSharedOriginKey {
        let seed = self.submitter.to_seed();
        ProposalSharedOriginKey {
            public_key: *self.submitter.public_key().as_bytes(),
            encrypted_private_key: blake3_hash_many(&[&seed, &seed]).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_signer_port_matches_key_pair() {
        let kp = Ed25519KeyPair::from_seed([9; 32]);
        let sig = AttestationSigner::sign(&kp, b"msg");
        let pk = AttestationSigner::public_key(&kp);

        assert!(Ed25519Verifier.verify(&pk, b"msg", &sig));
        assert!(!Ed25519Verifier.verify(&pk, b"msh", &sig));
    }

    #[test]
    fn test_seeded_keys_are_reproducible() {
        let a = ParticipantKeys::from_seed(7, 3);
        let b = ParticipantKeys::from_seed(7, 3);
        assert_eq!(a.storage_nodes, b.storage_nodes);
        assert_eq!(
            AttestationSigner::public_key(&a.master),
            AttestationSigner::public_key(&b.master)
        );
    }

    #[test]
    fn test_identities_are_distinct() {
        let keys = ParticipantKeys::from_seed(1, 36);
        let mut seen = HashSet::new();
        seen.insert(AttestationSigner::public_key(&keys.submitter));
        seen.insert(AttestationSigner::public_key(&keys.master));
        for v in &keys.cross_validators {
            seen.insert(AttestationSigner::public_key(v));
        }
        seen.extend(keys.welcome_nodes.iter().copied());
        seen.extend(keys.storage_nodes.iter().copied());

        assert_eq!(seen.len(), 2 + CROSS_VALIDATION_COUNT + WELCOME_GROUP_SIZE + 36);
    }

    #[test]
    fn test_proposal_key_width() {
        let keys = ParticipantKeys::from_seed(1, 1);
        assert_eq!(keys.proposal_shared_origin_key().encrypted_private_key.len(), 32);
    }
}
