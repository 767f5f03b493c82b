//! # Consensus Round Builder
//!
//! Assembles a signed envelope with the metadata one consensus round
//! produces. This is the single place the round shape is defined; the
//! optional parts are switched by [`RoundOptions`].
//!
//! ## Round shape
//!
//! | Part | Count |
//! |------|-------|
//! | Welcome headers | `WELCOME_GROUP_SIZE` |
//! | Validation headers | `CROSS_VALIDATION_COUNT` peers + 1 master |
//! | Storage headers | 1..=`STORAGE_GROUP_MAX` |
//! | Cross-validations | `CROSS_VALIDATION_COUNT` |

use tracing::debug;

use super::attestation::{sign_envelope, sign_origin, signed_stamp, transaction_hash};
use crate::domain::{
    invariant_group_cardinality, FootprintError, MasterValidationStamp, NodeHeader, PayloadEntry,
    ProofOfWork, ProposalSharedOriginKey, PublicKey, Timestamp, TransactionData,
    TransactionEnvelope, TxType, ValidationStamp, ValidationStatus, CROSS_VALIDATION_COUNT,
};
use crate::ports::AttestationSigner;

/// Contract code of the reference scenario (42 bytes).
pub const REFERENCE_CODE: &[u8] = b"sendTo(000000000000000000000000000000, 10)";

/// Which optional parts of the envelope are populated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOptions {
    /// Type tag.
    pub tx_type: TxType,
    /// Timestamp used for the envelope and every stamp.
    pub timestamp: Timestamp,
    /// Contract code.
    pub code: Vec<u8>,
    /// Trigger payload.
    pub trigger: Option<Vec<u8>>,
    /// Shared origin key payload.
    pub proposal: Option<ProposalSharedOriginKey>,
    /// Carry the submitter public key in the envelope.
    pub include_previous_key: bool,
    /// Populate the three header groups.
    pub include_headers: bool,
    /// Patch number written into every header.
    pub patch_number: u16,
}

impl RoundOptions {
    /// The reference round: contract call with the shared-origin-key
    /// proposal, submitter key and all three header groups.
    pub fn reference(proposal: ProposalSharedOriginKey) -> Self {
        Self {
            proposal: Some(proposal),
            ..Self::default()
        }
    }
}

/// Defaults leave out the proposal payload; see [`RoundOptions::reference`].
impl Default for RoundOptions {
    fn default() -> Self {
        Self {
            tx_type: TxType::CONTRACT_CALL,
            timestamp: Timestamp(0),
            code: REFERENCE_CODE.to_vec(),
            trigger: None,
            proposal: None,
            include_previous_key: true,
            include_headers: true,
            patch_number: 1,
        }
    }
}

/// Keys taking part in one round.
pub struct ConsensusParticipants<'a, S> {
    /// Submitter; also signs as origin in the single-relay case.
    pub submitter: &'a S,
    /// Leader of the round.
    pub master: &'a S,
    /// Peer validators, one cross-validation each.
    pub cross_validators: &'a [S],
    /// Entry node identities.
    pub welcome_nodes: &'a [PublicKey],
    /// Storage replica identities.
    pub storage_nodes: &'a [PublicKey],
}

/// Builds a fully populated envelope for one round.
#[derive(Clone, Debug, Default)]
pub struct ConsensusRoundBuilder {
    options: RoundOptions,
}

impl ConsensusRoundBuilder {
    /// Create a builder.
    pub fn new(options: RoundOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &RoundOptions {
        &self.options
    }

    /// Sign the submission, then attach the master stamp and cross-validations.
    pub fn build<S: AttestationSigner>(
        &self,
        participants: &ConsensusParticipants<'_, S>,
    ) -> Result<TransactionEnvelope, FootprintError> {
        if participants.cross_validators.len() != CROSS_VALIDATION_COUNT {
            return Err(FootprintError::CrossValidationCount {
                expected: CROSS_VALIDATION_COUNT,
                actual: participants.cross_validators.len(),
            });
        }

        let opts = &self.options;
        let submitter_key = participants.submitter.public_key();

        let mut env = if opts.include_previous_key {
            TransactionEnvelope::for_submitter(submitter_key, opts.tx_type, self.payload(), opts.timestamp)
        } else {
            TransactionEnvelope::build(
                shared_crypto::address_from_public_key(&submitter_key),
                opts.tx_type,
                self.payload(),
                opts.timestamp,
                None,
            )
        };
        sign_envelope(&mut env, participants.submitter)?;
        sign_origin(&mut env, participants.submitter)?;

        let master_key = participants.master.public_key();
        let master_validation = MasterValidationStamp {
            proof_of_work: ProofOfWork(submitter_key),
            previous_validation_nodes: Vec::new(),
            validation: signed_stamp(self.stamp_for(master_key), participants.master)?,
            welcome_headers: self.headers(participants.welcome_nodes, &master_key),
            validation_headers: self.validation_headers(participants),
            storage_headers: self.headers(participants.storage_nodes, &master_key),
            transaction_hash: transaction_hash(&env)?,
        };
        if opts.include_headers {
            invariant_group_cardinality(&master_validation)?;
        }
        env.attach_master_validation(master_validation)?;

        for validator in participants.cross_validators {
            env.add_cross_validation(signed_stamp(
                self.stamp_for(validator.public_key()),
                validator,
            )?)?;
        }

        debug!(
            headers = env.master_validation().map_or(0, |mv| mv.header_count()),
            cross_validations = env.cross_validations().len(),
            "Consensus round assembled"
        );
        Ok(env)
    }

    fn payload(&self) -> TransactionData {
        let mut data = TransactionData::new().with(PayloadEntry::Code(self.options.code.clone()));
        if let Some(trigger) = &self.options.trigger {
            data = data.with(PayloadEntry::Trigger(trigger.clone()));
        }
        if let Some(proposal) = &self.options.proposal {
            data = data.with(PayloadEntry::ProposalSharedOriginKey(proposal.clone()));
        }
        data
    }

    fn stamp_for(&self, node: PublicKey) -> ValidationStamp {
        ValidationStamp::new(ValidationStatus::Validated, self.options.timestamp, node)
    }

    fn headers(&self, nodes: &[PublicKey], master: &PublicKey) -> Vec<NodeHeader> {
        if !self.options.include_headers {
            return Vec::new();
        }
        nodes
            .iter()
            .map(|key| NodeHeader::new(*key, key == master, self.options.patch_number))
            .collect()
    }

    fn validation_headers<S: AttestationSigner>(
        &self,
        participants: &ConsensusParticipants<'_, S>,
    ) -> Vec<NodeHeader> {
        if !self.options.include_headers {
            return Vec::new();
        }
        let patch = self.options.patch_number;
        participants
            .cross_validators
            .iter()
            .map(|v| NodeHeader::new(v.public_key(), false, patch))
            .chain(std::iter::once(NodeHeader::new(
                participants.master.public_key(),
                true,
                patch,
            )))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ParticipantKeys;
    use crate::domain::{
        check_envelope_integrity, HeaderGroup, STORAGE_GROUP_MAX, VALIDATION_GROUP_SIZE,
        WELCOME_GROUP_SIZE,
    };

    #[test]
    fn test_reference_round_shape() {
        let keys = ParticipantKeys::from_seed(1, STORAGE_GROUP_MAX);
        let env = ConsensusRoundBuilder::default().build(&keys.participants()).unwrap();
        let mv = env.master_validation().unwrap();

        assert_eq!(mv.headers(HeaderGroup::Welcome).len(), WELCOME_GROUP_SIZE);
        assert_eq!(mv.headers(HeaderGroup::Validation).len(), VALIDATION_GROUP_SIZE);
        assert_eq!(mv.headers(HeaderGroup::Storage).len(), STORAGE_GROUP_MAX);
        assert_eq!(env.cross_validations().len(), CROSS_VALIDATION_COUNT);
        assert!(mv.validation_headers.last().unwrap().is_master);
        assert!(check_envelope_integrity(&env).is_ok());
    }

    #[test]
    fn test_reference_options_price_at_309_bytes() {
        use crate::adapters::NoOpCompressor;
        use crate::algorithms::SizeEstimator;
        use crate::domain::FieldPolicy;

        let keys = ParticipantKeys::from_seed(1, STORAGE_GROUP_MAX);
        let env = ConsensusRoundBuilder::new(keys.reference_options())
            .build(&keys.participants())
            .unwrap();
        let est = SizeEstimator::new(&NoOpCompressor, FieldPolicy::Strict);

        assert_eq!(est.transaction_only(&env).unwrap(), 309);
        assert_eq!(
            env.data().proposal_shared_origin_key(),
            Some(&keys.proposal_shared_origin_key())
        );
    }

    #[test]
    fn test_single_actor_signs_both_slots() {
        let keys = ParticipantKeys::from_seed(1, 4);
        let env = ConsensusRoundBuilder::default().build(&keys.participants()).unwrap();
        assert_eq!(env.signature(), env.origin_signature());
        assert!(env.signature().is_some());
    }

    #[test]
    fn test_transaction_hash_binds_envelope() {
        let keys = ParticipantKeys::from_seed(1, 4);
        let env = ConsensusRoundBuilder::default().build(&keys.participants()).unwrap();
        assert_eq!(
            env.master_validation().unwrap().transaction_hash,
            transaction_hash(&env).unwrap()
        );
    }

    #[test]
    fn test_without_headers_leaves_groups_empty() {
        let keys = ParticipantKeys::from_seed(1, STORAGE_GROUP_MAX);
        let options = RoundOptions {
            include_headers: false,
            ..RoundOptions::default()
        };
        let env = ConsensusRoundBuilder::new(options).build(&keys.participants()).unwrap();

        assert_eq!(env.master_validation().unwrap().header_count(), 0);
        assert_eq!(env.cross_validations().len(), CROSS_VALIDATION_COUNT);
    }

    #[test]
    fn test_optional_payload_and_key() {
        let keys = ParticipantKeys::from_seed(1, 4);
        let options = RoundOptions {
            trigger: Some(b"onTransfer()".to_vec()),
            proposal: Some(keys.proposal_shared_origin_key()),
            include_previous_key: false,
            ..RoundOptions::default()
        };
        let env = ConsensusRoundBuilder::new(options).build(&keys.participants()).unwrap();

        assert!(env.previous_public_key().is_none());
        assert_eq!(env.data().trigger(), Some(&b"onTransfer()"[..]));
        assert!(env.data().proposal_shared_origin_key().is_some());
    }

    #[test]
    fn test_oversized_storage_group_rejected() {
        let keys = ParticipantKeys::from_seed(1, STORAGE_GROUP_MAX + 1);
        let err = ConsensusRoundBuilder::default()
            .build(&keys.participants())
            .unwrap_err();
        assert!(matches!(
            err,
            FootprintError::GroupCardinality {
                group: HeaderGroup::Storage,
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_validator_count_rejected() {
        let keys = ParticipantKeys::from_seed(1, 4);
        let mut participants = keys.participants();
        let validators = participants.cross_validators;
        participants.cross_validators = &validators[..3];

        assert_eq!(
            ConsensusRoundBuilder::default()
                .build(&participants)
                .unwrap_err(),
            FootprintError::CrossValidationCount {
                expected: 4,
                actual: 3
            }
        );
    }
}
