//! # Domain Invariants
//!
//! Consensus-group sizing constants and the integrity rules checked before
//! a strict estimate. The lenient benchmarking path never calls these.

use super::entities::{MasterValidationStamp, TransactionEnvelope};
use super::errors::FootprintError;
use super::value_objects::{HeaderGroup, PublicKey};

/// Entry nodes per round.
pub const WELCOME_GROUP_SIZE: usize = 5;

/// Validators per round: 4 peers + 1 master.
pub const VALIDATION_GROUP_SIZE: usize = 5;

/// Upper bound on storage replicas per round.
pub const STORAGE_GROUP_MAX: usize = 36;

/// Peer stamps attached directly to the envelope. The master's vote lives
/// inside the master validation stamp.
pub const CROSS_VALIDATION_COUNT: usize = VALIDATION_GROUP_SIZE - 1;

/// Inclusive cardinality bounds of a header group.
pub fn group_bounds(group: HeaderGroup) -> (usize, usize) {
    match group {
        HeaderGroup::Welcome => (WELCOME_GROUP_SIZE, WELCOME_GROUP_SIZE),
        HeaderGroup::Validation => (VALIDATION_GROUP_SIZE, VALIDATION_GROUP_SIZE),
        HeaderGroup::Storage => (1, STORAGE_GROUP_MAX),
    }
}

/// Invariant: every header group is within its bounds.
pub fn invariant_group_cardinality(mv: &MasterValidationStamp) -> Result<(), FootprintError> {
    for group in HeaderGroup::ALL {
        let (min, max) = group_bounds(group);
        let actual = mv.headers(group).len();
        if actual < min || actual > max {
            return Err(FootprintError::GroupCardinality {
                group,
                actual,
                min,
                max,
            });
        }
    }
    Ok(())
}

/// Invariant: exactly one validation header is flagged master.
pub fn invariant_single_master(mv: &MasterValidationStamp) -> Result<(), FootprintError> {
    let masters = mv.validation_headers.iter().filter(|h| h.is_master).count();
    if masters != 1 {
        return Err(FootprintError::MasterCount(masters));
    }
    Ok(())
}

/// Invariant: cross-validation count equals validation group minus the master.
pub fn invariant_cross_validation_count(env: &TransactionEnvelope) -> Result<(), FootprintError> {
    let actual = env.cross_validations().len();
    if actual != CROSS_VALIDATION_COUNT {
        return Err(FootprintError::CrossValidationCount {
            expected: CROSS_VALIDATION_COUNT,
            actual,
        });
    }
    Ok(())
}

/// Invariant: address is the digest of the submitter public key.
pub fn invariant_address_binding(env: &TransactionEnvelope) -> Result<(), FootprintError> {
    let submitter = env
        .previous_public_key()
        .ok_or(FootprintError::MissingField("previous_public_key"))?;
    if shared_crypto::address_from_public_key(submitter) != *env.address() {
        return Err(FootprintError::AddressMismatch);
    }
    Ok(())
}

/// Invariant: every vote comes from a distinct node, the master included.
///
/// The envelope methods already enforce this; a deserialized envelope has
/// not been through them.
pub fn invariant_distinct_voters(env: &TransactionEnvelope) -> Result<(), FootprintError> {
    let master = env
        .master_validation()
        .and_then(|mv| mv.validation.node_public_key());
    let mut seen: Vec<&PublicKey> = master.into_iter().collect();
    for node in env.cross_validations().iter().filter_map(|v| v.node_public_key()) {
        if seen.contains(&node) {
            return Err(FootprintError::DuplicateVote(*node));
        }
        seen.push(node);
    }
    Ok(())
}

/// Run every envelope-level invariant.
pub fn check_envelope_integrity(env: &TransactionEnvelope) -> Result<(), FootprintError> {
    invariant_address_binding(env)?;
    let mv = env
        .master_validation()
        .ok_or(FootprintError::MissingField("master_validation"))?;
    invariant_group_cardinality(mv)?;
    invariant_single_master(mv)?;
    invariant_cross_validation_count(env)?;
    invariant_distinct_voters(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NodeHeader, ValidationStamp};
    use crate::domain::value_objects::{
        ProofOfWork, Timestamp, TransactionData, TxType, ValidationStatus,
    };

    fn headers(n: usize, master_at: Option<usize>) -> Vec<NodeHeader> {
        (0..n)
            .map(|i| NodeHeader::new([i as u8; 32], Some(i) == master_at, 1))
            .collect()
    }

    fn master_validation(storage: usize) -> MasterValidationStamp {
        MasterValidationStamp {
            proof_of_work: ProofOfWork([0; 32]),
            previous_validation_nodes: Vec::new(),
            validation: ValidationStamp::new(ValidationStatus::Validated, Timestamp(0), [0; 32]),
            welcome_headers: headers(WELCOME_GROUP_SIZE, None),
            validation_headers: headers(VALIDATION_GROUP_SIZE, Some(VALIDATION_GROUP_SIZE - 1)),
            storage_headers: headers(storage, None),
            transaction_hash: [0; 32],
        }
    }

    #[test]
    fn test_cross_validation_count_constant() {
        assert_eq!(CROSS_VALIDATION_COUNT, 4);
    }

    #[test]
    fn test_group_cardinality_accepts_reference_round() {
        assert!(invariant_group_cardinality(&master_validation(STORAGE_GROUP_MAX)).is_ok());
        assert!(invariant_group_cardinality(&master_validation(1)).is_ok());
    }

    #[test]
    fn test_group_cardinality_rejects_oversized_storage() {
        let err = invariant_group_cardinality(&master_validation(STORAGE_GROUP_MAX + 1)).unwrap_err();
        assert!(matches!(
            err,
            FootprintError::GroupCardinality {
                group: HeaderGroup::Storage,
                actual: 37,
                ..
            }
        ));
    }

    #[test]
    fn test_group_cardinality_rejects_short_welcome() {
        let mut mv = master_validation(10);
        mv.welcome_headers.pop();
        assert!(matches!(
            invariant_group_cardinality(&mv),
            Err(FootprintError::GroupCardinality {
                group: HeaderGroup::Welcome,
                ..
            })
        ));
    }

    #[test]
    fn test_single_master() {
        let mut mv = master_validation(10);
        assert!(invariant_single_master(&mv).is_ok());
        mv.validation_headers[0].is_master = true;
        assert!(invariant_single_master(&mv).is_err());
    }

    #[test]
    fn test_address_binding() {
        let env = TransactionEnvelope::for_submitter(
            [5; 32],
            TxType::CONTRACT_CALL,
            TransactionData::new(),
            Timestamp(0),
        );
        assert!(invariant_address_binding(&env).is_ok());

        let forged = TransactionEnvelope::build(
            [0; 32],
            TxType::CONTRACT_CALL,
            TransactionData::new(),
            Timestamp(0),
            Some([5; 32]),
        );
        assert_eq!(
            invariant_address_binding(&forged),
            Err(FootprintError::AddressMismatch)
        );
    }

    #[test]
    fn test_distinct_voters_catches_decoded_master_vote() {
        let mut env = TransactionEnvelope::for_submitter(
            [5; 32],
            TxType::CONTRACT_CALL,
            TransactionData::new(),
            Timestamp(0),
        );
        env.attach_master_validation(master_validation(1)).unwrap();
        env.add_cross_validation(ValidationStamp::new(
            ValidationStatus::Validated,
            Timestamp(0),
            [9; 32],
        ))
        .unwrap();
        assert!(invariant_distinct_voters(&env).is_ok());

        // Re-label the peer vote as the master's, bypassing the envelope methods.
        let mut value = serde_json::to_value(&env).unwrap();
        value["cross_validations"][0]["node_public_key"] =
            value["master_validation"]["validation"]["node_public_key"].clone();
        let decoded: TransactionEnvelope = serde_json::from_value(value).unwrap();

        assert_eq!(
            invariant_distinct_voters(&decoded),
            Err(FootprintError::DuplicateVote([0; 32]))
        );
    }

    #[test]
    fn test_integrity_requires_master_validation() {
        let env = TransactionEnvelope::for_submitter(
            [5; 32],
            TxType::CONTRACT_CALL,
            TransactionData::new(),
            Timestamp(0),
        );
        assert_eq!(
            check_envelope_integrity(&env),
            Err(FootprintError::MissingField("master_validation"))
        );
    }
}
