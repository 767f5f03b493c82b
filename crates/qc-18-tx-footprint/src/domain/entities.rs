//! # Domain Entities
//!
//! Node headers, validation stamps, the master validation stamp and the
//! transaction envelope that carries them.
//!
//! ## Lifecycle
//!
//! 1. `TransactionEnvelope::build` at submission (unsigned)
//! 2. `attach_signature` / `attach_origin_signature` over `canonical_bytes()`
//! 3. `attach_master_validation` + `add_cross_validation` during consensus
//!
//! Signed fields cannot be amended in place. `into_unsigned` drops every
//! signature and consensus record so the envelope can be re-signed.

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

use super::canonical::CanonicalWriter;
use super::errors::FootprintError;
use super::value_objects::{
    Hash, HeaderGroup, PayloadEntry, ProofOfWork, PublicKey, Signature, Timestamp,
    TransactionData, TxType, ValidationStatus,
};

// =============================================================================
// NODE HEADER
// =============================================================================

/// Compact descriptor of one participating node.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeHeader {
    /// Node identity.
    #[serde_as(as = "Base64")]
    pub public_key: PublicKey,
    /// Node could not be reached during the round.
    pub is_unreachable: bool,
    /// Node acted as master.
    pub is_master: bool,
    /// Node answered correctly.
    pub is_ok: bool,
    /// Software patch level.
    pub patch_number: u16,
}

impl NodeHeader {
    /// Reachable, healthy node.
    pub fn new(public_key: PublicKey, is_master: bool, patch_number: u16) -> Self {
        Self {
            public_key,
            is_unreachable: false,
            is_master,
            is_ok: true,
            patch_number,
        }
    }
}

// =============================================================================
// VALIDATION STAMP
// =============================================================================

/// One node's signed attestation over a transaction.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStamp {
    status: Option<ValidationStatus>,
    timestamp: Timestamp,
    #[serde_as(as = "Option<Base64>")]
    node_public_key: Option<PublicKey>,
    #[serde_as(as = "Option<Base64>")]
    node_signature: Option<Signature>,
}

impl ValidationStamp {
    /// Unsigned stamp with every required field present.
    pub fn new(status: ValidationStatus, timestamp: Timestamp, node_public_key: PublicKey) -> Self {
        Self::partial(Some(status), timestamp, Some(node_public_key))
    }

    /// Unsigned stamp that may lack its status or identity.
    pub fn partial(
        status: Option<ValidationStatus>,
        timestamp: Timestamp,
        node_public_key: Option<PublicKey>,
    ) -> Self {
        Self {
            status,
            timestamp,
            node_public_key,
            node_signature: None,
        }
    }

    /// Bytes the node signs: status, timestamp (u64 LE), identity.
    ///
    /// The signature itself is never included. Absent fields write nothing.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut w = CanonicalWriter::new();
        if let Some(status) = self.status {
            w.u8(status.as_u8());
        }
        w.u64_le(self.timestamp.as_millis())
            .optional(self.node_public_key.as_ref().map(|k| k.as_slice()));
        w.finish()
    }

    /// Set the node signature. Fails if one is already present.
    pub fn attach_signature(&mut self, signature: Signature) -> Result<(), FootprintError> {
        if self.node_signature.is_some() {
            return Err(FootprintError::ImmutabilityViolation("node_signature"));
        }
        self.node_signature = Some(signature);
        Ok(())
    }

    /// Attestation outcome.
    pub fn status(&self) -> Option<ValidationStatus> {
        self.status
    }

    /// Time of attestation.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Attesting node.
    pub fn node_public_key(&self) -> Option<&PublicKey> {
        self.node_public_key.as_ref()
    }

    /// Node signature over `canonical_bytes()`.
    pub fn node_signature(&self) -> Option<&Signature> {
        self.node_signature.as_ref()
    }
}

// =============================================================================
// MASTER VALIDATION STAMP
// =============================================================================

/// The consensus leader's aggregation record.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterValidationStamp {
    /// Placeholder work artifact (see [`ProofOfWork`]).
    pub proof_of_work: ProofOfWork,
    /// Validator set of the previous transaction on this chain.
    #[serde_as(as = "Vec<Base64>")]
    pub previous_validation_nodes: Vec<PublicKey>,
    /// The master's own vote.
    pub validation: ValidationStamp,
    /// Entry nodes.
    pub welcome_headers: Vec<NodeHeader>,
    /// Validators, peers first and the master last.
    pub validation_headers: Vec<NodeHeader>,
    /// Storage replicas.
    pub storage_headers: Vec<NodeHeader>,
    /// Digest of the envelope's canonical bytes.
    #[serde_as(as = "Base64")]
    pub transaction_hash: Hash,
}

impl MasterValidationStamp {
    /// Headers of one group.
    pub fn headers(&self, group: HeaderGroup) -> &[NodeHeader] {
        match group {
            HeaderGroup::Welcome => &self.welcome_headers,
            HeaderGroup::Validation => &self.validation_headers,
            HeaderGroup::Storage => &self.storage_headers,
        }
    }

    /// Total headers across all groups.
    pub fn header_count(&self) -> usize {
        HeaderGroup::ALL.iter().map(|g| self.headers(*g).len()).sum()
    }
}

// =============================================================================
// TRANSACTION ENVELOPE
// =============================================================================

/// A transaction plus the consensus metadata attached to it.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    #[serde_as(as = "Base64")]
    address: Hash,
    tx_type: TxType,
    data: TransactionData,
    timestamp: Timestamp,
    #[serde_as(as = "Option<Base64>")]
    previous_public_key: Option<PublicKey>,
    #[serde_as(as = "Option<Base64>")]
    signature: Option<Signature>,
    #[serde_as(as = "Option<Base64>")]
    origin_signature: Option<Signature>,
    master_validation: Option<MasterValidationStamp>,
    cross_validations: Vec<ValidationStamp>,
}

impl TransactionEnvelope {
    /// Unsigned envelope with no consensus metadata.
    pub fn build(
        address: Hash,
        tx_type: TxType,
        data: TransactionData,
        timestamp: Timestamp,
        previous_public_key: Option<PublicKey>,
    ) -> Self {
        Self {
            address,
            tx_type,
            data,
            timestamp,
            previous_public_key,
            signature: None,
            origin_signature: None,
            master_validation: None,
            cross_validations: Vec::new(),
        }
    }

    /// Unsigned envelope whose address is derived from the submitter key.
    pub fn for_submitter(
        submitter: PublicKey,
        tx_type: TxType,
        data: TransactionData,
        timestamp: Timestamp,
    ) -> Self {
        let address = shared_crypto::address_from_public_key(&submitter);
        Self::build(address, tx_type, data, timestamp, Some(submitter))
    }

    /// Signing message: every field except the two signature slots.
    ///
    /// Layout: address, type, entry count, entries (kind byte then
    /// length-prefixed bytes), timestamp (u64 LE), previous public key.
    /// Consensus metadata is attached after signing and is not covered.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, FootprintError> {
        let mut w = CanonicalWriter::new();
        w.fixed(&self.address).u8(self.tx_type.0);

        let count: u8 = self.data.entries().len().try_into().map_err(|_| {
            FootprintError::EncodingFailure("too many payload entries".to_string())
        })?;
        w.u8(count);
        for entry in self.data.entries() {
            w.u8(entry.kind() as u8);
            match entry {
                PayloadEntry::Code(bytes) | PayloadEntry::Trigger(bytes) => {
                    w.prefixed(bytes)?;
                }
                PayloadEntry::ProposalSharedOriginKey(key) => {
                    w.fixed(&key.public_key).prefixed(&key.encrypted_private_key)?;
                }
            }
        }

        w.u64_le(self.timestamp.as_millis())
            .optional(self.previous_public_key.as_ref().map(|k| k.as_slice()));
        Ok(w.finish())
    }

    /// Set the submitter signature once.
    pub fn attach_signature(&mut self, signature: Signature) -> Result<(), FootprintError> {
        if self.signature.is_some() {
            return Err(FootprintError::ImmutabilityViolation("signature"));
        }
        self.signature = Some(signature);
        Ok(())
    }

    /// Set the propagation-origin signature once.
    pub fn attach_origin_signature(&mut self, signature: Signature) -> Result<(), FootprintError> {
        if self.origin_signature.is_some() {
            return Err(FootprintError::ImmutabilityViolation("origin_signature"));
        }
        self.origin_signature = Some(signature);
        Ok(())
    }

    /// Attach the leader's record. Only one per envelope.
    pub fn attach_master_validation(
        &mut self,
        master_validation: MasterValidationStamp,
    ) -> Result<(), FootprintError> {
        if self.master_validation.is_some() {
            return Err(FootprintError::ImmutabilityViolation("master_validation"));
        }
        if let Some(master) = master_validation.validation.node_public_key() {
            if self.has_vote_from(master) {
                return Err(FootprintError::DuplicateVote(*master));
            }
        }
        self.master_validation = Some(master_validation);
        Ok(())
    }

    /// Append a peer stamp. One stamp per node identity, and never from the
    /// master, whose vote lives in the master validation stamp.
    ///
    /// Stamps without an identity cannot be deduplicated and are appended
    /// as-is; the strict size policy rejects them later.
    pub fn add_cross_validation(&mut self, stamp: ValidationStamp) -> Result<(), FootprintError> {
        if let Some(node) = stamp.node_public_key() {
            let from_master = self
                .master_validation
                .as_ref()
                .and_then(|mv| mv.validation.node_public_key())
                == Some(node);
            if from_master || self.has_vote_from(node) {
                return Err(FootprintError::DuplicateVote(*node));
            }
        }
        self.cross_validations.push(stamp);
        Ok(())
    }

    fn has_vote_from(&self, node: &PublicKey) -> bool {
        self.cross_validations
            .iter()
            .any(|v| v.node_public_key() == Some(node))
    }

    /// Replace the payload. Refused once either signature is present.
    pub fn amend_data(&mut self, data: TransactionData) -> Result<(), FootprintError> {
        if self.is_signed() {
            return Err(FootprintError::ImmutabilityViolation("data"));
        }
        self.data = data;
        Ok(())
    }

    /// Drop signatures and consensus metadata, keeping the submitted fields.
    pub fn into_unsigned(self) -> Self {
        Self::build(
            self.address,
            self.tx_type,
            self.data,
            self.timestamp,
            self.previous_public_key,
        )
    }

    /// True once either signature slot is filled.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some() || self.origin_signature.is_some()
    }

    /// Digest of the submitter public key.
    pub fn address(&self) -> &Hash {
        &self.address
    }

    /// Type tag.
    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }

    /// Payload.
    pub fn data(&self) -> &TransactionData {
        &self.data
    }

    /// Submission time.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Submitter identity.
    pub fn previous_public_key(&self) -> Option<&PublicKey> {
        self.previous_public_key.as_ref()
    }

    /// Submitter signature.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Propagation-origin signature.
    pub fn origin_signature(&self) -> Option<&Signature> {
        self.origin_signature.as_ref()
    }

    /// Leader's record.
    pub fn master_validation(&self) -> Option<&MasterValidationStamp> {
        self.master_validation.as_ref()
    }

    /// Peer stamps in arrival order.
    pub fn cross_validations(&self) -> &[ValidationStamp] {
        &self.cross_validations
    }
}
