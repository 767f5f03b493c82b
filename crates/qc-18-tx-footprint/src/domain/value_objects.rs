//! # Value Objects
//!
//! Fixed-width primitives, tags and the closed payload variant carried by a
//! transaction envelope.

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use std::fmt;

/// A 32-byte Ed25519 public key identifying a node or submitter.
pub type PublicKey = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte content digest (BLAKE3).
pub type Hash = [u8; 32];

/// Milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Wall-clock now. Only the reporting binary calls this; tests pin values.
    pub fn now() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self(millis)
    }

    /// Raw milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Transaction type tag (one byte on the wire).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxType(pub u8);

impl TxType {
    /// Contract call carrying a `code` payload.
    pub const CONTRACT_CALL: TxType = TxType(1);
}

/// Outcome recorded by a validation stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ValidationStatus {
    /// Node rejected the transaction.
    Invalid = 0,
    /// Node accepted the transaction.
    Validated = 1,
}

impl ValidationStatus {
    /// Wire byte.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Proof-of-work artifact of a master validation stamp.
///
/// The reference consensus round stores the public key of the node whose
/// key matched the transaction origin here. It is an identity, not a
/// computed work value, and is sized as one.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofOfWork(#[serde_as(as = "Base64")] pub PublicKey);

impl ProofOfWork {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &PublicKey {
        &self.0
    }
}

/// The three node header collections of a master validation stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderGroup {
    /// Entry nodes that received the transaction.
    Welcome,
    /// Consensus validators (peers plus the master).
    Validation,
    /// Storage replicas.
    Storage,
}

impl HeaderGroup {
    /// All groups in wire order.
    pub const ALL: [HeaderGroup; 3] = [
        HeaderGroup::Welcome,
        HeaderGroup::Validation,
        HeaderGroup::Storage,
    ];
}

impl fmt::Display for HeaderGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderGroup::Welcome => write!(f, "welcome"),
            HeaderGroup::Validation => write!(f, "validation"),
            HeaderGroup::Storage => write!(f, "storage"),
        }
    }
}

/// How size estimation treats absent required fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldPolicy {
    /// Benchmarking: an absent field contributes zero bytes.
    #[default]
    Lenient,
    /// Production: an absent field fails with `MissingField`.
    Strict,
}

/// Key material shared with the transaction's origin for proposal handling.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSharedOriginKey {
    /// Public half of the shared origin key.
    #[serde_as(as = "Base64")]
    pub public_key: PublicKey,
    /// Private half, encrypted for the recipient set.
    #[serde_as(as = "Base64")]
    pub encrypted_private_key: Vec<u8>,
}

/// Discriminant of a [`PayloadEntry`], also its canonical ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PayloadKind {
    /// Contract code.
    Code = 1,
    /// Contract trigger.
    Trigger = 2,
    /// Proposal shared origin key.
    ProposalSharedOriginKey = 3,
}

/// One typed payload item.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadEntry {
    /// Smart contract code to execute.
    Code(#[serde_as(as = "Base64")] Vec<u8>),
    /// Trigger code attached to the contract.
    Trigger(#[serde_as(as = "Base64")] Vec<u8>),
    /// Origin key shared with proposal recipients.
    ProposalSharedOriginKey(ProposalSharedOriginKey),
}

impl PayloadEntry {
    /// Discriminant.
    pub fn kind(&self) -> PayloadKind {
        match self {
            PayloadEntry::Code(_) => PayloadKind::Code,
            PayloadEntry::Trigger(_) => PayloadKind::Trigger,
            PayloadEntry::ProposalSharedOriginKey(_) => PayloadKind::ProposalSharedOriginKey,
        }
    }

    /// Bytes this entry occupies in the size model (no tags or framing).
    pub fn wire_len(&self) -> usize {
        match self {
            PayloadEntry::Code(code) => code.len(),
            PayloadEntry::Trigger(trigger) => trigger.len(),
            PayloadEntry::ProposalSharedOriginKey(key) => {
                key.public_key.len() + key.encrypted_private_key.len()
            }
        }
    }
}

/// Transaction payload: at most one entry per [`PayloadKind`], kept in kind order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    entries: Vec<PayloadEntry>,
}

impl TransactionData {
    /// Empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any existing entry of the same kind.
    pub fn with(mut self, entry: PayloadEntry) -> Self {
        self.entries.retain(|e| e.kind() != entry.kind());
        self.entries.push(entry);
        self.entries.sort_by_key(PayloadEntry::kind);
        self
    }

    /// Entries in canonical order.
    pub fn entries(&self) -> &[PayloadEntry] {
        &self.entries
    }

    /// Contract code, if present.
    pub fn code(&self) -> Option<&[u8]> {
        self.entries.iter().find_map(|e| match e {
            PayloadEntry::Code(code) => Some(code.as_slice()),
            _ => None,
        })
    }

    /// Trigger code, if present.
    pub fn trigger(&self) -> Option<&[u8]> {
        self.entries.iter().find_map(|e| match e {
            PayloadEntry::Trigger(trigger) => Some(trigger.as_slice()),
            _ => None,
        })
    }

    /// Shared origin key, if present.
    pub fn proposal_shared_origin_key(&self) -> Option<&ProposalSharedOriginKey> {
        self.entries.iter().find_map(|e| match e {
            PayloadEntry::ProposalSharedOriginKey(key) => Some(key),
            _ => None,
        })
    }

    /// Sum of entry wire lengths.
    pub fn wire_len(&self) -> usize {
        self.entries.iter().map(PayloadEntry::wire_len).sum()
    }

    /// True if no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> ProposalSharedOriginKey {
        ProposalSharedOriginKey {
            public_key: [4u8; 32],
            encrypted_private_key: vec![5u8; 32],
        }
    }

    #[test]
    fn test_payload_accessors() {
        let data = TransactionData::new()
            .with(PayloadEntry::ProposalSharedOriginKey(proposal()))
            .with(PayloadEntry::Code(b"sendTo(x, 10)".to_vec()));

        assert_eq!(data.code(), Some(&b"sendTo(x, 10)"[..]));
        assert!(data.trigger().is_none());
        assert_eq!(data.proposal_shared_origin_key(), Some(&proposal()));
    }

    #[test]
    fn test_payload_kept_in_kind_order() {
        let data = TransactionData::new()
            .with(PayloadEntry::ProposalSharedOriginKey(proposal()))
            .with(PayloadEntry::Trigger(vec![9]))
            .with(PayloadEntry::Code(vec![1]));

        let kinds: Vec<_> = data.entries().iter().map(PayloadEntry::kind).collect();
        assert_eq!(
            kinds,
            vec![
                PayloadKind::Code,
                PayloadKind::Trigger,
                PayloadKind::ProposalSharedOriginKey
            ]
        );
    }

    #[test]
    fn test_payload_replaces_same_kind() {
        let data = TransactionData::new()
            .with(PayloadEntry::Code(vec![1, 2, 3]))
            .with(PayloadEntry::Code(vec![4]));

        assert_eq!(data.entries().len(), 1);
        assert_eq!(data.code(), Some(&[4u8][..]));
    }

    #[test]
    fn test_payload_wire_len() {
        let data = TransactionData::new()
            .with(PayloadEntry::Code(vec![0u8; 42]))
            .with(PayloadEntry::ProposalSharedOriginKey(proposal()));

        assert_eq!(data.wire_len(), 42 + 32 + 32);
    }

    #[test]
    fn test_header_group_display() {
        assert_eq!(HeaderGroup::Storage.to_string(), "storage");
    }

    #[test]
    fn test_default_policy_is_lenient() {
        assert_eq!(FieldPolicy::default(), FieldPolicy::Lenient);
    }
}
