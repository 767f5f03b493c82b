//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Bytes do not decode to a curve point.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature did not verify against the message.
    #[error("Signature verification failed")]
    SignatureVerificationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CryptoError::InvalidPublicKey.to_string(), "Invalid public key");
        assert!(CryptoError::SignatureVerificationFailed
            .to_string()
            .contains("verification"));
    }
}
