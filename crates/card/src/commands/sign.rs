//! PERFORM SECURITY OPERATION: COMPUTE DIGITAL SIGNATURE

use bytes::Bytes;
use opgp_apdu_core::{Command, StatusWord};

use crate::constants::{ins, pso, CLA_PLAIN, RSA_SIGNATURE_LENGTHS};
use crate::digest::HashAlgorithm;

/// COMPUTE DIGITAL SIGNATURE command
#[derive(Debug, Clone, Copy)]
pub struct SignCommand;

impl SignCommand {
    /// Sign a digest with the on-card signature key
    ///
    /// Wire form: `00 2A 9E 9A Lc DigestInfo 00`. The DigestInfo is
    /// built here from the canonical per-algorithm prefix table;
    /// handing in a digest of the wrong length panics (caller bug).
    pub fn with_digest(algorithm: HashAlgorithm, digest: &[u8]) -> Command {
        let (p1, p2) = pso::COMPUTE_SIGNATURE;
        Command::new_with_data(
            CLA_PLAIN,
            ins::PERFORM_SECURITY_OPERATION,
            p1,
            p2,
            algorithm.digest_info(digest),
        )
        .with_le(0x00)
    }
}

/// Errors reported while computing a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    /// The card ended the exchange with a status other than `9000`
    #[error("signature failed (card status {0})")]
    Card(StatusWord),

    /// The accumulated signature is not an RSA-1024/2048 output
    #[error("signature has invalid length {0}, expected 128 or 256 bytes")]
    InvalidLength(usize),
}

/// Interpret the final status word of the signature exchange
///
/// `61xx` continuations must already have been drained by the caller.
pub fn check_sign_status(status: StatusWord) -> Result<(), SignError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(SignError::Card(status))
    }
}

/// Sanity-check the assembled signature against the supported RSA sizes
pub fn check_signature_length(signature: &Bytes) -> Result<(), SignError> {
    if RSA_SIGNATURE_LENGTHS.contains(&signature.len()) {
        Ok(())
    } else {
        Err(SignError::InvalidLength(signature.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_wire_format() {
        let digest = [0x11u8; 32];
        let bytes = SignCommand::with_digest(HashAlgorithm::Sha256, &digest).to_bytes();

        // 00 2A 9E 9A, Lc = 0x33 (19-byte prefix + 32-byte hash), trailing Le
        assert_eq!(&bytes[..5], &[0x00, 0x2A, 0x9E, 0x9A, 0x33]);
        assert_eq!(bytes[bytes.len() - 1], 0x00);
        assert_eq!(bytes.len(), 5 + 0x33 + 1);
    }

    #[test]
    fn test_signature_length_check() {
        assert!(check_signature_length(&Bytes::from(vec![0u8; 128])).is_ok());
        assert!(check_signature_length(&Bytes::from(vec![0u8; 256])).is_ok());
        assert_eq!(
            check_signature_length(&Bytes::from(vec![0u8; 100])),
            Err(SignError::InvalidLength(100))
        );
    }

    #[test]
    fn test_sign_status_check() {
        assert!(check_sign_status(StatusWord::SUCCESS).is_ok());
        let sw = StatusWord::new(0x69, 0x85);
        assert_eq!(check_sign_status(sw), Err(SignError::Card(sw)));
    }
}
