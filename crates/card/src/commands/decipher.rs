//! PERFORM SECURITY OPERATION: DECIPHER
//!
//! The card's APDU buffer for this operation is limited, so an
//! RSA-encrypted session key is sent as two chained blocks: the first
//! with the CLA chaining bit set, the second as the final block carrying
//! Le. The leading padding-indicator byte of the encrypted blob is not
//! transmitted.

use bytes::Bytes;
use opgp_apdu_core::{Command, StatusWord};

use crate::constants::{ins, pso, CLA_CHAIN, CLA_PLAIN, DECIPHER_CHUNK_LEN};

/// DECIPHER command
#[derive(Debug, Clone, Copy)]
pub struct DecipherCommand;

impl DecipherCommand {
    /// Build the chained DECIPHER blocks for an encrypted session key
    ///
    /// Inputs longer than 255 bytes split into a 254-byte first block
    /// (`10 2A 80 86 FE ...`) and a final block (`00 2A 80 86 Lc ... 00`);
    /// shorter inputs go out as a single final block. Byte 0 of the blob
    /// (the padding indicator) is skipped in both cases.
    pub fn with_ciphertext(ciphertext: &[u8]) -> Vec<Command> {
        assert!(
            ciphertext.len() > 1,
            "encrypted session key must carry data beyond the padding indicator"
        );

        let (p1, p2) = pso::DECIPHER;
        let payload = &ciphertext[1..];

        if ciphertext.len() > 255 {
            let (head, tail) = payload.split_at(DECIPHER_CHUNK_LEN);
            vec![
                Command::new_with_data(
                    CLA_CHAIN,
                    ins::PERFORM_SECURITY_OPERATION,
                    p1,
                    p2,
                    Bytes::copy_from_slice(head),
                ),
                Command::new_with_data(
                    CLA_PLAIN,
                    ins::PERFORM_SECURITY_OPERATION,
                    p1,
                    p2,
                    Bytes::copy_from_slice(tail),
                )
                .with_le(0x00),
            ]
        } else {
            vec![Command::new_with_data(
                CLA_PLAIN,
                ins::PERFORM_SECURITY_OPERATION,
                p1,
                p2,
                Bytes::copy_from_slice(payload),
            )
            .with_le(0x00)]
        }
    }
}

/// Errors reported while deciphering
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecipherError {
    /// A block was answered with a status other than `9000`
    #[error("decipher failed (card status {0})")]
    Card(StatusWord),

    /// The final response carried no session key
    #[error("decipher returned no data")]
    MissingPayload,
}

/// Interpret the status word of one DECIPHER block
pub fn check_decipher(status: StatusWord) -> Result<(), DecipherError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(DecipherError::Card(status))
    }
}
