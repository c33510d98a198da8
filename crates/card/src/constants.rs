//! Protocol constants for the OpenPGP card applet

use std::time::Duration;

use opgp_apdu_core::StatusWord;

/// Application identifier of the OpenPGP card applet
pub const OPENPGP_AID: &[u8] = &[0xD2, 0x76, 0x00, 0x01, 0x24, 0x01];

/// Plain interindustry class byte
pub const CLA_PLAIN: u8 = 0x00;
/// Class byte with the command-chaining bit set (more blocks follow)
pub const CLA_CHAIN: u8 = 0x10;

/// PW1 reference used with VERIFY to authorize card operations
pub const PW1: u8 = 0x82;

/// Card operations on a private key can legitimately take this long
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(100);

/// RSA signature sizes the card can produce (RSA-1024 and RSA-2048)
pub const RSA_SIGNATURE_LENGTHS: [usize; 2] = [128, 256];

/// Longest data field of a single chained PSO:DECIPHER block
pub const DECIPHER_CHUNK_LEN: usize = 254;

/// Instruction bytes
pub mod ins {
    /// SELECT FILE
    pub const SELECT: u8 = 0xA4;
    /// VERIFY
    pub const VERIFY: u8 = 0x20;
    /// PERFORM SECURITY OPERATION
    pub const PERFORM_SECURITY_OPERATION: u8 = 0x2A;
    /// GET RESPONSE
    pub const GET_RESPONSE: u8 = 0xC0;
}

/// P1/P2 pairs selecting the security operation for INS 2A
pub mod pso {
    /// COMPUTE DIGITAL SIGNATURE
    pub const COMPUTE_SIGNATURE: (u8, u8) = (0x9E, 0x9A);
    /// DECIPHER
    pub const DECIPHER: (u8, u8) = (0x80, 0x86);
}

/// Status words this protocol actually meets
pub mod status {
    use super::StatusWord;

    /// Normal completion
    pub const SW_NO_ERROR: StatusWord = StatusWord::SUCCESS;
    /// File or application not found (SELECT with an unknown AID)
    pub const SW_FILE_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x82);
    /// Security status not satisfied
    pub const SW_SECURITY_STATUS_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x82);
    /// Conditions of use not satisfied
    pub const SW_CONDITIONS_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x85);
    /// SW1 of "more data available via GET RESPONSE"
    pub const SW1_BYTES_REMAINING: u8 = 0x61;
    /// SW1 of the verification-failed family (`63Cn` carries the retry
    /// counter, which this layer deliberately does not interpret)
    pub const SW1_VERIFY_FAILED: u8 = 0x63;
}
