//! GET RESPONSE continuation for chunked replies

use opgp_apdu_core::Command;

use crate::constants::{ins, CLA_PLAIN};

/// GET RESPONSE command
#[derive(Debug, Clone, Copy)]
pub struct GetResponseCommand;

impl GetResponseCommand {
    /// Fetch the pending bytes announced by a `61xx` status word
    ///
    /// Wire form: `00 C0 00 00 remaining`.
    pub const fn with_remaining(remaining: u8) -> Command {
        Command::new_with_le(CLA_PLAIN, ins::GET_RESPONSE, 0x00, 0x00, remaining)
    }
}
