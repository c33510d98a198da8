//! VERIFY (PW1) against the OpenPGP applet

use bytes::Bytes;
use opgp_apdu_core::{Command, StatusWord};

use crate::constants::{ins, CLA_PLAIN, PW1};
use crate::types::Pin;

/// VERIFY command
#[derive(Debug, Clone, Copy)]
pub struct VerifyCommand;

impl VerifyCommand {
    /// VERIFY the PW1 PIN
    ///
    /// Wire form: `00 20 00 82 Lc pin-bytes`.
    pub fn with_pin(pin: &Pin) -> Command {
        Command::new_with_data(
            CLA_PLAIN,
            ins::VERIFY,
            0x00,
            PW1,
            Bytes::copy_from_slice(pin.as_bytes()),
        )
    }
}

/// Errors reported by VERIFY
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerifyPinError {
    /// Any status other than `9000`
    ///
    /// The raw status word is carried along (a `63Cn` encodes the
    /// card-side retry counter) but is not interpreted here: the card
    /// enforces its own lockout, and this layer never retries a VERIFY.
    #[error("wrong PIN (card status {0})")]
    WrongPin(StatusWord),
}

/// Interpret the VERIFY status word
pub fn check_verify(status: StatusWord) -> Result<(), VerifyPinError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(VerifyPinError::WrongPin(status))
    }
}
