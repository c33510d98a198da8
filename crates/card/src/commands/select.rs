//! SELECT FILE for the OpenPGP applet

use opgp_apdu_core::{Command, StatusWord};

use crate::constants::{ins, CLA_PLAIN, OPENPGP_AID};

/// SELECT FILE command
#[derive(Debug, Clone, Copy)]
pub struct SelectCommand;

impl SelectCommand {
    /// SELECT the OpenPGP applet by its fixed 6-byte AID
    ///
    /// Wire form: `00 A4 04 00 06 D27600012401 00`.
    pub fn openpgp() -> Command {
        Command::new_with_data(CLA_PLAIN, ins::SELECT, 0x04, 0x00, OPENPGP_AID).with_le(0x00)
    }
}

/// Errors reported by SELECT
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// Any status other than `9000`: the card does not host an OpenPGP
    /// applet, or the applet is in a state where it cannot be selected
    #[error("OpenPGP applet not found (card status {0})")]
    ApplicationNotFound(StatusWord),
}

/// Interpret the SELECT status word
pub fn check_select(status: StatusWord) -> Result<(), SelectError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(SelectError::ApplicationNotFound(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::status::SW_FILE_NOT_FOUND;

    #[test]
    fn test_select_wire_format() {
        let bytes = SelectCommand::openpgp().to_bytes();
        assert_eq!(hex::encode_upper(&bytes), "00A4040006D2760001240100");
    }

    #[test]
    fn test_only_9000_selects() {
        assert!(check_select(StatusWord::SUCCESS).is_ok());
        assert_eq!(
            check_select(SW_FILE_NOT_FOUND),
            Err(SelectError::ApplicationNotFound(SW_FILE_NOT_FOUND))
        );
        // 61xx would be a protocol surprise here and still must not pass
        assert!(check_select(StatusWord::new(0x61, 0x10)).is_err());
    }
}
