//! Value types shared across the session

use std::fmt;

/// Errors from constructing a [`Pin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    /// PW1 PINs are between 6 and 127 bytes
    #[error("PIN length {0} out of range (6..=127 bytes)")]
    InvalidLength(usize),
}

/// A PW1 PIN
///
/// The bytes are wiped when the value is dropped; sessions borrow the
/// PIN only for the duration of the VERIFY exchange and never log it.
#[derive(Clone)]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub struct Pin(Vec<u8>);

impl Pin {
    /// Wrap PIN bytes, validating the length the card will accept
    pub fn new(pin: impl Into<Vec<u8>>) -> Result<Self, PinError> {
        let pin = pin.into();
        if !(6..=127).contains(&pin.len()) {
            return Err(PinError::InvalidLength(pin.len()));
        }
        Ok(Self(pin))
    }

    /// The raw PIN bytes, for the VERIFY data field
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

impl std::str::FromStr for Pin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes().to_vec())
    }
}
