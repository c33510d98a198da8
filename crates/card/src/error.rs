//! Error type for OpenPGP card operations

use crate::commands::{DecipherError, SelectError, SignError, VerifyPinError};
use crate::types::PinError;

/// Result type for OpenPGP card operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for OpenPGP card operations
///
/// Transport failures and card-reported errors stay distinguishable so
/// a caller can suggest "hold the card steady" for the former and show
/// the card's verdict for the latter. Every variant ends the session;
/// retrying means presenting the card again.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The physical link failed mid-session
    #[error(transparent)]
    Transport(#[from] opgp_apdu_core::transport::TransportError),

    /// A reply was too short to carry a status word
    #[error(transparent)]
    Response(#[from] opgp_apdu_core::error::ResponseError),

    /// SELECT was refused
    #[error(transparent)]
    Select(#[from] SelectError),

    /// VERIFY was refused
    #[error(transparent)]
    VerifyPin(#[from] VerifyPinError),

    /// COMPUTE DIGITAL SIGNATURE failed
    #[error(transparent)]
    Sign(#[from] SignError),

    /// DECIPHER failed
    #[error(transparent)]
    Decipher(#[from] DecipherError),

    /// The PIN was rejected before ever reaching the card
    #[error(transparent)]
    Pin(#[from] PinError),
}

impl Error {
    /// Whether the failure was physical rather than card-reported
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
