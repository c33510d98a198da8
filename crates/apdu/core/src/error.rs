//! Error types shared by APDU transports and protocol layers

pub use crate::transport::TransportError;

/// Errors from parsing response APDUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// The reply did not even carry the two status bytes
    #[error("response too short: {0} byte(s), need at least the status word")]
    TooShort(usize),
}

/// Umbrella error for core APDU operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The physical exchange failed; the command may never have reached
    /// the card
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The card answered, but the reply was malformed
    #[error(transparent)]
    Response(#[from] ResponseError),
}
