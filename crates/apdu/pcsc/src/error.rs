//! PC/SC error mapping

use opgp_apdu_core::transport::TransportError;

/// Errors raised while driving the PC/SC stack
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// Underlying PC/SC call failed
    #[error("PC/SC error: {0}")]
    Pcsc(#[from] pcsc::Error),

    /// No reader is attached to the system
    #[error("no PC/SC readers available")]
    NoReadersAvailable,

    /// No card was presented before the deadline
    #[error("no card presented within the wait deadline")]
    WaitTimeout,

    /// Reader name contained an interior NUL and cannot be passed to PC/SC
    #[error("invalid reader name: {0}")]
    InvalidReaderName(String),
}

impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::Pcsc(e) => map_pcsc_error(e),
            PcscError::WaitTimeout => Self::Timeout,
            PcscError::NoReadersAvailable | PcscError::InvalidReaderName(_) => Self::Connect,
        }
    }
}

/// Translate a raw PC/SC error into the transport taxonomy
///
/// Card removal and resets mean the physical link is gone; everything
/// else is a device-level failure.
pub(crate) fn map_pcsc_error(error: pcsc::Error) -> TransportError {
    match error {
        pcsc::Error::RemovedCard | pcsc::Error::ResetCard | pcsc::Error::NoSmartcard => {
            TransportError::Disconnected
        }
        pcsc::Error::Timeout => TransportError::Timeout,
        other => TransportError::Device(other.to_string()),
    }
}
