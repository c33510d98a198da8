//! The PC/SC card transport

use std::ffi::CStr;
use std::fmt;

use bytes::Bytes;
use pcsc::{Card, Context, Disposition, MAX_BUFFER_SIZE};
use tracing::{trace, warn};

use opgp_apdu_core::transport::{CardTransport, TransportError};

use crate::config::PcscConfig;
use crate::error::{map_pcsc_error, PcscError};

/// One connected PC/SC card
///
/// The connection is exclusive to this transport for its whole lifetime;
/// dropping it releases the card (leave disposition), so the reader is
/// free again as soon as the session ends.
pub struct PcscTransport {
    card: Card,
    config: PcscConfig,
}

impl fmt::Debug for PcscTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PcscTransport {
    pub(crate) fn connect(
        context: &Context,
        reader: &CStr,
        config: PcscConfig,
    ) -> Result<Self, PcscError> {
        let card = context.connect(reader, config.share_mode.into(), config.protocols)?;
        Ok(Self { card, config })
    }

    /// Whether the card still answers status queries
    pub fn is_connected(&self) -> bool {
        self.card.status2_owned().is_ok()
    }
}

impl CardTransport for PcscTransport {
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        trace!(command = %hex::encode_upper(command), "PC/SC transmit");

        let mut receive_buffer = [0u8; MAX_BUFFER_SIZE];
        let reply = self
            .card
            .transmit(command, &mut receive_buffer)
            .map_err(|e| {
                warn!(error = %e, "PC/SC transmit failed");
                map_pcsc_error(e)
            })?;

        trace!(reply = %hex::encode_upper(reply), "PC/SC reply");
        Ok(Bytes::copy_from_slice(reply))
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.card
            .reconnect(
                self.config.share_mode.into(),
                self.config.protocols,
                Disposition::ResetCard,
            )
            .map_err(map_pcsc_error)
    }

    // set_timeout: the PC/SC API has no per-exchange deadline; exchanges
    // block until the reader answers, so the advisory default applies.
}
