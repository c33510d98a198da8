//! PC/SC context management and reader discovery

use std::ffi::CString;
use std::time::{Duration, Instant};

use pcsc::{Context, ReaderState, Scope, State};
use tracing::{debug, trace};

use crate::config::PcscConfig;
use crate::error::PcscError;
use crate::reader::PcscReader;
use crate::transport::PcscTransport;

/// Entry point to the PC/SC stack
///
/// Owns the PC/SC context, enumerates readers and opens transports. The
/// manager itself never talks to a card; it only hands out exclusive
/// [`PcscTransport`] connections.
pub struct PcscDeviceManager {
    context: Context,
}

impl std::fmt::Debug for PcscDeviceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PcscDeviceManager").finish_non_exhaustive()
    }
}

impl PcscDeviceManager {
    /// Establish a new PC/SC context
    pub fn new() -> Result<Self, PcscError> {
        let context = Context::establish(Scope::User)?;
        Ok(Self { context })
    }

    /// List all readers with their current card state
    pub fn list_readers(&self) -> Result<Vec<PcscReader>, PcscError> {
        let names = self.reader_names()?;
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut states: Vec<ReaderState> = names
            .iter()
            .map(|name| ReaderState::new(name.as_c_str(), State::UNAWARE))
            .collect();

        // UNAWARE makes this return immediately with the current state.
        self.context
            .get_status_change(Duration::ZERO, &mut states)?;

        Ok(states.iter().map(PcscReader::from_reader_state).collect())
    }

    /// Open a transport to the named reader with the default configuration
    pub fn open_reader(&self, name: &str) -> Result<PcscTransport, PcscError> {
        self.open_reader_with_config(name, PcscConfig::default())
    }

    /// Open a transport to the named reader
    pub fn open_reader_with_config(
        &self,
        name: &str,
        config: PcscConfig,
    ) -> Result<PcscTransport, PcscError> {
        let c_name =
            CString::new(name).map_err(|_| PcscError::InvalidReaderName(name.to_string()))?;
        debug!(reader = name, "connecting to reader");
        PcscTransport::connect(&self.context, &c_name, config)
    }

    /// Block until a card is presented in any reader, or the deadline
    /// passes
    ///
    /// Meant for the interactive "place your card on the reader" moment:
    /// call it once per session and give up when the deadline passes
    /// rather than polling forever.
    pub fn wait_for_card(&self, deadline: Duration) -> Result<PcscReader, PcscError> {
        let started = Instant::now();

        let names = self.reader_names()?;
        if names.is_empty() {
            return Err(PcscError::NoReadersAvailable);
        }

        // The first wait returns immediately (UNAWARE counts as a state
        // change); after that, each wait blocks until something happens.
        let mut states: Vec<ReaderState> = names
            .iter()
            .map(|name| ReaderState::new(name.as_c_str(), State::UNAWARE))
            .collect();

        loop {
            let remaining = deadline
                .checked_sub(started.elapsed())
                .ok_or(PcscError::WaitTimeout)?;

            match self.context.get_status_change(remaining, &mut states) {
                Ok(()) => {}
                Err(pcsc::Error::Timeout) => return Err(PcscError::WaitTimeout),
                Err(e) => return Err(e.into()),
            }

            for state in &states {
                let reader = PcscReader::from_reader_state(state);
                if reader.has_card() {
                    trace!(reader = reader.name(), "card present");
                    return Ok(reader);
                }
            }

            for state in states.iter_mut() {
                state.sync_current_state();
            }
        }
    }

    fn reader_names(&self) -> Result<Vec<CString>, PcscError> {
        let mut buf = [0u8; 4096];
        let names = self.context.list_readers(&mut buf)?;
        Ok(names.map(CString::from).collect())
    }
}
