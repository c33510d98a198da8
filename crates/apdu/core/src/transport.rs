//! Card transport abstraction
//!
//! A [`CardTransport`] owns one physical half-duplex link to a card and
//! performs strict request/response exchanges; no pipelining, no sharing.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;

/// Errors raised by the physical link, as opposed to card-reported status
/// words
///
/// A transport error means the exchange did not complete; the caller
/// should tell the user to keep the card in place and restart the whole
/// session.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be established
    #[error("failed to connect to the card")]
    Connect,

    /// The card was removed or the link dropped mid-exchange
    #[error("card connection lost during exchange")]
    Disconnected,

    /// The card did not answer within the configured timeout
    #[error("card did not respond in time")]
    Timeout,

    /// Device-level failure reported by the underlying stack
    #[error("transport device error: {0}")]
    Device(String),
}

/// One exclusive, half-duplex connection to a smart card
pub trait CardTransport: fmt::Debug {
    /// Transmit a raw command APDU and return the raw reply, including
    /// the trailing status word
    ///
    /// Blocks until the card answers or the transport gives up.
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;

    /// Reset the underlying connection
    fn reset(&mut self) -> Result<(), TransportError>;

    /// Advise the transport how long a single exchange may block
    ///
    /// Card-side private-key operations are slow, so sessions request a
    /// generous budget before the first command. Transports whose stack
    /// has no per-exchange deadline may ignore this.
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        let _ = timeout;
        Ok(())
    }
}

impl<T: CardTransport + ?Sized> CardTransport for &mut T {
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        (**self).transmit_raw(command)
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        (**self).reset()
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        (**self).set_timeout(timeout)
    }
}

/// Scripted transport for protocol tests
///
/// Replies are served in FIFO order; every transmitted command is
/// recorded for assertions. Running out of scripted replies reports
/// [`TransportError::Disconnected`], which doubles as a "card moved away
/// mid-session" simulation.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: VecDeque<Bytes>,
    commands: Vec<Bytes>,
}

impl MockTransport {
    /// Create a mock with no scripted replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock scripted with a sequence of replies, served in
    /// order
    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            commands: Vec::new(),
        }
    }

    /// Create a mock scripted with a single reply
    pub fn with_response<T: Into<Bytes>>(response: T) -> Self {
        Self::with_responses([response.into()])
    }

    /// Append a scripted reply
    pub fn push_response<T: Into<Bytes>>(&mut self, response: T) {
        self.responses.push_back(response.into());
    }

    /// Commands transmitted so far, in order
    pub fn commands(&self) -> &[Bytes] {
        &self.commands
    }
}

impl CardTransport for MockTransport {
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.commands.push(Bytes::copy_from_slice(command));
        self.responses
            .pop_front()
            .ok_or(TransportError::Disconnected)
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.responses.clear();
        self.commands.clear();
        Ok(())
    }
}
