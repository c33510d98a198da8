//! Core types for APDU (Application Protocol Data Unit) exchanges
//!
//! This crate provides the building blocks for talking to smart cards
//! according to ISO/IEC 7816-4:
//!
//! - [`Command`] for constructing command APDUs from named fields
//!   (CLA/INS/P1/P2/data/Le) instead of hand-assembled byte strings
//! - [`Response`] and [`StatusWord`] for parsing the reply and its
//!   trailing two-byte status
//! - [`CardTransport`] as the seam between protocol logic and the
//!   physical half-duplex link (PC/SC, NFC, a test double)
//!
//! Transport failures and card-reported errors are deliberately kept as
//! separate types: a [`transport::TransportError`] means the exchange never
//! completed, while a non-success [`StatusWord`] is a well-formed answer
//! from the card.
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

pub mod command;
pub mod error;
pub mod response;
pub mod transport;

pub use command::Command;
pub use error::Error;
pub use response::{Response, StatusWord};
pub use transport::{CardTransport, MockTransport};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{Bytes, BytesMut, Error};

    pub use crate::command::Command;
    pub use crate::response::{Response, StatusWord};
    pub use crate::transport::{CardTransport, MockTransport, TransportError};
}
