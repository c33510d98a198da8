//! PC/SC transport for APDU exchanges
//!
//! Binds [`opgp_apdu_core::CardTransport`] to the platform PC/SC stack.
//! [`PcscDeviceManager`] enumerates readers and waits for a card to be
//! presented; [`PcscTransport`] owns one connected card and performs the
//! blocking request/response exchanges. Connecting and dropping the
//! transport bracket the card interaction, so the exclusive connection
//! is always released when a session ends, error or not.
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod manager;
mod reader;
mod transport;

pub use config::{PcscConfig, ShareMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::PcscReader;
pub use transport::PcscTransport;
