//! OpenPGP smartcard sessions
//!
//! Drives the ISO-7816 exchange needed to use a private key stored on an
//! OpenPGP card without ever extracting it: applet selection, PW1
//! verification, and the two supported operations: computing an RSA
//! signature over a digest and deciphering an RSA-encrypted session key.
//!
//! A session is one physical presentation of the card. The typestate
//! chain [`CardSession`] → [`session::SelectedCard`] →
//! [`session::AuthenticatedCard`] enforces the command order on the
//! wire; any error is terminal and a retry needs a fresh transport.
//!
//! # Example
//!
//! ```
//! use opgp_apdu_core::MockTransport;
//! use opgp_card::{CardSession, HashAlgorithm, Pin};
//!
//! // A scripted card: SELECT ok, VERIFY ok, then a 128-byte signature.
//! let mut signature_reply = vec![0u8; 128];
//! signature_reply.extend_from_slice(&[0x90, 0x00]);
//! let transport = MockTransport::with_responses([
//!     vec![0x90, 0x00],
//!     vec![0x90, 0x00],
//!     signature_reply,
//! ]);
//!
//! let pin = Pin::new(b"123456".to_vec())?;
//! let digest = [0u8; 32];
//! let signature = CardSession::sign_digest(transport, &pin, HashAlgorithm::Sha256, &digest)?;
//! assert_eq!(signature.len(), 128);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod commands;
pub mod constants;
pub mod digest;
pub mod error;
pub mod session;
pub mod types;

pub use constants::{OPENPGP_AID, RESPONSE_TIMEOUT};
pub use digest::HashAlgorithm;
pub use error::{Error, Result};
pub use session::{AuthenticatedCard, CardSession, SelectedCard};
pub use types::{Pin, PinError};
