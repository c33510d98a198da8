//! One module per APDU the session sends
//!
//! Each module exposes builders returning a plain
//! [`opgp_apdu_core::Command`] and an error type keyed on the status
//! words the card answers with. Status interpretation lives here; the
//! exchange ordering lives in [`crate::session`].

pub mod decipher;
pub use decipher::*;
pub mod get_response;
pub use get_response::*;
pub mod select;
pub use select::*;
pub mod sign;
pub use sign::*;
pub mod verify;
pub use verify::*;
