//! The per-tap card session state machine
//!
//! One session covers one physical presentation of the card and runs
//! `open → select → verify_pin → {sign | decipher}`. Each step consumes
//! its predecessor, so a step can only be reached with every prior step
//! completed in the same session, and a finished session (success or
//! error) cannot be reused: the next attempt starts from a fresh
//! transport. This replaces mutable "where was I" fields with states the
//! type system checks.
//!
//! All exchanges are strict half-duplex request/response on the
//! exclusively owned transport; a multi-step operation (GET RESPONSE
//! draining, DECIPHER chaining) runs synchronously to completion.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use opgp_apdu_core::{CardTransport, Command, Response};

use crate::commands::{
    check_decipher, check_select, check_sign_status, check_signature_length, check_verify,
    DecipherCommand, DecipherError, GetResponseCommand, SelectCommand, SignCommand, VerifyCommand,
};
use crate::constants::RESPONSE_TIMEOUT;
use crate::digest::HashAlgorithm;
use crate::error::Result;
use crate::types::Pin;

fn exchange<T: CardTransport>(
    transport: &mut T,
    name: &'static str,
    command: &Command,
) -> Result<Response> {
    let reply = transport.transmit_raw(&command.to_bytes())?;
    let response = Response::from_bytes(&reply)?;
    debug!(
        command = name,
        status = %response.status(),
        data_len = response.data().len(),
        "card exchange"
    );
    Ok(response)
}

/// A freshly opened session (CONNECTED)
///
/// Holds the transport exclusively until the session ends.
#[derive(Debug)]
pub struct CardSession<T: CardTransport> {
    transport: T,
}

impl<T: CardTransport> CardSession<T> {
    /// Take ownership of a connected transport and set the response
    /// timeout
    ///
    /// On-card RSA is slow, so the budget is generous (100 seconds).
    pub fn open(mut transport: T) -> Result<Self> {
        transport.set_timeout(RESPONSE_TIMEOUT)?;
        Ok(Self { transport })
    }

    /// SELECT the OpenPGP applet (→ APPLICATION_SELECTED)
    pub fn select(mut self) -> Result<SelectedCard<T>> {
        let response = exchange(&mut self.transport, "SELECT", &SelectCommand::openpgp())?;
        check_select(response.status())?;
        Ok(SelectedCard {
            transport: self.transport,
        })
    }

    /// Run a complete signing session: select, verify, sign
    pub fn sign_digest(
        transport: T,
        pin: &Pin,
        algorithm: HashAlgorithm,
        digest: &[u8],
    ) -> Result<Bytes> {
        Self::open(transport)?
            .select()?
            .verify_pin(pin)?
            .compute_signature(algorithm, digest)
    }

    /// Run a complete decryption session: select, verify, decipher
    pub fn decrypt_session_key(transport: T, pin: &Pin, ciphertext: &[u8]) -> Result<Bytes> {
        Self::open(transport)?
            .select()?
            .verify_pin(pin)?
            .decrypt_session_key(ciphertext)
    }
}

/// A session with the OpenPGP applet selected (APPLICATION_SELECTED)
#[derive(Debug)]
pub struct SelectedCard<T: CardTransport> {
    transport: T,
}

impl<T: CardTransport> SelectedCard<T> {
    /// VERIFY the PW1 PIN (→ AUTHENTICATED)
    ///
    /// No local retry on failure; the card's own retry counter governs
    /// lockout and a failed VERIFY ends the session.
    pub fn verify_pin(mut self, pin: &Pin) -> Result<AuthenticatedCard<T>> {
        let response = exchange(&mut self.transport, "VERIFY", &VerifyCommand::with_pin(pin))?;
        check_verify(response.status())?;
        Ok(AuthenticatedCard {
            transport: self.transport,
        })
    }
}

/// An authenticated session, ready for exactly one operation
/// (AUTHENTICATED)
#[derive(Debug)]
pub struct AuthenticatedCard<T: CardTransport> {
    transport: T,
}

impl<T: CardTransport> AuthenticatedCard<T> {
    /// COMPUTE DIGITAL SIGNATURE over a digest (terminal)
    ///
    /// Drains `61xx` continuations via GET RESPONSE until the card
    /// reports a final status, then checks the assembled signature is an
    /// RSA-1024/2048 output. The digest length must match the algorithm
    /// (panics otherwise; see [`HashAlgorithm::digest_info`]).
    pub fn compute_signature(mut self, algorithm: HashAlgorithm, digest: &[u8]) -> Result<Bytes> {
        let mut response = exchange(
            &mut self.transport,
            "PSO:CDS",
            &SignCommand::with_digest(algorithm, digest),
        )?;

        let mut signature = BytesMut::new();
        signature.put_slice(response.data());

        while let Some(remaining) = response.status().remaining_bytes() {
            response = exchange(
                &mut self.transport,
                "GET RESPONSE",
                &GetResponseCommand::with_remaining(remaining),
            )?;
            signature.put_slice(response.data());
        }

        check_sign_status(response.status())?;

        let signature = signature.freeze();
        check_signature_length(&signature)?;
        debug!(len = signature.len(), "signature complete");
        Ok(signature)
    }

    /// DECIPHER an RSA-encrypted session key (terminal)
    ///
    /// Long inputs go out as two chained blocks (see
    /// [`DecipherCommand::with_ciphertext`]); the decrypted key is the
    /// data field of the final reply.
    pub fn decrypt_session_key(mut self, ciphertext: &[u8]) -> Result<Bytes> {
        let mut last = None;
        for command in DecipherCommand::with_ciphertext(ciphertext) {
            let response = exchange(&mut self.transport, "PSO:DECIPHER", &command)?;
            check_decipher(response.status())?;
            last = response.into_payload();
        }

        let session_key = last.ok_or(DecipherError::MissingPayload)?;
        debug!(len = session_key.len(), "session key decrypted");
        Ok(session_key)
    }
}
