//! Scripted protocol conversations against a mock transport
//!
//! Each test scripts the card's side of one session and checks both the
//! result and the exact commands that went over the wire.

use opgp_apdu_core::{Bytes, MockTransport};
use opgp_card::commands::{DecipherError, SignError, VerifyPinError};
use opgp_card::{CardSession, Error, HashAlgorithm, Pin};

const OK: [u8; 2] = [0x90, 0x00];

fn pin() -> Pin {
    Pin::new(b"123456".to_vec()).unwrap()
}

fn reply(data: &[u8], sw1: u8, sw2: u8) -> Vec<u8> {
    let mut raw = data.to_vec();
    raw.push(sw1);
    raw.push(sw2);
    raw
}

#[test]
fn signature_chaining_drains_all_continuations() {
    // Card answers PSO:CDS with 64 bytes and announces 0x40 more, then
    // 48 bytes announcing 0x10 more, then the final 16 bytes. Total 128.
    let part1 = vec![0x11u8; 64];
    let part2 = vec![0x22u8; 48];
    let part3 = vec![0x33u8; 16];

    let mut mock = MockTransport::with_responses([
        OK.to_vec(),
        OK.to_vec(),
        reply(&part1, 0x61, 0x40),
        reply(&part2, 0x61, 0x10),
        reply(&part3, 0x90, 0x00),
    ]);

    let signature =
        CardSession::sign_digest(&mut mock, &pin(), HashAlgorithm::Sha256, &[0xAB; 32]).unwrap();

    let mut expected = part1;
    expected.extend_from_slice(&part2);
    expected.extend_from_slice(&part3);
    assert_eq!(signature, Bytes::from(expected));

    // SELECT, VERIFY, PSO:CDS, then exactly two GET RESPONSE commands.
    let commands = mock.commands();
    assert_eq!(commands.len(), 5);
    assert_eq!(commands[3].as_ref(), &[0x00, 0xC0, 0x00, 0x00, 0x40]);
    assert_eq!(commands[4].as_ref(), &[0x00, 0xC0, 0x00, 0x00, 0x10]);
}

#[test]
fn signature_of_unexpected_size_is_rejected() {
    let mut mock = MockTransport::with_responses([
        OK.to_vec(),
        OK.to_vec(),
        reply(&vec![0x44u8; 100], 0x90, 0x00),
    ]);

    let result = CardSession::sign_digest(&mut mock, &pin(), HashAlgorithm::Sha256, &[0u8; 32]);
    assert!(matches!(
        result,
        Err(Error::Sign(SignError::InvalidLength(100)))
    ));
}

#[test]
fn signature_error_status_carries_the_status_word() {
    let mut mock = MockTransport::with_responses([
        OK.to_vec(),
        OK.to_vec(),
        vec![0x69, 0x85],
    ]);

    let result = CardSession::sign_digest(&mut mock, &pin(), HashAlgorithm::Sha1, &[0u8; 20]);
    match result {
        Err(Error::Sign(SignError::Card(sw))) => assert_eq!(sw.to_string(), "6985"),
        other => panic!("expected card signature error, got {:?}", other),
    }
}

#[test]
#[should_panic(expected = "digest length")]
fn wrong_digest_length_is_a_caller_bug() {
    let mut mock = MockTransport::with_responses([OK.to_vec(), OK.to_vec()]);
    // 19 bytes for SHA-1 must never reach the card.
    let _ = CardSession::sign_digest(&mut mock, &pin(), HashAlgorithm::Sha1, &[0u8; 19]);
}

#[test]
fn wrong_pin_ends_the_session_before_any_operation() {
    // "2 attempts remaining" from the card; this layer treats it as an
    // opaque wrong-PIN verdict and sends nothing further.
    let mut mock = MockTransport::with_responses([OK.to_vec(), vec![0x63, 0xC2]]);

    let result = CardSession::sign_digest(&mut mock, &pin(), HashAlgorithm::Sha256, &[0u8; 32]);
    match result {
        Err(Error::VerifyPin(VerifyPinError::WrongPin(sw))) => {
            assert_eq!(sw.to_string(), "63C2")
        }
        other => panic!("expected wrong PIN, got {:?}", other),
    }

    // SELECT and VERIFY only; no PSO command was issued.
    assert_eq!(mock.commands().len(), 2);
    assert_eq!(mock.commands()[1][1], 0x20);
}

#[test]
fn failed_select_prevents_verify() {
    let mut mock = MockTransport::with_response(vec![0x6A, 0x82]);

    let result = CardSession::sign_digest(&mut mock, &pin(), HashAlgorithm::Sha256, &[0u8; 32]);
    assert!(matches!(result, Err(Error::Select(_))));

    // The session never got past SELECT.
    assert_eq!(mock.commands().len(), 1);
    assert_eq!(
        mock.commands()[0].as_ref(),
        hex::decode("00A4040006D2760001240100").unwrap().as_slice()
    );
}

#[test]
fn decipher_splits_a_long_ciphertext_into_two_chained_blocks() {
    let mut ciphertext = vec![0u8; 256];
    for (i, byte) in ciphertext.iter_mut().enumerate() {
        *byte = i as u8;
    }
    let session_key = vec![0x09u8; 24];

    let mut mock = MockTransport::with_responses([
        OK.to_vec(),
        OK.to_vec(),
        OK.to_vec(), // first chunk: status only
        reply(&session_key, 0x90, 0x00),
    ]);

    let key = CardSession::decrypt_session_key(&mut mock, &pin(), &ciphertext).unwrap();
    assert_eq!(key, Bytes::from(session_key));

    let commands = mock.commands();
    assert_eq!(commands.len(), 4);

    // First block: chaining CLA, 254 bytes starting at input byte 1.
    let first = &commands[2];
    assert_eq!(&first[..5], &[0x10, 0x2A, 0x80, 0x86, 0xFE]);
    assert_eq!(&first[5..], &ciphertext[1..255]);

    // Final block: plain CLA, the remaining byte, trailing Le.
    let second = &commands[3];
    assert_eq!(&second[..5], &[0x00, 0x2A, 0x80, 0x86, 0x01]);
    assert_eq!(second[5], ciphertext[255]);
    assert_eq!(second[6], 0x00);
}

#[test]
fn decipher_failure_on_any_block_is_terminal() {
    let ciphertext = vec![0x55u8; 256];
    let mut mock = MockTransport::with_responses([
        OK.to_vec(),
        OK.to_vec(),
        vec![0x69, 0x82], // first chunk refused
    ]);

    let result = CardSession::decrypt_session_key(&mut mock, &pin(), &ciphertext);
    assert!(matches!(result, Err(Error::Decipher(DecipherError::Card(_)))));

    // The final block was never sent.
    assert_eq!(mock.commands().len(), 3);
}

#[test]
fn decipher_without_payload_is_an_error() {
    let ciphertext = vec![0x55u8; 64];
    let mut mock =
        MockTransport::with_responses([OK.to_vec(), OK.to_vec(), OK.to_vec()]);

    let result = CardSession::decrypt_session_key(&mut mock, &pin(), &ciphertext);
    assert!(matches!(
        result,
        Err(Error::Decipher(DecipherError::MissingPayload))
    ));
}

#[test]
fn card_removal_mid_session_is_a_transport_error() {
    // Script runs dry after VERIFY, simulating the card moving away.
    let mut mock = MockTransport::with_responses([OK.to_vec(), OK.to_vec()]);

    let result = CardSession::sign_digest(&mut mock, &pin(), HashAlgorithm::Sha256, &[0u8; 32]);
    match result {
        Err(e) => assert!(e.is_transport()),
        Ok(_) => panic!("expected transport error"),
    }
}
