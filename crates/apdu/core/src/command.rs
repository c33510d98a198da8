//! APDU command construction
//!
//! This module provides the [`Command`] type for building short-form APDU
//! commands according to ISO/IEC 7816-4.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

/// A short-form command APDU
///
/// Serializes as `CLA INS P1 P2 [Lc data] [Le]`. Lc is derived from the
/// data field, so callers never hand-assemble length bytes. Data fields
/// longer than 255 bytes must be split by the caller via command chaining
/// (the CLA chaining bit), as required by the card's APDU buffer anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Command data (optional)
    pub data: Option<Bytes>,
    /// Expected response length (optional)
    pub le: Option<u8>,
}

impl Command {
    /// Create a new command with just the header bytes
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: None,
        }
    }

    /// Create a new command with expected response length (Le)
    pub const fn new_with_le(cla: u8, ins: u8, p1: u8, p2: u8, le: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: Some(le),
        }
    }

    /// Create a new command with data payload
    pub fn new_with_data<T: Into<Bytes>>(cla: u8, ins: u8, p1: u8, p2: u8, data: T) -> Self {
        Self::new(cla, ins, p1, p2).with_data(data)
    }

    /// Set the data field
    ///
    /// Panics if the data does not fit a one-byte Lc; splitting oversized
    /// payloads is the caller's job.
    pub fn with_data<T: Into<Bytes>>(mut self, data: T) -> Self {
        let data = data.into();
        assert!(data.len() <= 255, "APDU data field exceeds one-byte Lc");
        self.data = Some(data);
        self
    }

    /// Set the expected length field
    pub const fn with_le(mut self, le: u8) -> Self {
        self.le = Some(le);
        self
    }

    /// Length of the serialized command in bytes
    pub fn command_length(&self) -> usize {
        let mut length = 4;
        if let Some(data) = &self.data {
            length += 1 + data.len();
        }
        if self.le.is_some() {
            length += 1;
        }
        length
    }

    /// Serialize to raw APDU bytes
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(self.command_length());

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.cla);
        buffer.put_u8(self.ins);
        buffer.put_u8(self.p1);
        buffer.put_u8(self.p2);

        // Lc and data if present
        if let Some(data) = &self.data {
            buffer.put_u8(data.len() as u8);
            buffer.put_slice(data);
        }

        // Le if present
        if let Some(le) = self.le {
            buffer.put_u8(le);
        }

        buffer.freeze()
    }
}

impl fmt::Display for Command {
    /// Uppercase hex of the serialized command, for diagnostics
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_is_hex() {
        let cmd = Command::new_with_le(0x00, 0xC0, 0x00, 0x00, 0x40);
        assert_eq!(cmd.to_string(), "00C000000040");
    }

    #[test]
    fn test_command_serialization() {
        let data = Bytes::from_static(&[0xD2, 0x76, 0x00, 0x01, 0x24, 0x01]);
        let cmd = Command::new_with_data(0x00, 0xA4, 0x04, 0x00, data).with_le(0x00);
        let bytes = cmd.to_bytes();

        assert_eq!(
            bytes.as_ref(),
            &[0x00, 0xA4, 0x04, 0x00, 0x06, 0xD2, 0x76, 0x00, 0x01, 0x24, 0x01, 0x00]
        );
    }

    #[test]
    fn test_command_length() {
        let cmd1 = Command::new(0x00, 0xC0, 0x00, 0x00);
        assert_eq!(cmd1.command_length(), 4);

        let cmd2 = Command::new_with_le(0x00, 0xC0, 0x00, 0x00, 0x40);
        assert_eq!(cmd2.command_length(), 5);

        let data = Bytes::from_static(&[0x31, 0x32, 0x33, 0x34, 0x35, 0x36]);
        let cmd3 = Command::new_with_data(0x00, 0x20, 0x00, 0x82, data.clone());
        assert_eq!(cmd3.command_length(), 11);

        let cmd4 = Command::new_with_data(0x00, 0x2A, 0x9E, 0x9A, data).with_le(0x00);
        assert_eq!(cmd4.command_length(), 12);
        assert_eq!(cmd4.to_bytes().len(), cmd4.command_length());
    }

    #[test]
    fn test_header_only_command() {
        let cmd = Command::new(0x00, 0xC0, 0x00, 0x00);
        assert_eq!(cmd.to_bytes().as_ref(), &[0x00, 0xC0, 0x00, 0x00]);
    }

    #[test]
    #[should_panic(expected = "one-byte Lc")]
    fn test_oversized_data_rejected() {
        let _ = Command::new(0x00, 0x2A, 0x80, 0x86).with_data(vec![0u8; 256]);
    }
}
