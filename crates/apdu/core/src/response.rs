//! APDU response parsing and status words
//!
//! Every reply from the card is `data || SW1 SW2`. The status word is the
//! card's verdict on the command; the data field may be empty.

use std::fmt;

use bytes::Bytes;

use crate::error::ResponseError;

/// The two-byte status word trailing every response APDU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte
    pub sw1: u8,
    /// Second status byte
    pub sw2: u8,
}

impl StatusWord {
    /// Normal completion (`9000`)
    pub const SUCCESS: Self = Self::new(0x90, 0x00);

    /// Create a status word from its two bytes
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Combined 16-bit value, SW1 high
    pub const fn to_u16(self) -> u16 {
        ((self.sw1 as u16) << 8) | (self.sw2 as u16)
    }

    /// Whether this is the normal completion status `9000`
    pub const fn is_success(self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }

    /// Whether more response data is pending (`61XX`)
    ///
    /// SW2 carries the number of bytes retrievable via GET RESPONSE.
    pub const fn has_more_data(self) -> bool {
        self.sw1 == 0x61
    }

    /// Number of pending bytes announced by a `61XX` status
    pub const fn remaining_bytes(self) -> Option<u8> {
        if self.has_more_data() {
            Some(self.sw2)
        } else {
            None
        }
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}", self.sw1, self.sw2)
    }
}

impl From<StatusWord> for u16 {
    fn from(sw: StatusWord) -> Self {
        sw.to_u16()
    }
}

/// A parsed response APDU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    payload: Option<Bytes>,
    status: StatusWord,
}

impl Response {
    /// Create a response with the given payload and status
    pub const fn new(payload: Option<Bytes>, status: StatusWord) -> Self {
        Self { payload, status }
    }

    /// Create a `9000` response with the given payload
    pub const fn success(payload: Option<Bytes>) -> Self {
        Self::new(payload, StatusWord::SUCCESS)
    }

    /// Parse a raw transceive buffer into payload and status word
    ///
    /// The buffer must carry at least the two status bytes.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ResponseError> {
        if raw.len() < 2 {
            return Err(ResponseError::TooShort(raw.len()));
        }

        let (data, trailer) = raw.split_at(raw.len() - 2);
        let status = StatusWord::new(trailer[0], trailer[1]);
        let payload = if data.is_empty() {
            None
        } else {
            Some(Bytes::copy_from_slice(data))
        };

        Ok(Self { payload, status })
    }

    /// The status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// The data field, if any
    pub const fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    /// Consume the response, yielding its data field
    pub fn into_payload(self) -> Option<Bytes> {
        self.payload
    }

    /// The data field as a slice, empty when absent
    pub fn data(&self) -> &[u8] {
        self.payload.as_deref().unwrap_or(&[])
    }

    /// Whether the status word is `9000`
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
