//! Hash algorithms and PKCS#1 DigestInfo construction
//!
//! RSA signing on the card operates over a DigestInfo TLV
//! (`SEQUENCE { SEQUENCE { OID, NULL }, OCTET STRING(hash) }`). The DER
//! prefix in front of the raw hash is fixed per algorithm, so it is kept
//! as a constant table rather than assembled from an ASN.1 encoder.

use bytes::{BufMut, Bytes, BytesMut};

/// Hash algorithms accepted for on-card signing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum HashAlgorithm {
    /// SHA-1, 20-byte digest
    Sha1,
    /// RIPEMD-160, 20-byte digest
    Ripemd160,
    /// SHA-224, 28-byte digest
    Sha224,
    /// SHA-256, 32-byte digest
    Sha256,
    /// SHA-384, 48-byte digest
    Sha384,
    /// SHA-512, 64-byte digest
    Sha512,
}

/// Canonical PKCS#1 DigestInfo prefixes, DER-encoded up to the point
/// where the raw hash bytes follow
mod prefix {
    pub(super) const SHA1: &[u8] = &[
        0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2B, 0x0E, 0x03, 0x02, 0x1A, 0x05, 0x00, 0x04, 0x14,
    ];
    pub(super) const RIPEMD160: &[u8] = &[
        0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2B, 0x24, 0x03, 0x02, 0x01, 0x05, 0x00, 0x04, 0x14,
    ];
    pub(super) const SHA224: &[u8] = &[
        0x30, 0x2D, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x04,
        0x05, 0x00, 0x04, 0x1C,
    ];
    pub(super) const SHA256: &[u8] = &[
        0x30, 0x31, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
        0x05, 0x00, 0x04, 0x20,
    ];
    pub(super) const SHA384: &[u8] = &[
        0x30, 0x41, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02,
        0x05, 0x00, 0x04, 0x30,
    ];
    pub(super) const SHA512: &[u8] = &[
        0x30, 0x51, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03,
        0x05, 0x00, 0x04, 0x40,
    ];
}

impl HashAlgorithm {
    /// Digest size in bytes
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha1 | Self::Ripemd160 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// The DER prefix preceding the raw hash bytes in the DigestInfo
    pub const fn digest_info_prefix(self) -> &'static [u8] {
        match self {
            Self::Sha1 => prefix::SHA1,
            Self::Ripemd160 => prefix::RIPEMD160,
            Self::Sha224 => prefix::SHA224,
            Self::Sha256 => prefix::SHA256,
            Self::Sha384 => prefix::SHA384,
            Self::Sha512 => prefix::SHA512,
        }
    }

    /// Build the DigestInfo TLV for a raw digest
    ///
    /// Panics when the digest length does not match the algorithm; a
    /// caller handing over a truncated or padded hash is a bug, not a
    /// card condition.
    pub fn digest_info(self, digest: &[u8]) -> Bytes {
        assert_eq!(
            digest.len(),
            self.digest_len(),
            "digest length {} does not match {:?}",
            digest.len(),
            self
        );

        let prefix = self.digest_info_prefix();
        let mut buf = BytesMut::with_capacity(prefix.len() + digest.len());
        buf.put_slice(prefix);
        buf.put_slice(digest);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Ripemd160,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    #[test]
    fn test_digest_info_layout() {
        for algorithm in ALL {
            let digest = vec![0xAB; algorithm.digest_len()];
            let info = algorithm.digest_info(&digest);

            let prefix = algorithm.digest_info_prefix();
            assert_eq!(info.len(), prefix.len() + digest.len());
            assert_eq!(&info[..prefix.len()], prefix);
            assert_eq!(&info[prefix.len()..], digest.as_slice());
        }
    }

    #[test]
    fn test_digest_info_is_valid_der() {
        // Outer SEQUENCE length byte must cover the rest of the TLV.
        for algorithm in ALL {
            let digest = vec![0x00; algorithm.digest_len()];
            let info = algorithm.digest_info(&digest);
            assert_eq!(info[0], 0x30);
            assert_eq!(info[1] as usize, info.len() - 2);
        }
    }

    #[test]
    fn test_sha256_prefix_bytes() {
        assert_eq!(
            hex::encode_upper(HashAlgorithm::Sha256.digest_info_prefix()),
            "3031300D060960864801650304020105000420"
        );
    }

    #[test]
    #[should_panic(expected = "digest length")]
    fn test_short_digest_rejected() {
        let _ = HashAlgorithm::Sha1.digest_info(&[0u8; 19]);
    }

    #[test]
    #[should_panic(expected = "digest length")]
    fn test_long_digest_rejected() {
        let _ = HashAlgorithm::Sha1.digest_info(&[0u8; 21]);
    }
}
