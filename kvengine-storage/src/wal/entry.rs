//! WAL record encoding and decoding.
//!
//! Each record is a self-contained, checksummed `(key, value)` pair. There
//! is no operation tag — this WAL has no delete, so every record is an
//! implicit "set".
//!
//! ## Binary format
//!
//! ```text
//! offset  size  field
//! 0       4     total_len   (u32 LE, byte count of everything after this field)
//! 4       4     checksum    (u32 LE, CRC32 of bytes from offset 8 onward)
//! 8       4     key_len     (u32 LE)
//! 12      key_len           key bytes (UTF-8)
//! 12+kl   4     value_len   (u32 LE)
//! 16+kl   value_len         value bytes
//! ```
//!
//! `total_len` does not include itself, so an entry's size on disk is
//! `total_len + 4`. A short read on either the length field or the body is
//! treated as a torn trailing write; a checksum mismatch is treated as
//! mid-file corruption. Both stop replay, per the WAL's recovery contract.

use kvengine_core::{Error, Key, Result, Value};

use bytes::{Buf, BufMut, BytesMut};
use crc32fast::Hasher;

/// A single committed `(key, value)` pair as it appears on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalEntry {
    pub key: Key,
    pub value: Value,
}

impl WalEntry {
    pub fn new(key: Key, value: Value) -> Self {
        Self { key, value }
    }

    /// Encodes the entry into its on-disk framing, including the CRC32
    /// checksum over everything past the checksum field.
    pub fn encode(&self) -> Vec<u8> {
        let key_bytes = self.key.as_bytes();
        let body_len = 4 + key_bytes.len() + 4 + self.value.len();
        let mut body = BytesMut::with_capacity(body_len);
        body.put_u32_le(key_bytes.len() as u32);
        body.put_slice(key_bytes);
        body.put_u32_le(self.value.len() as u32);
        body.put_slice(&self.value);

        let mut checksum = Hasher::new();
        checksum.update(&body);
        let checksum = checksum.finalize();

        let total_len = (4 + body.len()) as u32; // checksum + body
        let mut out = BytesMut::with_capacity(8 + body.len());
        out.put_u32_le(total_len);
        out.put_u32_le(checksum);
        out.put_slice(&body);
        out.to_vec()
    }

    /// Decodes a record body (everything after `total_len`), verifying its
    /// checksum. `offset` is the file offset of the start of the record,
    /// used only to annotate errors.
    pub fn decode(mut body: &[u8], offset: u64) -> Result<Self> {
        if body.len() < 4 {
            return Err(Error::Truncated { offset });
        }
        let checksum = body.get_u32_le();
        let payload = body;

        let mut hasher = Hasher::new();
        hasher.update(payload);
        let actual = hasher.finalize();
        if actual != checksum {
            return Err(Error::ChecksumMismatch {
                offset,
                expected: checksum,
                actual,
            });
        }

        let mut cursor = payload;
        if cursor.len() < 4 {
            return Err(Error::Truncated { offset });
        }
        let key_len = cursor.get_u32_le() as usize;
        if cursor.len() < key_len + 4 {
            return Err(Error::Truncated { offset });
        }
        let key_bytes = &cursor[..key_len];
        cursor.advance(key_len);
        let key = String::from_utf8(key_bytes.to_vec())
            .map_err(|_| Error::ChecksumMismatch { offset, expected: checksum, actual })?;

        let value_len = cursor.get_u32_le() as usize;
        if cursor.len() < value_len {
            return Err(Error::Truncated { offset });
        }
        let value = cursor[..value_len].to_vec();

        Ok(WalEntry { key, value })
    }
}
