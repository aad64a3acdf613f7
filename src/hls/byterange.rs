use serde::Serialize;

use crate::{Error, Result};

/// Typed view of an `#EXT-X-BYTERANGE` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    pub length: u64,
    pub offset: Option<u64>,
}

impl ByteRange {
    pub fn new(length: u64, offset: Option<u64>) -> Self {
        Self { length, offset }
    }

    /// Parse from "length@offset" or "length" format.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidByteRange(s.to_string());

        match s.split_once('@') {
            Some((len, off)) => Ok(Self {
                length: len.parse().map_err(|_| invalid())?,
                offset: Some(off.parse().map_err(|_| invalid())?),
            }),
            None => Ok(Self {
                length: s.parse().map_err(|_| invalid())?,
                offset: None,
            }),
        }
    }

    /// End offset (exclusive), when the start is known and the sum fits.
    pub fn end_offset(&self) -> Option<u64> {
        self.offset?.checked_add(self.length)
    }
}
