//! # SKU Scanner
//!
//! Turns raw scan input into SKUs, one byte per item.
//!
//! ```text
//! input:   a  6  9  B  $  \n
//! output:  A  ✗  ✗  B  ✗  ✗     (✗ = ScanError::InvalidCharacter)
//! ```
//!
//! Non-ASCII bytes are reported as `U+FFFD`.

use std::io::{BufReader, Bytes, Read};

use till_core::{ScanError, Sku, SkuError};

/// Lazily reads SKUs from any reader.
///
/// Yields `None` at end of input. A read error is yielded once, after
/// which the scanner is exhausted.
pub struct SkuScanner<R: Read> {
    bytes: Bytes<BufReader<R>>,
    failed: bool,
}

impl<R: Read> SkuScanner<R> {
    pub fn new(reader: R) -> Self {
        SkuScanner {
            bytes: BufReader::new(reader).bytes(),
            failed: false,
        }
    }
}

fn decode(byte: u8) -> Result<Sku, ScanError> {
    if !byte.is_ascii() {
        return Err(SkuError::InvalidCharacter(char::REPLACEMENT_CHARACTER).into());
    }
    Ok(Sku::new(char::from(byte))?)
}

impl<R: Read> Iterator for SkuScanner<R> {
    type Item = Result<Sku, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        // Bytes retries reads interrupted by signals
        match self.bytes.next()? {
            Ok(byte) => Some(decode(byte)),
            Err(err) => {
                self.failed = true;
                Some(Err(ScanError::Read(err)))
            }
        }
    }
}
