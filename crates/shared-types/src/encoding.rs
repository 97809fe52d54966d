//! # Hex Encoding
//!
//! Text form of addresses and roots: `0x`-prefixed lowercase hex on output,
//! prefix optional on input.

use crate::entities::{Address, Root};
use crate::errors::ParseError;

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 20-byte address.
pub fn parse_address(input: &str) -> Result<Address, ParseError> {
    parse_fixed::<20>(input)
}

/// Parse a 32-byte root.
pub fn parse_root(input: &str) -> Result<Root, ParseError> {
    parse_fixed::<32>(input)
}

/// Parse hex of any length (signatures, private keys).
pub fn parse_bytes(input: &str) -> Result<Vec<u8>, ParseError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    hex::decode(digits).map_err(|e| ParseError::InvalidHex(e.to_string()))
}

fn parse_fixed<const N: usize>(input: &str) -> Result<[u8; N], ParseError> {
    let bytes = parse_bytes(input)?;
    if bytes.len() != N {
        return Err(ParseError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }

    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}
