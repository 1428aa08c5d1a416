//! Percent-escaping of raw store keys into merkle path segments.
//!
//! Cosmos SDK chains build the key path of a query proof with Go's
//! `url.PathEscape`, so the escaping here must match it byte for byte or the
//! leaf key will not match the one committed by the counterparty.

use ibc_primitives::prelude::*;

use crate::error::CommitmentError;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Returns `true` if `byte` can appear unescaped in a path segment.
fn is_segment_safe(byte: u8) -> bool {
    matches!(
        byte,
        b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'~'
            | b'$'
            | b'&'
            | b'+'
            | b':'
            | b'='
            | b'@'
    )
}

/// Escapes `bytes` so that they can be used as a single merkle path segment.
pub fn escape_path_segment(bytes: &[u8]) -> String {
    let mut escaped = String::with_capacity(bytes.len());
    for &byte in bytes {
        if is_segment_safe(byte) {
            escaped.push(char::from(byte));
        } else {
            escaped.push('%');
            escaped.push(char::from(HEX_UPPER[usize::from(byte >> 4)]));
            escaped.push(char::from(HEX_UPPER[usize::from(byte & 0x0f)]));
        }
    }
    escaped
}

/// Reverses [`escape_path_segment`], returning the raw key bytes of a path
/// segment.
pub fn unescape_path_segment(segment: &str) -> Result<Vec<u8>, CommitmentError> {
    let bytes = segment.as_bytes();
    let mut raw = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => raw.push((hi << 4) | lo),
                _ => return Err(CommitmentError::InvalidPathSegment(segment.to_string())),
            }
            i += 3;
        } else {
            raw.push(bytes[i]);
            i += 1;
        }
    }
    Ok(raw)
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
