//! Hexadecimal helpers used for identifier rendering and debug output.
//!
//! `encode_hex_into` is the allocation-free path used for the fixed-size
//! identifier buffer; the `String` variants are for logging.

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        use std::fmt::Write;
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
///
/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        use std::fmt::Write;
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Write `bytes` as lowercase ASCII hex into `out` followed by a NUL byte.
///
/// Returns the number of hex characters written. Input that does not fit is
/// truncated at a whole byte so the terminator always lands inside `out`.
pub fn encode_hex_into(bytes: &[u8], out: &mut [u8]) -> usize {
    if out.is_empty() {
        return 0;
    }
    let fit = bytes.len().min((out.len() - 1) / 2);
    for (i, b) in bytes[..fit].iter().enumerate() {
        out[i * 2] = HEX_DIGITS[(b >> 4) as usize];
        out[i * 2 + 1] = HEX_DIGITS[(b & 0x0f) as usize];
    }
    out[fit * 2] = 0;
    fit * 2
}

/// Parse a hex string into bytes.
///
/// Accepts strings with or without ASCII whitespace. Returns an error message
/// string on parse failure.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: Vec<u8> = s.bytes().filter(|c| !c.is_ascii_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err("hex string has odd length".to_string());
    }

    cleaned
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(pair, 16).map_err(|e| format!("invalid hex pair '{}': {}", pair, e))
        })
        .collect()
}
