//! Percent-encoding for query components.

/// Percent-encode `raw` for use inside a URL query value.
///
/// Matches `encodeURIComponent`: ASCII alphanumerics and `-_.!~*'()` pass
/// through, everything else is escaped per UTF-8 byte. Spaces become `%20`
/// (not `+`) since the confirmation pages decode with `decodeURIComponent`.
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'!' | b'*'
            | b'\'' | b'(' | b')' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
