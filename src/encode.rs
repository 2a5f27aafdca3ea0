//! Consensus wire encoding primitives
//!
//! Everything hashed into a block id goes through these helpers, so the byte
//! layout has to match every other implementation of the network exactly.

/// Appends a CompactSize length prefix.
///
/// - below 0xfd: one byte
/// - up to 0xffff: 0xfd + 2 bytes little-endian
/// - up to 0xffffffff: 0xfe + 4 bytes little-endian
/// - otherwise: 0xff + 8 bytes little-endian
pub fn write_compact_size(out: &mut Vec<u8>, value: u64) {
    if value < 0xfd {
        out.push(value as u8);
    } else if value <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Appends a length-prefixed byte vector.
pub fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_compact_size(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}
