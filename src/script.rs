//! Minimal script builder
//!
//! Only what the chain parameters need: coinbase script-sigs and the
//! pay-to-pubkey output of the genesis transaction.

use std::fmt;

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Raw script bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    /// Pushes data with the smallest push opcode that fits its length.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Pushes an integer, using the small-integer opcodes for -1 and 0..=16.
    pub fn push_int(self, n: i64) -> Self {
        match n {
            0 => self.push_opcode(OP_0),
            -1 => self.push_opcode(OP_1NEGATE),
            1..=16 => self.push_opcode(OP_1 + (n as u8 - 1)),
            _ => self.push_slice(&script_num_bytes(n)),
        }
    }

    /// Pushes the script-number encoding of `n` as data, even for small values.
    pub fn push_num(self, n: i64) -> Self {
        self.push_slice(&script_num_bytes(n))
    }

    /// `<pubkey> OP_CHECKSIG`
    pub fn pay_to_pubkey(pubkey: &[u8]) -> Self {
        Script::new().push_slice(pubkey).push_opcode(OP_CHECKSIG)
    }

    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
    pub fn pay_to_pubkey_hash(hash: &[u8; 20]) -> Self {
        Script::new()
            .push_opcode(OP_DUP)
            .push_opcode(OP_HASH160)
            .push_slice(hash)
            .push_opcode(OP_EQUALVERIFY)
            .push_opcode(OP_CHECKSIG)
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}

impl serde::Serialize for Script {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

/// Minimal little-endian sign-magnitude encoding of a script number.
pub fn script_num_bytes(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }
    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    // The top bit carries the sign; add a byte when the magnitude already uses it.
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_num_encoding() {
        assert!(script_num_bytes(0).is_empty());
        assert_eq!(script_num_bytes(4), vec![0x04]);
        assert_eq!(script_num_bytes(-1), vec![0x81]);
        assert_eq!(script_num_bytes(128), vec![0x80, 0x00]);
        assert_eq!(script_num_bytes(-128), vec![0x80, 0x80]);
        assert_eq!(script_num_bytes(486604799), vec![0xff, 0xff, 0x00, 0x1d]);
    }

    #[test]
    fn test_push_int_uses_small_int_opcodes() {
        assert_eq!(Script::new().push_int(0).as_bytes(), &[OP_0]);
        assert_eq!(Script::new().push_int(-1).as_bytes(), &[OP_1NEGATE]);
        assert_eq!(Script::new().push_int(16).as_bytes(), &[0x60]);
        assert_eq!(Script::new().push_int(17).as_bytes(), &[0x01, 0x11]);
    }

    #[test]
    fn test_push_num_always_pushes_data() {
        assert_eq!(Script::new().push_num(4).as_bytes(), &[0x01, 0x04]);
    }

    #[test]
    fn test_push_slice_length_prefixes() {
        let script = Script::new().push_slice(&[0xaa; 75]);
        assert_eq!(script.as_bytes()[0], 75);

        let script = Script::new().push_slice(&[0xaa; 76]);
        assert_eq!(&script.as_bytes()[..2], &[OP_PUSHDATA1, 76]);

        let script = Script::new().push_slice(&[0xaa; 300]);
        assert_eq!(&script.as_bytes()[..3], &[OP_PUSHDATA2, 0x2c, 0x01]);
    }

    #[test]
    fn test_pay_to_pubkey_hash_layout() {
        let script = Script::pay_to_pubkey_hash(&[0u8; 20]);
        assert_eq!(script.len(), 25);
        assert_eq!(script.as_bytes()[0], OP_DUP);
        assert_eq!(script.as_bytes()[24], OP_CHECKSIG);
    }
}
