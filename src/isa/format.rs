//! Instruction length and format classification.

use serde::{Deserialize, Serialize};

use crate::fault::Fault;

/// Encoding length of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    Short,
    Long,
}

impl Length {
    /// Bit 0 of the first halfword clear means a 16-bit encoding.
    #[inline]
    pub const fn of(first_halfword: u16) -> Self {
        if first_halfword & 1 == 0 {
            Length::Short
        } else {
            Length::Long
        }
    }

    #[inline]
    pub const fn bytes(self) -> u32 {
        match self {
            Length::Short => 2,
            Length::Long => 4,
        }
    }
}

/// Bit layouts, named after the TriCore manual's format mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    // 16-bit
    Sb,
    Sbc,
    Sbr,
    Sbrn,
    Sc,
    Slr,
    Slro,
    Sr,
    Src,
    Sro,
    Srr,
    Srrs,
    Ssr,
    Ssro,
    // 32-bit
    Abs,
    Absb,
    B,
    Bit,
    Bo,
    Bol,
    Brc,
    Brn,
    Brr,
    Rc,
    Rcpw,
    Rcr,
    Rcrr,
    Rcrw,
    Rlc,
    Rr,
    Rr1,
    Rr2,
    Rrpw,
    Rrr,
    Rrr1,
    Rrr2,
    Rrrr,
    Rrrw,
    Sys,
}

/// Result of classifying one instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub len: Length,
    pub format: Format,
    /// Major opcode. For the two aliased families this is the canonical
    /// value with the operand bits cleared.
    pub op1: u32,
}

/// Classifies `word`; for 16-bit encodings only the low halfword is used.
pub fn classify(word: u32) -> Result<Classified, Fault> {
    let len = Length::of(word as u16);
    let raw = word & 0xff;
    let (op1, format) = match len {
        Length::Short => {
            // ADDSC.A keeps its shift amount in bits 6..7 of the major opcode.
            if raw & 0x3f == 0x10 {
                (0x10, Some(Format::Srrs))
            } else {
                (raw, format16(raw))
            }
        }
        Length::Long => {
            // JZ.T/JNZ.T keep bit 4 of the bit index in bit 7.
            if raw & 0x7f == 0x6f {
                (0x6f, Some(Format::Brn))
            } else {
                (raw, format32(raw))
            }
        }
    };
    match format {
        Some(format) => Ok(Classified { len, format, op1 }),
        None => Err(Fault::Decode { word }),
    }
}

fn format16(op1: u32) -> Option<Format> {
    use Format::*;
    Some(match op1 {
        0x00 | 0x32 | 0x46 | 0xdc => Sr,
        0x06 | 0x82 | 0x86 | 0x8a | 0x92 | 0x9a | 0xa0 | 0xaa | 0xb0 | 0xba | 0xc2 | 0xca
        | 0xd2 | 0xea | 0xfa => Src,
        0x02 | 0x12 | 0x1a | 0x22 | 0x26 | 0x2a | 0x30 | 0x3a | 0x40 | 0x42 | 0x52 | 0x5a
        | 0x60 | 0x62 | 0x6a | 0x7a | 0x80 | 0xa2 | 0xa6 | 0xc6 | 0xe2 => Srr,
        0x16 | 0x20 | 0x58 | 0x78 | 0x96 | 0xd8 | 0xda | 0xe0 | 0xf8 => Sc,
        0x3c | 0x5c | 0x6e | 0xee => Sb,
        0x1e | 0x5e | 0x9e | 0xde => Sbc,
        0x0e | 0x3e | 0x4e | 0x76 | 0x7c | 0x7e | 0x8e | 0xbc | 0xbe | 0xce | 0xf6 | 0xfc
        | 0xfe => Sbr,
        0x2e | 0xae => Sbrn,
        0x04 | 0x14 | 0x44 | 0x54 | 0x84 | 0x94 | 0xc4 | 0xd4 => Slr,
        0x08 | 0x48 | 0x88 | 0xc8 => Slro,
        0x0c | 0x2c | 0x4c | 0x6c | 0x8c | 0xac | 0xcc | 0xec => Sro,
        0x24 | 0x34 | 0x64 | 0x74 | 0xa4 | 0xb4 | 0xe4 | 0xf4 => Ssr,
        0x28 | 0x68 | 0xa8 | 0xe8 => Ssro,
        _ => return None,
    })
}

fn format32(op1: u32) -> Option<Format> {
    use Format::*;
    Some(match op1 {
        0x05 | 0x15 | 0x25 | 0x45 | 0x65 | 0x85 | 0xa5 | 0xc5 | 0xe5 => Abs,
        0xd5 => Absb,
        0x1d | 0x5d | 0x61 | 0x6d | 0x9d | 0xdd | 0xe1 | 0xed => B,
        0x07 | 0x27 | 0x47 | 0x67 | 0x87 | 0xa7 | 0xc7 => Bit,
        0x09 | 0x29 | 0x49 | 0x69 | 0x89 | 0xa9 => Bo,
        0x19 | 0x39 | 0x59 | 0x79 | 0x99 | 0xb5 | 0xb9 | 0xc9 | 0xd9 | 0xe9 | 0xf9 => Bol,
        0x9f | 0xbf | 0xdf | 0xff => Brc,
        0x1f | 0x3f | 0x5f | 0x7d | 0x7f | 0xbd | 0xfd => Brr,
        0x53 | 0x8b | 0x8f | 0xad => Rc,
        0xb7 => Rcpw,
        0x13 | 0x33 | 0xab => Rcr,
        0x97 => Rcrr,
        0xd7 => Rcrw,
        0x11 | 0x1b | 0x3b | 0x4d | 0x7b | 0x91 | 0x9b | 0xbb | 0xcd | 0xfb => Rlc,
        0x01 | 0x0b | 0x0f | 0x2d | 0x4b => Rr,
        0x93 | 0xb3 => Rr1,
        0x73 => Rr2,
        0x37 | 0x77 => Rrpw,
        0x2b | 0x6b => Rrr,
        0x43 | 0x63 | 0x83 | 0xa3 | 0xc3 | 0xe3 => Rrr1,
        0x03 | 0x23 => Rrr2,
        0x17 => Rrrr,
        0x57 => Rrrw,
        0x0d | 0x2f => Sys,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_from_low_bit() {
        assert_eq!(Length::of(0x0082), Length::Short);
        assert_eq!(Length::of(0x00bb), Length::Long);
        assert_eq!(Length::Short.bytes(), 2);
        assert_eq!(Length::Long.bytes(), 4);
    }

    #[test]
    fn every_short_byte_is_short() {
        for op1 in (0u32..0x100).step_by(2) {
            if let Ok(c) = classify(op1) {
                assert_eq!(c.len, Length::Short, "op1 {op1:#x}");
            }
        }
    }

    #[test]
    fn addsc_alias_ignores_shift_bits() {
        for n in 0..4u32 {
            let c = classify(0x10 | (n << 6)).unwrap();
            assert_eq!(c.format, Format::Srrs);
            assert_eq!(c.op1, 0x10);
        }
    }

    #[test]
    fn jzt_alias_ignores_bit7() {
        let lo = classify(0x6f).unwrap();
        let hi = classify(0xef).unwrap();
        assert_eq!(lo.format, Format::Brn);
        assert_eq!(hi.format, Format::Brn);
        assert_eq!(hi.op1, 0x6f);
    }

    #[test]
    fn unknown_major_opcode_faults() {
        assert_eq!(classify(0x18), Err(Fault::Decode { word: 0x18 }));
        assert!(classify(0xff_ff_00_81).is_err());
    }

    #[test]
    fn a_few_formats() {
        assert_eq!(classify(0x82).unwrap().format, Format::Src);
        assert_eq!(classify(0x0b).unwrap().format, Format::Rr);
        assert_eq!(classify(0x09).unwrap().format, Format::Bo);
        assert_eq!(classify(0x5f).unwrap().format, Format::Brr);
    }
}
