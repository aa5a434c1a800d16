//! Typed operand fields, one struct per format.
//!
//! Register fields are named after their role in the encoding: `s1`
//! (bits 8..11), `s2` (bits 12..15), `s3` (bits 24..27) and `d` (bits 28..31).
//! Immediates that every instruction of a format treats as signed are
//! sign-extended here; the others are kept raw and the emitters pick the
//! extension they need.

use crate::bitfield::{extract, sextract, sign_ext};
use crate::isa::format::Format;

#[inline]
fn reg(word: u32, start: u32) -> u8 {
    extract(word, start, start + 3) as u8
}

// ---- 16-bit formats ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sb {
    pub disp8: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sbc {
    pub const4: i32,
    pub disp4: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sbr {
    pub s2: u8,
    pub disp4: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sbrn {
    pub n: u32,
    pub disp4: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sc {
    pub const8: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slr {
    pub s2: u8,
    pub d: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slro {
    pub off4: u32,
    pub d: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sr {
    pub op2: u32,
    pub s1d: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Src {
    pub const4: i32,
    pub s1d: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sro {
    pub s2: u8,
    pub off4: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Srr {
    pub s2: u8,
    pub s1d: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Srrs {
    pub s2: u8,
    pub s1d: u8,
    pub n: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ssr {
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ssro {
    pub off4: u32,
    pub s1: u8,
}

// ---- 32-bit formats ----

/// `off18` is the raw field; see [`Abs::address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abs {
    pub off18: u32,
    pub op2: u32,
    pub s1d: u8,
}

impl Abs {
    /// Bits 14..17 of the offset become address bits 28..31.
    pub const fn address(&self) -> u32 {
        ((self.off18 & 0x3c000) << 14) | (self.off18 & 0x3fff)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absb {
    pub off18: u32,
    pub op2: u32,
    pub b: u32,
    pub bpos3: u32,
}

impl Absb {
    pub const fn address(&self) -> u32 {
        ((self.off18 & 0x3c000) << 14) | (self.off18 & 0x3fff)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct B {
    pub disp24: u32,
}

impl B {
    pub const fn sdisp24(&self) -> i32 {
        sign_ext(self.disp24, 24)
    }

    /// Absolute target of CALLA/FCALLA/JA/JLA.
    pub const fn absolute(&self) -> u32 {
        ((self.disp24 & 0xf0_0000) << 8) | ((self.disp24 & 0x0f_ffff) << 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bit {
    pub d: u8,
    pub pos2: u32,
    pub op2: u32,
    pub pos1: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bo {
    pub off10: i32,
    pub op2: u32,
    pub s2: u8,
    pub s1d: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bol {
    pub off16: i32,
    pub s2: u8,
    pub s1d: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brc {
    pub op2: u32,
    pub disp15: i32,
    pub const4: u32,
    pub s1: u8,
}

impl Brc {
    pub const fn sconst4(&self) -> i32 {
        sign_ext(self.const4, 4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brn {
    pub op2: u32,
    pub disp15: i32,
    pub n: u32,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brr {
    pub op2: u32,
    pub disp15: i32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rc {
    pub d: u8,
    pub op2: u32,
    pub const9: u32,
    pub s1: u8,
}

impl Rc {
    pub const fn sconst9(&self) -> i32 {
        sign_ext(self.const9, 9)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rcpw {
    pub d: u8,
    pub pos: u32,
    pub op2: u32,
    pub width: u32,
    pub const4: u32,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rcr {
    pub d: u8,
    pub s3: u8,
    pub op2: u32,
    pub const9: u32,
    pub s1: u8,
}

impl Rcr {
    pub const fn sconst9(&self) -> i32 {
        sign_ext(self.const9, 9)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rcrr {
    pub d: u8,
    pub s3: u8,
    pub op2: u32,
    pub const4: u32,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rcrw {
    pub d: u8,
    pub s3: u8,
    pub op2: u32,
    pub width: u32,
    pub const4: u32,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rlc {
    pub d: u8,
    pub const16: u32,
    pub s1: u8,
}

impl Rlc {
    pub const fn sconst16(&self) -> i32 {
        sign_ext(self.const16, 16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rr {
    pub d: u8,
    pub op2: u32,
    pub n: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rr1 {
    pub d: u8,
    pub op2: u32,
    pub n: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rr2 {
    pub d: u8,
    pub op2: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rrpw {
    pub d: u8,
    pub pos: u32,
    pub op2: u32,
    pub width: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rrr {
    pub d: u8,
    pub s3: u8,
    pub op2: u32,
    pub n: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rrr1 {
    pub d: u8,
    pub s3: u8,
    pub op2: u32,
    pub n: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rrr2 {
    pub d: u8,
    pub s3: u8,
    pub op2: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rrrr {
    pub d: u8,
    pub s3: u8,
    pub op2: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rrrw {
    pub d: u8,
    pub s3: u8,
    pub op2: u32,
    pub width: u32,
    pub s2: u8,
    pub s1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sys {
    pub op2: u32,
    pub s1d: u8,
}

/// Operands of one instruction, tagged by format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    Sb(Sb),
    Sbc(Sbc),
    Sbr(Sbr),
    Sbrn(Sbrn),
    Sc(Sc),
    Slr(Slr),
    Slro(Slro),
    Sr(Sr),
    Src(Src),
    Sro(Sro),
    Srr(Srr),
    Srrs(Srrs),
    Ssr(Ssr),
    Ssro(Ssro),
    Abs(Abs),
    Absb(Absb),
    B(B),
    Bit(Bit),
    Bo(Bo),
    Bol(Bol),
    Brc(Brc),
    Brn(Brn),
    Brr(Brr),
    Rc(Rc),
    Rcpw(Rcpw),
    Rcr(Rcr),
    Rcrr(Rcrr),
    Rcrw(Rcrw),
    Rlc(Rlc),
    Rr(Rr),
    Rr1(Rr1),
    Rr2(Rr2),
    Rrpw(Rrpw),
    Rrr(Rrr),
    Rrr1(Rrr1),
    Rrr2(Rrr2),
    Rrrr(Rrrr),
    Rrrw(Rrrw),
    Sys(Sys),
}

fn off18(w: u32) -> u32 {
    extract(w, 16, 21) | (extract(w, 28, 31) << 6) | (extract(w, 22, 25) << 10) | (extract(w, 12, 15) << 14)
}

/// Decodes the operand fields of `word` laid out as `format`.
pub fn decode(word: u32, format: Format) -> Operands {
    let w = word;
    match format {
        Format::Sb => Operands::Sb(Sb { disp8: sextract(w, 8, 15) }),
        Format::Sbc => Operands::Sbc(Sbc { const4: sextract(w, 12, 15), disp4: extract(w, 8, 11) }),
        Format::Sbr => Operands::Sbr(Sbr { s2: reg(w, 12), disp4: extract(w, 8, 11) }),
        Format::Sbrn => Operands::Sbrn(Sbrn { n: extract(w, 12, 15), disp4: extract(w, 8, 11) }),
        Format::Sc => Operands::Sc(Sc { const8: extract(w, 8, 15) }),
        Format::Slr => Operands::Slr(Slr { s2: reg(w, 12), d: reg(w, 8) }),
        Format::Slro => Operands::Slro(Slro { off4: extract(w, 12, 15), d: reg(w, 8) }),
        Format::Sr => Operands::Sr(Sr { op2: extract(w, 12, 15), s1d: reg(w, 8) }),
        Format::Src => Operands::Src(Src { const4: sextract(w, 12, 15), s1d: reg(w, 8) }),
        Format::Sro => Operands::Sro(Sro { s2: reg(w, 12), off4: extract(w, 8, 11) }),
        Format::Srr => Operands::Srr(Srr { s2: reg(w, 12), s1d: reg(w, 8) }),
        Format::Srrs => Operands::Srrs(Srrs { s2: reg(w, 12), s1d: reg(w, 8), n: extract(w, 6, 7) }),
        Format::Ssr => Operands::Ssr(Ssr { s2: reg(w, 12), s1: reg(w, 8) }),
        Format::Ssro => Operands::Ssro(Ssro { off4: extract(w, 12, 15), s1: reg(w, 8) }),
        Format::Abs => Operands::Abs(Abs { off18: off18(w), op2: extract(w, 26, 27), s1d: reg(w, 8) }),
        Format::Absb => Operands::Absb(Absb {
            off18: off18(w),
            op2: extract(w, 26, 27),
            b: extract(w, 11, 11),
            bpos3: extract(w, 8, 10),
        }),
        Format::B => Operands::B(B { disp24: extract(w, 16, 31) | (extract(w, 8, 15) << 16) }),
        Format::Bit => Operands::Bit(Bit {
            d: reg(w, 28),
            pos2: extract(w, 23, 27),
            op2: extract(w, 21, 22),
            pos1: extract(w, 16, 20),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Bo => Operands::Bo(Bo {
            off10: sign_ext(extract(w, 16, 21) | (extract(w, 28, 31) << 6), 10),
            op2: extract(w, 22, 27),
            s2: reg(w, 12),
            s1d: reg(w, 8),
        }),
        Format::Bol => Operands::Bol(Bol {
            off16: sign_ext(
                extract(w, 16, 21) | (extract(w, 28, 31) << 6) | (extract(w, 22, 27) << 10),
                16,
            ),
            s2: reg(w, 12),
            s1d: reg(w, 8),
        }),
        Format::Brc => Operands::Brc(Brc {
            op2: extract(w, 31, 31),
            disp15: sextract(w, 16, 30),
            const4: extract(w, 12, 15),
            s1: reg(w, 8),
        }),
        Format::Brn => Operands::Brn(Brn {
            op2: extract(w, 31, 31),
            disp15: sextract(w, 16, 30),
            n: extract(w, 12, 15) | (extract(w, 7, 7) << 4),
            s1: reg(w, 8),
        }),
        Format::Brr => Operands::Brr(Brr {
            op2: extract(w, 31, 31),
            disp15: sextract(w, 16, 30),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Rc => Operands::Rc(Rc {
            d: reg(w, 28),
            op2: extract(w, 21, 27),
            const9: extract(w, 12, 20),
            s1: reg(w, 8),
        }),
        Format::Rcpw => Operands::Rcpw(Rcpw {
            d: reg(w, 28),
            pos: extract(w, 23, 27),
            op2: extract(w, 21, 22),
            width: extract(w, 16, 20),
            const4: extract(w, 12, 15),
            s1: reg(w, 8),
        }),
        Format::Rcr => Operands::Rcr(Rcr {
            d: reg(w, 28),
            s3: reg(w, 24),
            op2: extract(w, 21, 23),
            const9: extract(w, 12, 20),
            s1: reg(w, 8),
        }),
        Format::Rcrr => Operands::Rcrr(Rcrr {
            d: reg(w, 28),
            s3: reg(w, 24),
            op2: extract(w, 21, 23),
            const4: extract(w, 12, 15),
            s1: reg(w, 8),
        }),
        Format::Rcrw => Operands::Rcrw(Rcrw {
            d: reg(w, 28),
            s3: reg(w, 24),
            op2: extract(w, 21, 23),
            width: extract(w, 16, 20),
            const4: extract(w, 12, 15),
            s1: reg(w, 8),
        }),
        Format::Rlc => Operands::Rlc(Rlc { d: reg(w, 28), const16: extract(w, 12, 27), s1: reg(w, 8) }),
        Format::Rr => Operands::Rr(Rr {
            d: reg(w, 28),
            op2: extract(w, 20, 27),
            n: extract(w, 16, 17),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Rr1 => Operands::Rr1(Rr1 {
            d: reg(w, 28),
            op2: extract(w, 18, 27),
            n: extract(w, 16, 17),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Rr2 => Operands::Rr2(Rr2 { d: reg(w, 28), op2: extract(w, 16, 27), s2: reg(w, 12), s1: reg(w, 8) }),
        Format::Rrpw => Operands::Rrpw(Rrpw {
            d: reg(w, 28),
            pos: extract(w, 23, 27),
            op2: extract(w, 21, 22),
            width: extract(w, 16, 20),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Rrr => Operands::Rrr(Rrr {
            d: reg(w, 28),
            s3: reg(w, 24),
            op2: extract(w, 20, 23),
            n: extract(w, 16, 17),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Rrr1 => Operands::Rrr1(Rrr1 {
            d: reg(w, 28),
            s3: reg(w, 24),
            op2: extract(w, 18, 23),
            n: extract(w, 16, 17),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Rrr2 => Operands::Rrr2(Rrr2 {
            d: reg(w, 28),
            s3: reg(w, 24),
            op2: extract(w, 16, 23),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Rrrr => Operands::Rrrr(Rrrr {
            d: reg(w, 28),
            s3: reg(w, 24),
            op2: extract(w, 21, 23),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Rrrw => Operands::Rrrw(Rrrw {
            d: reg(w, 28),
            s3: reg(w, 24),
            op2: extract(w, 21, 23),
            width: extract(w, 16, 20),
            s2: reg(w, 12),
            s1: reg(w, 8),
        }),
        Format::Sys => Operands::Sys(Sys { op2: extract(w, 22, 27), s1d: reg(w, 8) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn src_const4_is_signed() {
        // MOV D1, #-1
        let Operands::Src(f) = decode(0xf182, Format::Src) else { panic!() };
        assert_eq!(f.s1d, 1);
        assert_eq!(f.const4, -1);
    }

    #[test]
    fn bo_offset_reassembled_and_signed() {
        // off10 = 0x3ff: low six bits at 16..21, high four at 28..31
        let w = (0xf << 28) | (0x24 << 22) | (0x3f << 16) | (2 << 12) | (3 << 8) | 0x09;
        let Operands::Bo(f) = decode(w, Format::Bo) else { panic!() };
        assert_eq!(f.off10, -1);
        assert_eq!(f.op2, 0x24);
        assert_eq!((f.s2, f.s1d), (2, 3));
    }

    #[test]
    fn abs_address_mapping() {
        // off18 = 0x3c001 -> 0xf000_0001
        let f = Abs { off18: 0x3c001, op2: 0, s1d: 0 };
        assert_eq!(f.address(), 0xf000_0001);
        let f = Abs { off18: 0x0_3fff, op2: 0, s1d: 0 };
        assert_eq!(f.address(), 0x3fff);
    }

    #[test]
    fn abs_off18_field_order() {
        // bits 16..21 -> off[0..5], 28..31 -> off[6..9], 22..25 -> off[10..13], 12..15 -> off[14..17]
        let w = (0x1 << 16) | (0x2 << 28) | (0x3 << 22) | (0x4 << 12) | 0x85;
        let Operands::Abs(f) = decode(w, Format::Abs) else { panic!() };
        assert_eq!(f.off18, 0x1 | (0x2 << 6) | (0x3 << 10) | (0x4 << 14));
    }

    #[test]
    fn brn_bit_index_uses_bit7() {
        let w = (1u32 << 31) | (5 << 16) | (0x3 << 12) | 0x80 | (4 << 8) | 0x6f;
        let Operands::Brn(f) = decode(w, Format::Brn) else { panic!() };
        assert_eq!(f.n, 0x13);
        assert_eq!(f.op2, 1);
        assert_eq!(f.disp15, 5);
        assert_eq!(f.s1, 4);
    }

    #[test]
    fn brr_disp15_is_signed() {
        let w = (0x7fff << 16) | 0x5f;
        let Operands::Brr(f) = decode(w, Format::Brr) else { panic!() };
        assert_eq!(f.disp15, -1);
        assert_eq!(f.op2, 0);
    }

    #[test]
    fn b_displacement_and_absolute() {
        let w = (0x0002 << 16) | (0x80 << 8) | 0x1d;
        let Operands::B(f) = decode(w, Format::B) else { panic!() };
        assert_eq!(f.disp24, 0x80_0002);
        assert_eq!(f.sdisp24(), -0x7f_fffe);
        let f = B { disp24: 0x10_0004 };
        assert_eq!(f.absolute(), 0x1000_0008);
    }

    #[test]
    fn rr_secondary_fields() {
        let w = (7 << 28) | (0x60 << 20) | (2 << 16) | (5 << 12) | (6 << 8) | 0x01;
        let Operands::Rr(f) = decode(w, Format::Rr) else { panic!() };
        assert_eq!((f.d, f.op2, f.n, f.s2, f.s1), (7, 0x60, 2, 5, 6));
    }

    #[test]
    fn rc_const9_raw_and_signed() {
        let w = (0x1ff << 12) | 0x8b;
        let Operands::Rc(f) = decode(w, Format::Rc) else { panic!() };
        assert_eq!(f.const9, 0x1ff);
        assert_eq!(f.sconst9(), -1);
    }
}
