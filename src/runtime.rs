//! Pure semantics of the value-returning [`Helper`](crate::ir::Helper)s.
//!
//! A back end may call these directly or reimplement them; the reference
//! interpreter uses them as is. Pair results are `remainder << 32 | quotient`.

use bitflags::bitflags;

bitflags! {
    /// User status bits of the packed PSW.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PswFlags: u32 {
        const C = 1 << 31;
        const V = 1 << 30;
        const SV = 1 << 29;
        const AV = 1 << 28;
        const SAV = 1 << 27;
    }
}

/// The flag pseudo-registers in their IR form: C is 0 or 1, the others live
/// in bit 31.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FlagRegs {
    pub c: u32,
    pub v: u32,
    pub sv: u32,
    pub av: u32,
    pub sav: u32,
}

/// Merges the flag registers into the status bits of `psw`.
pub fn psw_pack(psw: u32, f: &FlagRegs) -> u32 {
    let mut bits = PswFlags::empty();
    bits.set(PswFlags::C, f.c != 0);
    bits.set(PswFlags::V, f.v & (1 << 31) != 0);
    bits.set(PswFlags::SV, f.sv & (1 << 31) != 0);
    bits.set(PswFlags::AV, f.av & (1 << 31) != 0);
    bits.set(PswFlags::SAV, f.sav & (1 << 31) != 0);
    (psw & !PswFlags::all().bits()) | bits.bits()
}

/// Splits a packed PSW into its status bits and flag registers.
pub fn psw_unpack(value: u32) -> (u32, FlagRegs) {
    let bits = PswFlags::from_bits_truncate(value);
    let at31 = |flag| if bits.contains(flag) { 1 << 31 } else { 0 };
    let flags = FlagRegs {
        c: bits.contains(PswFlags::C) as u32,
        v: at31(PswFlags::V),
        sv: at31(PswFlags::SV),
        av: at31(PswFlags::AV),
        sav: at31(PswFlags::SAV),
    };
    (value & !PswFlags::all().bits(), flags)
}

fn pair(remainder: u32, quotient: u32) -> u64 {
    ((remainder as u64) << 32) | quotient as u64
}

/// Sign-extended dividend shifted left by `bits`; the quotient bits start as
/// all ones when the operand signs differ.
fn dvinit_short(dividend: u32, divisor: u32, bits: u32) -> u64 {
    let mut r = ((dividend as i32 as i64) << bits) as u64;
    if (dividend ^ divisor) & 0x8000_0000 != 0 {
        r |= (1 << bits) - 1;
    }
    r
}

/// DVINIT.B
pub fn dvinit_b(dividend: u32, divisor: u32) -> u64 {
    dvinit_short(dividend, divisor, 24)
}

/// DVINIT.H
pub fn dvinit_h(dividend: u32, divisor: u32) -> u64 {
    dvinit_short(dividend, divisor, 16)
}

/// Eight signed non-restoring division steps.
pub fn dvstep(acc: u64, divisor: u32) -> u64 {
    let dividend_sign = (acc >> 63) != 0;
    let quotient_sign = dividend_sign != (divisor >> 31 != 0);
    let addend = if quotient_sign { divisor as i32 } else { (divisor as i32).wrapping_neg() };
    let mut quotient = acc as u32;
    let mut remainder = (acc >> 32) as i32;
    for _ in 0..8 {
        remainder = (remainder << 1) | (quotient >> 31) as i32;
        quotient <<= 1;
        let temp = remainder.wrapping_add(addend);
        let keep = (temp < 0) == dividend_sign;
        if keep {
            remainder = temp;
        }
        quotient |= (keep != quotient_sign) as u32;
    }
    pair(remainder as u32, quotient)
}

/// Eight unsigned restoring division steps.
pub fn dvstep_u(acc: u64, divisor: u32) -> u64 {
    let mut quotient = acc as u32;
    let mut remainder = (acc >> 32) as u32;
    for _ in 0..8 {
        let wide = ((remainder as u64) << 1) | (quotient >> 31) as u64;
        quotient <<= 1;
        let temp = (wide & 0xffff_ffff) as i64 - divisor as i64;
        if temp >= 0 {
            remainder = temp as u32;
            quotient |= 1;
        } else {
            remainder = wide as u32;
        }
    }
    pair(remainder, quotient)
}

/// DVADJ: final quotient/remainder correction after signed steps.
pub fn dvadj(acc: u64, divisor: u32) -> u64 {
    let x_sign = (acc >> 63) != 0;
    let q_sign = x_sign ^ (divisor >> 31 != 0);
    let rem = (acc >> 32) as u32;
    let eq_pos = x_sign && rem == divisor;
    let eq_neg = x_sign && rem == divisor.wrapping_neg();
    let quotient = if (q_sign && !eq_neg) || eq_pos {
        (acc as u32).wrapping_add(1)
    } else {
        acc as u32
    };
    let remainder = if eq_pos || eq_neg { 0 } else { rem };
    pair(remainder, quotient)
}

/// Signed DIV. Division by zero saturates the quotient towards the
/// dividend's sign; `i32::MIN / -1` gives `i32::MAX`.
pub fn divide(dividend: u32, divisor: u32) -> u64 {
    let (a, b) = (dividend as i32, divisor as i32);
    if b == 0 {
        let q = if a >= 0 { i32::MAX } else { i32::MIN };
        return pair(0, q as u32);
    }
    if a == i32::MIN && b == -1 {
        return pair(0, i32::MAX as u32);
    }
    pair((a % b) as u32, (a / b) as u32)
}

/// Unsigned DIV.U; division by zero gives an all-ones quotient.
pub fn divide_u(dividend: u32, divisor: u32) -> u64 {
    if divisor == 0 {
        return pair(0, u32::MAX);
    }
    pair(dividend % divisor, dividend / divisor)
}

/// Bit-reversed increment: the index (bits 0..16) advances by the
/// increment (bits 16..32) with the carry propagating towards bit 0.
pub fn br_update(reg: u32) -> u32 {
    let index = reg as u16;
    let incr = (reg >> 16) as u16;
    let next = index.reverse_bits().wrapping_add(incr.reverse_bits()).reverse_bits();
    (reg & 0xffff_0000) | next as u32
}

/// Circular index advance modulo the length in bits 16..32. A zero length
/// leaves the index unchanged.
pub fn circ_update(reg: u32, off: u32) -> u32 {
    let index = (reg & 0xffff) as i64;
    let length = (reg >> 16) as i64;
    if length == 0 {
        return reg;
    }
    let next = (index + off as i32 as i64).rem_euclid(length);
    (reg & 0xffff_0000) | next as u32
}

/// CRC-32 (reflected, polynomial 0x04c11db7) over the four bytes of `data`,
/// most significant first, continuing from the checksum `crc`.
pub fn crc32(data: u32, crc: u32) -> u32 {
    let mut crc = !crc;
    for byte in data.to_be_bytes() {
        crc ^= byte as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xedb8_8320 } else { crc >> 1 };
        }
    }
    !crc
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs the four DVSTEPs of a full signed word division plus DVADJ.
    fn signed_div(a: i32, b: i32) -> (i32, i32) {
        let mut acc = ((a >> 31) as u32 as u64) << 32 | a as u32 as u64;
        for _ in 0..4 {
            acc = dvstep(acc, b as u32);
        }
        let r = dvadj(acc, b as u32);
        (r as u32 as i32, (r >> 32) as u32 as i32)
    }

    #[test]
    fn signed_step_division() {
        assert_eq!(signed_div(100, 7), (14, 2));
        assert_eq!(signed_div(-100, 7), (-14, -2));
        assert_eq!(signed_div(100, -7), (-14, 2));
        assert_eq!(signed_div(-21, 7), (-3, 0));
    }

    #[test]
    fn unsigned_step_division() {
        let mut acc = 1_000_000u64;
        for _ in 0..4 {
            acc = dvstep_u(acc, 9);
        }
        assert_eq!(acc as u32, 111_111);
        assert_eq!((acc >> 32) as u32, 1);
    }

    #[test]
    fn byte_init_prepares_eight_quotient_bits() {
        let r = dvinit_b(0x0000_0064, 7);
        assert_eq!(r, 0x64u64 << 24);
        let acc = dvstep(r, 7);
        assert_eq!(acc as u8, 14);
        assert_eq!((acc >> 32) as u32, 2);
    }

    #[test]
    fn divide_edge_cases() {
        assert_eq!(divide(7, 0), pair(0, i32::MAX as u32));
        assert_eq!(divide(-7i32 as u32, 0), pair(0, i32::MIN as u32));
        assert_eq!(divide(0x8000_0000, u32::MAX), pair(0, i32::MAX as u32));
        assert_eq!(divide(-7i32 as u32, 2), pair(-1i32 as u32, -3i32 as u32));
        assert_eq!(divide_u(7, 0), pair(0, u32::MAX));
        assert_eq!(divide_u(7, 2), pair(1, 3));
    }

    #[test]
    fn circular_index_wraps() {
        // length 12, index 10, +4 -> 2
        assert_eq!(circ_update(12 << 16 | 10, 4), 12 << 16 | 2);
        // backwards past zero
        assert_eq!(circ_update(12 << 16 | 2, -4i32 as u32), 12 << 16 | 10);
        assert_eq!(circ_update(5, 4), 5);
    }

    #[test]
    fn bit_reverse_increment() {
        // a 16-entry FFT buffer: increment 8 walks 0, 8, 4, 12, 2, ...
        let mut reg = 8 << 16;
        let mut seen = Vec::new();
        for _ in 0..4 {
            reg = br_update(reg);
            seen.push(reg & 0xffff);
        }
        assert_eq!(seen, vec![8, 4, 12, 2]);
    }

    #[test]
    fn crc_chains_across_words() {
        assert_eq!(crc32(0, 0), 0x2144_df1c);
        // "12345678"
        let first = crc32(u32::from_be_bytes(*b"1234"), 0);
        assert_eq!(crc32(u32::from_be_bytes(*b"5678"), first), 0x9ae0_daaf);
    }

    #[test]
    fn psw_round_trip_keeps_other_bits() {
        let flags = FlagRegs { c: 1, v: 0, sv: 1 << 31, av: 0, sav: 1 << 31 };
        let packed = psw_pack(0x0000_0b80, &flags);
        assert_eq!(packed, 0x8000_0b80 | 1 << 29 | 1 << 27);
        let (rest, back) = psw_unpack(packed);
        assert_eq!(rest, 0x0000_0b80);
        assert_eq!(back, flags);
    }
}
