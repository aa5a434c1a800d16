//! Sub-field extraction from instruction words.
//!
//! Bit positions are inclusive, `start <= end <= 31`.

#[inline]
pub const fn extract(word: u32, start: u32, end: u32) -> u32 {
    let len = end - start + 1;
    if len >= 32 {
        word >> start
    } else {
        (word >> start) & ((1u32 << len) - 1)
    }
}

#[inline]
pub const fn sextract(word: u32, start: u32, end: u32) -> i32 {
    let len = end - start + 1;
    let shift = 32 - start - len;
    ((word << shift) as i32) >> (32 - len)
}

/// Sign-extends the low `bits` bits of `v`.
#[inline]
pub const fn sign_ext(v: u32, bits: u32) -> i32 {
    let s = 32 - bits;
    ((v << s) as i32) >> s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_fields() {
        assert_eq!(extract(0xabcd_1234, 0, 7), 0x34);
        assert_eq!(extract(0xabcd_1234, 28, 31), 0xa);
        assert_eq!(extract(0xabcd_1234, 0, 31), 0xabcd_1234);
        assert_eq!(extract(0x8000_0000, 31, 31), 1);
    }

    #[test]
    fn sextract_fields() {
        assert_eq!(sextract(0x0000_f000, 12, 15), -1);
        assert_eq!(sextract(0x0000_7000, 12, 15), 7);
        assert_eq!(sextract(0x8000_0000, 16, 31), -0x8000);
        assert_eq!(sextract(0xffff_ffff, 0, 31), -1);
    }

    #[test]
    fn sign_ext_matches_sextract() {
        for v in [0u32, 1, 0x7, 0x8, 0xf] {
            assert_eq!(sign_ext(v, 4), sextract(v, 0, 3));
        }
        assert_eq!(sign_ext(0x1ff, 9), -1);
        assert_eq!(sign_ext(0x100, 9), -256);
    }
}
