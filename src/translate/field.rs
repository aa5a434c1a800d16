//! Bit-field extract, insert, mask generation and double-word extract.
//!
//! Position and width may be immediates or come from registers. A field
//! that would run past bit 31 is cut at bit 31: the width used is
//! `min(width, 32 - pos)`.

use super::Translator;
use crate::fault::Fault;
use crate::ir::{imm, BinOp, Cond, Reg, Temp, Value};

/// Constant position and width after clamping.
fn fold(pos: Value, width: Value) -> Option<(u32, u32)> {
    match (pos, width) {
        (Value::Imm(p), Value::Imm(w)) => {
            let p = (p & 0x1f) as u32;
            let w = (w & 0x1f) as u32;
            Some((p, w.min(32 - p)))
        }
        _ => None,
    }
}

impl Translator<'_> {
    /// `pos` and the clamped width as temps.
    fn field_bounds(&mut self, pos: Value, width: Value) -> (Temp, Temp) {
        let p = self.ir.and(pos, imm(0x1f));
        let w = self.ir.and(width, imm(0x1f));
        let room = self.ir.sub(imm(32), p);
        let w = self.ir.movcond(Cond::Gtu, w, room, room, w);
        (p, w)
    }

    /// `((1 << w) - 1) << p`
    fn field_mask(&mut self, p: Temp, w: Temp) -> Temp {
        let one = self.ir.shl(imm(1), w);
        let ones = self.ir.sub(one, imm(1));
        self.ir.shl(ones, p)
    }

    /// EXTR / EXTR.U
    pub(super) fn extr(&mut self, dst: Reg, a: Reg, pos: Value, width: Value, signed: bool) {
        if let Some((p, w)) = fold(pos, width) {
            if w == 0 {
                self.ir.mov(dst, imm(0));
            } else {
                let t = self.ir.extract(a, p, w, signed);
                self.ir.mov(dst, t);
            }
            return;
        }
        let (p, w) = self.field_bounds(pos, width);
        let top = self.ir.sub(imm(32), p);
        let left = self.ir.sub(top, w);
        let up = self.ir.shl(a, left);
        let right = self.ir.sub(imm(32), w);
        let r = if signed { self.ir.sar(up, right) } else { self.ir.shr(up, right) };
        self.ir.movcond_into(dst, Cond::Eq, w, imm(0), imm(0), r);
    }

    /// INSERT: `dst = a` with the field replaced by the low bits of `b`.
    pub(super) fn insert(&mut self, dst: Reg, a: Reg, b: Value, pos: Value, width: Value) {
        if let Some((p, w)) = fold(pos, width) {
            if w == 0 {
                self.ir.mov(dst, a);
            } else {
                self.ir.deposit_into(dst, a, b, p, w);
            }
            return;
        }
        let (p, w) = self.field_bounds(pos, width);
        let mask = self.field_mask(p, w);
        let shifted = self.ir.shl(b, p);
        let field = self.ir.and(shifted, mask);
        let keep = self.ir.binary(BinOp::AndC, a, mask);
        self.ir.set(dst, BinOp::Or, keep, field);
    }

    /// IMASK: `E[c].hi` is the field mask, `E[c].lo` the value `b` moved
    /// into the field.
    pub(super) fn imask(&mut self, c: u8, b: Value, pos: Value, width: Value) -> Result<(), Fault> {
        let (lo, hi) = self.e(c)?;
        if let Some((p, w)) = fold(pos, width) {
            let mask = if w == 0 { 0 } else { (((1u64 << w) - 1) << p) as u32 };
            let val = self.ir.shl(b, imm(p));
            let val = self.ir.and(val, imm(mask));
            self.ir.mov(lo, val);
            self.ir.mov(hi, imm(mask));
            return Ok(());
        }
        let (p, w) = self.field_bounds(pos, width);
        let mask = self.field_mask(p, w);
        let val = self.ir.shl(b, p);
        let val = self.ir.and(val, mask);
        self.ir.mov(lo, val);
        self.ir.mov(hi, mask);
        Ok(())
    }

    /// DEXTR: the 32 bits of `a:b` starting `pos` bits below the top.
    pub(super) fn dextr(&mut self, dst: Reg, a: Reg, b: Reg, pos: Value) {
        if let Value::Imm(p) = pos {
            let p = (p & 0x1f) as u32;
            if p == 0 {
                self.ir.mov(dst, a);
            } else {
                let hi = self.ir.shl(a, imm(p));
                let lo = self.ir.shr(b, imm(32 - p));
                self.ir.set(dst, BinOp::Or, hi, lo);
            }
            return;
        }
        let p = self.ir.and(pos, imm(0x1f));
        let hi = self.ir.shl(a, p);
        let rest = self.ir.sub(imm(32), p);
        // a shift by 32 yields 0, so pos == 0 needs no special case
        let lo = self.ir.shr(b, rest);
        self.ir.set(dst, BinOp::Or, hi, lo);
    }

    /// Position from `D[d]`, width from `D[d+1]`, as used by the register
    /// forms of EXTR and INSERT.
    pub(super) fn pos_width_pair(&self, d: u8) -> Result<(Value, Value), Fault> {
        let (lo, hi) = self.e(d)?;
        Ok((lo.into(), hi.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Inst};
    use crate::regfile::RegisterFile;

    #[test]
    fn constant_field_is_clamped() {
        assert_eq!(fold(imm(28), imm(8)), Some((28, 4)));
        assert_eq!(fold(imm(0), imm(31)), Some((0, 31)));
        assert_eq!(fold(Reg::D(1).into(), imm(3)), None);
    }

    #[test]
    fn constant_extract_is_one_op() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        t.extr(Reg::D(2), Reg::D(3), imm(4), imm(8), false);
        assert!(matches!(
            b.insts()[0],
            Inst::Extract { pos: 4, len: 8, signed: false, .. }
        ));
    }
}
