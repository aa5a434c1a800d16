//! Bitwise logic, shifts, single-bit operations and bit counting.

use super::arith::{Accumulate, Sat, BYTES_U, HALVES, HALVES_U};
use super::Translator;
use crate::bitfield::sign_ext;
use crate::ir::{imm, BinOp, Cond, Reg, Temp, Ty, UnOp, Value};

impl Translator<'_> {
    /// SH: logical shift by a signed 6-bit count, negative counts shift right.
    pub(super) fn sh(&mut self, dst: Reg, a: impl Into<Value>, count: Value) {
        let a = a.into();
        if let Value::Imm(c) = count {
            let sc = sign_ext(c as u32, 6);
            if sc >= 0 {
                self.ir.set(dst, BinOp::Shl, a, imm(sc as u32));
            } else {
                self.ir.set(dst, BinOp::Shr, a, imm(sc.unsigned_abs()));
            }
            return;
        }
        let sc = self.ir.extract(count, 0, 6, true);
        let left = self.ir.shl(a, sc);
        let n = self.ir.neg(sc);
        let right = self.ir.shr(a, n);
        self.ir.movcond_into(dst, Cond::Lt, sc, imm(0), right, left);
    }

    /// SHA: arithmetic shift with C, V and AV.
    pub(super) fn sha(&mut self, dst: Reg, a: impl Into<Value>, count: Value) {
        let a = a.into();
        let sc = self.ir.extract(count, 0, 6, true);
        let wa = self.ir.widen(a, true);
        let sc64 = self.ir.widen(sc, true);
        let left64 = self.ir.shl64(wa, sc64);
        let left = self.ir.narrow(left64, false);
        let n = self.ir.neg(sc);
        let right = self.ir.sar(a, n);
        let res = self.ir.movcond(Cond::Lt, sc, imm(0), right, left);

        // carry: bits shifted out
        let hi = self.ir.narrow(left64, true);
        let c_left = self.ir.setcond(Cond::Ne, hi, imm(0));
        let one = self.ir.shl(imm(1), n);
        let mask = self.ir.sub(one, imm(1));
        let lost = self.ir.and(a, mask);
        let c_right = self.ir.setcond(Cond::Ne, lost, imm(0));
        let c = self.ir.movcond(Cond::Lt, sc, imm(0), c_right, c_left);
        let c = self.ir.movcond(Cond::Eq, sc, imm(0), imm(0), c);

        let over = self.ir.setcond64(Cond::Gt, left64, Value::Imm(i32::MAX as u64));
        let under = self.ir.setcond64(Cond::Lt, left64, Value::Imm(i32::MIN as i64 as u64));
        let ovf = self.ir.or(over, under);
        let v = self.ir.movcond(Cond::Gt, sc, imm(0), ovf, imm(0));

        self.put_carry(c);
        self.put_v_bool(v);
        self.put_av_of(res);
        self.ir.mov(dst, res);
    }

    /// SHAS: arithmetic shift saturated to 32 bits.
    pub(super) fn shas(&mut self, dst: Reg, a: impl Into<Value>, count: Value) {
        let sc = self.ir.extract(count, 0, 6, true);
        let wa = self.ir.widen(a, true);
        let sc64 = self.ir.widen(sc, true);
        let left = self.ir.shl64(wa, sc64);
        let n = self.ir.sub64(Value::Imm(0), sc64);
        let right = self.ir.sar64(wa, n);
        let x = self.ir.movcond64(Cond::Lt, sc64, Value::Imm(0), right, left);
        let res = self.sat32(x, Sat::Signed);
        self.ir.mov(dst, res);
    }

    /// SH.H / SHA.H: per half-word shift by a signed 5-bit count.
    pub(super) fn sh_h(&mut self, dst: Reg, a: impl Into<Value>, count: Value, arithmetic: bool) {
        let sc = self.ir.extract(count, 0, 5, true);
        let n = self.ir.neg(sc);
        let lanes = if arithmetic { HALVES } else { HALVES_U };
        let res = self.lane_map(a.into(), imm(0), lanes, |t, x, _| {
            let left = t.ir.shl(x, sc);
            let right = if arithmetic { t.ir.sar(x, n) } else { t.ir.shr(x, n) };
            t.ir.movcond(Cond::Lt, sc, imm(0), right, left)
        });
        self.ir.mov(dst, res);
    }

    /// Two-operand bitwise op.
    pub(super) fn logic(&mut self, op: BinOp, dst: Reg, a: impl Into<Value>, b: impl Into<Value>) {
        self.ir.set(dst, op, a, b);
    }

    fn bit(&mut self, src: Reg, pos: u32) -> Temp {
        self.ir.extract(src, pos, 1, false)
    }

    /// `op(a[pos1], b[pos2])` merged into `dst` per `acc`.
    pub(super) fn bit_logic(&mut self, acc: Accumulate, op: BinOp, dst: Reg, a: Reg, pos1: u32, b: Reg, pos2: u32) {
        let x = self.bit(a, pos1);
        let y = self.bit(b, pos2);
        let r = self.ir.binary(op, x, y);
        let r = self.ir.and(r, imm(1));
        self.accumulate(acc, dst, r);
    }

    /// INS.T / INSN.T
    pub(super) fn insert_bit(&mut self, dst: Reg, a: Reg, pos1: u32, b: Reg, pos2: u32, invert: bool) {
        let mut y = self.bit(b, pos2);
        if invert {
            y = self.ir.xor(y, imm(1));
        }
        self.ir.deposit_into(dst, a, y, pos1, 1);
    }

    /// CLO/CLZ/CLS.
    pub(super) fn count(&mut self, op: UnOp, dst: Reg, a: impl Into<Value>) {
        self.ir.emit_unary(op, Ty::I32, dst, a);
    }

    /// CLO.H/CLZ.H/CLS.H: the count of each half-word lands in that half.
    pub(super) fn count_h(&mut self, op: UnOp, dst: Reg, a: impl Into<Value>) {
        let limit = if op == UnOp::Cls { 15 } else { 16 };
        let res = self.lane_map(a.into(), imm(0), HALVES_U, |t, x, _| {
            let top = t.ir.shl(x, imm(16));
            let n = t.ir.unary(op, top);
            t.ir.movcond(Cond::Gtu, n, imm(limit), imm(limit), n)
        });
        self.ir.mov(dst, res);
    }

    /// PARITY: bit 0 of every byte becomes that byte's parity.
    pub(super) fn parity(&mut self, dst: Reg, a: impl Into<Value>) {
        let res = self.lane_map(a.into(), imm(0), BYTES_U, |t, x, _| {
            let n = t.ir.unary(UnOp::Popcnt, x);
            t.ir.and(n, imm(1))
        });
        self.ir.mov(dst, res);
    }

    /// Spreads the low 16 bits of `x` onto the even bit positions.
    fn spread16(&mut self, x: impl Into<Value>) -> Temp {
        let mut t = self.ir.and(x, imm(0xffff));
        for (sh, mask) in [(8, 0x00ff_00ff), (4, 0x0f0f_0f0f), (2, 0x3333_3333), (1, 0x5555_5555)] {
            let s = self.ir.shl(t, imm(sh));
            let o = self.ir.or(t, s);
            t = self.ir.and(o, imm(mask));
        }
        t
    }

    /// Gathers the even bits of `x` into the low 16 bits.
    fn compact16(&mut self, x: impl Into<Value>) -> Temp {
        let mut t = self.ir.and(x, imm(0x5555_5555));
        for (sh, mask) in [(1, 0x3333_3333), (2, 0x0f0f_0f0f), (4, 0x00ff_00ff), (8, 0x0000_ffff)] {
            let s = self.ir.shr(t, imm(sh));
            let o = self.ir.or(t, s);
            t = self.ir.and(o, imm(mask));
        }
        t
    }

    /// BMERGE: bits of `a` go to the odd positions, bits of `b` to the even.
    pub(super) fn bmerge(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>) {
        let odd = self.spread16(a);
        let odd = self.ir.shl(odd, imm(1));
        let even = self.spread16(b);
        self.ir.set(dst, BinOp::Or, odd, even);
    }

    /// BSPLIT: even bits to the low word, odd bits to the high word.
    pub(super) fn bsplit(&mut self, lo: Reg, hi: Reg, a: impl Into<Value>) {
        let a = a.into();
        let even = self.compact16(a);
        let shifted = self.ir.shr(a, imm(1));
        let odd = self.compact16(shifted);
        self.ir.mov(lo, even);
        self.ir.mov(hi, odd);
    }

    /// SHUFFLE: byte `i` of the result is byte `const9[2i+1:2i]` of `a`;
    /// `const9[8]` additionally reverses the bits of every byte.
    pub(super) fn shuffle(&mut self, dst: Reg, a: impl Into<Value>, control: u32) {
        let a = a.into();
        let mut acc = imm(0);
        for i in 0..4 {
            let sel = (control >> (2 * i)) & 3;
            let byte = self.ir.extract(a, sel * 8, 8, false);
            acc = self.ir.deposit(acc, byte, i * 8, 8).into();
        }
        if control & 0x100 != 0 {
            for (sh, mask) in [(1, 0x5555_5555), (2, 0x3333_3333), (4, 0x0f0f_0f0f)] {
                let r = self.ir.shr(acc, imm(sh));
                let r = self.ir.and(r, imm(mask));
                let l = self.ir.and(acc, imm(mask));
                let l = self.ir.shl(l, imm(sh));
                acc = self.ir.or(r, l).into();
            }
        }
        self.ir.mov(dst, acc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Inst};
    use crate::regfile::RegisterFile;

    #[test]
    fn constant_shift_folds_direction() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 0);
        // -3 as a 6-bit field
        t.sh(Reg::D(1), Reg::D(2), imm(0x3d));
        assert_eq!(
            b.insts(),
            &[Inst::Binary {
                op: BinOp::Shr,
                ty: Ty::I32,
                dst: Reg::D(1).into(),
                lhs: Reg::D(2).into(),
                rhs: imm(3),
            }]
        );
    }
}
