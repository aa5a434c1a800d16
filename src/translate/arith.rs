//! Integer add/subtract families: plain, carrying, saturating, conditional
//! and packed byte/half-word forms, plus absolute value, min/max and the
//! compare-and-accumulate instructions.

use super::Translator;
use crate::ir::{imm, imm64, BinOp, BlockBuilder, Cond, Reg, Temp, Value};

/// Lane layout of a packed register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Lanes {
    pub width: u32,
    pub signed: bool,
}

pub(super) const BYTES: Lanes = Lanes { width: 8, signed: true };
pub(super) const BYTES_U: Lanes = Lanes { width: 8, signed: false };
pub(super) const HALVES: Lanes = Lanes { width: 16, signed: true };
pub(super) const HALVES_U: Lanes = Lanes { width: 16, signed: false };
pub(super) const WORD: Lanes = Lanes { width: 32, signed: true };
pub(super) const WORD_U: Lanes = Lanes { width: 32, signed: false };

impl Lanes {
    fn count(self) -> u32 {
        32 / self.width
    }

    /// Inclusive value range of one lane.
    fn range(self) -> (i32, i32) {
        if self.signed {
            (-(1i64 << (self.width - 1)) as i32, ((1i64 << (self.width - 1)) - 1) as i32)
        } else {
            (0, ((1i64 << self.width) - 1) as i32)
        }
    }
}

/// Target range of a saturating 64-to-32-bit narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Sat {
    Signed,
    /// Unsigned; the input is a signed difference or a small sum.
    Unsigned,
    /// Unsigned; the input is a non-negative product that may use all 64 bits.
    UnsignedWide,
}

/// How a compare result is merged into the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Accumulate {
    Set,
    And,
    Or,
    Xor,
    /// `dst = dst << 1 | result`
    Shift,
}

impl Translator<'_> {
    fn add_v(&mut self, a: Value, b: Value) -> (Temp, Temp) {
        let res = self.ir.add(a, b);
        let t1 = self.ir.xor(res, a);
        let t2 = self.ir.xor(a, b);
        let v = self.ir.binary(BinOp::AndC, t1, t2);
        (res, v)
    }

    fn sub_v(&mut self, a: Value, b: Value) -> (Temp, Temp) {
        let res = self.ir.sub(a, b);
        let t1 = self.ir.xor(res, a);
        let t2 = self.ir.xor(a, b);
        let v = self.ir.and(t1, t2);
        (res, v)
    }

    /// `dst = a + b`, setting V/SV/AV/SAV.
    pub(super) fn add_d(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>) {
        let (res, v) = self.add_v(a.into(), b.into());
        self.put_flags(v, res);
        self.ir.mov(dst, res);
    }

    /// `dst = a - b`, setting V/SV/AV/SAV.
    pub(super) fn sub_d(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>) {
        let (res, v) = self.sub_v(a.into(), b.into());
        self.put_flags(v, res);
        self.ir.mov(dst, res);
    }

    /// `dst = a + b + carry_in`, also producing C (ADDX, ADDC).
    pub(super) fn add_carry(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>, carry_in: Value) {
        let (a, b) = (a.into(), b.into());
        let wa = self.ir.widen(a, false);
        let wb = self.ir.widen(b, false);
        let mut sum = self.ir.add64(wa, wb);
        if carry_in != imm(0) {
            let wc = self.ir.widen(carry_in, false);
            sum = self.ir.add64(sum, wc);
        }
        let res = self.ir.narrow(sum, false);
        let c = self.ir.narrow(sum, true);
        let t1 = self.ir.xor(res, a);
        let t2 = self.ir.xor(a, b);
        let v = self.ir.binary(BinOp::AndC, t1, t2);
        self.put_flags(v, res);
        self.put_carry(c);
        self.ir.mov(dst, res);
    }

    /// `dst = a - b` as `a + !b + 1` (SUBX), or `a + !b + C` (SUBC).
    pub(super) fn sub_carry(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>, use_carry: bool) {
        let nb = self.ir.not(b);
        let carry_in = if use_carry { self.regs.flags.c.into() } else { imm(1) };
        self.add_carry(dst, a, nb, carry_in);
    }

    /// Clamps a 64-bit exact result to the 32-bit range `sat`, setting V when
    /// clamping happened. AV comes from the unclamped low word.
    pub(super) fn sat32(&mut self, x: Temp, sat: Sat) -> Temp {
        let (max, min) = match sat {
            Sat::Signed => (i32::MAX as u64, i32::MIN as i64 as u64),
            Sat::Unsigned | Sat::UnsignedWide => (u32::MAX as u64, 0),
        };
        let above = if sat == Sat::UnsignedWide { Cond::Gtu } else { Cond::Gt };
        let over = self.ir.setcond64(above, x, imm64(max));
        let under = if sat == Sat::UnsignedWide {
            imm(0)
        } else {
            self.ir.setcond64(Cond::Lt, x, imm64(min)).into()
        };
        let low = self.ir.narrow(x, false);
        let av = self.av_bits(low);
        let c = self.ir.movcond64(above, x, imm64(max), imm64(max), x);
        let c = self.ir.movcond64(Cond::Lt, c, imm64(min), imm64(min), c);
        let res = self.ir.narrow(c, false);
        let ovf = self.ir.or(over, under);
        self.put_v_bool(ovf);
        self.put_av(av);
        res
    }

    /// ADDS / ADDS.U / SUBS / SUBS.U and the saturating reverse subtracts.
    pub(super) fn add_sat(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>, signed: bool, sub: bool) {
        let wa = self.ir.widen(a, signed);
        let wb = self.ir.widen(b, signed);
        let x = if sub { self.ir.sub64(wa, wb) } else { self.ir.add64(wa, wb) };
        let res = self.sat32(x, if signed { Sat::Signed } else { Sat::Unsigned });
        self.ir.mov(dst, res);
    }

    /// CADD/CADDN/CSUB/CSUBN: when `sel cond 0` holds, `dst = a ± b` with
    /// flags; otherwise `dst = a` and the flags are left alone.
    pub(super) fn cond_add(
        &mut self,
        cond: Cond,
        sel: impl Into<Value>,
        dst: Reg,
        a: impl Into<Value>,
        b: impl Into<Value>,
        sub: bool,
    ) {
        let (sel, a, b) = (sel.into(), a.into(), b.into());
        // `sel` may be overwritten below when it aliases `dst`
        let sel = self.ir.copy(sel);
        let (res, v) = if sub { self.sub_v(a, b) } else { self.add_v(a, b) };
        let av = self.av_bits(res);
        let f = self.regs.flags;
        let sv = self.ir.or(f.sv, v);
        let sav = self.ir.or(f.sav, av);
        self.ir.movcond_into(f.v, cond, sel, imm(0), v, f.v);
        self.ir.movcond_into(f.sv, cond, sel, imm(0), sv, f.sv);
        self.ir.movcond_into(f.av, cond, sel, imm(0), av, f.av);
        self.ir.movcond_into(f.sav, cond, sel, imm(0), sav, f.sav);
        self.ir.movcond_into(dst, cond, sel, imm(0), res, a);
    }

    /// SEL/SELN/CMOV/CMOVN: `dst = sel cond 0 ? a : b`.
    pub(super) fn select(&mut self, cond: Cond, sel: impl Into<Value>, dst: Reg, a: impl Into<Value>, b: impl Into<Value>) {
        self.ir.movcond_into(dst, cond, sel, imm(0), a, b);
    }

    fn abs64(&mut self, x: Temp) -> Temp {
        let neg = self.ir.sub64(imm64(0), x);
        self.ir.movcond64(Cond::Lt, x, imm64(0), neg, x)
    }

    /// ABS, ABSS, ABSDIF and ABSDIFS on words. `b` is `None` for the
    /// single-operand forms.
    pub(super) fn abs_d(&mut self, dst: Reg, a: impl Into<Value>, b: Option<Value>, saturate: bool) {
        let wa = self.ir.widen(a, true);
        let x = match b {
            Some(b) => {
                let wb = self.ir.widen(b, true);
                self.ir.sub64(wa, wb)
            }
            None => wa,
        };
        let abs = self.abs64(x);
        let res = if saturate {
            self.sat32(abs, Sat::Signed)
        } else {
            let res = self.ir.narrow(abs, false);
            let ovf = self.ir.setcond64(Cond::Gt, abs, imm64(i32::MAX as u64));
            self.put_v_bool(ovf);
            self.put_av_of(res);
            res
        };
        self.ir.mov(dst, res);
    }

    /// MIN/MAX(.U) on words.
    pub(super) fn min_max(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>, max: bool, signed: bool) {
        let (a, b) = (a.into(), b.into());
        let cond = match (max, signed) {
            (false, true) => Cond::Lt,
            (false, false) => Cond::Ltu,
            (true, true) => Cond::Gt,
            (true, false) => Cond::Gtu,
        };
        self.ir.movcond_into(dst, cond, a, b, a, b);
    }

    /// SAT.B/BU/H/HU: clamp without touching the flags.
    pub(super) fn saturate(&mut self, dst: Reg, a: impl Into<Value>, lanes: Lanes) {
        let a = a.into();
        let (min, max) = lanes.range();
        if lanes.signed {
            let c = self.ir.movcond(Cond::Gt, a, imm(max as u32), imm(max as u32), a);
            self.ir.movcond_into(dst, Cond::Lt, c, imm(min as u32), imm(min as u32), c);
        } else {
            self.ir.movcond_into(dst, Cond::Gtu, a, imm(max as u32), imm(max as u32), a);
        }
    }

    /// Rebuilds a register lane by lane from `op` applied to matching lanes
    /// of `a` and `b`.
    pub(super) fn lane_map(
        &mut self,
        a: Value,
        b: Value,
        lanes: Lanes,
        mut op: impl FnMut(&mut Self, Temp, Temp) -> Temp,
    ) -> Value {
        let mut acc = imm(0);
        for i in 0..lanes.count() {
            let pos = i * lanes.width;
            let la = self.ir.extract(a, pos, lanes.width, lanes.signed);
            let lb = self.ir.extract(b, pos, lanes.width, lanes.signed);
            let r = op(self, la, lb);
            acc = self.ir.deposit(acc, r, pos, lanes.width).into();
        }
        acc
    }

    /// Packed arithmetic with flags. Each lane is computed exactly; V is set
    /// when any lane leaves the lane range, AV gathers the lanes'
    /// advanced-overflow bits. With `saturate` the lanes are clamped.
    pub(super) fn lanes_flagged(
        &mut self,
        dst: Reg,
        a: impl Into<Value>,
        b: impl Into<Value>,
        lanes: Lanes,
        saturate: bool,
        op: impl Fn(&mut BlockBuilder, Temp, Temp) -> Temp,
    ) {
        let (min, max) = lanes.range();
        let (min, max) = (imm(min as u32), imm(max as u32));
        let mut ovf = imm(0);
        let mut avf = imm(0);
        let res = self.lane_map(a.into(), b.into(), lanes, |t, x, y| {
            let r = op(t.ir, x, y);
            let over = t.ir.setcond(Cond::Gt, r, max);
            let under = t.ir.setcond(Cond::Lt, r, min);
            let o = t.ir.or(over, under);
            ovf = t.ir.or(ovf, o).into();
            let av = t.av_bits(r);
            avf = t.ir.or(avf, av).into();
            if saturate {
                let c = t.ir.movcond(Cond::Gt, r, max, max, r);
                t.ir.movcond(Cond::Lt, c, min, min, c)
            } else {
                r
            }
        });
        let av = self.ir.shl(avf, imm(32 - lanes.width));
        self.put_v_bool(ovf);
        self.put_av(av);
        self.ir.mov(dst, res);
    }

    /// EQ.B/H/W, LT.B/BU/H/HU/W/WU: every lane becomes all ones or zero.
    pub(super) fn lanes_compare(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>, lanes: Lanes, cond: Cond) {
        let res = self.lane_map(a.into(), b.into(), lanes, |t, x, y| {
            let c = t.ir.setcond(cond, x, y);
            t.ir.neg(c)
        });
        self.ir.mov(dst, res);
    }

    /// MAX/MIN on packed lanes.
    pub(super) fn lanes_min_max(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>, lanes: Lanes, max: bool) {
        let cond = if max { Cond::Gt } else { Cond::Lt };
        let res = self.lane_map(a.into(), b.into(), lanes, |t, x, y| t.ir.movcond(cond, x, y, x, y));
        self.ir.mov(dst, res);
    }

    /// EQANY.B/H: 1 if any lane of `a` equals the matching lane of `b`.
    pub(super) fn eq_any(&mut self, dst: Reg, a: impl Into<Value>, b: impl Into<Value>, lanes: Lanes) {
        let (a, b) = (a.into(), b.into());
        let mut any = imm(0);
        for i in 0..lanes.count() {
            let pos = i * lanes.width;
            let la = self.ir.extract(a, pos, lanes.width, false);
            let lb = self.ir.extract(b, pos, lanes.width, false);
            let c = self.ir.setcond(Cond::Eq, la, lb);
            any = self.ir.or(any, c).into();
        }
        self.ir.mov(dst, any);
    }

    /// Compare into bit 0 of `dst`, merged per `acc`.
    pub(super) fn compare(&mut self, acc: Accumulate, cond: Cond, dst: Reg, a: impl Into<Value>, b: impl Into<Value>) {
        let c = self.ir.setcond(cond, a, b);
        self.accumulate(acc, dst, c);
    }

    /// Merges a 0/1 value into `dst`.
    pub(super) fn accumulate(&mut self, acc: Accumulate, dst: Reg, bit: Temp) {
        let op = match acc {
            Accumulate::Set => {
                self.ir.mov(dst, bit);
                return;
            }
            Accumulate::Shift => {
                let s = self.ir.shl(dst, imm(1));
                self.ir.set(dst, BinOp::Or, s, bit);
                return;
            }
            Accumulate::And => BinOp::And,
            Accumulate::Or => BinOp::Or,
            Accumulate::Xor => BinOp::Xor,
        };
        let t = self.ir.binary(op, dst, bit);
        self.ir.deposit_into(dst, dst, t, 0, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_ranges() {
        assert_eq!(BYTES.range(), (-128, 127));
        assert_eq!(HALVES_U.range(), (0, 0xffff));
        assert_eq!(WORD.range(), (i32::MIN, i32::MAX));
        assert_eq!(BYTES_U.count(), 4);
    }
}
