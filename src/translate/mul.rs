//! Multiplies and multiply-accumulates: word, packed half-word and
//! Q-format fractional forms.
//!
//! Every form computes its products exactly in 64 bits, so V is a range
//! check on the exact result rather than an overflow trick on the wrapped
//! one. The 64-bit Q forms are the exception: their products can reach
//! 2^63, which is reported the way the hardware does it.

use super::arith::Sat;
use super::Translator;
use crate::fault::Fault;
use crate::ir::{imm, imm64, BinOp, Cond, Reg, Temp, Value};

/// Which half-words of the two sources are multiplied into the
/// (upper, lower) result lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfPairing {
    /// upper: `a.hi * b.lo`, lower: `a.lo * b.lo`
    LL,
    /// upper: `a.hi * b.lo`, lower: `a.lo * b.hi`
    LU,
    /// upper: `a.hi * b.hi`, lower: `a.lo * b.lo`
    UL,
    /// upper: `a.lo * b.hi`, lower: `a.hi * b.hi`
    UU,
}

impl HalfPairing {
    /// Decodes the low two bits of a packed multiply's secondary opcode.
    pub fn from_op2(op2: u32) -> Self {
        match op2 & 3 {
            0 => HalfPairing::UL,
            1 => HalfPairing::LU,
            2 => HalfPairing::LL,
            _ => HalfPairing::UU,
        }
    }

    /// (upper lane, lower lane) operand halves as (a upper?, b upper?).
    fn halves(self) -> [(bool, bool); 2] {
        match self {
            HalfPairing::LL => [(true, false), (false, false)],
            HalfPairing::LU => [(true, false), (false, true)],
            HalfPairing::UL => [(true, true), (false, false)],
            HalfPairing::UU => [(false, true), (true, true)],
        }
    }
}

/// Add or subtract per result lane of a packed MAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct LaneOps {
    pub lower_sub: bool,
    pub upper_sub: bool,
}

impl LaneOps {
    pub const MADD: LaneOps = LaneOps { lower_sub: false, upper_sub: false };
    pub const MSUB: LaneOps = LaneOps { lower_sub: true, upper_sub: true };
    pub const MADDSU: LaneOps = LaneOps { lower_sub: true, upper_sub: false };
    pub const MSUBAD: LaneOps = LaneOps { lower_sub: false, upper_sub: true };
}

/// Result treatment of the packed multiplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HalfMode {
    /// Two 32-bit lanes into `E[c]`.
    Plain,
    Sat,
    /// Lanes summed into one 64-bit value.
    Merge,
    MergeSat,
    /// Lanes rounded to 16 bits and packed into `D[c]`.
    Round,
    RoundSat,
}

/// Operand selection of the Q-format forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum QForm {
    /// 32 x 32 bits.
    Word,
    /// 32 bits x the lower half of `b`.
    L,
    /// 32 bits x the upper half of `b`.
    U,
    /// lower half x lower half.
    LL,
    /// upper half x upper half.
    UU,
}

impl QForm {
    /// Right shift that brings the product of a word form back to Q31.
    fn scale(self) -> u32 {
        match self {
            QForm::Word => 32,
            _ => 16,
        }
    }

    fn is_half(self) -> bool {
        matches!(self, QForm::LL | QForm::UU)
    }
}

/// Accumulate direction and saturation of a MAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Mac {
    pub sub: bool,
    pub sat: bool,
}

impl Translator<'_> {
    fn half(&mut self, x: Reg, upper: bool) -> Temp {
        if upper {
            self.ir.sar(x, imm(16))
        } else {
            self.ir.extract(x, 0, 16, true)
        }
    }

    /// `(x * y) << n` of two signed halves; with `n == 1` the single
    /// overflowing case `-1.0 * -1.0` becomes `0x7fffffff`.
    fn frac16(&mut self, x: impl Into<Value>, y: impl Into<Value>, n: u32) -> Temp {
        let p = self.ir.mul(x, y);
        if n == 0 {
            return p;
        }
        let p = self.ir.shl(p, imm(n));
        self.ir.movcond(Cond::Eq, p, imm(0x8000_0000), imm(0x7fff_ffff), p)
    }

    /// Both lane products as [lower, upper].
    fn half_products(&mut self, a: Reg, b: Reg, pairing: HalfPairing, n: u32) -> [Temp; 2] {
        let [(ua, ub), (la, lb)] = pairing.halves();
        let (x, y) = (self.half(a, la), self.half(b, lb));
        let lower = self.frac16(x, y, n);
        let (x, y) = (self.half(a, ua), self.half(b, ub));
        let upper = self.frac16(x, y, n);
        [lower, upper]
    }

    /// MUL.H, MULM.H and MULR.H.
    pub(super) fn mul_h(&mut self, mode: HalfMode, c: u8, a: Reg, b: Reg, pairing: HalfPairing, n: u32) -> Result<(), Fault> {
        match mode {
            HalfMode::Plain => {
                let (lo, hi) = self.e(c)?;
                let [lower, upper] = self.half_products(a, b, pairing, n);
                let av = self.lanes_av(lower, upper);
                self.clear_v();
                self.put_av(av);
                self.ir.mov(lo, lower);
                self.ir.mov(hi, upper);
            }
            HalfMode::Merge => {
                let (lo, hi) = self.e(c)?;
                let [lower, upper] = self.half_products(a, b, pairing, n);
                let wl = self.ir.widen(lower, true);
                let wu = self.ir.widen(upper, true);
                let sum = self.ir.add64(wu, wl);
                let r = self.ir.shl64(sum, imm64(16));
                self.clear_v();
                self.put_av(imm(0));
                self.ir.split(lo, hi, r);
            }
            HalfMode::Round => {
                let dst = self.d(c);
                let [(ua, ub), (la, lb)] = pairing.halves();
                let (x, y) = (self.half(a, la), self.half(b, lb));
                let lower = self.round16(x, y, n);
                let (x, y) = (self.half(a, ua), self.half(b, ub));
                let upper = self.round16(x, y, n);
                let t_lo = self.av_bits(lower);
                let t_up = self.av_bits(upper);
                let av = self.ir.or(t_lo, t_up);
                let hi = self.ir.and(upper, imm(0xffff_0000));
                let low = self.ir.shr(lower, imm(16));
                self.clear_v();
                self.put_av(av);
                self.ir.set(dst, BinOp::Or, hi, low);
            }
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    /// One MULR lane: `(x * y) << n` rounded at bit 15, the saturated
    /// product is not rounded.
    fn round16(&mut self, x: Temp, y: Temp, n: u32) -> Temp {
        let p = self.ir.mul(x, y);
        let p = self.ir.shl(p, imm(n));
        let r = self.ir.add(p, imm(0x8000));
        if n == 0 {
            return r;
        }
        self.ir.movcond(Cond::Eq, p, imm(0x8000_0000), imm(0x7fff_ffff), r)
    }

    fn lanes_av(&mut self, lower: Temp, upper: Temp) -> Temp {
        let a0 = self.av_bits(lower);
        let a1 = self.av_bits(upper);
        self.ir.or(a0, a1)
    }

    /// Packed MAC: `MADD(S).H`, `MADDM(S).H`, `MADDR(S).H` and their
    /// MSUB, MADDSU and MSUBAD counterparts.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn mac_h(
        &mut self,
        mode: HalfMode,
        ops: LaneOps,
        c: u8,
        d: u8,
        a: Reg,
        b: Reg,
        pairing: HalfPairing,
        n: u32,
    ) -> Result<(), Fault> {
        match mode {
            HalfMode::Plain | HalfMode::Sat => {
                let (clo, chi) = self.e(c)?;
                let (dlo, dhi) = self.e(d)?;
                let prods = self.half_products(a, b, pairing, n);
                let [lower, upper] = self.mac_lanes([dlo.into(), dhi.into()], prods, ops, false, mode == HalfMode::Sat);
                self.ir.mov(clo, lower);
                self.ir.mov(chi, upper);
            }
            HalfMode::Merge | HalfMode::MergeSat => {
                let (clo, chi) = self.e(c)?;
                let (dlo, dhi) = self.e(d)?;
                let [lower, upper] = self.half_products(a, b, pairing, n);
                let wl = self.ir.widen(lower, true);
                let wu = self.ir.widen(upper, true);
                // the upper lane's direction applies to the merged value,
                // the lower lane enters relative to it
                let sum = if ops.lower_sub == ops.upper_sub {
                    self.ir.add64(wu, wl)
                } else {
                    self.ir.sub64(wu, wl)
                };
                let m = self.ir.shl64(sum, imm64(16));
                let acc = self.ir.concat(dlo, dhi);
                let r = if mode == HalfMode::MergeSat {
                    self.add64_sat(acc, m, ops.upper_sub, None)
                } else {
                    self.add64_flags(acc, m, ops.upper_sub, None)
                };
                self.ir.split(clo, chi, r);
            }
            HalfMode::Round | HalfMode::RoundSat => {
                let acc = self.d(d);
                let lo = self.ir.shl(acc, imm(16));
                let hi = self.ir.and(acc, imm(0xffff_0000));
                let dst = self.d(c);
                self.mac_h_round(mode == HalfMode::RoundSat, ops, dst, [lo.into(), hi.into()], a, b, pairing, n);
            }
        }
        Ok(())
    }

    /// Rounding packed MAC with explicit [lower, upper] accumulators.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn mac_h_round(
        &mut self,
        sat: bool,
        ops: LaneOps,
        dst: Reg,
        acc: [Value; 2],
        a: Reg,
        b: Reg,
        pairing: HalfPairing,
        n: u32,
    ) {
        let prods = self.half_products(a, b, pairing, n);
        let [lower, upper] = self.mac_lanes(acc, prods, ops, true, sat);
        let hi = self.ir.and(upper, imm(0xffff_0000));
        let low = self.ir.shr(lower, imm(16));
        self.ir.set(dst, BinOp::Or, hi, low);
    }

    /// Exact per-lane `acc ± prod` (plus the rounding constant), V if any
    /// lane leaves the signed 32-bit range.
    fn mac_lanes(&mut self, acc: [Value; 2], prods: [Temp; 2], ops: LaneOps, round: bool, sat: bool) -> [Temp; 2] {
        let subs = [ops.lower_sub, ops.upper_sub];
        let (max, min) = (imm64(i32::MAX as u64), imm64(i32::MIN as i64 as u64));
        let mut ovf = imm(0);
        let mut avf = imm(0);
        let mut out = prods;
        for i in 0..2 {
            let wa = self.ir.widen(acc[i], true);
            let wp = self.ir.widen(prods[i], true);
            let mut r = if subs[i] { self.ir.sub64(wa, wp) } else { self.ir.add64(wa, wp) };
            if round {
                r = self.ir.add64(r, imm64(0x8000));
            }
            let over = self.ir.setcond64(Cond::Gt, r, max);
            let under = self.ir.setcond64(Cond::Lt, r, min);
            let o = self.ir.or(over, under);
            ovf = self.ir.or(ovf, o).into();
            let low = self.ir.narrow(r, false);
            let av = self.av_bits(low);
            avf = self.ir.or(avf, av).into();
            out[i] = if sat {
                let c = self.ir.movcond64(Cond::Gt, r, max, max, r);
                let c = self.ir.movcond64(Cond::Lt, c, min, min, c);
                self.ir.narrow(c, false)
            } else {
                low
            };
        }
        self.put_v_bool(ovf);
        self.put_av(avf);
        out
    }

    /// Overflow bits (bit 63) of a 64-bit `acc ± x`.
    fn ovf64(&mut self, r: Temp, acc: Value, x: Value, sub: bool) -> Temp {
        let t1 = self.ir.binary64(BinOp::Xor, r, acc);
        let t2 = self.ir.binary64(BinOp::Xor, acc, x);
        let op = if sub { BinOp::And } else { BinOp::AndC };
        self.ir.binary64(op, t1, t2)
    }

    /// Wrapping 64-bit `acc ± x` with V and AV from the high word.
    /// `flip` inverts V, for a product that wrapped to `i64::MIN`.
    fn add64_flags(&mut self, acc: impl Into<Value>, x: impl Into<Value>, sub: bool, flip: Option<Temp>) -> Temp {
        let (acc, x) = (acc.into(), x.into());
        let r = if sub { self.ir.sub64(acc, x) } else { self.ir.add64(acc, x) };
        let ov = self.ovf64(r, acc, x, sub);
        let mut v = self.ir.narrow(ov, true);
        if let Some(f) = flip {
            let bit = self.ir.shl(f, imm(31));
            v = self.ir.xor(v, bit);
        }
        let hi = self.ir.narrow(r, true);
        let av = self.av_bits(hi);
        self.put_v(v);
        self.put_av(av);
        r
    }

    /// Saturating 64-bit `acc ± x`. `flip` as in [`Self::add64_flags`].
    fn add64_sat(&mut self, acc: impl Into<Value>, x: impl Into<Value>, sub: bool, flip: Option<Temp>) -> Temp {
        let (acc, x) = (acc.into(), x.into());
        let r = if sub { self.ir.sub64(acc, x) } else { self.ir.add64(acc, x) };
        let ov = self.ovf64(r, acc, x, sub);
        let mut ovf = self.ir.setcond64(Cond::Lt, ov, imm64(0));
        let mut x_pos = self.ir.setcond64(Cond::Ge, x, imm64(0));
        if let Some(f) = flip {
            ovf = self.ir.xor(ovf, f);
            x_pos = self.ir.xor(x_pos, f);
        }
        // adding a positive or subtracting a negative saturates upwards
        let up = if sub { self.ir.xor(x_pos, imm(1)) } else { x_pos };
        let up64 = self.ir.widen(up, false);
        let limit = self.ir.movcond64(Cond::Ne, up64, imm64(0), imm64(i64::MAX as u64), imm64(i64::MIN as u64));
        let ovf64 = self.ir.widen(ovf, false);
        let res = self.ir.movcond64(Cond::Ne, ovf64, imm64(0), limit, r);
        let hi = self.ir.narrow(r, true);
        let av = self.av_bits(hi);
        self.put_v_bool(ovf);
        self.put_av(av);
        res
    }

    /// Unsigned 64-bit `acc ± x`: V on carry or borrow, saturating to the
    /// unsigned range when `sat`.
    fn add64_unsigned(&mut self, acc: impl Into<Value>, x: Temp, sub: bool, sat: bool) -> Temp {
        let acc = acc.into();
        let (r, ovf) = if sub {
            let r = self.ir.sub64(acc, x);
            (r, self.ir.setcond64(Cond::Gtu, x, acc))
        } else {
            let r = self.ir.add64(acc, x);
            (r, self.ir.setcond64(Cond::Ltu, r, x))
        };
        let hi = self.ir.narrow(r, true);
        let av = self.av_bits(hi);
        self.put_v_bool(ovf);
        self.put_av(av);
        if !sat {
            return r;
        }
        let limit = if sub { imm64(0) } else { imm64(u64::MAX) };
        let ovf64 = self.ir.widen(ovf, false);
        self.ir.movcond64(Cond::Ne, ovf64, imm64(0), limit, r)
    }

    /// MUL, MULS(.U), MADD(S)(.U), MSUB(S)(.U) with a 32-bit result:
    /// `dst = acc ± a * b`.
    pub(super) fn mac_word32(&mut self, dst: Reg, acc: Value, a: Value, b: Value, signed: bool, mac: Mac) {
        let wa = self.ir.widen(a, signed);
        let wb = self.ir.widen(b, signed);
        let p = self.ir.mul64(wa, wb);
        let r = if acc == imm(0) && !mac.sub {
            p
        } else {
            let wacc = self.ir.widen(acc, signed);
            if mac.sub {
                self.ir.sub64(wacc, p)
            } else {
                self.ir.add64(wacc, p)
            }
        };
        let res = if mac.sat {
            let range = match (signed, mac.sub) {
                (true, _) => Sat::Signed,
                (false, false) => Sat::UnsignedWide,
                (false, true) => Sat::Unsigned,
            };
            self.sat32(r, range)
        } else {
            let (max, min) = if signed {
                (i32::MAX as u64, i32::MIN as i64 as u64)
            } else {
                (u32::MAX as u64, 0)
            };
            let over = self.ir.setcond64(if signed { Cond::Gt } else { Cond::Gtu }, r, imm64(max));
            let under: Value = if signed || mac.sub {
                self.ir.setcond64(Cond::Lt, r, imm64(min)).into()
            } else {
                imm(0)
            };
            let ovf = self.ir.or(over, under);
            let low = self.ir.narrow(r, false);
            self.put_v_bool(ovf);
            self.put_av_of(low);
            low
        };
        self.ir.mov(dst, res);
    }

    /// The 64-bit forms: `E[c] = acc ± a * b`; `acc` is `None` for MUL.
    pub(super) fn mac_word64(&mut self, c: u8, acc: Option<u8>, a: Value, b: Value, signed: bool, mac: Mac) -> Result<(), Fault> {
        let (lo, hi) = self.e(c)?;
        let acc: Value = match acc {
            Some(d) => {
                let (alo, ahi) = self.e(d)?;
                self.ir.concat(alo, ahi).into()
            }
            None => imm64(0),
        };
        let wa = self.ir.widen(a, signed);
        let wb = self.ir.widen(b, signed);
        let p = self.ir.mul64(wa, wb);
        let r = match (signed, mac.sat) {
            (true, false) => self.add64_flags(acc, p, mac.sub, None),
            (true, true) => self.add64_sat(acc, p, mac.sub, None),
            (false, sat) => self.add64_unsigned(acc, p, mac.sub, sat),
        };
        self.ir.split(lo, hi, r);
        Ok(())
    }

    /// Signed Q operands: `a` whole or halved, `b` whole or halved.
    fn q_operands(&mut self, a: Reg, b: Reg, form: QForm) -> (Value, Value) {
        match form {
            QForm::Word => (a.into(), b.into()),
            QForm::L => (a.into(), self.half(b, false).into()),
            QForm::U => (a.into(), self.half(b, true).into()),
            QForm::LL => (self.half(a, false).into(), self.half(b, false).into()),
            QForm::UU => (self.half(a, true).into(), self.half(b, true).into()),
        }
    }

    /// `MUL.Q`: the 32-bit forms keep the Q31 part of the shifted product,
    /// the 64-bit forms all of it.
    pub(super) fn mul_q(&mut self, c: u8, a: Reg, b: Reg, form: QForm, wide: bool, n: u32) -> Result<(), Fault> {
        let (x, y) = self.q_operands(a, b, form);
        if form.is_half() {
            let dst = self.d(c);
            let r = self.frac16(x, y, n);
            self.clear_v();
            self.put_av_of(r);
            self.ir.mov(dst, r);
            return Ok(());
        }
        let wx = self.ir.widen(x, true);
        let wy = self.ir.widen(y, true);
        let mut p = self.ir.mul64(wx, wy);
        if n != 0 {
            p = self.ir.shl64(p, imm64(n as u64));
        }
        let res = if wide {
            let (lo, hi) = self.e(c)?;
            self.ir.split(lo, hi, p);
            hi
        } else {
            let dst = self.d(c);
            let s = self.ir.sar64(p, imm64(form.scale() as u64));
            let r = self.ir.narrow(s, false);
            self.ir.mov(dst, r);
            dst
        };
        if n == 1 {
            let v = self.ir.setcond(Cond::Eq, res, imm(0x8000_0000));
            self.put_v_bool(v);
        } else {
            self.clear_v();
        }
        self.put_av_of(res);
        Ok(())
    }

    /// `MULR.Q`: rounded 16x16 product into the upper half of `D[c]`.
    pub(super) fn mulr_q(&mut self, c: u8, a: Reg, b: Reg, form: QForm, n: u32) {
        let dst = self.d(c);
        let upper = form == QForm::UU;
        let x = self.half(a, upper);
        let y = self.half(b, upper);
        let r = self.round16(x, y, n);
        self.clear_v();
        self.put_av_of(r);
        self.ir.set(dst, BinOp::And, r, imm(0xffff_0000));
    }

    /// `MADD(S).Q` / `MSUB(S).Q` into `D[c]` or `E[c]`.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn mac_q(&mut self, c: u8, d: u8, a: Reg, b: Reg, form: QForm, wide: bool, mac: Mac, n: u32) -> Result<(), Fault> {
        let (x, y) = self.q_operands(a, b, form);
        if form.is_half() {
            let t = self.frac16(x, y, n);
            if !wide {
                let dst = self.d(c);
                let acc = self.d(d);
                match (mac.sat, mac.sub) {
                    (false, false) => self.add_d(dst, acc, t),
                    (false, true) => self.sub_d(dst, acc, t),
                    (true, sub) => self.add_sat(dst, acc, t, true, sub),
                }
                return Ok(());
            }
            let (clo, chi) = self.e(c)?;
            let (dlo, dhi) = self.e(d)?;
            let wt = self.ir.widen(t, true);
            let m = self.ir.shl64(wt, imm64(16));
            let acc = self.ir.concat(dlo, dhi);
            let r = if mac.sat {
                self.add64_sat(acc, m, mac.sub, None)
            } else {
                self.add64_flags(acc, m, mac.sub, None)
            };
            self.ir.split(clo, chi, r);
            return Ok(());
        }

        let wx = self.ir.widen(x, true);
        let wy = self.ir.widen(y, true);
        let p = self.ir.mul64(wx, wy);
        if !wide {
            let dst = self.d(c);
            let q = self.ir.sar64(p, imm64((form.scale() - n) as u64));
            let acc = self.d(d);
            let wacc = self.ir.widen(acc, true);
            let r = if mac.sub { self.ir.sub64(wacc, q) } else { self.ir.add64(wacc, q) };
            let res = if mac.sat {
                self.sat32(r, Sat::Signed)
            } else {
                let max = imm64(i32::MAX as u64);
                let min = imm64(i32::MIN as i64 as u64);
                let over = self.ir.setcond64(Cond::Gt, r, max);
                let under = self.ir.setcond64(Cond::Lt, r, min);
                let ovf = self.ir.or(over, under);
                let low = self.ir.narrow(r, false);
                self.put_v_bool(ovf);
                self.put_av_of(low);
                low
            };
            self.ir.mov(dst, res);
            return Ok(());
        }

        let (clo, chi) = self.e(c)?;
        let (dlo, dhi) = self.e(d)?;
        let acc = self.ir.concat(dlo, dhi);
        let m = if n != 0 { self.ir.shl64(p, imm64(n as u64)) } else { p };
        // 0x80000000 * 0x80000000 << 1 wraps to i64::MIN
        let flip = if form == QForm::Word && n == 1 {
            let ea = self.ir.setcond(Cond::Eq, x, imm(0x8000_0000));
            let eb = self.ir.setcond(Cond::Eq, y, imm(0x8000_0000));
            Some(self.ir.and(ea, eb))
        } else {
            None
        };
        let r = if mac.sat {
            self.add64_sat(acc, m, mac.sub, flip)
        } else {
            self.add64_flags(acc, m, mac.sub, flip)
        };
        self.ir.split(clo, chi, r);
        Ok(())
    }

    /// `MADDR(S).Q` / `MSUBR(S).Q`: 16x16 product rounded into the upper
    /// half of `D[c]`.
    pub(super) fn mac_q_round(&mut self, c: u8, d: u8, a: Reg, b: Reg, form: QForm, mac: Mac, n: u32) {
        let dst = self.d(c);
        let upper = form == QForm::UU;
        let x = self.half(a, upper);
        let y = self.half(b, upper);
        let p = self.frac16(x, y, n);
        let acc = self.d(d);
        let wacc = self.ir.widen(acc, true);
        let wp = self.ir.widen(p, true);
        let r = if mac.sub { self.ir.sub64(wacc, wp) } else { self.ir.add64(wacc, wp) };
        let r = self.ir.add64(r, imm64(0x8000));
        let res = if mac.sat {
            self.sat32(r, Sat::Signed)
        } else {
            let max = imm64(i32::MAX as u64);
            let min = imm64(i32::MIN as i64 as u64);
            let over = self.ir.setcond64(Cond::Gt, r, max);
            let under = self.ir.setcond64(Cond::Lt, r, min);
            let ovf = self.ir.or(over, under);
            let low = self.ir.narrow(r, false);
            self.put_v_bool(ovf);
            self.put_av_of(low);
            low
        };
        self.ir.set(dst, BinOp::And, res, imm(0xffff_0000));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Inst};
    use crate::regfile::RegisterFile;

    #[test]
    fn pairing_follows_low_op2_bits() {
        assert_eq!(HalfPairing::from_op2(0x18), HalfPairing::UL);
        assert_eq!(HalfPairing::from_op2(0x19), HalfPairing::LU);
        assert_eq!(HalfPairing::from_op2(0x1a), HalfPairing::LL);
        assert_eq!(HalfPairing::from_op2(0x1f), HalfPairing::UU);
    }

    #[test]
    fn odd_pair_faults_before_emitting() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 0x0000_0073);
        let r = t.mac_word64(3, None, Reg::D(1).into(), Reg::D(2).into(), true, Mac { sub: false, sat: false });
        assert!(r.is_err());
        assert!(b.insts().is_empty());
    }

    #[test]
    fn word_mul_writes_both_halves() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 0x0000_0073);
        t.mac_word64(2, None, Reg::D(1).into(), Reg::D(4).into(), false, Mac { sub: false, sat: false })
            .unwrap();
        let split = b.insts().iter().find_map(|i| match i {
            Inst::Split { lo, hi, .. } => Some((*lo, *hi)),
            _ => None,
        });
        assert_eq!(split, Some((Reg::D(2).into(), Reg::D(3).into())));
    }
}
