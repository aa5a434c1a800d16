//! Division setup and steps, one-shot DIV, index min/max search and the
//! float pack/unpack pair.

use super::Translator;
use crate::config::IsaVersion;
use crate::fault::Fault;
use crate::helper::DivideStepHelper;
use crate::ir::{imm, BinOp, Cond, Reg, Temp, Value};

/// Dividend width of a DVINIT form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DvWidth {
    Byte,
    Half,
    Word,
}

impl Translator<'_> {
    fn abs32(&mut self, x: impl Into<Value>) -> Temp {
        let x = x.into();
        let n = self.ir.neg(x);
        self.ir.movcond(Cond::Lt, x, imm(0), n, x)
    }

    fn put_div_flags(&mut self, v: impl Into<Value>) {
        self.put_v_bool(v);
        self.put_av(imm(0));
    }

    /// DVINIT, DVINIT.U, DVINIT.B(U), DVINIT.H(U): `E[c]` from `D[a]`, V
    /// when the quotient cannot fit.
    pub(super) fn dvinit(&mut self, c: u8, a: Reg, b: Reg, width: DvWidth, signed: bool) -> Result<(), Fault> {
        let (lo, hi) = self.e(c)?;
        let v131 = self.cfg.has(IsaVersion::V1_3_1);
        match (width, signed) {
            (DvWidth::Word, true) => {
                let m1 = self.ir.setcond(Cond::Eq, b, imm(0xffff_ffff));
                let mn = self.ir.setcond(Cond::Eq, a, imm(0x8000_0000));
                let both = self.ir.and(m1, mn);
                let zero = self.ir.setcond(Cond::Eq, b, imm(0));
                let v = self.ir.or(both, zero);
                self.put_div_flags(v);
                let sign = self.ir.sar(a, imm(31));
                self.ir.mov(lo, a);
                self.ir.mov(hi, sign);
            }
            (DvWidth::Word, false) => {
                let v = self.ir.setcond(Cond::Eq, b, imm(0));
                self.put_div_flags(v);
                self.ir.mov(lo, a);
                self.ir.mov(hi, imm(0));
            }
            (w, true) => {
                let bits = if w == DvWidth::Byte { 8 } else { 16 };
                let v = if v131 {
                    let zero = self.ir.setcond(Cond::Eq, b, imm(0));
                    let m1 = self.ir.setcond(Cond::Eq, b, imm(0xffff_ffff));
                    let min = (-(1i32 << (bits - 1))) as u32;
                    let mn = self.ir.setcond(Cond::Eq, a, imm(min));
                    let both = self.ir.and(m1, mn);
                    self.ir.or(zero, both)
                } else {
                    let x = self.abs32(a);
                    let x = self.ir.sar(x, imm(bits));
                    let y = self.abs32(b);
                    self.ir.setcond(Cond::Ge, x, y)
                };
                // the flags must see the sources before the pair is written
                self.put_div_flags(v);
                let pair = if w == DvWidth::Byte {
                    self.divider().dvinit_b(a.into(), b.into())
                } else {
                    self.divider().dvinit_h(a.into(), b.into())
                };
                self.ir.split(lo, hi, pair);
            }
            (w, false) => {
                let bits = if w == DvWidth::Byte { 8 } else { 16 };
                let rem = self.ir.shr(a, imm(bits));
                let v = if v131 {
                    self.ir.setcond(Cond::Eq, b, imm(0))
                } else {
                    let x = self.abs32(rem);
                    let y = self.abs32(b);
                    self.ir.setcond(Cond::Ge, x, y)
                };
                self.put_div_flags(v);
                let q = self.ir.shl(a, imm(32 - bits));
                self.ir.mov(lo, q);
                self.ir.mov(hi, rem);
            }
        }
        Ok(())
    }

    /// DVSTEP(.U): eight quotient bits per step.
    pub(super) fn dvstep(&mut self, c: u8, d: u8, b: Reg, signed: bool) -> Result<(), Fault> {
        let (clo, chi) = self.e(c)?;
        let (dlo, dhi) = self.e(d)?;
        let pair = self.ir.concat(dlo, dhi);
        let r = self.divider().dvstep(signed, pair.into(), b.into());
        self.ir.split(clo, chi, r);
        Ok(())
    }

    pub(super) fn dvadj(&mut self, c: u8, d: u8, b: Reg) -> Result<(), Fault> {
        let (clo, chi) = self.e(c)?;
        let (dlo, dhi) = self.e(d)?;
        let pair = self.ir.concat(dlo, dhi);
        let r = self.divider().dvadj(pair.into(), b.into());
        self.ir.split(clo, chi, r);
        Ok(())
    }

    /// DIV / DIV.U: quotient to `E[c].lo`, remainder to `E[c].hi`.
    pub(super) fn div(&mut self, c: u8, a: Reg, b: Reg, signed: bool) -> Result<(), Fault> {
        let (lo, hi) = self.e(c)?;
        let zero = self.ir.setcond(Cond::Eq, b, imm(0));
        let v = if signed {
            let m1 = self.ir.setcond(Cond::Eq, b, imm(0xffff_ffff));
            let mn = self.ir.setcond(Cond::Eq, a, imm(0x8000_0000));
            let both = self.ir.and(m1, mn);
            self.ir.or(zero, both)
        } else {
            zero
        };
        let r = self.divider().divide(signed, a.into(), b.into());
        self.put_div_flags(v);
        self.ir.split(lo, hi, r);
        Ok(())
    }

    /// IXMAX(.U) / IXMIN(.U): one step of a packed half-word search.
    /// `E[d]` holds the running index (bits 0..16), the index of the best
    /// value so far (16..32) and the best value (32..48); `D[b]` supplies two
    /// new candidates.
    pub(super) fn index_extreme(&mut self, c: u8, d: u8, b: Reg, max: bool, signed: bool) -> Result<(), Fault> {
        let (clo, chi) = self.e(c)?;
        let (dlo, dhi) = self.e(d)?;
        let idx = self.ir.extract(dlo, 0, 16, false);
        let best_idx = self.ir.extract(dlo, 16, 16, false);
        let best = self.ir.extract(dhi, 0, 16, signed);
        let x0 = self.ir.extract(b, 0, 16, signed);
        let x1 = self.ir.extract(b, 16, 16, signed);
        let (beat, beat_eq) = match (max, signed) {
            (true, true) => (Cond::Gt, Cond::Ge),
            (true, false) => (Cond::Gtu, Cond::Geu),
            (false, true) => (Cond::Lt, Cond::Le),
            (false, false) => (Cond::Ltu, Cond::Leu),
        };
        let c0a = self.ir.setcond(beat_eq, x0, best);
        let c0b = self.ir.setcond(beat, x0, x1);
        let take0 = self.ir.and(c0a, c0b);
        let c1a = self.ir.setcond(beat_eq, x1, best);
        let c1b = self.ir.setcond(beat_eq, x1, x0);
        let take1 = self.ir.and(c1a, c1b);

        let idx1 = self.ir.add(idx, imm(1));
        let v = self.ir.movcond(Cond::Ne, take1, imm(0), x1, best);
        let v = self.ir.movcond(Cond::Ne, take0, imm(0), x0, v);
        let i = self.ir.movcond(Cond::Ne, take1, imm(0), idx1, best_idx);
        let i = self.ir.movcond(Cond::Ne, take0, imm(0), idx, i);

        let next = self.ir.add(idx, imm(2));
        let next = self.ir.and(next, imm(0xffff));
        let lo = self.ir.deposit(next, i, 16, 16);
        let hi = self.ir.and(v, imm(0xffff));
        self.ir.mov(clo, lo);
        self.ir.mov(chi, hi);
        Ok(())
    }

    /// PACK: rounds the mantissa in `E[d].lo` with exponent `E[d].hi` to a
    /// single-precision value carrying the sign of `D[a]`. C is the sticky
    /// rounding bit.
    pub(super) fn pack(&mut self, c: u8, d: u8, a: Reg) -> Result<(), Fault> {
        let dst = self.d(c);
        let (mant, exp) = self.e(d)?;
        let carry = self.regs.flags.c;

        let top = self.ir.shr(mant, imm(31));
        let r7 = self.ir.extract(mant, 7, 1, false);
        let r8 = self.ir.extract(mant, 8, 1, false);
        let low7 = self.ir.and(mant, imm(0x7f));
        let low7 = self.ir.setcond(Cond::Ne, low7, imm(0));
        let cin = self.ir.setcond(Cond::Ne, carry, imm(0));
        let sticky = self.ir.or(r8, low7);
        let sticky = self.ir.or(sticky, cin);
        let round = self.ir.and(r7, sticky);

        let frac_raw = self.ir.extract(mant, 8, 23, false);
        let biased = self.ir.add(exp, imm(128));
        let biased = self.ir.movcond(Cond::Eq, top, imm(0), imm(0), biased);
        let biased = self.ir.and(biased, imm(0xff));
        let biased = self.ir.shl(biased, imm(23));
        let ef = self.ir.or(biased, frac_raw);
        let ef = self.ir.add(ef, round);
        let mut e = self.ir.extract(ef, 23, 8, false);
        let mut f = self.ir.extract(ef, 0, 23, false);

        // special cases, lowest priority first
        let zero = self.ir.setcond(Cond::Eq, mant, imm(0));
        e = self.ir.movcond(Cond::Ne, zero, imm(0), imm(0), e);
        f = self.ir.movcond(Cond::Ne, zero, imm(0), imm(0), f);
        let tiny = self.ir.setcond(Cond::Le, exp, imm(-128i32 as u32));
        let tiny = self.ir.and(tiny, top);
        e = self.ir.movcond(Cond::Ne, tiny, imm(0), imm(0), e);
        f = self.ir.movcond(Cond::Ne, tiny, imm(0), imm(0), f);
        let huge = self.ir.setcond(Cond::Ge, exp, imm(127));
        let huge = self.ir.and(huge, top);
        e = self.ir.movcond(Cond::Ne, huge, imm(0), imm(255), e);
        f = self.ir.movcond(Cond::Ne, huge, imm(0), imm(0), f);
        let is_inf = self.ir.setcond(Cond::Eq, exp, imm(255));
        let pos = self.ir.xor(top, imm(1));
        let special = self.ir.and(is_inf, pos);
        e = self.ir.movcond(Cond::Ne, special, imm(0), imm(255), e);
        f = self.ir.movcond(Cond::Ne, special, imm(0), frac_raw, f);

        let sign = self.ir.and(a, imm(0x8000_0000));
        let e = self.ir.shl(e, imm(23));
        let res = self.ir.add(sign, e);
        self.ir.set(dst, BinOp::Add, res, f);
        Ok(())
    }

    /// UNPACK: single-precision `D[a]` to mantissa `E[c].lo` and unbiased
    /// exponent `E[c].hi`.
    pub(super) fn unpack(&mut self, c: u8, a: Reg) -> Result<(), Fault> {
        let (lo, hi) = self.e(c)?;
        let fe = self.ir.extract(a, 23, 8, false);
        let ff = self.ir.extract(a, 0, 23, false);
        let mant = self.ir.shl(ff, imm(7));
        let normal = self.ir.or(mant, imm(1 << 30));
        let m = self.ir.movcond(Cond::Eq, fe, imm(0), mant, normal);
        let m = self.ir.movcond(Cond::Eq, fe, imm(255), mant, m);
        let sub = self.ir.movcond(Cond::Eq, ff, imm(0), imm(-127i32 as u32), imm(-126i32 as u32));
        let unbiased = self.ir.sub(fe, imm(127));
        let e = self.ir.movcond(Cond::Eq, fe, imm(0), sub, unbiased);
        let e = self.ir.movcond(Cond::Eq, fe, imm(255), imm(255), e);
        self.ir.mov(lo, m);
        self.ir.mov(hi, e);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Helper, Inst};
    use crate::regfile::RegisterFile;

    #[test]
    fn dvinit_u_needs_no_helper() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        t.dvinit(4, Reg::D(1), Reg::D(2), DvWidth::Word, false).unwrap();
        assert!(!b.insts().iter().any(|i| matches!(i, Inst::Call { .. })));
    }

    #[test]
    fn div_calls_signed_helper() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        t.div(0, Reg::D(1), Reg::D(2), true).unwrap();
        let helpers: Vec<Helper> = b
            .insts()
            .iter()
            .filter_map(|i| match i {
                Inst::Call { helper, .. } => Some(*helper),
                _ => None,
            })
            .collect();
        assert_eq!(helpers, vec![Helper::Divide]);
    }
}
