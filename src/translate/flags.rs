//! PSW overflow-flag updates shared by the arithmetic emitters.
//!
//! V, SV, AV and SAV live in bit 31 of their pseudo-registers; the sticky
//! flags are only ever or-ed into.

use super::Translator;
use crate::ir::{imm, BinOp, Temp, Value};

impl Translator<'_> {
    /// `res ^ (res << 1)`; bit 31 is the advanced-overflow bit of `res`.
    pub(super) fn av_bits(&mut self, res: impl Into<Value>) -> Temp {
        let res = res.into();
        let twice = self.ir.add(res, res);
        self.ir.xor(res, twice)
    }

    /// Writes V and folds it into SV.
    pub(super) fn put_v(&mut self, v: impl Into<Value>) {
        let f = self.regs.flags;
        self.ir.mov(f.v, v);
        self.ir.set(f.sv, BinOp::Or, f.sv, f.v);
    }

    /// V from a 0/1 condition.
    pub(super) fn put_v_bool(&mut self, cond: impl Into<Value>) {
        let v = self.ir.shl(cond, imm(31));
        self.put_v(v);
    }

    pub(super) fn clear_v(&mut self) {
        let v = self.regs.flags.v;
        self.ir.mov(v, imm(0));
    }

    /// Writes AV and folds it into SAV.
    pub(super) fn put_av(&mut self, av: impl Into<Value>) {
        let f = self.regs.flags;
        self.ir.mov(f.av, av);
        self.ir.set(f.sav, BinOp::Or, f.sav, f.av);
    }

    /// AV from a 32-bit result.
    pub(super) fn put_av_of(&mut self, res: impl Into<Value>) {
        let av = self.av_bits(res);
        self.put_av(av);
    }

    /// The full V/SV/AV/SAV update for a 32-bit result.
    pub(super) fn put_flags(&mut self, v: impl Into<Value>, res: impl Into<Value>) {
        let av = self.av_bits(res);
        self.put_v(v);
        self.put_av(av);
    }

    pub(super) fn put_carry(&mut self, c: impl Into<Value>) {
        let c_reg = self.regs.flags.c;
        self.ir.mov(c_reg, c);
    }
}
