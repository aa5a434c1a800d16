//! Capability traits through which emitters reach out-of-line helpers.
//!
//! Each trait covers one family of [`Helper`]s. Emitters name only the
//! capabilities they use, so a back end that lacks, say, the context-switch
//! helpers can see at a glance which instructions depend on them.

use crate::ir::{imm, BlockBuilder, CacheOp, Cond, FloatOp, Helper, Reg, Temp, Terminator, TrapClass, TrapInfo, Value};

pub trait PswHelper {
    /// Packed PSW.
    fn psw_read(&mut self) -> Temp;
    fn psw_write(&mut self, value: Value);
}

/// Step-wise and one-shot division. All results are 64-bit
/// `remainder << 32 | quotient` pairs; the flag updates stay inline.
pub trait DivideStepHelper {
    fn dvinit_b(&mut self, dividend: Value, divisor: Value) -> Temp;
    fn dvinit_h(&mut self, dividend: Value, divisor: Value) -> Temp;
    fn dvstep(&mut self, signed: bool, pair: Value, divisor: Value) -> Temp;
    fn dvadj(&mut self, pair: Value, divisor: Value) -> Temp;
    fn divide(&mut self, signed: bool, dividend: Value, divisor: Value) -> Temp;
}

/// Index updates of the bit-reverse and circular addressing modes. Both take
/// and return the whole index register (index in bits 0..16).
pub trait AddressHelper {
    fn br_update(&mut self, index_reg: Value) -> Temp;
    fn circ_update(&mut self, index_reg: Value, disp: Value) -> Temp;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextIo {
    LoadLower,
    LoadUpper,
    StoreLower,
    StoreUpper,
}

/// Context save area operations and the calls/returns built on them.
pub trait ContextHelper {
    fn call_save(&mut self, return_addr: u32);
    fn ret(&mut self);
    fn rfe(&mut self);
    fn rfm(&mut self);
    fn bisr(&mut self, level: u32);
    fn svlcx(&mut self);
    fn rslcx(&mut self);
    fn context_io(&mut self, kind: ContextIo, ea: Value);
}

pub trait CacheHelper {
    fn cache(&mut self, op: CacheOp, ea: Value);
}

/// Single-precision operations, all owned by the back end.
pub trait FloatHelper {
    /// `args` follow [`FloatOp::arity`].
    fn float(&mut self, op: FloatOp, args: Vec<Value>) -> Temp;
    /// UPDFL
    fn update_fpu_flags(&mut self, value: Value);
}

pub trait ChecksumHelper {
    fn crc32(&mut self, data: Value, crc: Value) -> Temp;
}

pub trait TrapHelper {
    fn trap(&self, class: TrapClass, tin: u32, pc: u32) -> Terminator;
    /// Traps when `flag` (bit 31 convention) is set, else continues at `next`.
    fn trap_on_flag(&mut self, flag: Reg, class: TrapClass, tin: u32, pc: u32, next: u32) -> Terminator;
}

impl PswHelper for BlockBuilder {
    fn psw_read(&mut self) -> Temp {
        self.call(Helper::PswRead, Vec::new())
    }

    fn psw_write(&mut self, value: Value) {
        self.call_void(Helper::PswWrite, vec![value]);
    }
}

impl DivideStepHelper for BlockBuilder {
    fn dvinit_b(&mut self, dividend: Value, divisor: Value) -> Temp {
        self.call(Helper::DvInitB, vec![dividend, divisor])
    }

    fn dvinit_h(&mut self, dividend: Value, divisor: Value) -> Temp {
        self.call(Helper::DvInitH, vec![dividend, divisor])
    }

    fn dvstep(&mut self, signed: bool, pair: Value, divisor: Value) -> Temp {
        let h = if signed { Helper::DvStep } else { Helper::DvStepU };
        self.call(h, vec![pair, divisor])
    }

    fn dvadj(&mut self, pair: Value, divisor: Value) -> Temp {
        self.call(Helper::DvAdj, vec![pair, divisor])
    }

    fn divide(&mut self, signed: bool, dividend: Value, divisor: Value) -> Temp {
        let h = if signed { Helper::Divide } else { Helper::DivideU };
        self.call(h, vec![dividend, divisor])
    }
}

impl AddressHelper for BlockBuilder {
    fn br_update(&mut self, index_reg: Value) -> Temp {
        self.call(Helper::BrUpdate, vec![index_reg])
    }

    fn circ_update(&mut self, index_reg: Value, disp: Value) -> Temp {
        self.call(Helper::CircUpdate, vec![index_reg, disp])
    }
}

impl ContextHelper for BlockBuilder {
    fn call_save(&mut self, return_addr: u32) {
        self.call_void(Helper::Call, vec![imm(return_addr)]);
    }

    fn ret(&mut self) {
        self.call_void(Helper::Ret, Vec::new());
    }

    fn rfe(&mut self) {
        self.call_void(Helper::Rfe, Vec::new());
    }

    fn rfm(&mut self) {
        self.call_void(Helper::Rfm, Vec::new());
    }

    fn bisr(&mut self, level: u32) {
        self.call_void(Helper::Bisr, vec![imm(level)]);
    }

    fn svlcx(&mut self) {
        self.call_void(Helper::Svlcx, Vec::new());
    }

    fn rslcx(&mut self) {
        self.call_void(Helper::Rslcx, Vec::new());
    }

    fn context_io(&mut self, kind: ContextIo, ea: Value) {
        let h = match kind {
            ContextIo::LoadLower => Helper::Ldlcx,
            ContextIo::LoadUpper => Helper::Lducx,
            ContextIo::StoreLower => Helper::Stlcx,
            ContextIo::StoreUpper => Helper::Stucx,
        };
        self.call_void(h, vec![ea]);
    }
}

impl CacheHelper for BlockBuilder {
    fn cache(&mut self, op: CacheOp, ea: Value) {
        self.call_void(Helper::Cache(op), vec![ea]);
    }
}

impl FloatHelper for BlockBuilder {
    fn float(&mut self, op: FloatOp, args: Vec<Value>) -> Temp {
        self.call(Helper::Float(op), args)
    }

    fn update_fpu_flags(&mut self, value: Value) {
        self.call_void(Helper::Float(FloatOp::Updfl), vec![value]);
    }
}

impl ChecksumHelper for BlockBuilder {
    fn crc32(&mut self, data: Value, crc: Value) -> Temp {
        self.call(Helper::Crc32, vec![data, crc])
    }
}

impl TrapHelper for BlockBuilder {
    fn trap(&self, class: TrapClass, tin: u32, pc: u32) -> Terminator {
        Terminator::Trap(TrapInfo { class, tin, pc })
    }

    fn trap_on_flag(&mut self, flag: Reg, class: TrapClass, tin: u32, pc: u32, next: u32) -> Terminator {
        Terminator::If {
            cond: Cond::Lt,
            lhs: flag.into(),
            rhs: imm(0),
            then_: Box::new(self.trap(class, tin, pc)),
            else_: Box::new(Terminator::Goto(next)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Flag, Inst, Ty};

    #[test]
    fn divide_goes_through_named_helper() {
        let mut b = BlockBuilder::new(0);
        let t = b.divide(false, Reg::D(1).into(), Reg::D(2).into());
        assert_eq!(t.ty, Ty::I64);
        match &b.insts()[0] {
            Inst::Call { helper, args, .. } => {
                assert_eq!(*helper, Helper::DivideU);
                assert_eq!(args.len(), helper.arity());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn trap_on_flag_is_two_way() {
        let mut b = BlockBuilder::new(0);
        let t = b.trap_on_flag(Reg::Psw(Flag::V), TrapClass::Assert, 1, 0x10, 0x14);
        assert_eq!(t.successors(), vec![0x14]);
    }
}
