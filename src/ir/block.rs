use serde::{Deserialize, Serialize};

use super::inst::{BinOp, Cond, Helper, Inst, MemSize, UnOp};
use super::value::{Dest, Temp, Ty, Value};

/// Architectural trap classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TrapClass {
    Mmu = 0,
    Prot = 1,
    Insn = 2,
    Context = 3,
    Bus = 4,
    Assert = 5,
    Syscall = 6,
    Nmi = 7,
}

/// Trap identification numbers used by the front end.
pub mod tin {
    /// Class 1: privileged instruction.
    pub const PRIV: u32 = 1;
    /// Class 2: illegal opcode.
    pub const IOPC: u32 = 1;
    /// Class 2: invalid operand.
    pub const OPD: u32 = 3;
    /// Class 5: arithmetic overflow.
    pub const OVF: u32 = 1;
    /// Class 5: sticky arithmetic overflow.
    pub const SOVF: u32 = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapInfo {
    pub class: TrapClass,
    pub tin: u32,
    /// Address of the trapping instruction.
    pub pc: u32,
}

/// How control leaves a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminator {
    /// Continue at a known guest address.
    Goto(u32),
    /// Continue at the address already written to PC.
    Dispatch,
    Trap(TrapInfo),
    /// Two-way split on a 32-bit comparison.
    If {
        cond: Cond,
        lhs: Value,
        rhs: Value,
        then_: Box<Terminator>,
        else_: Box<Terminator>,
    },
}

impl Terminator {
    pub fn branch(cond: Cond, lhs: Value, rhs: Value, taken: u32, not_taken: u32) -> Self {
        Terminator::If {
            cond,
            lhs,
            rhs,
            then_: Box::new(Terminator::Goto(taken)),
            else_: Box::new(Terminator::Goto(not_taken)),
        }
    }

    /// Statically known successor addresses.
    pub fn successors(&self) -> Vec<u32> {
        match self {
            Terminator::Goto(pc) => vec![*pc],
            Terminator::Dispatch | Terminator::Trap(_) => Vec::new(),
            Terminator::If { then_, else_, .. } => {
                let mut v = then_.successors();
                v.extend(else_.successors());
                v
            }
        }
    }
}

/// A closed basic block. Only [`BlockBuilder::finish`] creates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub start: u32,
    /// Address after the last translated instruction.
    pub end: u32,
    pub guest_insns: u32,
    pub temps: u32,
    pub insts: Vec<Inst>,
    pub terminator: Terminator,
}

/// Position inside an open block, see [`BlockBuilder::rollback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    insts: usize,
}

/// An open, append-only block.
#[derive(Debug)]
pub struct BlockBuilder {
    start: u32,
    insts: Vec<Inst>,
    temps: u32,
    guest_insns: u32,
}

impl BlockBuilder {
    pub fn new(start: u32) -> Self {
        Self {
            start,
            insts: Vec::new(),
            temps: 0,
            guest_insns: 0,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn guest_insns(&self) -> u32 {
        self.guest_insns
    }

    pub fn count_guest_insn(&mut self) {
        self.guest_insns += 1;
    }

    pub fn mark(&self) -> Mark {
        Mark { insts: self.insts.len() }
    }

    /// Drops everything appended since `mark`.
    pub fn rollback(&mut self, mark: Mark) {
        self.insts.truncate(mark.insts);
    }

    pub fn finish(self, end: u32, terminator: Terminator) -> Block {
        Block {
            start: self.start,
            end,
            guest_insns: self.guest_insns,
            temps: self.temps,
            insts: self.insts,
            terminator,
        }
    }

    pub fn push(&mut self, inst: Inst) {
        self.insts.push(inst);
    }

    pub fn temp(&mut self, ty: Ty) -> Temp {
        let t = Temp { index: self.temps, ty };
        self.temps += 1;
        t
    }

    // ---- plain emission into an explicit destination ----

    pub fn emit_unary(&mut self, op: UnOp, ty: Ty, dst: impl Into<Dest>, src: impl Into<Value>) {
        self.push(Inst::Unary { op, ty, dst: dst.into(), src: src.into() });
    }

    pub fn emit_binary(
        &mut self,
        op: BinOp,
        ty: Ty,
        dst: impl Into<Dest>,
        lhs: impl Into<Value>,
        rhs: impl Into<Value>,
    ) {
        self.push(Inst::Binary { op, ty, dst: dst.into(), lhs: lhs.into(), rhs: rhs.into() });
    }

    pub fn mov(&mut self, dst: impl Into<Dest>, src: impl Into<Value>) {
        self.emit_unary(UnOp::Mov, Ty::I32, dst, src);
    }

    pub fn mov64(&mut self, dst: impl Into<Dest>, src: impl Into<Value>) {
        self.emit_unary(UnOp::Mov, Ty::I64, dst, src);
    }

    pub fn set(&mut self, dst: impl Into<Dest>, op: BinOp, lhs: impl Into<Value>, rhs: impl Into<Value>) {
        self.emit_binary(op, Ty::I32, dst, lhs, rhs);
    }

    pub fn split(&mut self, lo: impl Into<Dest>, hi: impl Into<Dest>, src: impl Into<Value>) {
        self.push(Inst::Split { lo: lo.into(), hi: hi.into(), src: src.into() });
    }

    pub fn store(&mut self, addr: impl Into<Value>, src: impl Into<Value>, size: MemSize) {
        self.push(Inst::Store { addr: addr.into(), src: src.into(), size });
    }

    pub fn load_into(&mut self, dst: impl Into<Dest>, addr: impl Into<Value>, size: MemSize) {
        self.push(Inst::Load { dst: dst.into(), addr: addr.into(), size });
    }

    pub fn movcond_into(
        &mut self,
        dst: impl Into<Dest>,
        cond: Cond,
        lhs: impl Into<Value>,
        rhs: impl Into<Value>,
        then_: impl Into<Value>,
        else_: impl Into<Value>,
    ) {
        self.push(Inst::MovCond {
            cond,
            ty: Ty::I32,
            dst: dst.into(),
            lhs: lhs.into(),
            rhs: rhs.into(),
            then_: then_.into(),
            else_: else_.into(),
        });
    }

    pub fn setcond_into(&mut self, dst: impl Into<Dest>, cond: Cond, lhs: impl Into<Value>, rhs: impl Into<Value>) {
        self.push(Inst::SetCond { cond, ty: Ty::I32, dst: dst.into(), lhs: lhs.into(), rhs: rhs.into() });
    }

    pub fn deposit_into(&mut self, dst: impl Into<Dest>, base: impl Into<Value>, field: impl Into<Value>, pos: u32, len: u32) {
        self.push(Inst::Deposit { dst: dst.into(), base: base.into(), field: field.into(), pos, len });
    }

    pub fn call_void(&mut self, helper: Helper, args: Vec<Value>) {
        self.push(Inst::Call { helper, args, ret: None });
    }

    // ---- expression-style emission into fresh temps ----

    pub fn unary(&mut self, op: UnOp, src: impl Into<Value>) -> Temp {
        let t = self.temp(Ty::I32);
        self.emit_unary(op, Ty::I32, t, src);
        t
    }

    pub fn binary(&mut self, op: BinOp, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Temp {
        let t = self.temp(Ty::I32);
        self.emit_binary(op, Ty::I32, t, lhs, rhs);
        t
    }

    pub fn binary64(&mut self, op: BinOp, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Temp {
        let t = self.temp(Ty::I64);
        self.emit_binary(op, Ty::I64, t, lhs, rhs);
        t
    }

    pub fn copy(&mut self, src: impl Into<Value>) -> Temp {
        self.unary(UnOp::Mov, src)
    }

    pub fn add(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::Add, a, b)
    }

    pub fn sub(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::Sub, a, b)
    }

    pub fn mul(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::Mul, a, b)
    }

    pub fn and(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::And, a, b)
    }

    pub fn or(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::Or, a, b)
    }

    pub fn xor(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::Xor, a, b)
    }

    pub fn shl(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::Shl, a, b)
    }

    pub fn shr(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::Shr, a, b)
    }

    pub fn sar(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary(BinOp::Sar, a, b)
    }

    pub fn not(&mut self, a: impl Into<Value>) -> Temp {
        self.unary(UnOp::Not, a)
    }

    pub fn neg(&mut self, a: impl Into<Value>) -> Temp {
        self.unary(UnOp::Neg, a)
    }

    pub fn add64(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary64(BinOp::Add, a, b)
    }

    pub fn sub64(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary64(BinOp::Sub, a, b)
    }

    pub fn mul64(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary64(BinOp::Mul, a, b)
    }

    pub fn shl64(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary64(BinOp::Shl, a, b)
    }

    pub fn sar64(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Temp {
        self.binary64(BinOp::Sar, a, b)
    }

    pub fn setcond(&mut self, cond: Cond, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Temp {
        let t = self.temp(Ty::I32);
        self.setcond_into(t, cond, lhs, rhs);
        t
    }

    pub fn setcond64(&mut self, cond: Cond, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Temp {
        let t = self.temp(Ty::I32);
        self.push(Inst::SetCond { cond, ty: Ty::I64, dst: t.into(), lhs: lhs.into(), rhs: rhs.into() });
        t
    }

    pub fn movcond(
        &mut self,
        cond: Cond,
        lhs: impl Into<Value>,
        rhs: impl Into<Value>,
        then_: impl Into<Value>,
        else_: impl Into<Value>,
    ) -> Temp {
        let t = self.temp(Ty::I32);
        self.movcond_into(t, cond, lhs, rhs, then_, else_);
        t
    }

    /// 64-bit select on a 64-bit comparison.
    pub fn movcond64(
        &mut self,
        cond: Cond,
        lhs: impl Into<Value>,
        rhs: impl Into<Value>,
        then_: impl Into<Value>,
        else_: impl Into<Value>,
    ) -> Temp {
        let t = self.temp(Ty::I64);
        self.push(Inst::MovCond {
            cond,
            ty: Ty::I64,
            dst: t.into(),
            lhs: lhs.into(),
            rhs: rhs.into(),
            then_: then_.into(),
            else_: else_.into(),
        });
        t
    }

    pub fn deposit(&mut self, base: impl Into<Value>, field: impl Into<Value>, pos: u32, len: u32) -> Temp {
        let t = self.temp(Ty::I32);
        self.deposit_into(t, base, field, pos, len);
        t
    }

    pub fn extract(&mut self, src: impl Into<Value>, pos: u32, len: u32, signed: bool) -> Temp {
        let t = self.temp(Ty::I32);
        self.push(Inst::Extract { dst: t.into(), src: src.into(), pos, len, signed });
        t
    }

    pub fn concat(&mut self, lo: impl Into<Value>, hi: impl Into<Value>) -> Temp {
        let t = self.temp(Ty::I64);
        self.push(Inst::Concat { dst: t.into(), lo: lo.into(), hi: hi.into() });
        t
    }

    pub fn widen(&mut self, src: impl Into<Value>, signed: bool) -> Temp {
        let t = self.temp(Ty::I64);
        self.push(Inst::Widen { dst: t.into(), src: src.into(), signed });
        t
    }

    pub fn narrow(&mut self, src: impl Into<Value>, high: bool) -> Temp {
        let t = self.temp(Ty::I32);
        self.push(Inst::Narrow { dst: t.into(), src: src.into(), high });
        t
    }

    pub fn load(&mut self, addr: impl Into<Value>, size: MemSize) -> Temp {
        let ty = if size == MemSize::U64 { Ty::I64 } else { Ty::I32 };
        let t = self.temp(ty);
        self.load_into(t, addr, size);
        t
    }

    pub fn call(&mut self, helper: Helper, args: Vec<Value>) -> Temp {
        let t = self.temp(helper.ret().unwrap_or(Ty::I32));
        self.push(Inst::Call { helper, args, ret: Some(t.into()) });
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{imm, Reg};

    #[test]
    fn temps_are_numbered_in_order() {
        let mut b = BlockBuilder::new(0x100);
        let t0 = b.add(Reg::D(1), imm(1));
        let t1 = b.widen(t0, true);
        assert_eq!(t0.index, 0);
        assert_eq!(t1.index, 1);
        assert_eq!(t1.ty, Ty::I64);
    }

    #[test]
    fn rollback_discards_partial_instruction() {
        let mut b = BlockBuilder::new(0);
        b.mov(Reg::D(0), imm(1));
        let m = b.mark();
        b.mov(Reg::D(1), imm(2));
        b.mov(Reg::D(2), imm(3));
        b.rollback(m);
        assert_eq!(b.insts().len(), 1);
    }

    #[test]
    fn finish_closes_with_terminator() {
        let mut b = BlockBuilder::new(0x80);
        b.count_guest_insn();
        let blk = b.finish(0x82, Terminator::Goto(0x82));
        assert_eq!(blk.start, 0x80);
        assert_eq!(blk.guest_insns, 1);
        assert_eq!(blk.terminator, Terminator::Goto(0x82));
    }

    #[test]
    fn if_successors() {
        let t = Terminator::branch(Cond::Eq, Reg::D(1).into(), imm(0), 0x10, 0x4);
        assert_eq!(t.successors(), vec![0x10, 0x4]);
        assert!(Terminator::Dispatch.successors().is_empty());
    }
}
